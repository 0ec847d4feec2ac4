// Presentation helpers for the `raffle` CLI: plain-text renderings of the board,
// the reservations table and the raffle header.

pub mod board;
