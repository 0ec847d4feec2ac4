pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, Settings};
pub use core::{ledger::ReservationLedger, service::ReservationService};
pub use domain::model::{RaffleInfo, Reservation, ReservationRequest, SlotId, SlotStatus, SlotView};
pub use domain::ports::ReservationApi;
pub use utils::error::{LedgerError, ReservationError, Result};
