pub mod export;
pub mod ledger;
pub mod service;
pub mod snapshot;

pub use crate::domain::model::{RaffleInfo, Reservation, ReservationRequest, SlotId, SlotStatus, SlotView};
pub use crate::domain::ports::{ConfigProvider, ReservationApi, Storage};
pub use crate::utils::error::Result;
