use crate::core::ledger::ReservationLedger;
use crate::domain::model::Reservation;
use crate::utils::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

/// 帳本的持久化格式：每筆預約一個記錄，依建立順序排列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub reservations: Vec<SnapshotRecord>,
}

/// 未驗證的記錄；號碼在重播時才解析，錯誤才能指出是哪一筆
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub number: String,
    pub name: String,
    pub phone: String,
}

impl From<&Reservation> for SnapshotRecord {
    fn from(reservation: &Reservation) -> Self {
        Self {
            number: reservation.slot.to_string(),
            name: reservation.name.clone(),
            phone: reservation.phone.clone(),
        }
    }
}

impl Snapshot {
    pub fn from_ledger(ledger: &ReservationLedger) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            reservations: ledger
                .list_reservations()
                .iter()
                .map(SnapshotRecord::from)
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// 逐筆重播預約，確保唯一性與欄位規則在還原時同樣成立
    pub fn into_ledger(self) -> Result<ReservationLedger> {
        if self.version != SNAPSHOT_VERSION {
            return Err(LedgerError::CorruptSnapshot {
                message: format!(
                    "unsupported snapshot version {} (expected {})",
                    self.version, SNAPSHOT_VERSION
                ),
            });
        }

        let mut ledger = ReservationLedger::new();
        for (index, record) in self.reservations.iter().enumerate() {
            ledger
                .reserve(&record.number, &record.name, &record.phone)
                .map_err(|e| LedgerError::CorruptSnapshot {
                    message: format!("record {}: {}", index, e),
                })?;
        }
        Ok(ledger)
    }
}
