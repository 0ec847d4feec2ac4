use crate::core::ledger::ReservationLedger;
use crate::core::snapshot::Snapshot;
use crate::domain::model::{RaffleInfo, Reservation, ReservationRequest, SlotId, SlotView};
use crate::domain::ports::{ConfigProvider, ReservationApi, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 共用的帳本控制代碼。
///
/// `reserve` 在寫鎖內完成驗證、寫入儲存與提交；讀取只拿讀鎖，
/// 因此讀者只會看到提交前或提交後的狀態。
pub struct ReservationService<S: Storage> {
    ledger: Arc<RwLock<ReservationLedger>>,
    storage: Arc<S>,
    ledger_file: String,
    info: RaffleInfo,
}

impl<S: Storage> Clone for ReservationService<S> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            storage: Arc::clone(&self.storage),
            ledger_file: self.ledger_file.clone(),
            info: self.info.clone(),
        }
    }
}

impl<S: Storage> ReservationService<S> {
    /// 載入既有快照；檔案不存在時從空帳本開始
    pub async fn open(storage: S, ledger_file: impl Into<String>, info: RaffleInfo) -> Result<Self> {
        let ledger_file = ledger_file.into();

        let ledger = if storage.exists(&ledger_file).await? {
            let data = storage.read_file(&ledger_file).await?;
            let ledger = Snapshot::from_json(&data)?.into_ledger()?;
            tracing::info!(
                "📂 Loaded ledger from {} ({} reservations)",
                ledger_file,
                ledger.occupancy()
            );
            ledger
        } else {
            tracing::info!("🆕 No ledger at {}, starting empty", ledger_file);
            ReservationLedger::new()
        };

        Ok(Self {
            ledger: Arc::new(RwLock::new(ledger)),
            storage: Arc::new(storage),
            ledger_file,
            info,
        })
    }

    pub async fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Result<Self> {
        Self::open(storage, config.ledger_file(), config.raffle_info()).await
    }

    pub async fn is_reserved(&self, slot: SlotId) -> bool {
        self.ledger.read().await.is_reserved(slot)
    }

    pub async fn occupancy(&self) -> usize {
        self.ledger.read().await.occupancy()
    }

    pub async fn available_slots(&self) -> Vec<SlotId> {
        self.ledger.read().await.available_slots()
    }

    async fn persist(&self, ledger: &ReservationLedger) -> Result<()> {
        let data = Snapshot::from_ledger(ledger).to_json()?;
        self.storage.write_file(&self.ledger_file, &data).await?;
        tracing::debug!("💾 Saved ledger to {}", self.ledger_file);
        Ok(())
    }
}

#[async_trait]
impl<S: Storage> ReservationApi for ReservationService<S> {
    async fn slots(&self) -> Vec<SlotView> {
        self.ledger.read().await.slot_views()
    }

    async fn reserve(&self, request: ReservationRequest) -> Result<Reservation> {
        let mut ledger = self.ledger.write().await;

        // 先在副本上驗證並寫入儲存，成功後才替換記憶體中的帳本。
        // 複製成本受固定的 100 個號碼限制
        let mut staged = ledger.clone();
        let reservation = match staged.reserve(&request.slot, &request.name, &request.phone) {
            Ok(reservation) => reservation,
            Err(e) => {
                tracing::warn!(slot = %request.slot, kind = e.kind(), "claim rejected: {}", e);
                return Err(e.into());
            }
        };

        if let Err(e) = self.persist(&staged).await {
            tracing::error!(slot = %request.slot, "❌ Failed to persist claim: {}", e);
            return Err(e);
        }
        *ledger = staged;

        tracing::info!(
            "✅ Slot {} reserved ({} of 100 taken)",
            reservation.slot,
            ledger.occupancy()
        );
        Ok(reservation)
    }

    async fn reservations(&self) -> Vec<Reservation> {
        self.ledger.read().await.list_reservations().to_vec()
    }

    async fn info(&self) -> RaffleInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{LedgerError, ReservationError};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail_writes: Arc<AtomicBool>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                LedgerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(LedgerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn exists(&self, path: &str) -> Result<bool> {
            Ok(self.files.lock().await.contains_key(path))
        }
    }

    #[tokio::test]
    async fn test_reserve_persists_snapshot() {
        let storage = MockStorage::default();
        let service = ReservationService::open(storage.clone(), "ledger.json", RaffleInfo::default())
            .await
            .unwrap();

        service
            .reserve(ReservationRequest::new("17", "Ana García", "555-0100"))
            .await
            .unwrap();

        let saved = storage.get_file("ledger.json").await.unwrap();
        let snapshot = Snapshot::from_json(&saved).unwrap();
        assert_eq!(snapshot.reservations.len(), 1);
        assert_eq!(snapshot.reservations[0].number, "17");
    }

    #[tokio::test]
    async fn test_rejected_claim_does_not_write() {
        let storage = MockStorage::default();
        let service = ReservationService::open(storage.clone(), "ledger.json", RaffleInfo::default())
            .await
            .unwrap();

        let err = service
            .reserve(ReservationRequest::new("17", "", "555-0100"))
            .await
            .unwrap_err();

        assert_eq!(err.as_reservation_error(), Some(&ReservationError::MissingName));
        assert!(storage.get_file("ledger.json").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_ledger_unchanged() {
        let storage = MockStorage::default();
        let service = ReservationService::open(storage.clone(), "ledger.json", RaffleInfo::default())
            .await
            .unwrap();
        storage.fail_writes.store(true, Ordering::SeqCst);

        let err = tokio_test::assert_err!(
            service
                .reserve(ReservationRequest::new("08", "Ana", "555-0100"))
                .await
        );

        assert!(matches!(err, LedgerError::IoError(_)));
        assert!(!service.is_reserved(SlotId::parse("08").unwrap()).await);
        assert!(service.reservations().await.is_empty());

        // 儲存恢復後同一號碼仍可預約
        storage.fail_writes.store(false, Ordering::SeqCst);
        tokio_test::assert_ok!(
            service
                .reserve(ReservationRequest::new("08", "Ana", "555-0100"))
                .await
        );
    }

    #[tokio::test]
    async fn test_reopen_restores_state() {
        let storage = MockStorage::default();
        let service = ReservationService::open(storage.clone(), "ledger.json", RaffleInfo::default())
            .await
            .unwrap();
        service
            .reserve(ReservationRequest::new("50", "Ana", "555-0100"))
            .await
            .unwrap();
        service
            .reserve(ReservationRequest::new("03", "Luis", "555-0101"))
            .await
            .unwrap();

        let reopened = ReservationService::open(storage, "ledger.json", RaffleInfo::default())
            .await
            .unwrap();
        let order: Vec<String> = reopened
            .reservations()
            .await
            .iter()
            .map(|r| r.slot.to_string())
            .collect();
        assert_eq!(order, vec!["50", "03"]);
        assert_eq!(reopened.occupancy().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_claims_for_same_slot() {
        let service = ReservationService::open(MockStorage::default(), "ledger.json", RaffleInfo::default())
            .await
            .unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .reserve(ReservationRequest::new("33", format!("Player {}", i), "555-0000"))
                        .await
                })
            })
            .collect();

        let mut wins = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(e) => {
                    assert!(matches!(
                        e.as_reservation_error(),
                        Some(ReservationError::SlotAlreadyReserved { .. })
                    ));
                    conflicts += 1;
                }
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(service.reservations().await.len(), 1);
    }
}
