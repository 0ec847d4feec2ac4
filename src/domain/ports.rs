use crate::domain::model::{RaffleInfo, Reservation, ReservationRequest, SlotView};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn ledger_file(&self) -> &str;
    fn raffle_info(&self) -> RaffleInfo;
}

/// 呈現層（CLI、UI、服務）呼叫核心的介面
#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn slots(&self) -> Vec<SlotView>;
    async fn reserve(&self, request: ReservationRequest) -> Result<Reservation>;
    async fn reservations(&self) -> Vec<Reservation>;
    async fn info(&self) -> RaffleInfo;
}
