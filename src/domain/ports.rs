use crate::domain::model::{AppId, FetchFailure, FetchOutcome, FreeCatalog, NamedApp};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Steam 的三個端點。傳輸層錯誤回傳 `Err`，非成功狀態碼回傳 `FetchOutcome::Failed`。
#[async_trait]
pub trait StoreApi: Send + Sync {
    async fn owned_apps(&self, steam_id: &str) -> Result<FetchOutcome<HashSet<AppId>>>;

    async fn free_catalog(&self) -> Result<FetchOutcome<FreeCatalog>>;

    /// `Fetched(None)` 表示請求成功但沒有可用的名稱
    async fn app_name(&self, appid: AppId) -> Result<FetchOutcome<Option<String>>>;
}

/// Run events, emitted by the finder. Every method defaults to a no-op.
pub trait RunObserver: Send + Sync {
    fn catalog_fetched(&self, _appids: &[AppId]) {}

    fn owned_fetched(&self, _steam_id: &str, _owned: usize) {}

    fn fetch_failed(&self, _failure: &FetchFailure) {}

    fn name_unresolved(&self, _appid: AppId) {}

    fn user_completed(&self, _steam_id: &str, _games: &[NamedApp]) {}
}
