use crate::domain::model::{AppId, FetchFailure, NamedApp};
use crate::domain::ports::RunObserver;

/// 將執行事件轉成 tracing 日誌。subscriber 由呼叫端安裝。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn catalog_fetched(&self, appids: &[AppId]) {
        tracing::info!("🎁 Free catalog has {} apps", appids.len());
        tracing::debug!("Free catalog appids: {:?}", appids);
    }

    fn owned_fetched(&self, steam_id: &str, owned: usize) {
        tracing::debug!("Steam ID {} owns {} apps", steam_id, owned);
    }

    fn fetch_failed(&self, failure: &FetchFailure) {
        tracing::warn!("❌ {}", failure);
    }

    fn name_unresolved(&self, appid: AppId) {
        tracing::debug!("No name available for appid {}", appid);
    }

    fn user_completed(&self, steam_id: &str, games: &[NamedApp]) {
        tracing::info!("✅ {}: {} new free games", steam_id, games.len());
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}
