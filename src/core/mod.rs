pub mod catalog;
pub mod finder;
pub mod names;
pub mod observer;
pub mod owned;

pub use crate::domain::model::{
    AppId, FailurePolicy, FetchFailure, FetchOutcome, FreeCatalog, FreeGamesReport, NamedApp,
};
pub use crate::domain::ports::{RunObserver, StoreApi};
pub use crate::utils::error::Result;

use crate::utils::error::FreebiesError;

/// 依失敗策略處理單次請求結果：降級時回傳 `None`，否則轉成錯誤
pub(crate) fn settle<T>(
    outcome: FetchOutcome<T>,
    policy: FailurePolicy,
    observer: &dyn RunObserver,
) -> Result<Option<T>> {
    match outcome {
        FetchOutcome::Fetched(value) => Ok(Some(value)),
        FetchOutcome::Failed(failure) => {
            observer.fetch_failed(&failure);
            match policy {
                FailurePolicy::Degrade => Ok(None),
                FailurePolicy::Propagate => Err(FreebiesError::UpstreamStatus(failure)),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// In-memory `StoreApi` that records every call it receives.
    #[derive(Default)]
    pub struct FakeStore {
        pub catalog: Option<FetchOutcome<FreeCatalog>>,
        pub owned: HashMap<String, FetchOutcome<HashSet<AppId>>>,
        pub names: HashMap<AppId, FetchOutcome<Option<String>>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeStore {
        pub fn with_catalog(appids: &[AppId]) -> Self {
            let catalog: FreeCatalog = serde_json::from_value(serde_json::json!({
                "response": {
                    "ids": appids.iter().map(|id| serde_json::json!({"appid": id})).collect::<Vec<_>>()
                }
            }))
            .unwrap();
            Self {
                catalog: Some(FetchOutcome::Fetched(catalog)),
                ..Self::default()
            }
        }

        pub fn owns(mut self, steam_id: &str, appids: &[AppId]) -> Self {
            self.owned.insert(
                steam_id.to_string(),
                FetchOutcome::Fetched(appids.iter().copied().collect()),
            );
            self
        }

        pub fn owned_fails(mut self, steam_id: &str, status: u16) -> Self {
            self.owned.insert(
                steam_id.to_string(),
                FetchOutcome::Failed(FetchFailure {
                    endpoint: crate::domain::model::Endpoint::OwnedGames,
                    status,
                }),
            );
            self
        }

        pub fn named(mut self, appid: AppId, name: &str) -> Self {
            self.names
                .insert(appid, FetchOutcome::Fetched(Some(name.to_string())));
            self
        }

        pub fn name_fails(mut self, appid: AppId, status: u16) -> Self {
            self.names.insert(
                appid,
                FetchOutcome::Failed(FetchFailure {
                    endpoint: crate::domain::model::Endpoint::AppDetails,
                    status,
                }),
            );
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl StoreApi for FakeStore {
        async fn owned_apps(&self, steam_id: &str) -> Result<FetchOutcome<HashSet<AppId>>> {
            self.record(format!("owned:{}", steam_id));
            Ok(self
                .owned
                .get(steam_id)
                .cloned()
                .unwrap_or_else(|| FetchOutcome::Fetched(HashSet::new())))
        }

        async fn free_catalog(&self) -> Result<FetchOutcome<FreeCatalog>> {
            self.record("catalog".to_string());
            Ok(self
                .catalog
                .clone()
                .unwrap_or_else(|| FetchOutcome::Fetched(FreeCatalog::default())))
        }

        async fn app_name(&self, appid: AppId) -> Result<FetchOutcome<Option<String>>> {
            self.record(format!("name:{}", appid));
            Ok(self
                .names
                .get(&appid)
                .cloned()
                .unwrap_or(FetchOutcome::Fetched(None)))
        }
    }

    /// 記錄所有事件的觀察者
    #[derive(Default)]
    pub struct RecordingObserver {
        pub events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        pub fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl RunObserver for RecordingObserver {
        fn catalog_fetched(&self, appids: &[AppId]) {
            self.events
                .lock()
                .unwrap()
                .push(format!("catalog:{}", appids.len()));
        }

        fn fetch_failed(&self, failure: &FetchFailure) {
            self.events.lock().unwrap().push(format!("failed:{}", failure));
        }

        fn name_unresolved(&self, appid: AppId) {
            self.events
                .lock()
                .unwrap()
                .push(format!("unresolved:{}", appid));
        }

        fn user_completed(&self, steam_id: &str, games: &[NamedApp]) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{}:{}", steam_id, games.len()));
        }
    }
}
