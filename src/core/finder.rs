use crate::core::catalog::fetch_free_catalog;
use crate::core::names::resolve_names;
use crate::core::observer::TracingObserver;
use crate::core::owned::{fetch_owned, unowned_apps};
use crate::domain::model::{FailurePolicy, FreeGamesReport};
use crate::domain::ports::{RunObserver, StoreApi};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_USER_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderOptions {
    /// 帳號之間的固定等待時間，避免觸發 Steam 的速率限制
    pub user_pause: Duration,
    pub name_concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            user_pause: DEFAULT_USER_PAUSE,
            name_concurrency: 1,
            failure_policy: FailurePolicy::Degrade,
        }
    }
}

/// Finds free-to-claim apps each account does not own yet.
pub struct FreeGamesFinder<A: StoreApi> {
    api: A,
    options: FinderOptions,
    observer: Arc<dyn RunObserver>,
}

impl<A: StoreApi> FreeGamesFinder<A> {
    pub fn new(api: A, options: FinderOptions) -> Self {
        Self {
            api,
            options,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn all_new_free_games(&self, steam_ids: &[String]) -> Result<FreeGamesReport> {
        tracing::debug!("Starting the free games fetch for {} accounts", steam_ids.len());
        let policy = self.options.failure_policy;
        let observer = self.observer.as_ref();

        let Some(catalog) = fetch_free_catalog(&self.api, policy, observer).await? else {
            tracing::info!("No free games found or an error occurred.");
            return Ok(FreeGamesReport::new());
        };

        let appids = catalog.appids();
        observer.catalog_fetched(&appids);

        let mut report = FreeGamesReport::new();
        if appids.is_empty() {
            for steam_id in steam_ids {
                report.insert(steam_id.as_str(), Vec::new());
            }
            return Ok(report);
        }

        for (index, steam_id) in steam_ids.iter().enumerate() {
            if index > 0 && !self.options.user_pause.is_zero() {
                tokio::time::sleep(self.options.user_pause).await;
            }

            let owned = fetch_owned(&self.api, steam_id, policy, observer).await?;
            let unowned = unowned_apps(&appids, &owned);
            tracing::debug!("Unowned appids for {}: {:?}", steam_id, unowned);

            let games = if unowned.is_empty() {
                Vec::new()
            } else {
                resolve_names(
                    &self.api,
                    &unowned,
                    self.options.name_concurrency,
                    policy,
                    observer,
                )
                .await?
            };

            observer.user_completed(steam_id, &games);
            report.insert(steam_id.as_str(), games);
        }

        Ok(report)
    }
}
