use crate::core::settle;
use crate::domain::model::{AppId, FailurePolicy};
use crate::domain::ports::{RunObserver, StoreApi};
use crate::utils::error::Result;
use std::collections::HashSet;

/// Owned appids for one account. A degraded failure counts as owning nothing.
pub async fn fetch_owned<A: StoreApi + ?Sized>(
    api: &A,
    steam_id: &str,
    policy: FailurePolicy,
    observer: &dyn RunObserver,
) -> Result<HashSet<AppId>> {
    let outcome = api.owned_apps(steam_id).await?;
    let owned = settle(outcome, policy, observer)?.unwrap_or_default();
    observer.owned_fetched(steam_id, owned.len());
    Ok(owned)
}

/// 免費清單中尚未擁有的 appid，保留清單順序
pub fn unowned_apps(catalog: &[AppId], owned: &HashSet<AppId>) -> Vec<AppId> {
    catalog
        .iter()
        .copied()
        .filter(|appid| !owned.contains(appid))
        .collect()
}
