use crate::core::settle;
use crate::domain::model::{FailurePolicy, FreeCatalog};
use crate::domain::ports::{RunObserver, StoreApi};
use crate::utils::error::Result;

/// 取得目前的免費促銷清單。`None` 代表這次執行沒有可用的清單。
pub async fn fetch_free_catalog<A: StoreApi + ?Sized>(
    api: &A,
    policy: FailurePolicy,
    observer: &dyn RunObserver,
) -> Result<Option<FreeCatalog>> {
    let outcome = api.free_catalog().await?;
    settle(outcome, policy, observer)
}
