use crate::core::settle;
use crate::domain::model::{AppId, FailurePolicy, NamedApp};
use crate::domain::ports::{RunObserver, StoreApi};
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};
use std::pin::pin;

/// 逐一查詢 appid 的名稱。
///
/// `concurrency` 為同時進行的請求上限，`1` 代表完全循序。無論並行與否，
/// 輸出順序都與輸入相同；查不到名稱或請求失敗的 appid 會被略過。
pub async fn resolve_names<A: StoreApi + ?Sized>(
    api: &A,
    appids: &[AppId],
    concurrency: usize,
    policy: FailurePolicy,
    observer: &dyn RunObserver,
) -> Result<Vec<NamedApp>> {
    tracing::debug!("Fetching app names for appids: {:?}", appids);

    let mut outcomes = pin!(stream::iter(appids.iter().copied())
        .map(|appid| async move { (appid, api.app_name(appid).await) })
        .buffered(concurrency.max(1)));

    // 第一個錯誤即中止，丟棄 stream 以停止後續請求
    let mut named = Vec::with_capacity(appids.len());
    while let Some((appid, outcome)) = outcomes.next().await {
        match settle(outcome?, policy, observer)?.flatten() {
            Some(name) => named.push(NamedApp::new(appid, name)),
            None => observer.name_unresolved(appid),
        }
    }

    Ok(named)
}
