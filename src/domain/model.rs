use serde::{Deserialize, Serialize};
use std::fmt;

/// Steam 商店項目 id (遊戲、DLC、組合包或模組)
pub type AppId = u32;

/// Steam 帳號 id，視為不透明字串
pub type SteamId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApp {
    pub appid: AppId,
    pub name: String,
}

impl NamedApp {
    pub fn new(appid: AppId, name: impl Into<String>) -> Self {
        Self {
            appid,
            name: name.into(),
        }
    }

    pub fn store_url(&self) -> String {
        format!("https://store.steampowered.com/app/{}", self.appid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub appid: Option<AppId>,
}

/// `IStoreQueryService/Query` 的回應 (只保留需要的欄位)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FreeCatalog {
    #[serde(default)]
    pub response: CatalogBody,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogBody {
    #[serde(default)]
    pub ids: Vec<CatalogEntry>,
}

impl FreeCatalog {
    /// 依上游順序取出帶有 appid 的項目
    pub fn appids(&self) -> Vec<AppId> {
        self.response.ids.iter().filter_map(|entry| entry.appid).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endpoint {
    StoreQuery,
    OwnedGames,
    AppDetails,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::StoreQuery => "store-query",
            Endpoint::OwnedGames => "owned-games",
            Endpoint::AppDetails => "app-details",
        };
        f.write_str(name)
    }
}

/// A request that reached Steam but came back with a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub endpoint: Endpoint,
    pub status: u16,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fetch failed with HTTP {}", self.endpoint, self.status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Failed(FetchFailure),
}

impl<T> FetchOutcome<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            FetchOutcome::Fetched(value) => Some(value),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchOutcome::Fetched(_) => None,
            FetchOutcome::Failed(failure) => Some(failure),
        }
    }
}

/// 失敗時是降級為空結果，還是中止整次執行
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Degrade,
    Propagate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFreeGames {
    pub steam_id: SteamId,
    pub games: Vec<NamedApp>,
}

/// 每個帳號尚未擁有的免費遊戲，依輸入順序排列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FreeGamesReport {
    users: Vec<UserFreeGames>,
}

impl FreeGamesReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the games of an already present id in place.
    pub fn insert(&mut self, steam_id: impl Into<SteamId>, games: Vec<NamedApp>) {
        let steam_id = steam_id.into();
        match self.users.iter_mut().find(|user| user.steam_id == steam_id) {
            Some(existing) => existing.games = games,
            None => self.users.push(UserFreeGames { steam_id, games }),
        }
    }

    pub fn get(&self, steam_id: &str) -> Option<&[NamedApp]> {
        self.users
            .iter()
            .find(|user| user.steam_id == steam_id)
            .map(|user| user.games.as_slice())
    }

    pub fn users(&self) -> &[UserFreeGames] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn total_games(&self) -> usize {
        self.users.iter().map(|user| user.games.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_skips_entries_without_appid() {
        let catalog: FreeCatalog = serde_json::from_value(serde_json::json!({
            "response": {
                "ids": [{"appid": 30}, {"packageid": 7}, {"appid": 10}, {"bundleid": 2}]
            }
        }))
        .unwrap();

        assert_eq!(catalog.appids(), vec![30, 10]);
    }

    #[test]
    fn test_catalog_missing_response_is_empty() {
        let catalog: FreeCatalog = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(catalog.appids().is_empty());
    }

    #[test]
    fn test_report_keeps_first_position_for_repeated_id() {
        let mut report = FreeGamesReport::new();
        report.insert("a", vec![]);
        report.insert("b", vec![NamedApp::new(1, "One")]);
        report.insert("a", vec![NamedApp::new(2, "Two")]);

        assert_eq!(report.len(), 2);
        assert_eq!(report.users()[0].steam_id, "a");
        assert_eq!(report.get("a"), Some(&[NamedApp::new(2, "Two")][..]));
        assert_eq!(report.total_games(), 2);
    }

    #[test]
    fn test_failure_display() {
        let failure = FetchFailure {
            endpoint: Endpoint::StoreQuery,
            status: 503,
        };
        assert_eq!(failure.to_string(), "store-query fetch failed with HTTP 503");
        assert_eq!(FetchOutcome::<()>::Failed(failure).failure(), Some(&failure));
    }
}
