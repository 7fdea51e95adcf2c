use crate::domain::model::{AppId, Endpoint, FetchFailure, FetchOutcome, FreeCatalog};
use crate::domain::ports::StoreApi;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

pub const DEFAULT_STORE_QUERY_URL: &str =
    "https://api.steampowered.com/IStoreQueryService/Query/v1/";
pub const DEFAULT_OWNED_GAMES_URL: &str =
    "https://api.steampowered.com/IPlayerService/GetOwnedGames/v1/";
pub const DEFAULT_APP_DETAILS_URL: &str = "https://store.steampowered.com/api/appdetails";

/// 單頁上限。沒有分頁，超過 100 筆的促銷項目不會出現在結果中。
pub const CATALOG_PAGE_SIZE: u32 = 100;
pub const MIN_DISCOUNT_PERCENT: u32 = 99;
pub const COUNTRY_CODE: &str = "US";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamEndpoints {
    pub store_query: String,
    pub owned_games: String,
    pub app_details: String,
}

impl Default for SteamEndpoints {
    fn default() -> Self {
        Self {
            store_query: DEFAULT_STORE_QUERY_URL.to_string(),
            owned_games: DEFAULT_OWNED_GAMES_URL.to_string(),
            app_details: DEFAULT_APP_DETAILS_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct OwnedGamesResponse {
    #[serde(default)]
    response: OwnedGamesBody,
}

#[derive(Debug, Default, Deserialize)]
struct OwnedGamesBody {
    #[serde(default)]
    games: Vec<OwnedGame>,
}

#[derive(Debug, Deserialize)]
struct OwnedGame {
    appid: AppId,
}

#[derive(Debug, Default, Deserialize)]
struct AppDetailsEntry {
    #[serde(default)]
    data: Option<AppDetailsData>,
}

#[derive(Debug, Default, Deserialize)]
struct AppDetailsData {
    #[serde(default)]
    name: Option<String>,
}

/// reqwest-backed access to the Steam Web API and store API.
pub struct SteamWebClient {
    client: Client,
    api_key: String,
    endpoints: SteamEndpoints,
}

impl SteamWebClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoints: SteamEndpoints,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let user_agent = format!("steam-freebies/{}", env!("CARGO_PKG_VERSION"));
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: api_key.into(),
            endpoints,
        })
    }

    pub fn with_defaults(api_key: impl Into<String>) -> Result<Self> {
        Self::new(api_key, SteamEndpoints::default(), None)
    }

    /// `IStoreQueryService/Query` 的 `input_json` 參數
    pub fn free_catalog_query() -> serde_json::Value {
        serde_json::json!({
            "query": {
                "start": "0",
                "count": CATALOG_PAGE_SIZE.to_string(),
                "filters": {
                    "type_filters": {
                        "include_bundles": "true",
                        "include_mods": "true",
                        "include_dlc": "true",
                        "include_games": "true"
                    },
                    "price_filters": {
                        "min_discount_percent": MIN_DISCOUNT_PERCENT.to_string()
                    }
                }
            },
            "context": {
                "country_code": COUNTRY_CODE
            }
        })
    }

    fn failure(endpoint: Endpoint, response: &Response) -> FetchFailure {
        FetchFailure {
            endpoint,
            status: response.status().as_u16(),
        }
    }
}

#[async_trait]
impl StoreApi for SteamWebClient {
    async fn owned_apps(&self, steam_id: &str) -> Result<FetchOutcome<HashSet<AppId>>> {
        tracing::debug!("Fetching owned appids for Steam ID: {}", steam_id);
        let response = self
            .client
            .get(&self.endpoints.owned_games)
            .query(&[
                ("key", self.api_key.as_str()),
                ("steamid", steam_id),
                ("include_appinfo", "false"),
            ])
            .send()
            .await?;

        tracing::debug!("Owned games response status: {}", response.status());
        if !response.status().is_success() {
            return Ok(FetchOutcome::Failed(Self::failure(
                Endpoint::OwnedGames,
                &response,
            )));
        }

        let data: OwnedGamesResponse = response.json().await?;
        Ok(FetchOutcome::Fetched(
            data.response.games.into_iter().map(|game| game.appid).collect(),
        ))
    }

    async fn free_catalog(&self) -> Result<FetchOutcome<FreeCatalog>> {
        tracing::debug!("Fetching free games from {}", self.endpoints.store_query);
        let input_json = serde_json::to_string(&Self::free_catalog_query())?;
        let response = self
            .client
            .get(&self.endpoints.store_query)
            .query(&[("key", self.api_key.as_str()), ("input_json", input_json.as_str())])
            .send()
            .await?;

        tracing::debug!("Store query response status: {}", response.status());
        if !response.status().is_success() {
            return Ok(FetchOutcome::Failed(Self::failure(
                Endpoint::StoreQuery,
                &response,
            )));
        }

        let catalog: FreeCatalog = response.json().await?;
        Ok(FetchOutcome::Fetched(catalog))
    }

    async fn app_name(&self, appid: AppId) -> Result<FetchOutcome<Option<String>>> {
        let response = self
            .client
            .get(&self.endpoints.app_details)
            .query(&[("appids", appid)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(FetchOutcome::Failed(Self::failure(
                Endpoint::AppDetails,
                &response,
            )));
        }

        let mut details: HashMap<String, AppDetailsEntry> = response.json().await?;
        let name = details
            .remove(&appid.to_string())
            .and_then(|entry| entry.data)
            .and_then(|data| data.name)
            .filter(|name| !name.is_empty());

        Ok(FetchOutcome::Fetched(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> SteamWebClient {
        let endpoints = SteamEndpoints {
            store_query: server.url("/IStoreQueryService/Query/v1/"),
            owned_games: server.url("/IPlayerService/GetOwnedGames/v1/"),
            app_details: server.url("/api/appdetails"),
        };
        SteamWebClient::new("test-key", endpoints, None).unwrap()
    }

    #[test]
    fn test_free_catalog_query_constants() {
        let query = SteamWebClient::free_catalog_query();

        assert_eq!(query["query"]["start"], "0");
        assert_eq!(query["query"]["count"], "100");
        assert_eq!(
            query["query"]["filters"]["price_filters"]["min_discount_percent"],
            "99"
        );
        assert_eq!(
            query["query"]["filters"]["type_filters"]["include_mods"],
            "true"
        );
        assert_eq!(query["context"]["country_code"], "US");
    }

    #[tokio::test]
    async fn test_owned_apps_sends_key_and_steamid() {
        let server = MockServer::start();
        let owned_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/IPlayerService/GetOwnedGames/v1/")
                .query_param("key", "test-key")
                .query_param("steamid", "76561198000000001")
                .query_param("include_appinfo", "false");
            then.status(200).json_body(serde_json::json!({
                "response": {"game_count": 2, "games": [{"appid": 10}, {"appid": 20}]}
            }));
        });

        let client = client_for(&server);
        let owned = client.owned_apps("76561198000000001").await.unwrap();

        owned_mock.assert();
        assert_eq!(owned, FetchOutcome::Fetched(HashSet::from([10, 20])));
    }

    #[tokio::test]
    async fn test_owned_apps_private_profile_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/IPlayerService/GetOwnedGames/v1/");
            then.status(200).json_body(serde_json::json!({"response": {}}));
        });

        let client = client_for(&server);
        let owned = client.owned_apps("1").await.unwrap();

        assert_eq!(owned, FetchOutcome::Fetched(HashSet::new()));
    }

    #[tokio::test]
    async fn test_owned_apps_error_status_is_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/IPlayerService/GetOwnedGames/v1/");
            then.status(401);
        });

        let client = client_for(&server);
        let owned = client.owned_apps("1").await.unwrap();

        assert_eq!(
            owned.failure(),
            Some(&FetchFailure {
                endpoint: Endpoint::OwnedGames,
                status: 401
            })
        );
    }

    #[tokio::test]
    async fn test_free_catalog_sends_input_json() {
        let server = MockServer::start();
        let catalog_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/IStoreQueryService/Query/v1/")
                .query_param("key", "test-key")
                .query_param_exists("input_json");
            then.status(200).json_body(serde_json::json!({
                "response": {"ids": [{"appid": 100}, {"packageid": 5}]}
            }));
        });

        let client = client_for(&server);
        let catalog = client.free_catalog().await.unwrap().ok().unwrap();

        catalog_mock.assert();
        assert_eq!(catalog.appids(), vec![100]);
    }

    #[tokio::test]
    async fn test_app_name_reads_data_name() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/appdetails").query_param("appids", "100");
            then.status(200).json_body(serde_json::json!({
                "100": {"success": true, "data": {"name": "Game X", "type": "game"}}
            }));
        });

        let client = client_for(&server);
        let name = client.app_name(100).await.unwrap();

        assert_eq!(name, FetchOutcome::Fetched(Some("Game X".to_string())));
    }

    #[tokio::test]
    async fn test_app_name_missing_or_empty_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/appdetails").query_param("appids", "7");
            then.status(200)
                .json_body(serde_json::json!({"7": {"success": false}}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/appdetails").query_param("appids", "8");
            then.status(200)
                .json_body(serde_json::json!({"8": {"success": true, "data": {"name": ""}}}));
        });

        let client = client_for(&server);

        assert_eq!(client.app_name(7).await.unwrap(), FetchOutcome::Fetched(None));
        assert_eq!(client.app_name(8).await.unwrap(), FetchOutcome::Fetched(None));
    }

    #[tokio::test]
    async fn test_transport_error_is_err() {
        let endpoints = SteamEndpoints {
            store_query: "http://127.0.0.1:1/query".to_string(),
            owned_games: "http://127.0.0.1:1/owned".to_string(),
            app_details: "http://127.0.0.1:1/details".to_string(),
        };
        let client = SteamWebClient::new("k", endpoints, Some(Duration::from_secs(2))).unwrap();

        assert!(client.free_catalog().await.is_err());
    }
}
