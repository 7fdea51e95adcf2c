pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{render_report, OutputFormat, SteamEndpoints, SteamWebClient};
pub use config::{RunSettings, TomlConfig};
pub use crate::core::finder::{FinderOptions, FreeGamesFinder};
pub use domain::model::{AppId, FailurePolicy, FreeGamesReport, NamedApp, SteamId};
pub use utils::error::{FreebiesError, Result};

/// 以預設端點與選項找出每個帳號尚未擁有的免費遊戲
pub async fn all_new_free_games(steam_ids: &[String], api_key: &str) -> Result<FreeGamesReport> {
    let client = SteamWebClient::with_defaults(api_key)?;
    FreeGamesFinder::new(client, FinderOptions::default())
        .all_new_free_games(steam_ids)
        .await
}
