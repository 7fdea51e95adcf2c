use crate::adapters::formatter::OutputFormat;
use crate::adapters::steam::SteamEndpoints;
use crate::config::toml_config::TomlConfig;
use crate::core::finder::FinderOptions;
use crate::domain::model::FailurePolicy;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field,
    validate_steam_ids, validate_url, Validate,
};
use std::time::Duration;

/// 命令列提供的覆寫值，優先於設定檔
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_key: Option<String>,
    pub steam_ids: Vec<String>,
    pub pause_ms: Option<u64>,
    pub name_concurrency: Option<usize>,
    pub strict: bool,
    pub timeout_seconds: Option<u64>,
    pub format: Option<OutputFormat>,
    pub output_path: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub api_key: String,
    pub steam_ids: Vec<String>,
    pub endpoints: SteamEndpoints,
    pub finder: FinderOptions,
    pub request_timeout: Option<Duration>,
    pub format: OutputFormat,
    pub output_path: Option<String>,
}

impl RunSettings {
    /// 合併順序：命令列 > 設定檔 > 預設值
    pub fn resolve(file: TomlConfig, overrides: SettingsOverrides) -> Result<Self> {
        let api_key = overrides.api_key.or(file.steam.api_key);
        let api_key = validate_required_field("steam.api_key", &api_key)?.clone();

        let steam_ids = if overrides.steam_ids.is_empty() {
            file.steam.steam_ids.unwrap_or_default()
        } else {
            overrides.steam_ids
        };

        let defaults = SteamEndpoints::default();
        let endpoints = SteamEndpoints {
            store_query: file.endpoints.store_query.unwrap_or(defaults.store_query),
            owned_games: file.endpoints.owned_games.unwrap_or(defaults.owned_games),
            app_details: file.endpoints.app_details.unwrap_or(defaults.app_details),
        };

        let default_options = FinderOptions::default();
        let user_pause = overrides
            .pause_ms
            .or(file.run.pause_ms)
            .map(Duration::from_millis)
            .unwrap_or(default_options.user_pause);
        let failure_policy = if overrides.strict {
            FailurePolicy::Propagate
        } else {
            file.run.failure_policy.unwrap_or_default()
        };

        Ok(Self {
            api_key,
            steam_ids,
            endpoints,
            finder: FinderOptions {
                user_pause,
                name_concurrency: overrides
                    .name_concurrency
                    .or(file.run.name_concurrency)
                    .unwrap_or(default_options.name_concurrency),
                failure_policy,
            },
            request_timeout: overrides
                .timeout_seconds
                .or(file.run.timeout_seconds)
                .map(Duration::from_secs),
            format: overrides.format.or(file.output.format).unwrap_or_default(),
            output_path: overrides.output_path.or(file.output.path),
        })
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("steam.api_key", &self.api_key)?;
        validate_steam_ids("steam.steam_ids", &self.steam_ids)?;
        validate_url("endpoints.store_query", &self.endpoints.store_query)?;
        validate_url("endpoints.owned_games", &self.endpoints.owned_games)?;
        validate_url("endpoints.app_details", &self.endpoints.app_details)?;
        validate_positive_number("run.name_concurrency", self.finder.name_concurrency, 1)?;
        if let Some(path) = &self.output_path {
            validate_non_empty_string("output.path", path)?;
        }
        Ok(())
    }
}
