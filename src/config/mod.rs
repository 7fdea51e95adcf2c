pub mod settings;
pub mod toml_config;

pub use settings::{RunSettings, SettingsOverrides};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::adapters::formatter::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "steam-freebies")]
#[command(about = "List free-to-claim Steam games your accounts do not own yet")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, env = "STEAM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Comma separated SteamID64 values
    #[arg(long, env = "STEAM_IDS", value_delimiter = ',')]
    pub steam_ids: Vec<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pause between accounts, in milliseconds
    #[arg(long)]
    pub pause_ms: Option<u64>,

    #[arg(long)]
    pub name_concurrency: Option<usize>,

    /// Abort on the first error status instead of treating it as empty
    #[arg(long)]
    pub strict: bool,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            api_key: self.api_key.clone(),
            steam_ids: self.steam_ids.clone(),
            pause_ms: self.pause_ms,
            name_concurrency: self.name_concurrency,
            strict: self.strict,
            timeout_seconds: self.timeout,
            format: self.format,
            output_path: self.output.clone(),
        }
    }

    /// 讀取設定檔 (若有) 並套用命令列覆寫
    pub fn load_settings(&self) -> Result<RunSettings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        RunSettings::resolve(file, self.overrides())
    }
}
