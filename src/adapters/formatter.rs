use crate::domain::model::FreeGamesReport;
use crate::utils::error::{FreebiesError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

const CSV_HEADER: [&str; 4] = ["steam_id", "appid", "name", "store_url"];

/// 將結果轉成指定格式的字串
pub fn render_report(
    report: &FreeGamesReport,
    format: OutputFormat,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report, generated_at),
        OutputFormat::Csv => render_csv(report),
    }
}

fn render_text(report: &FreeGamesReport) -> String {
    if report.is_empty() {
        return "No free games found.\n".to_string();
    }

    let mut out = String::new();
    for user in report.users() {
        let _ = writeln!(out, "{} ({} new free games)", user.steam_id, user.games.len());
        if user.games.is_empty() {
            out.push_str("  (no new free games)\n");
        }
        for game in &user.games {
            let _ = writeln!(out, "  {:>8}  {}  {}", game.appid, game.name, game.store_url());
        }
    }
    out
}

fn render_json(report: &FreeGamesReport, generated_at: DateTime<Utc>) -> Result<String> {
    let users: Vec<serde_json::Value> = report
        .users()
        .iter()
        .map(|user| {
            let games: Vec<serde_json::Value> = user
                .games
                .iter()
                .map(|game| {
                    serde_json::json!({
                        "appid": game.appid,
                        "name": game.name,
                        "store_url": game.store_url(),
                    })
                })
                .collect();
            serde_json::json!({ "steam_id": user.steam_id, "games": games })
        })
        .collect();

    let document = serde_json::json!({
        "generated_at": generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "users": users,
    });
    Ok(serde_json::to_string_pretty(&document)?)
}

fn render_csv(report: &FreeGamesReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for user in report.users() {
        for game in &user.games {
            let appid = game.appid.to_string();
            let store_url = game.store_url();
            writer.write_record([
                user.steam_id.as_str(),
                appid.as_str(),
                game.name.as_str(),
                store_url.as_str(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FreebiesError::IoError(e.into_error()))?;
    csv_text(bytes)
}

fn csv_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        FreebiesError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
