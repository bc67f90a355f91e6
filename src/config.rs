use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::schedule::Period;

/// Runtime configuration. Every field has a built-in default matching the
/// current M-League season, so running without a config file just works.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Schedule page base URL. One GET per configured period.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Relative path the generated .ics file is written to.
    #[serde(default = "default_output")]
    pub output: String,

    /// Monthly pages to retrieve, in order.
    #[serde(default = "default_periods")]
    pub periods: Vec<Period>,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,
}

/// Values that end up verbatim in the generated calendar document.
#[derive(Debug, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_calendar_name")]
    pub name: String,

    /// IANA timezone identifier. The target zone has no DST, so a single
    /// STANDARD sub-block with a fixed offset is sufficient.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_tz_offset")]
    pub tz_offset: String,

    #[serde(default = "default_prodid")]
    pub prodid: String,

    /// Fixed daily start time, HHMMSS. The source publishes no per-match
    /// times, so every event starts at the league's broadcast hour.
    #[serde(default = "default_event_start_time")]
    pub event_start_time: String,

    /// Fixed daily end time, HHMMSS. Pinned to a late-night cutoff since
    /// the source has no authoritative end time.
    #[serde(default = "default_event_end_time")]
    pub event_end_time: String,

    /// Event location when the record carries no detail-page URL.
    #[serde(default = "default_location")]
    pub default_location: String,

    #[serde(default = "default_description_prefix")]
    pub description_prefix: String,

    #[serde(default = "default_team_bullet")]
    pub team_bullet: String,

    /// Domain suffix for generated UIDs.
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
}

/// Markup markers the extractor keys on.
#[derive(Debug, Deserialize)]
pub struct ScrapeConfig {
    /// Class carried by each schedule list item.
    #[serde(default = "default_list_class")]
    pub list_class: String,

    /// Class of the paragraph holding the month/day tokens.
    #[serde(default = "default_date_class")]
    pub date_class: String,

    /// Image alt texts containing this substring are not team names (the
    /// recurring league logo carries it).
    #[serde(default = "default_excluded_alt")]
    pub excluded_alt_substring: String,
}

fn default_base_url() -> String {
    "https://m-league.jp/games/".to_string()
}

fn default_output() -> String {
    "docs/m-league-schedule.ics".to_string()
}

fn default_periods() -> Vec<Period> {
    vec![
        Period { year: 2025, month: 9 },
        Period { year: 2025, month: 10 },
        Period { year: 2025, month: 11 },
        Period { year: 2025, month: 12 },
        Period { year: 2026, month: 1 },
        Period { year: 2026, month: 2 },
        Period { year: 2026, month: 3 },
        Period { year: 2026, month: 4 },
        Period { year: 2026, month: 5 },
    ]
}

fn default_calendar_name() -> String {
    "Mリーグ 2025-26 スケジュール".to_string()
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

fn default_tz_offset() -> String {
    "+0900".to_string()
}

fn default_prodid() -> String {
    "-//M-League Schedule//JP".to_string()
}

fn default_event_start_time() -> String {
    "190000".to_string()
}

fn default_event_end_time() -> String {
    "240000".to_string()
}

fn default_location() -> String {
    "https://abema.tv/now-on-air/mahjong".to_string()
}

fn default_description_prefix() -> String {
    "対戦チーム:".to_string()
}

fn default_team_bullet() -> String {
    "・".to_string()
}

fn default_uid_domain() -> String {
    "m-league.jp".to_string()
}

fn default_list_class() -> String {
    "p-gamesSchedule2__list".to_string()
}

fn default_date_class() -> String {
    "p-gamesSchedule2__data".to_string()
}

fn default_excluded_alt() -> String {
    "M.League".to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            name: default_calendar_name(),
            timezone: default_timezone(),
            tz_offset: default_tz_offset(),
            prodid: default_prodid(),
            event_start_time: default_event_start_time(),
            event_end_time: default_event_end_time(),
            default_location: default_location(),
            description_prefix: default_description_prefix(),
            team_bullet: default_team_bullet(),
            uid_domain: default_uid_domain(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            list_class: default_list_class(),
            date_class: default_date_class(),
            excluded_alt_substring: default_excluded_alt(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            output: default_output(),
            periods: default_periods(),
            calendar: CalendarConfig::default(),
            scrape: ScrapeConfig::default(),
        }
    }
}

/// Load config from an optional TOML file; built-in defaults otherwise.
/// Fields omitted from the file fall back to their defaults.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}
