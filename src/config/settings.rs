//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Bot administrators: approve groups and manage weights everywhere
    #[serde(default)]
    pub admin_ids: Vec<i64>,
    /// Member statuses that grant weight management inside a group.
    /// When non-empty, new groups are approved automatically.
    #[serde(default)]
    pub admin_rights_statuses: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    /// Close pooled connections idle for this long; unset keeps them
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Draw and roster tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DrawConfig {
    pub min_weight: i32,
    pub max_weight: i32,
    pub default_weight: i32,
    /// Players required before the first draw of a group
    pub min_players: i64,
    pub leaderboard_size: i64,
    pub groups_per_page: u32,
    pub players_per_page: u32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            min_weight: 1,
            max_weight: 5,
            default_weight: 3,
            min_players: 2,
            leaderboard_size: 10,
            groups_per_page: 5,
            players_per_page: 8,
        }
    }
}

/// User-facing message templates
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub picked: String,
    pub already_picked: String,
    pub no_eligible_player: String,
    pub not_enough_players: String,
    pub non_approved_group: String,
    pub leaderboard_intro: String,
    pub leaderboard_rank: String,
    pub leaderboard_outro: String,
    pub leaderboard_not_enough_picked: String,
    pub personal_stats: String,
    pub personal_stats_never_picked: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            picked: "🎯 Today's pick is {username}!".to_string(),
            already_picked: "📌 Today's pick has already been made: {username}.".to_string(),
            no_eligible_player: "🤷 Nobody in this group can be picked today.".to_string(),
            not_enough_players: "👥 At least {min_players} players are needed before the first pick.".to_string(),
            non_approved_group: "⛔ This group is not approved to use this bot.".to_string(),
            leaderboard_intro: "🏆 Leaderboard".to_string(),
            leaderboard_rank: "{rank}. {username} ({draw_count})".to_string(),
            leaderboard_outro: String::new(),
            leaderboard_not_enough_picked: "📉 Not enough picked players to show a leaderboard yet.".to_string(),
            personal_stats: "📊 {username}, you are ranked #{rank} with {draw_count} picks.".to_string(),
            personal_stats_never_picked: "📊 {username}, you have never been picked.".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("PICKBUDDY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .with_list_parse_key("bot.admin_rights_statuses")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PickBuddyError> {
        super::validation::validate_settings(self)
    }

    /// Whether the user is a configured bot administrator
    pub fn is_bot_admin(&self, telegram_id: i64) -> bool {
        self.bot.admin_ids.contains(&telegram_id)
    }

    /// Whether a member status grants weight management
    pub fn grants_admin_rights(&self, status: &str) -> bool {
        self.bot.admin_rights_statuses.iter().any(|s| s == status)
    }

    /// New groups skip the approval workflow when admin-rights statuses are set
    pub fn auto_approve_groups(&self) -> bool {
        !self.bot.admin_rights_statuses.is_empty()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_ids: vec![],
                admin_rights_statuses: vec!["creator".to_string(), "administrator".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/pickbuddy".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: default_acquire_timeout_secs(),
                idle_timeout_secs: Some(600),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "./logs".to_string(),
            },
            draw: DrawConfig::default(),
            messages: MessagesConfig::default(),
        }
    }
}
