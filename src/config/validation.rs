//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::str::FromStr;
use crate::models::MemberStatus;
use crate::utils::errors::{PickBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_draw_config(&settings.draw)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(PickBuddyError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_ids.is_empty() && config.admin_rights_statuses.is_empty() {
        return Err(PickBuddyError::Config(
            "Configure at least one admin ID or admin rights status".to_string()
        ));
    }

    for status in &config.admin_rights_statuses {
        if MemberStatus::from_str(status).is_err() {
            return Err(PickBuddyError::Config(
                format!("Unknown admin rights status: {}", status)
            ));
        }
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(PickBuddyError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(PickBuddyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(PickBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_secs == 0 {
        return Err(PickBuddyError::Config(
            "Acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PickBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PickBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Validate weight bounds and paging
fn validate_draw_config(config: &super::DrawConfig) -> Result<()> {
    if config.min_weight < 1 {
        return Err(PickBuddyError::Config(
            "Min weight must be greater than or equal to 1".to_string()
        ));
    }

    if config.max_weight < config.min_weight {
        return Err(PickBuddyError::Config(
            "Max weight must be greater than or equal to min weight".to_string()
        ));
    }

    if config.default_weight < config.min_weight || config.default_weight > config.max_weight {
        return Err(PickBuddyError::Config(
            format!(
                "Default weight must be between {} and {}",
                config.min_weight, config.max_weight
            )
        ));
    }

    if config.leaderboard_size < 1 || config.groups_per_page == 0 || config.players_per_page == 0 {
        return Err(PickBuddyError::Config(
            "Leaderboard size and page sizes must be greater than 0".to_string()
        ));
    }

    Ok(())
}
