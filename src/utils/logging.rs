//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the PickBuddy application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "pickbuddy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log group lifecycle events
pub fn log_group_event(group_id: i64, telegram_id: i64, event: &str, status: &str) {
    info!(
        group_id = group_id,
        telegram_id = telegram_id,
        event = event,
        status = status,
        "Group event occurred"
    );
}

/// Log player roster changes
pub fn log_player_event(player_id: i64, group_id: i64, telegram_id: i64, event: &str, status: &str) {
    info!(
        player_id = player_id,
        group_id = group_id,
        telegram_id = telegram_id,
        event = event,
        status = status,
        "Player event occurred"
    );
}

/// Log a recorded draw
pub fn log_draw(group_id: i64, player_id: i64, draw_date: chrono::NaiveDate, attempts: usize) {
    info!(
        group_id = group_id,
        player_id = player_id,
        draw_date = %draw_date,
        attempts = attempts,
        "Draw recorded"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}
