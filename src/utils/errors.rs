//! Error handling for PickBuddy
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for PickBuddy application
#[derive(Error, Debug)]
pub enum PickBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: i64 },

    #[error("Draw of group {group_id} for {draw_date} not found")]
    DrawNotFound { group_id: i64, draw_date: chrono::NaiveDate },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: i64 },

    #[error("Invalid weight {weight}: must be between {min} and {max}")]
    InvalidWeight { weight: i32, min: i32, max: i32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for PickBuddy operations
pub type Result<T> = std::result::Result<T, PickBuddyError>;

impl PickBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            PickBuddyError::Database(_) => false,
            PickBuddyError::Migration(_) => false,
            PickBuddyError::Telegram(_) => true,
            PickBuddyError::Config(_) => false,
            PickBuddyError::ConfigLoad(_) => false,
            PickBuddyError::PermissionDenied(_) => false,
            PickBuddyError::GroupNotFound { .. } => false,
            PickBuddyError::DrawNotFound { .. } => true,
            PickBuddyError::PlayerNotFound { .. } => false,
            PickBuddyError::InvalidWeight { .. } => false,
            PickBuddyError::Serialization(_) => false,
            PickBuddyError::Io(_) => true,
            PickBuddyError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PickBuddyError::Database(_) => ErrorSeverity::Critical,
            PickBuddyError::Migration(_) => ErrorSeverity::Critical,
            PickBuddyError::Config(_) => ErrorSeverity::Critical,
            PickBuddyError::ConfigLoad(_) => ErrorSeverity::Critical,
            PickBuddyError::PermissionDenied(_) => ErrorSeverity::Warning,
            PickBuddyError::InvalidWeight { .. } => ErrorSeverity::Info,
            PickBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
