//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for group messages and service messages
//! - Chat member handlers for the bot's own membership changes

pub mod commands;
pub mod callbacks;
pub mod messages;
pub mod chat_member;

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
pub use callbacks::handle_callback_query;
pub use messages::handle_message;
pub use chat_member::handle_my_chat_member;
