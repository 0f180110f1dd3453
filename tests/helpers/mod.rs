//! Test helpers module
//!
//! This module provides utilities and helpers for testing the PickBuddy application.
//! It includes a mock Telegram API server, a scripted membership oracle,
//! database helpers and test data builders.

#![allow(dead_code)]

pub mod telegram_mock;
pub mod database_helper;
pub mod mock_oracle;
pub mod test_data;

pub use telegram_mock::*;
pub use database_helper::*;
pub use mock_oracle::*;
pub use test_data::*;
