//! Middleware module
//!
//! This module contains checks that run before command handlers

pub mod group_guard;

// Re-export commonly used middleware
pub use group_guard::{GroupGuard, GuardDecision};
