//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod member;
pub mod group;
pub mod player;
pub mod draw;

// Re-export commonly used models
pub use member::{MemberStatus, MemberSnapshot};
pub use group::{Group, GroupCounts, CreateGroupRequest, UpdateGroupRequest};
pub use player::{Player, RankedPlayer, CreatePlayerRequest};
pub use draw::{Draw, CreateDrawRequest};
