//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod group;
pub mod player;
pub mod draw;

// Re-export repositories
pub use group::GroupRepository;
pub use player::PlayerRepository;
pub use draw::DrawRepository;
