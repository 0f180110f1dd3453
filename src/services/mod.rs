//! Services module
//!
//! This module contains business logic services

pub mod commands;
pub mod draw;
pub mod group;
pub mod membership;
pub mod picker;
pub mod roster;
pub mod stats;

// Re-export commonly used services
pub use commands::CommandRegistry;
pub use draw::{DrawOutcome, DrawService};
pub use group::{ApprovalDecision, GroupChange, GroupService};
pub use membership::{MembershipOracle, TelegramMembership};
pub use picker::{CheckedPlayer, PickReport, Picker};
pub use roster::{Page, RosterService, SyncOutcome, WeightChange};
pub use stats::StatsService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use teloxide::Bot;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub database: DatabaseService,
    pub commands: CommandRegistry,
    pub draw_service: DrawService,
    pub roster_service: RosterService,
    pub group_service: GroupService,
    pub stats_service: StatsService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory backed by the Telegram membership oracle
    pub fn new(bot: Bot, settings: Settings, database: DatabaseService) -> Self {
        let oracle: Arc<dyn MembershipOracle> = Arc::new(TelegramMembership::new(bot.clone()));
        Self::with_oracle(bot, settings, database, oracle)
    }

    /// Create a ServiceFactory with a custom membership oracle
    pub fn with_oracle(
        bot: Bot,
        settings: Settings,
        database: DatabaseService,
        oracle: Arc<dyn MembershipOracle>,
    ) -> Self {
        let commands = CommandRegistry::new(bot.clone());
        let draw_service = DrawService::new(database.clone(), oracle.clone());
        let roster_service = RosterService::new(database.clone(), oracle.clone(), commands.clone(), settings.clone());
        let group_service = GroupService::new(
            bot,
            database.clone(),
            oracle.clone(),
            roster_service.clone(),
            commands.clone(),
            settings.clone(),
        );
        let stats_service = StatsService::new(database.clone(), oracle, settings.clone());

        Self {
            settings,
            database,
            commands,
            draw_service,
            roster_service,
            group_service,
            stats_service,
        }
    }
}
