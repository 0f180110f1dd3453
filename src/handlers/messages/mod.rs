//! Message handlers module
//!
//! Keeps the roster fresh from ordinary group traffic and follows groups
//! that are upgraded to supergroups.

use teloxide::types::Message;
use tracing::{debug, info};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Handle any non-command message
pub async fn handle_message(msg: Message, services: ServiceFactory) -> Result<()> {
    if let Some(new_chat_id) = msg.migrate_to_chat_id() {
        if let Some(group) = services.group_service.migrate(msg.chat.id.0, new_chat_id.0).await? {
            info!(group_id = group.id, telegram_id = group.telegram_id, "Group followed to its supergroup");
        }
        return Ok(());
    }

    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        return Ok(());
    }

    let Some(user) = msg.from.as_ref().filter(|user| !user.is_bot) else {
        return Ok(());
    };

    let Some(group) = services.database.find_approved_group(msg.chat.id.0).await? else {
        return Ok(());
    };

    let outcome = services.roster_service.sync_user(&group, user.id.0 as i64).await?;
    if outcome.changed() {
        debug!(group_id = group.id, player_id = outcome.player().id, "Player synced from message");
    }

    Ok(())
}
