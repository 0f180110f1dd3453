//! Handlers for the bot's own membership changes

use teloxide::types::ChatMemberUpdated;
use tracing::{debug, info};
use crate::models::MemberStatus;
use crate::services::{GroupChange, ServiceFactory};
use crate::utils::errors::Result;

/// Handle `my_chat_member` updates: the bot was added, promoted, restricted
/// or removed in a chat
pub async fn handle_my_chat_member(update: ChatMemberUpdated, services: ServiceFactory) -> Result<()> {
    if !(update.chat.is_group() || update.chat.is_supergroup()) {
        debug!(chat_id = update.chat.id.0, "Ignoring membership change outside group chats");
        return Ok(());
    }

    let status = MemberStatus::from(update.new_chat_member.status());
    let title = update.chat.title().unwrap_or_default();

    let change = services
        .group_service
        .on_bot_status_changed(update.chat.id.0, title, status)
        .await?;

    match change {
        Some(GroupChange::Approved { group, players }) => {
            info!(group_id = group.id, players = players.len(), "Group approved on arrival");
        }
        Some(GroupChange::PendingApproval { group, requests }) => {
            info!(group_id = group.id, requests = requests, "Group waiting for approval");
        }
        Some(GroupChange::Discarded { telegram_id }) => {
            info!(telegram_id = telegram_id, "Group discarded, nobody to approve it");
        }
        Some(GroupChange::Updated { group }) => {
            debug!(group_id = group.id, status = %group.status, "Group status updated");
        }
        None => {}
    }

    Ok(())
}
