//! Group approval callbacks: `approve:<group_id>` and `reject:<group_id>`

use teloxide::{
    prelude::*,
    types::{ChatId, MessageId, User},
};
use tracing::{info, warn};
use crate::services::ServiceFactory;
use crate::utils::errors::{PickBuddyError, Result};
use crate::utils::helpers::user_display_name;

/// Apply a bot administrator's decision and update the request message
pub async fn handle_approval(
    bot: Bot,
    from: &User,
    approve: bool,
    group_id: i64,
    source: Option<(ChatId, MessageId)>,
    services: ServiceFactory,
) -> Result<()> {
    let approver_id = from.id.0 as i64;
    let approver_name = user_display_name(from);

    let text = match services
        .group_service
        .decide(group_id, approve, approver_id, &approver_name, source)
        .await
    {
        Ok(decision) => {
            info!(group_id = group_id, approved = decision.approved, approver_id = approver_id, "Group decision applied");
            format!("{}.", decision.summary)
        }
        Err(PickBuddyError::PermissionDenied(reason)) => {
            warn!(group_id = group_id, user_id = approver_id, "Approval attempt by a non-administrator");
            format!("⛔ {}", reason)
        }
        Err(PickBuddyError::GroupNotFound { .. }) => "🤷 This group is no longer pending.".to_string(),
        Err(e) => return Err(e),
    };

    if let Some((chat_id, message_id)) = source {
        bot.edit_message_text(chat_id, message_id, text).await?;
    }

    Ok(())
}
