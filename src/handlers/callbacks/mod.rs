//! Callback query handlers module
//!
//! This module routes inline keyboard callbacks. Payloads are `prefix:arg:...`
//! strings that carry all the state a handler needs.

pub mod approval;

use teloxide::{prelude::*, types::CallbackQuery};
use tracing::{debug, warn};
use crate::handlers::commands::weights;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::callback_arg;

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, services: ServiceFactory) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };

    debug!(user_id = user_id, callback_data = %data, "Processing callback query");

    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let source = query.message.as_ref().map(|m| (m.chat().id, m.id()));
    let parts: Vec<&str> = data.split(':').collect();
    let page = |index: usize| callback_arg(&parts, index).and_then(|p| u32::try_from(p).ok());

    match (parts[0], source) {
        ("approve", _) | ("reject", _) => {
            let Some(group_id) = callback_arg(&parts, 1) else {
                warn!(callback_data = %data, "Invalid approval callback");
                return Ok(());
            };
            approval::handle_approval(bot, &query.from, parts[0] == "approve", group_id, source, services).await
        }
        ("groups", Some((chat_id, message_id))) => {
            let page = page(1).unwrap_or(0);
            weights::handle_groups_callback(bot, chat_id, message_id, user_id, page, services).await
        }
        ("players", Some((chat_id, message_id))) => match (callback_arg(&parts, 1), page(2)) {
            (Some(group_id), Some(page)) => {
                weights::handle_players_callback(bot, chat_id, message_id, user_id, group_id, page, services).await
            }
            _ => invalid(data),
        },
        ("player", Some((chat_id, message_id))) => match callback_arg(&parts, 1) {
            Some(player_id) => {
                weights::handle_player_callback(bot, chat_id, message_id, user_id, player_id, services).await
            }
            None => invalid(data),
        },
        ("weight", Some((chat_id, message_id))) => {
            let weight = callback_arg(&parts, 2).and_then(|w| i32::try_from(w).ok());
            match (callback_arg(&parts, 1), weight) {
                (Some(player_id), Some(weight)) => {
                    weights::handle_weight_callback(bot, chat_id, message_id, user_id, player_id, weight, services).await
                }
                _ => invalid(data),
            }
        }
        _ => invalid(data),
    }
}

fn invalid(data: &str) -> Result<()> {
    warn!(callback_data = %data, "Unknown or malformed callback");
    Ok(())
}
