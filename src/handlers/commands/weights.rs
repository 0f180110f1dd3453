//! /weights command and the weight management screens
//!
//! The whole flow lives in one private-chat message that is edited in place:
//! groups -> players of a group -> weight keyboard of one player. Callback
//! data carries the state, and every step re-checks the caller's rights.

use std::ops::RangeInclusive;
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message, MessageId},
    ApiError, RequestError,
};
use tracing::{debug, warn};
use crate::models::{Group, Player};
use crate::services::ServiceFactory;
use crate::utils::errors::{PickBuddyError, Result};
use crate::utils::helpers::{chunk_rows, has_next_page};
use crate::utils::logging;

const WEIGHTS_PER_ROW: usize = 3;
const ACCESS_DENIED: &str = "⛔ You can't manage weights in this group.";
const GONE: &str = "🤷 This player or group no longer exists.";

/// Text plus optional inline keyboard, sent or edited in place
#[derive(Debug, Clone)]
pub struct Screen {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Screen {
    fn notice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    async fn send(self, bot: &Bot, chat_id: ChatId) -> Result<()> {
        let request = bot.send_message(chat_id, self.text);
        match self.keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn edit(self, bot: &Bot, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        let request = bot.edit_message_text(chat_id, message_id, self.text);
        let result = match self.keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await,
            None => request.await,
        };

        match result {
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Handle /weights in a private chat
pub async fn handle_weights(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        PickBuddyError::InvalidInput("No user in message".to_string())
    })?;

    groups_screen(&services, user.id.0 as i64, 0)
        .await?
        .send(&bot, msg.chat.id)
        .await
}

/// `groups:<page>`
pub async fn handle_groups_callback(
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: i64,
    page: u32,
    services: ServiceFactory,
) -> Result<()> {
    groups_screen(&services, user_id, page)
        .await?
        .edit(&bot, chat_id, message_id)
        .await
}

/// `players:<group_id>:<page>`
pub async fn handle_players_callback(
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: i64,
    group_id: i64,
    page: u32,
    services: ServiceFactory,
) -> Result<()> {
    let Some(group) = services.database.groups.find_by_id(group_id).await? else {
        return Screen::notice(GONE).edit(&bot, chat_id, message_id).await;
    };
    if !authorized(&services, &group, user_id).await? {
        return Screen::notice(ACCESS_DENIED).edit(&bot, chat_id, message_id).await;
    }

    players_screen(&services, &group, page)
        .await?
        .edit(&bot, chat_id, message_id)
        .await
}

/// `player:<player_id>`
pub async fn handle_player_callback(
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: i64,
    player_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    let Some((player, group)) = load_player(&services, player_id).await? else {
        return Screen::notice(GONE).edit(&bot, chat_id, message_id).await;
    };
    if !authorized(&services, &group, user_id).await? {
        return Screen::notice(ACCESS_DENIED).edit(&bot, chat_id, message_id).await;
    }

    player_screen(&services, &player, None)
        .edit(&bot, chat_id, message_id)
        .await
}

/// `weight:<player_id>:<weight>`
pub async fn handle_weight_callback(
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: i64,
    player_id: i64,
    weight: i32,
    services: ServiceFactory,
) -> Result<()> {
    let Some((player, group)) = load_player(&services, player_id).await? else {
        return Screen::notice(GONE).edit(&bot, chat_id, message_id).await;
    };
    if !authorized(&services, &group, user_id).await? {
        return Screen::notice(ACCESS_DENIED).edit(&bot, chat_id, message_id).await;
    }

    let screen = match services.roster_service.set_weight(&player, weight).await {
        Ok(change) => {
            if change.changed {
                logging::log_admin_action(
                    user_id,
                    "set_weight",
                    Some(group.describe().as_str()),
                    Some(format!("player {} weight {} -> {}", player.id, player.weight, weight).as_str()),
                );
            }
            let note = format!("✅ Weight of {} is now {}.", change.player.quiet_name(), change.player.weight);
            player_screen(&services, &change.player, Some(note))
        }
        Err(PickBuddyError::InvalidWeight { weight, min, max }) => {
            warn!(user_id = user_id, player_id = player_id, weight = weight, "Rejected weight");
            let note = format!("⚠️ Weight must be between {} and {}.", min, max);
            player_screen(&services, &player, Some(note))
        }
        Err(e) => return Err(e),
    };

    screen.edit(&bot, chat_id, message_id).await
}

async fn load_player(services: &ServiceFactory, player_id: i64) -> Result<Option<(Player, Group)>> {
    match services.database.player_with_group(player_id).await {
        Ok(found) => Ok(Some(found)),
        Err(PickBuddyError::PlayerNotFound { .. }) | Err(PickBuddyError::GroupNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

async fn authorized(services: &ServiceFactory, group: &Group, user_id: i64) -> Result<bool> {
    let allowed = group.approved && services.roster_service.can_manage(group, user_id).await?;
    if !allowed {
        debug!(group_id = group.id, user_id = user_id, "Weight management denied");
    }
    Ok(allowed)
}

async fn groups_screen(services: &ServiceFactory, user_id: i64, page: u32) -> Result<Screen> {
    let groups = services.roster_service.manageable_groups(user_id, page).await?;
    if groups.total == 0 {
        return Ok(Screen::notice("🤷 You don't manage weights in any group."));
    }

    let mut rows: Vec<Vec<InlineKeyboardButton>> = groups
        .items
        .iter()
        .map(|group| vec![InlineKeyboardButton::callback(group.title.clone(), format!("players:{}:0", group.id))])
        .collect();

    let has_next = has_next_page(groups.page, services.settings.draw.groups_per_page, groups.total);
    rows.extend(navigation_row(groups.page, has_next, |p| format!("groups:{}", p)));

    Ok(Screen {
        text: "👥 Choose a group:".to_string(),
        keyboard: Some(InlineKeyboardMarkup::new(rows)),
    })
}

async fn players_screen(services: &ServiceFactory, group: &Group, page: u32) -> Result<Screen> {
    let players = services.roster_service.players_page(group, page).await?;

    let mut rows: Vec<Vec<InlineKeyboardButton>> = players
        .items
        .iter()
        .map(|player| {
            vec![InlineKeyboardButton::callback(
                format!("{} ⚖️ {}", player.quiet_name(), player.weight),
                format!("player:{}", player.id),
            )]
        })
        .collect();

    let has_next = has_next_page(players.page, services.settings.draw.players_per_page, players.total);
    let group_id = group.id;
    rows.extend(navigation_row(players.page, has_next, |p| format!("players:{}:{}", group_id, p)));
    rows.push(vec![InlineKeyboardButton::callback("⬅️ Groups", "groups:0")]);

    Ok(Screen {
        text: format!("⚖️ Players of {}:", group.title),
        keyboard: Some(InlineKeyboardMarkup::new(rows)),
    })
}

fn player_screen(services: &ServiceFactory, player: &Player, note: Option<String>) -> Screen {
    let text = note.unwrap_or_else(|| format!("⚖️ Weight of {}: {}", player.quiet_name(), player.weight));
    Screen {
        text,
        keyboard: Some(weight_keyboard(player, services.roster_service.weight_range())),
    }
}

/// One button per allowed weight, current weight marked, plus a back button
pub fn weight_keyboard(player: &Player, weights: RangeInclusive<i32>) -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = weights
        .map(|weight| {
            let label = if weight == player.weight {
                format!("• {} •", weight)
            } else {
                weight.to_string()
            };
            InlineKeyboardButton::callback(label, format!("weight:{}:{}", player.id, weight))
        })
        .collect();

    let mut rows = chunk_rows(&buttons, WEIGHTS_PER_ROW);
    rows.push(vec![InlineKeyboardButton::callback(
        "⬅️ Players",
        format!("players:{}:0", player.group_id),
    )]);

    InlineKeyboardMarkup::new(rows)
}

/// Previous/next page buttons, if any apply
pub fn navigation_row<F>(page: u32, has_next: bool, data: F) -> Option<Vec<InlineKeyboardButton>>
where
    F: Fn(u32) -> String,
{
    let mut row = Vec::new();
    if page > 0 {
        row.push(InlineKeyboardButton::callback("◀️", data(page - 1)));
    }
    if has_next {
        row.push(InlineKeyboardButton::callback("▶️", data(page + 1)));
    }

    if row.is_empty() {
        None
    } else {
        Some(row)
    }
}
