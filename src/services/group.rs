//! Group service implementation
//!
//! Tracks the groups the bot is added to, runs the approval workflow for bot
//! administrators and seeds the first players of a group.

use std::collections::HashMap;
use std::sync::Arc;
use futures::future::join_all;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use tracing::{debug, info, warn};
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::models::{CreateGroupRequest, Group, MemberSnapshot, MemberStatus, Player, UpdateGroupRequest};
use crate::services::commands::CommandRegistry;
use crate::services::membership::{MembershipOracle, TelegramMembership};
use crate::services::roster::RosterService;
use crate::utils::errors::{PickBuddyError, Result};
use crate::utils::logging;

/// What a bot status change did to the stored group
#[derive(Debug, Clone)]
pub enum GroupChange {
    /// Group created and approved right away; carries the seeded players
    Approved { group: Group, players: Vec<Player> },
    /// Group created and waiting for a bot administrator
    PendingApproval { group: Group, requests: usize },
    /// Group created but no administrator could be asked, so it was dropped
    Discarded { telegram_id: i64 },
    /// Known group whose status or title changed
    Updated { group: Group },
}

/// Outcome of an approve/reject decision
#[derive(Debug, Clone)]
pub struct ApprovalDecision {
    pub group: Group,
    pub approved: bool,
    /// Summary line, e.g. "✅ Group X (id: 1, telegram_id: -100) approved"
    pub summary: String,
}

#[derive(Clone)]
pub struct GroupService {
    bot: Bot,
    database: DatabaseService,
    oracle: Arc<dyn MembershipOracle>,
    /// Only used to list chat administrators
    telegram: TelegramMembership,
    roster: RosterService,
    commands: CommandRegistry,
    settings: Settings,
}

impl GroupService {
    pub fn new(
        bot: Bot,
        database: DatabaseService,
        oracle: Arc<dyn MembershipOracle>,
        roster: RosterService,
        commands: CommandRegistry,
        settings: Settings,
    ) -> Self {
        Self {
            telegram: TelegramMembership::new(bot.clone()),
            bot,
            database,
            oracle,
            roster,
            commands,
            settings,
        }
    }

    /// React to the bot's own membership changing in a group chat
    pub async fn on_bot_status_changed(
        &self,
        telegram_id: i64,
        title: &str,
        status: MemberStatus,
    ) -> Result<Option<GroupChange>> {
        let existing = self.database.groups.find_by_telegram_id(telegram_id).await?;

        match existing {
            None if status.is_member() => {
                let group = self
                    .database
                    .groups
                    .create(CreateGroupRequest {
                        telegram_id,
                        title: title.to_string(),
                        status: status.as_str().to_string(),
                        approved: self.settings.auto_approve_groups(),
                    })
                    .await?;
                logging::log_group_event(group.id, group.telegram_id, "added", &group.status);

                if group.approved {
                    let players = self.seed_initial_players(&group).await?;
                    Ok(Some(GroupChange::Approved { group, players }))
                } else {
                    self.request_approval(group).await.map(Some)
                }
            }
            None => {
                debug!(telegram_id = telegram_id, status = %status, "Ignoring status change for unknown group");
                Ok(None)
            }
            Some(group) => {
                let group = self
                    .database
                    .groups
                    .update(
                        group.id,
                        UpdateGroupRequest {
                            title: Some(title.to_string()),
                            status: Some(status.as_str().to_string()),
                            ..Default::default()
                        },
                    )
                    .await?;
                logging::log_group_event(group.id, group.telegram_id, "updated", &group.status);
                Ok(Some(GroupChange::Updated { group }))
            }
        }
    }

    /// Follow a group to its new chat id after a supergroup upgrade
    pub async fn migrate(&self, old_telegram_id: i64, new_telegram_id: i64) -> Result<Option<Group>> {
        let Some(group) = self.database.groups.find_by_telegram_id(old_telegram_id).await? else {
            return Ok(None);
        };

        let group = self
            .database
            .groups
            .update(
                group.id,
                UpdateGroupRequest {
                    telegram_id: Some(new_telegram_id),
                    ..Default::default()
                },
            )
            .await?;
        info!(group_id = group.id, old_telegram_id = old_telegram_id, new_telegram_id = new_telegram_id, "Group migrated");

        Ok(Some(group))
    }

    /// Approve or reject a pending group. Only bot administrators decide.
    pub async fn decide(
        &self,
        group_id: i64,
        approve: bool,
        approver_id: i64,
        approver_name: &str,
        source: Option<(ChatId, MessageId)>,
    ) -> Result<ApprovalDecision> {
        if !self.settings.is_bot_admin(approver_id) {
            return Err(PickBuddyError::PermissionDenied(
                "Only bot administrators can approve groups".to_string()
            ));
        }

        let group = self
            .database
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(PickBuddyError::GroupNotFound { group_id })?;

        let summary = format!(
            "{} Group {} {}",
            if approve { "✅" } else { "❌" },
            group.describe(),
            if approve { "approved" } else { "rejected" }
        );

        let pending = group.approval_messages.as_ref().map(|m| m.0.clone()).unwrap_or_default();

        let group = if approve {
            let group = self
                .database
                .groups
                .update(group.id, UpdateGroupRequest { approved: Some(true), ..Default::default() })
                .await?;
            let group = self.database.groups.set_approval_messages(group.id, None).await?;
            let admins = self.bot_admins_in_chat(group.telegram_id).await;
            self.roster.seed_players(&group, &admins).await?;
            group
        } else {
            if let Err(e) = self.bot.leave_chat(ChatId(group.telegram_id)).await {
                warn!(group_id = group.id, error = %e, "Failed to leave rejected group");
            }
            self.database.groups.delete(group.id).await?;
            group
        };

        // Requests are only rewritten once the decision is stored
        self.close_approval_requests(&pending, source, &format!("{} by {}.", summary, approver_name))
            .await;

        logging::log_admin_action(
            approver_id,
            if approve { "approve_group" } else { "reject_group" },
            Some(group.describe().as_str()),
            None,
        );

        Ok(ApprovalDecision {
            group,
            approved: approve,
            summary,
        })
    }

    /// Initial players of an auto-approved group: chat administrators and
    /// bot administrators who are members
    async fn seed_initial_players(&self, group: &Group) -> Result<Vec<Player>> {
        let mut snapshots: Vec<MemberSnapshot> = match self.telegram.administrators(group.telegram_id).await {
            Ok(admins) => admins
                .into_iter()
                .filter(|a| !self.settings.is_bot_admin(a.telegram_id))
                .collect(),
            Err(e) => {
                warn!(group_id = group.id, error = %e, "Failed to load chat administrators");
                Vec::new()
            }
        };
        snapshots.extend(self.bot_admins_in_chat(group.telegram_id).await);

        let players = self.roster.seed_players(group, &snapshots).await?;

        let managers: Vec<i64> = players
            .iter()
            .filter(|p| self.roster.has_admin_rights(p))
            .map(|p| p.telegram_id)
            .collect();
        if !managers.is_empty() {
            self.commands.grant_admin_commands(&managers).await;
        }

        Ok(players)
    }

    /// Bot administrators currently in the chat; lookup failures are skipped
    async fn bot_admins_in_chat(&self, telegram_id: i64) -> Vec<MemberSnapshot> {
        let checks = self
            .settings
            .bot
            .admin_ids
            .iter()
            .map(|&admin_id| self.oracle.check(telegram_id, admin_id));

        join_all(checks)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(snapshot) if snapshot.is_member() => Some(snapshot),
                Ok(_) => None,
                Err(e) => {
                    debug!(error = %e, "Bot administrator lookup failed");
                    None
                }
            })
            .collect()
    }

    /// Ask every bot administrator to approve the group
    async fn request_approval(&self, group: Group) -> Result<GroupChange> {
        let text = format!("🤖 Installed on {} group.", group.describe());
        let keyboard = InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("✅ Approve", format!("approve:{}", group.id)),
            InlineKeyboardButton::callback("❌ Reject", format!("reject:{}", group.id)),
        ]]);

        let sends = self.settings.bot.admin_ids.iter().map(|&admin_id| {
            let request = self
                .bot
                .send_message(ChatId(admin_id), text.clone())
                .reply_markup(keyboard.clone());
            async move { request.await }
        });

        let mut sent: HashMap<i64, i32> = HashMap::new();
        for result in join_all(sends).await {
            match result {
                Ok(message) => {
                    sent.insert(message.chat.id.0, message.id.0);
                }
                Err(e) => warn!(group_id = group.id, error = %e, "Failed to deliver approval request"),
            }
        }

        if sent.is_empty() {
            warn!(group_id = group.id, "No administrator reachable, discarding group");
            self.database.groups.delete(group.id).await?;
            return Ok(GroupChange::Discarded { telegram_id: group.telegram_id });
        }

        let requests = sent.len();
        let group = self.database.groups.set_approval_messages(group.id, Some(sent)).await?;
        info!(group_id = group.id, requests = requests, "Approval requested");

        Ok(GroupChange::PendingApproval { group, requests })
    }

    /// Rewrite the other administrators' approval requests with the decision
    async fn close_approval_requests(
        &self,
        pending: &HashMap<i64, i32>,
        source: Option<(ChatId, MessageId)>,
        text: &str,
    ) {
        let edits = pending
            .iter()
            .map(|(&chat_id, &message_id)| (ChatId(chat_id), MessageId(message_id)))
            .filter(|target| Some(*target) != source)
            .map(|(chat_id, message_id)| async move {
                self.bot.edit_message_text(chat_id, message_id, text).await
            });

        for result in join_all(edits).await {
            if let Err(e) = result {
                debug!(error = %e, "Failed to update approval request");
            }
        }
    }
}
