//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the parts of the
//! Telegram Bot API the bot talks to. Method names are matched
//! case-insensitively because teloxide and the Bot API spell them differently.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{body_partial_json, method, path_regex},
    Mock, MockServer, ResponseTemplate,
};
use super::test_data::test_bot_token;

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Bot that talks to this server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(test_bot_token()).set_api_url(url)
    }

    fn method_path(name: &str) -> String {
        format!("(?i)^/bot[^/]+/{}$", name)
    }

    fn ok(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result }))
    }

    fn user_json(user_id: i64) -> Value {
        json!({
            "id": user_id,
            "is_bot": false,
            "first_name": format!("User{}", user_id),
            "username": format!("user{}", user_id)
        })
    }

    /// `ChatMember` JSON for the statuses that carry no extra required fields
    pub fn chat_member_json(user_id: i64, status: &str) -> Value {
        let mut member = json!({
            "user": Self::user_json(user_id),
            "status": status
        });
        if status == "creator" {
            member["is_anonymous"] = json!(false);
        }
        member
    }

    /// Answer `getChatMember` for one user
    pub async fn mock_chat_member(&self, user_id: i64, status: &str) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("getchatmember")))
            .and(body_partial_json(json!({ "user_id": user_id })))
            .respond_with(Self::ok(Self::chat_member_json(user_id, status)))
            .mount(&self.server)
            .await;
    }

    /// Make `getChatMember` fail for one user
    pub async fn mock_chat_member_error(&self, user_id: i64) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("getchatmember")))
            .and(body_partial_json(json!({ "user_id": user_id })))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: user not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer `getChatAdministrators` with chat creators
    pub async fn mock_chat_administrators(&self, creator_ids: &[i64]) {
        let admins: Vec<Value> = creator_ids
            .iter()
            .map(|&id| Self::chat_member_json(id, "creator"))
            .collect();

        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("getchatadministrators")))
            .respond_with(Self::ok(json!(admins)))
            .mount(&self.server)
            .await;
    }

    /// Accept `setMyCommands` calls
    pub async fn mock_set_my_commands(&self) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("setmycommands")))
            .respond_with(Self::ok(json!(true)))
            .mount(&self.server)
            .await;
    }

    /// Reject `setMyCommands` for one private chat
    pub async fn mock_set_my_commands_error(&self, chat_id: i64) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("setmycommands")))
            .and(body_partial_json(json!({ "scope": { "chat_id": chat_id } })))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// `Message` JSON as returned by `sendMessage`/`editMessageText`
    pub fn message_json(chat_id: i64, message_id: i32, text: &str) -> Value {
        json!({
            "message_id": message_id,
            "date": 1717200000,
            "chat": {
                "id": chat_id,
                "type": "private",
                "first_name": format!("User{}", chat_id)
            },
            "text": text
        })
    }

    /// Deliver `sendMessage` to one chat as the given message
    pub async fn mock_send_message(&self, chat_id: i64, message_id: i32) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("sendmessage")))
            .and(body_partial_json(json!({ "chat_id": chat_id })))
            .respond_with(Self::ok(Self::message_json(chat_id, message_id, "sent")))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Make every `sendMessage` fail as if the chat was never opened
    pub async fn mock_send_message_error(&self) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("sendmessage")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Accept `editMessageText` calls
    pub async fn mock_edit_message_text(&self) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("editmessagetext")))
            .respond_with(Self::ok(Self::message_json(1, 1, "edited")))
            .mount(&self.server)
            .await;
    }

    /// Accept `leaveChat` calls
    pub async fn mock_leave_chat(&self) {
        Mock::given(method("POST"))
            .and(path_regex(Self::method_path("leavechat")))
            .respond_with(Self::ok(json!(true)))
            .mount(&self.server)
            .await;
    }

    /// Number of requests received for a Bot API method
    pub async fn request_count(&self, name: &str) -> usize {
        let suffix = format!("/{}", name.to_lowercase());
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path().to_lowercase().ends_with(&suffix))
            .count()
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
