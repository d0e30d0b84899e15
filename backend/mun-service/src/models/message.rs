//! Direct messages between committee members

use super::identity::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const NO_MESSAGES_YET: &str = "No messages yet";

/// Order-independent thread id: the lexicographically smaller id comes first.
pub fn conversation_key(a: &str, b: &str) -> String {
    if a < b {
        format!("{a}::{b}")
    } else {
        format!("{b}::{a}")
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Message {
    #[serde(rename = "messageID")]
    pub message_id: Uuid,
    #[serde(rename = "senderID")]
    pub sender_id: String,
    #[serde(rename = "senderType")]
    pub sender_type: String,
    #[serde(rename = "senderName")]
    pub sender_name: String,
    #[serde(rename = "receiverID")]
    pub receiver_id: String,
    #[serde(rename = "receiverType")]
    pub receiver_type: String,
    #[serde(rename = "receiverName")]
    pub receiver_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(rename = "conversationKey")]
    pub conversation_key: String,
    #[serde(rename = "committeeID")]
    pub committee_id: String,
}

/// Someone the caller can message: a delegate or chair in the same committee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastMessage {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConversationSummary {
    #[serde(rename = "participantID")]
    pub participant_id: String,
    #[serde(rename = "participantName")]
    pub participant_name: String,
    #[serde(rename = "participantType")]
    pub participant_type: Role,
    #[serde(rename = "lastMessage")]
    pub last_message: String,
    #[serde(rename = "lastMessageTime")]
    pub last_message_time: DateTime<Utc>,
    #[serde(rename = "unreadCount")]
    pub unread_count: i64,
}

/// Assemble one summary per partner, most recent conversation first.
///
/// `last_messages` and `unread` are keyed by conversation key. Partners with
/// no history read "No messages yet" stamped at `now`.
pub fn build_conversation_summaries(
    caller_id: &str,
    partners: Vec<Participant>,
    last_messages: &HashMap<String, LastMessage>,
    unread: &HashMap<String, i64>,
    now: DateTime<Utc>,
) -> Vec<ConversationSummary> {
    let mut summaries: Vec<ConversationSummary> = partners
        .into_iter()
        .map(|partner| {
            let key = conversation_key(caller_id, &partner.id);
            let (last_message, last_message_time) = match last_messages.get(&key) {
                Some(last) => (last.content.clone(), last.timestamp),
                None => (NO_MESSAGES_YET.to_string(), now),
            };

            ConversationSummary {
                participant_id: partner.id,
                participant_name: partner.name,
                participant_type: partner.role,
                last_message,
                last_message_time,
                unread_count: unread.get(&key).copied().unwrap_or(0),
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
    summaries
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    #[serde(rename = "receiverID")]
    #[validate(length(min = 1, message = "Recipient is required"))]
    pub receiver_id: String,
    #[validate(length(max = 4000, message = "Message is too long"))]
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCount {
    pub unread: i64,
}
