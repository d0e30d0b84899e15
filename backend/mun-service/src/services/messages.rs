/// Message service - committee inbox, threads, and delegate-traffic oversight
use crate::error::{AppError, Result};
use crate::metrics::MESSAGES_SENT_TOTAL;
use crate::models::{
    build_conversation_summaries, conversation_key, ConversationSummary, Identity, LastMessage,
    Message, Role, SendMessageRequest,
};
use crate::services::CommitteeService;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

const MESSAGE_COLUMNS: &str = "message_id, sender_id, sender_type, sender_name, receiver_id, \
     receiver_type, receiver_name, content, timestamp, read, conversation_key, committee_id";

pub struct MessageService {
    pool: PgPool,
    committees: CommitteeService,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            committees: CommitteeService::new(pool.clone()),
            pool,
        }
    }

    /// One summary per committee partner, most recent first
    pub async fn conversations(&self, identity: &Identity) -> Result<Vec<ConversationSummary>> {
        let committee = self.committees.require_committee(identity).await?;
        let partners = self
            .committees
            .partners(&committee.committee_id, &identity.id)
            .await?;

        let keys: Vec<String> = partners
            .iter()
            .map(|p| conversation_key(&identity.id, &p.id))
            .collect();

        let mut last_messages = HashMap::new();
        let mut unread = HashMap::new();

        if !keys.is_empty() {
            let rows = sqlx::query_as::<_, (String, String, DateTime<Utc>)>(
                r#"
                SELECT DISTINCT ON (conversation_key) conversation_key, content, timestamp
                FROM messages
                WHERE conversation_key = ANY($1)
                ORDER BY conversation_key, timestamp DESC
                "#,
            )
            .bind(&keys)
            .fetch_all(&self.pool)
            .await?;

            for (key, content, timestamp) in rows {
                last_messages.insert(key, LastMessage { content, timestamp });
            }

            let counts = sqlx::query_as::<_, (String, i64)>(
                r#"
                SELECT conversation_key, COUNT(*)
                FROM messages
                WHERE receiver_id = $1 AND read = FALSE AND conversation_key = ANY($2)
                GROUP BY conversation_key
                "#,
            )
            .bind(&identity.id)
            .bind(&keys)
            .fetch_all(&self.pool)
            .await?;

            unread.extend(counts);
        }

        Ok(build_conversation_summaries(
            &identity.id,
            partners,
            &last_messages,
            &unread,
            Utc::now(),
        ))
    }

    /// Full thread with `participant_id`, oldest first; marks the caller's
    /// incoming messages as read.
    pub async fn thread(&self, identity: &Identity, participant_id: &str) -> Result<Vec<Message>> {
        let key = conversation_key(&identity.id, participant_id);

        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE conversation_key = $1 ORDER BY timestamp ASC"
        ))
        .bind(&key)
        .fetch_all(&self.pool)
        .await?;

        let marked = sqlx::query(
            "UPDATE messages SET read = TRUE WHERE conversation_key = $1 AND receiver_id = $2 AND read = FALSE",
        )
        .bind(&key)
        .bind(&identity.id)
        .execute(&self.pool)
        .await;

        match marked {
            Ok(result) => {
                tracing::debug!(conversation_key = %key, marked = result.rows_affected(), "messages marked read")
            }
            Err(e) => {
                tracing::warn!(conversation_key = %key, error = %e, "failed to mark messages as read")
            }
        }

        Ok(messages)
    }

    pub async fn send(&self, identity: &Identity, req: &SendMessageRequest) -> Result<Message> {
        if identity.is_admin() {
            return Err(AppError::Forbidden("Admins cannot send messages".into()));
        }

        let content = req.content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("Message cannot be empty".into()));
        }
        req.validate()?;

        let committee = self
            .committees
            .committee_for(identity)
            .await?
            .ok_or_else(|| AppError::BadRequest("Unable to determine committee for message".into()))?;

        let receiver = self
            .committees
            .partners(&committee.committee_id, &identity.id)
            .await?
            .into_iter()
            .find(|p| p.id == req.receiver_id)
            .ok_or_else(|| {
                AppError::Forbidden("You can only message members of your committee".into())
            })?;

        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (
                message_id, sender_id, sender_type, sender_name, receiver_id, receiver_type,
                receiver_name, content, timestamp, read, conversation_key, committee_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), FALSE, $9, $10)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&identity.id)
        .bind(identity.role.as_str())
        .bind(&identity.name)
        .bind(&receiver.id)
        .bind(receiver.role.as_str())
        .bind(&receiver.name)
        .bind(content)
        .bind(conversation_key(&identity.id, &receiver.id))
        .bind(&committee.committee_id)
        .fetch_one(&self.pool)
        .await?;

        MESSAGES_SENT_TOTAL
            .with_label_values(&[identity.role.as_str()])
            .inc();
        tracing::info!(
            message_id = %message.message_id,
            committee_id = %committee.committee_id,
            "message sent"
        );

        Ok(message)
    }

    /// Every delegate-to-delegate message in the chair's committee, oldest first
    pub async fn delegate_messages(&self, identity: &Identity) -> Result<Vec<Message>> {
        identity.require_role(&[Role::Chair], "Only chairs can review delegate messages")?;
        let committee = self.committees.require_committee(identity).await?;

        let messages = sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE sender_type = 'delegate'
              AND receiver_type = 'delegate'
              AND sender_id IN (SELECT delegate_id FROM delegations WHERE committee_id = $1)
              AND receiver_id IN (SELECT delegate_id FROM delegations WHERE committee_id = $1)
            ORDER BY timestamp ASC
            "#
        ))
        .bind(&committee.committee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn unread_count(&self, identity: &Identity) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND read = FALSE")
                .bind(&identity.id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
