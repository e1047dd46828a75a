use sqlx::{Sqlite, SqlitePool};

use crate::{
    errors::RequestError,
    models::{Conversation, ConversationSummary, Message, User},
};

use super::get_user_by_id;

/// Conversations store their unordered participant pair normalized so that
/// (a, b) and (b, a) resolve to the same row.
fn normalize_pair(a: i64, b: i64) -> (i64, i64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Returns the conversation between the two users, creating it if it does
/// not exist yet. The boolean is true when a new conversation was created.
pub async fn get_or_create_conversation_in_db(
    pool: &SqlitePool,
    user_id: i64,
    other_id: i64,
) -> Result<(Conversation, bool), RequestError> {
    if user_id == other_id {
        return Err(RequestError::InvalidInput(
            "Cannot create conversation with yourself",
        ));
    }
    if get_user_by_id(pool, other_id).await?.is_none() {
        return Err(RequestError::NotFound("User not found"));
    }

    let (a, b) = normalize_pair(user_id, other_id);

    if let Some(conversation) = find_conversation_by_pair(pool, a, b).await? {
        return Ok((conversation, false));
    }

    let inserted = sqlx::query_as::<Sqlite, Conversation>(
        r#"
        INSERT INTO conversations (participant_a, participant_b)
        VALUES ($1, $2)
        ON CONFLICT (participant_a, participant_b) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(a)
    .bind(b)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(conversation) => Ok((conversation, true)),
        // Lost the insert race; the row exists now.
        None => {
            let conversation = find_conversation_by_pair(pool, a, b)
                .await?
                .ok_or(RequestError::NotFound("Conversation not found"))?;
            Ok((conversation, false))
        }
    }
}

async fn find_conversation_by_pair(
    pool: &SqlitePool,
    a: i64,
    b: i64,
) -> Result<Option<Conversation>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Conversation>(
        "SELECT * FROM conversations WHERE participant_a = $1 AND participant_b = $2",
    )
    .bind(a)
    .bind(b)
    .fetch_optional(pool)
    .await?;
    Ok(result)
}

/// All of a user's conversations, most recently active first, each joined
/// with the other participant's public fields.
pub async fn list_conversations_in_db(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<ConversationSummary>, RequestError> {
    let conversations = sqlx::query_as::<Sqlite, ConversationSummary>(
        r#"
        SELECT conversations.id,
               conversations.participant_a,
               conversations.participant_b,
               conversations.last_message,
               conversations.last_message_at,
               conversations.created_at,
               users.id        AS peer_id,
               users.full_name AS peer_name,
               users.username  AS peer_username,
               users.avatar    AS peer_avatar
        FROM conversations
             JOIN users ON users.id = CASE
                 WHEN conversations.participant_a = $1 THEN conversations.participant_b
                 ELSE conversations.participant_a
             END
        WHERE conversations.participant_a = $1 OR conversations.participant_b = $1
        ORDER BY conversations.last_message_at DESC, conversations.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(conversations)
}

/// Resolves a conversation only for its participants. A conversation the
/// caller is not part of produces the same NotFound as one that does not
/// exist.
pub async fn get_conversation_for_participant(
    pool: &SqlitePool,
    conversation_id: i64,
    user_id: i64,
) -> Result<Conversation, RequestError> {
    let conversation = sqlx::query_as::<Sqlite, Conversation>(
        r#"
        SELECT * FROM conversations
        WHERE id = $1 AND (participant_a = $2 OR participant_b = $2)
        "#,
    )
    .bind(conversation_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    conversation.ok_or(RequestError::NotFound("Conversation not found"))
}

pub async fn list_messages_in_db(
    pool: &SqlitePool,
    user_id: i64,
    conversation_id: i64,
) -> Result<Vec<Message>, RequestError> {
    get_conversation_for_participant(pool, conversation_id, user_id).await?;

    let messages = sqlx::query_as::<Sqlite, Message>(
        r#"
        SELECT * FROM messages
        WHERE conversation_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

/// Appends a message and bumps the parent conversation's last-message
/// snapshot to the new message's content and time, as one unit.
pub async fn send_message_in_db(
    pool: &SqlitePool,
    sender: &User,
    conversation_id: i64,
    content: &str,
) -> Result<Message, RequestError> {
    if content.is_empty() {
        return Err(RequestError::InvalidInput("Message content is required"));
    }
    get_conversation_for_participant(pool, conversation_id, sender.id).await?;

    let mut tx = pool.begin().await?;

    let message = sqlx::query_as::<Sqlite, Message>(
        r#"
        INSERT INTO messages (conversation_id, sender_id, sender_name, content)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(conversation_id)
    .bind(sender.id)
    .bind(&sender.full_name)
    .bind(content)
    .fetch_one(&mut tx)
    .await?;

    sqlx::query("UPDATE conversations SET last_message = $1, last_message_at = $2 WHERE id = $3")
        .bind(&message.content)
        .bind(message.created_at)
        .bind(conversation_id)
        .execute(&mut tx)
        .await?;

    tx.commit().await?;
    Ok(message)
}
