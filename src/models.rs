use chrono::NaiveDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub avatar: String,
    pub skills: String,
    pub github_url: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub location: String,
    pub followers_count: i64,
    pub following_count: i64,
    pub projects_count: i64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    // group_concat over projecttags; NULL when the project has no tags
    pub tag_list: Option<String>,
    pub author_id: i64,
    pub author_name: String,
    pub author_username: String,
    pub author_avatar: String,
    pub demo_url: String,
    pub github_url: String,
    pub stars: i64,
    pub views: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Conversation {
    pub id: i64,
    pub participant_a: i64,
    pub participant_b: i64,
    pub last_message: String,
    pub last_message_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Conversation row joined with the other participant's public fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConversationSummary {
    pub id: i64,
    pub participant_a: i64,
    pub participant_b: i64,
    pub last_message: String,
    pub last_message_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub peer_id: i64,
    pub peer_name: String,
    pub peer_username: String,
    pub peer_avatar: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}
