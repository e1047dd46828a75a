use serde::{Deserialize, Serialize};

use crate::models::{ConversationSummary, Message, Project, User};

fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(',').map(|s| s.to_string()).collect()
}

/// Public profile of a user. The credential hash is never part of this.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    pub skills: Vec<String>,
    pub github_url: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub location: String,
    pub followers: i64,
    pub following: i64,
    pub projects: i64,
    pub join_date: String,
    pub is_active: bool,
}

impl UserResponse {
    pub(crate) fn new(
        User {
            id,
            full_name,
            username,
            email,
            bio,
            avatar,
            skills,
            github_url,
            linkedin_url,
            portfolio_url,
            location,
            followers_count,
            following_count,
            projects_count,
            is_active,
            created_at,
            ..
        }: User,
    ) -> Self {
        UserResponse {
            id,
            full_name,
            username,
            email,
            bio,
            avatar,
            skills: split_list(&skills),
            github_url,
            linkedin_url,
            portfolio_url,
            location,
            followers: followers_count,
            following: following_count,
            projects: projects_count,
            join_date: created_at.to_string(),
            is_active,
        }
    }
}

/// Author snapshot captured on the project at creation time.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AuthorResponse {
    pub name: String,
    pub username: String,
    pub avatar: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub author_id: i64,
    pub author: AuthorResponse,
    pub demo_url: String,
    pub github_url: String,
    pub stars: i64,
    pub views: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectResponse {
    pub(crate) fn new(
        Project {
            id,
            title,
            description,
            image,
            tag_list,
            author_id,
            author_name,
            author_username,
            author_avatar,
            demo_url,
            github_url,
            stars,
            views,
            created_at,
            updated_at,
        }: Project,
    ) -> Self {
        ProjectResponse {
            id,
            title,
            description,
            image,
            tags: split_list(&tag_list.unwrap_or_default()),
            author_id,
            author: AuthorResponse {
                name: author_name,
                username: author_username,
                avatar: author_avatar,
            },
            demo_url,
            github_url,
            stars,
            views,
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }
}

/// Public subset of the other participant embedded in a conversation listing.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PeerResponse {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub avatar: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub id: i64,
    pub participants: Vec<i64>,
    pub last_message: String,
    pub last_message_at: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_participant: Option<PeerResponse>,
}

impl ConversationResponse {
    pub(crate) fn new(
        ConversationSummary {
            id,
            participant_a,
            participant_b,
            last_message,
            last_message_at,
            created_at,
            peer_id,
            peer_name,
            peer_username,
            peer_avatar,
        }: ConversationSummary,
    ) -> Self {
        ConversationResponse {
            id,
            participants: vec![participant_a, participant_b],
            last_message,
            last_message_at: last_message_at.to_string(),
            created_at: created_at.to_string(),
            other_participant: Some(PeerResponse {
                id: peer_id,
                full_name: peer_name,
                username: peer_username,
                avatar: peer_avatar,
            }),
        }
    }

    pub(crate) fn bare(conversation: crate::models::Conversation) -> Self {
        ConversationResponse {
            id: conversation.id,
            participants: vec![conversation.participant_a, conversation.participant_b],
            last_message: conversation.last_message,
            last_message_at: conversation.last_message_at.to_string(),
            created_at: conversation.created_at.to_string(),
            other_participant: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: String,
}

impl MessageResponse {
    pub(crate) fn new(
        Message {
            id,
            conversation_id,
            sender_id,
            sender_name,
            content,
            is_read,
            created_at,
        }: Message,
    ) -> Self {
        MessageResponse {
            id,
            conversation_id,
            sender_id,
            sender_name,
            content,
            is_read,
            created_at: created_at.to_string(),
        }
    }
}
