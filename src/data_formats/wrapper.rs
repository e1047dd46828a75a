use serde::{Deserialize, Serialize};

use super::response::{ConversationResponse, MessageResponse, ProjectResponse, UserResponse};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserWrapper {
    pub user: UserResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthWrapper {
    pub message: String,
    pub user: UserResponse,
    pub access_token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserUpdateWrapper {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UsersPageWrapper {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: u32,
    pub pages: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FollowToggleWrapper {
    pub message: String,
    pub following: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectWrapper {
    pub project: ProjectResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectCreateWrapper {
    pub message: String,
    pub project: ProjectResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectsPageWrapper {
    pub projects: Vec<ProjectResponse>,
    pub total: i64,
    pub page: u32,
    pub pages: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StarToggleWrapper {
    pub message: String,
    pub starred: bool,
    pub stars: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ConversationWrapper {
    pub conversation: ConversationResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ConversationCreateWrapper {
    pub message: String,
    pub conversation: ConversationResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ConversationsWrapper {
    pub conversations: Vec<ConversationResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessagesWrapper {
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreateWrapper {
    pub message: String,
    pub message_data: MessageResponse,
}

pub(crate) fn page_count(total: i64, limit: u32) -> i64 {
    let limit = limit.max(1) as i64;
    (total + limit - 1) / limit
}
