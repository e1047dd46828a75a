use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    authentication::{get_jwt_token, hash_password_argon2, verify_password_argon2, AuthUser},
    db_helpers::{
        create_project_in_db, get_or_create_conversation_in_db, get_project_in_db, get_user_by_email,
        get_user_by_id, get_user_by_username, insert_user, list_conversations_in_db,
        list_messages_in_db, list_projects_in_db, search_users_in_db, send_message_in_db,
        toggle_follow_in_db, toggle_star_in_db, update_profile_in_db,
    },
    errors::{ErrorJson, RequestError},
    validation, AuthWrapper, ConversationCreateWrapper, ConversationResponse, ConversationWrapper,
    ConversationsWrapper, CreateConversationRequest, CreateProjectRequest, FollowToggleWrapper,
    JsonResponse,
    LoginRequest, MessageCreateWrapper, MessageResponse, MessagesWrapper, ProjectCreateWrapper,
    ProjectQueryParams, ProjectResponse, ProjectWrapper, ProjectsPageWrapper, RegisterRequest,
    SendMessageRequest, StarToggleWrapper, UpdateProfileRequest, UserQueryParams, UserResponse,
    UserUpdateWrapper, UserWrapper, UsersPageWrapper,
};

use crate::data_formats::page_count;

type ApiResult<T> = Result<JsonResponse<T>, JsonResponse<ErrorJson>>;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Result<(), (StatusCode, String)> {
    Err((
        StatusCode::NOT_FOUND,
        format!("URL {} provided was not found", uri),
    ))
}

// ----------------- Auth Handlers -----------------

fn validate_registration(request: &RegisterRequest) -> Result<(), RequestError> {
    if request.full_name.is_empty() {
        return Err(RequestError::InvalidInput("fullName is required"));
    }
    if request.username.is_empty() {
        return Err(RequestError::InvalidInput("username is required"));
    }
    if request.email.is_empty() {
        return Err(RequestError::InvalidInput("email is required"));
    }
    if request.password.is_empty() {
        return Err(RequestError::InvalidInput("password is required"));
    }
    if !validation::validate_username(&request.username) {
        return Err(RequestError::InvalidInput(
            "Username must be 3-20 characters, alphanumeric and underscores only",
        ));
    }
    if !validation::validate_email(&request.email) {
        return Err(RequestError::InvalidInput("Invalid email address"));
    }
    validation::validate_password(&request.password).map_err(RequestError::InvalidInput)
}

pub async fn register_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(mut request): Json<RegisterRequest>,
) -> ApiResult<AuthWrapper> {
    validate_registration(&request).map_err(|e| e.to_json_response())?;

    request.password = hash_password_argon2(request.password)
        .await
        .map_err(|e| RequestError::Unavailable(e).to_json_response())?;

    let user = insert_user(&pool, &request)
        .await
        .map_err(|e| e.to_json_response())?;

    let token = get_jwt_token(user.id)
        .map_err(|e| RequestError::Unavailable(e).to_json_response())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthWrapper {
            message: "User registered successfully".to_string(),
            user: UserResponse::new(user),
            access_token: token,
        }),
    ))
}

pub async fn login_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<AuthWrapper> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(
            RequestError::InvalidInput("Email and password are required").to_json_response(),
        );
    }

    let user = get_user_by_email(&pool, &request.email)
        .await
        .map_err(|e| e.to_json_response())?
        .ok_or_else(|| {
            RequestError::Unauthorized("Invalid email or password").to_json_response()
        })?;

    let is_password_correct = verify_password_argon2(request.password, user.password.clone())
        .await
        .map_err(|e| RequestError::Unavailable(e).to_json_response())?;
    if !is_password_correct {
        return Err(RequestError::Unauthorized("Invalid email or password").to_json_response());
    }

    let token = get_jwt_token(user.id)
        .map_err(|e| RequestError::Unavailable(e).to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(AuthWrapper {
            message: "Login successful".to_string(),
            user: UserResponse::new(user),
            access_token: token,
        }),
    ))
}

pub async fn get_current_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    AuthUser { id }: AuthUser,
) -> ApiResult<UserWrapper> {
    let user = get_user_by_id(&pool, id)
        .await
        .map_err(|e| e.to_json_response())?
        .ok_or_else(|| RequestError::NotFound("User not found").to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(UserWrapper {
            user: UserResponse::new(user),
        }),
    ))
}

// ----------------- User Handlers -----------------

pub async fn list_users(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(params): Query<UserQueryParams>,
) -> ApiResult<UsersPageWrapper> {
    let (users, total) = search_users_in_db(&pool, &params)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(UsersPageWrapper {
            users: users.into_iter().map(UserResponse::new).collect(),
            total,
            page: params.page,
            pages: page_count(total, params.limit),
        }),
    ))
}

pub async fn get_user_profile(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(username): Path<String>,
) -> ApiResult<UserWrapper> {
    let user = get_user_by_username(&pool, &username)
        .await
        .map_err(|e| e.to_json_response())?
        .ok_or_else(|| RequestError::NotFound("User not found").to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(UserWrapper {
            user: UserResponse::new(user),
        }),
    ))
}

pub async fn update_user(
    AuthUser { id }: AuthUser,
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<UserUpdateWrapper> {
    // Users may only edit their own profile.
    if id != user_id {
        return Err(RequestError::Forbidden.to_json_response());
    }

    let user = update_profile_in_db(&pool, user_id, request)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(UserUpdateWrapper {
            message: "User updated successfully".to_string(),
            user: UserResponse::new(user),
        }),
    ))
}

pub async fn toggle_follow(
    AuthUser { id }: AuthUser,
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(user_id): Path<i64>,
) -> ApiResult<FollowToggleWrapper> {
    let following = toggle_follow_in_db(&pool, id, user_id)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(FollowToggleWrapper {
            message: "Follow status updated".to_string(),
            following,
        }),
    ))
}

// ----------------- Project Handlers -----------------

pub async fn list_projects(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(params): Query<ProjectQueryParams>,
) -> ApiResult<ProjectsPageWrapper> {
    let (projects, total) = list_projects_in_db(&pool, &params)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(ProjectsPageWrapper {
            projects: projects.into_iter().map(ProjectResponse::new).collect(),
            total,
            page: params.page,
            pages: page_count(total, params.limit),
        }),
    ))
}

pub async fn create_project(
    AuthUser { id }: AuthUser,
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<ProjectCreateWrapper> {
    if request.title.is_empty() {
        return Err(RequestError::InvalidInput("title is required").to_json_response());
    }
    if request.description.is_empty() {
        return Err(RequestError::InvalidInput("description is required").to_json_response());
    }
    if request.tags.is_empty() {
        return Err(RequestError::InvalidInput("tags is required").to_json_response());
    }

    let author = get_user_by_id(&pool, id)
        .await
        .map_err(|e| e.to_json_response())?
        .ok_or_else(|| RequestError::NotFound("User not found").to_json_response())?;

    let project = create_project_in_db(&pool, &author, request)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectCreateWrapper {
            message: "Project created successfully".to_string(),
            project: ProjectResponse::new(project),
        }),
    ))
}

pub async fn get_project(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(project_id): Path<i64>,
) -> ApiResult<ProjectWrapper> {
    let project = get_project_in_db(&pool, project_id)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(ProjectWrapper {
            project: ProjectResponse::new(project),
        }),
    ))
}

pub async fn toggle_star(
    AuthUser { id }: AuthUser,
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(project_id): Path<i64>,
) -> ApiResult<StarToggleWrapper> {
    let (starred, stars) = toggle_star_in_db(&pool, id, project_id)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(StarToggleWrapper {
            message: "Star toggled successfully".to_string(),
            starred,
            stars,
        }),
    ))
}

// ----------------- Messaging Handlers -----------------

pub async fn list_conversations(
    AuthUser { id }: AuthUser,
    Extension(pool): Extension<Arc<SqlitePool>>,
) -> ApiResult<ConversationsWrapper> {
    let conversations = list_conversations_in_db(&pool, id)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(ConversationsWrapper {
            conversations: conversations
                .into_iter()
                .map(ConversationResponse::new)
                .collect(),
        }),
    ))
}

pub async fn create_conversation(
    AuthUser { id }: AuthUser,
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<CreateConversationRequest>,
) -> Result<Response, JsonResponse<ErrorJson>> {
    let (conversation, created) =
        get_or_create_conversation_in_db(&pool, id, request.participant_id)
            .await
            .map_err(|e| e.to_json_response())?;

    let response = if created {
        (
            StatusCode::CREATED,
            Json(ConversationCreateWrapper {
                message: "Conversation created successfully".to_string(),
                conversation: ConversationResponse::bare(conversation),
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::OK,
            Json(ConversationWrapper {
                conversation: ConversationResponse::bare(conversation),
            }),
        )
            .into_response()
    };
    Ok(response)
}

pub async fn list_messages(
    AuthUser { id }: AuthUser,
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(conversation_id): Path<i64>,
) -> ApiResult<MessagesWrapper> {
    let messages = list_messages_in_db(&pool, id, conversation_id)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::OK,
        Json(MessagesWrapper {
            messages: messages.into_iter().map(MessageResponse::new).collect(),
        }),
    ))
}

pub async fn send_message(
    AuthUser { id }: AuthUser,
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(conversation_id): Path<i64>,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<MessageCreateWrapper> {
    if request.content.is_empty() {
        return Err(RequestError::InvalidInput("Message content is required").to_json_response());
    }

    let sender = get_user_by_id(&pool, id)
        .await
        .map_err(|e| e.to_json_response())?
        .ok_or_else(|| RequestError::NotFound("User not found").to_json_response())?;

    let message = send_message_in_db(&pool, &sender, conversation_id, &request.content)
        .await
        .map_err(|e| e.to_json_response())?;

    Ok((
        StatusCode::CREATED,
        Json(MessageCreateWrapper {
            message: "Message sent successfully".to_string(),
            message_data: MessageResponse::new(message),
        }),
    ))
}
