use sqlx::{Sqlite, SqlitePool};

use crate::{
    data_formats::{RegisterRequest, UpdateProfileRequest, UserQueryParams},
    errors::RequestError,
    models::User,
};

use super::{get_user_by_id, is_unique_violation, QueryBuilder};

/// Inserts a new account. `user.password` must already be hashed.
pub async fn insert_user(pool: &SqlitePool, user: &RegisterRequest) -> Result<User, RequestError> {
    let existing = sqlx::query("SELECT id FROM users WHERE email = $1 OR username = $2")
        .bind(&user.email)
        .bind(&user.username)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(RequestError::Conflict(
            "User with this email or username already exists",
        ));
    }

    let skills = user.skills.join(",");
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, User>(
        r#"
        INSERT INTO users (full_name, username, email, password, bio, avatar, skills,
                           github_url, linkedin_url, portfolio_url, location)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(&user.full_name)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.bio)
    .bind(&user.avatar)
    .bind(&skills)
    .bind(&user.github_url)
    .bind(&user.linkedin_url)
    .bind(&user.portfolio_url)
    .bind(&user.location)
    .fetch_one(&mut tx)
    .await
    .map_err(|e| {
        // Two racing registrations can both pass the probe above; the unique
        // index settles it.
        if is_unique_violation(&e) {
            RequestError::Conflict("User with this email or username already exists")
        } else {
            e.into()
        }
    })?;

    tx.commit().await?;
    Ok(result)
}

pub async fn update_profile_in_db(
    pool: &SqlitePool,
    id: i64,
    UpdateProfileRequest {
        full_name,
        bio,
        skills,
        github_url,
        linkedin_url,
        portfolio_url,
        location,
    }: UpdateProfileRequest,
) -> Result<User, RequestError> {
    let builder = QueryBuilder::new("UPDATE users SET ", ", ")
        .add_param("full_name", full_name)
        .add_param("bio", bio)
        .add_param("skills", skills.map(|skills| skills.join(",")))
        .add_param("github_url", github_url)
        .add_param("linkedin_url", linkedin_url)
        .add_param("portfolio_url", portfolio_url)
        .add_param("location", location);

    if builder.is_empty() {
        return Err(RequestError::InvalidInput("No valid fields to update"));
    }
    if get_user_by_id(pool, id).await?.is_none() {
        return Err(RequestError::NotFound("User not found"));
    }

    let (query, params) = builder.append(" WHERE id = ?", id.to_string()).build();
    let mut query = sqlx::query(&query);
    for param in params {
        query = query.bind(param);
    }
    query.execute(pool).await?;

    match get_user_by_id(pool, id).await? {
        Some(user) => Ok(user),
        None => Err(RequestError::NotFound("User not found")),
    }
}

/// Case-insensitive substring search over full name, username and skills.
pub async fn search_users_in_db(
    pool: &SqlitePool,
    UserQueryParams {
        search,
        page,
        limit,
    }: &UserQueryParams,
) -> Result<(Vec<User>, i64), RequestError> {
    let pattern = search
        .as_ref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s));
    let limit = (*limit).max(1) as i64;
    let offset = (page.saturating_sub(1) as i64) * limit;

    let users = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT * FROM users
        WHERE ($1 IS NULL OR full_name LIKE $1 OR username LIKE $1 OR skills LIKE $1)
        ORDER BY id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern.as_deref())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<Sqlite, i64>(
        r#"
        SELECT COUNT(*) FROM users
        WHERE ($1 IS NULL OR full_name LIKE $1 OR username LIKE $1 OR skills LIKE $1)
        "#,
    )
    .bind(pattern.as_deref())
    .fetch_one(pool)
    .await?;

    Ok((users, total))
}
