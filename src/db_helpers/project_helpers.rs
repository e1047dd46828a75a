use sqlx::{Row, Sqlite, SqlitePool};

use crate::{
    data_formats::{CreateProjectRequest, ProjectQueryParams},
    errors::RequestError,
    models::{Project, User},
};

/// Sentinel tag value the client sends when no tag filter is applied.
const TAG_FILTER_OFF: &str = "All";

const TAG_LIST_SELECT: &str = r#"
    (SELECT group_concat(tags.name, ',')
     FROM tags
          JOIN projecttags ON projecttags.tag_id = tags.id
     WHERE projecttags.project_id = projects.id) AS tag_list
"#;

fn single_project_query() -> String {
    format!(
        r#"
        SELECT projects.*, {TAG_LIST_SELECT}
        FROM projects
        WHERE projects.id = $1
        "#
    )
}

const PROJECT_FILTERS: &str = r#"
    WHERE ($1 IS NULL OR projects.author_username = $1)
      AND ($2 IS NULL OR EXISTS (SELECT 1
                                 FROM projecttags
                                      JOIN tags ON tags.id = projecttags.tag_id
                                 WHERE projecttags.project_id = projects.id
                                   AND tags.name = $2))
      AND ($3 IS NULL OR projects.title LIKE $3
                      OR projects.description LIKE $3
                      OR EXISTS (SELECT 1
                                 FROM projecttags
                                      JOIN tags ON tags.id = projecttags.tag_id
                                 WHERE projecttags.project_id = projects.id
                                   AND tags.name LIKE $3))
"#;

pub async fn create_project_in_db(
    pool: &SqlitePool,
    author: &User,
    CreateProjectRequest {
        title,
        description,
        image,
        tags,
        demo_url,
        github_url,
    }: CreateProjectRequest,
) -> Result<Project, RequestError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r#"
        INSERT INTO projects (title, description, image, author_id,
                              author_name, author_username, author_avatar,
                              demo_url, github_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&title)
    .bind(&description)
    .bind(&image)
    .bind(author.id)
    .bind(&author.full_name)
    .bind(&author.username)
    .bind(&author.avatar)
    .bind(&demo_url)
    .bind(&github_url)
    .fetch_one(&mut tx)
    .await?;
    let project_id: i64 = row.get("id");

    for tag in &tags {
        let tag_id = sqlx::query_scalar::<Sqlite, i64>(
            r#"
            INSERT INTO tags (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = $1
            RETURNING id
            "#,
        )
        .bind(tag)
        .fetch_one(&mut tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO projecttags (project_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT (project_id, tag_id) DO NOTHING
            "#,
        )
        .bind(project_id)
        .bind(tag_id)
        .execute(&mut tx)
        .await?;
    }

    sqlx::query("UPDATE users SET projects_count = projects_count + 1 WHERE id = $1")
        .bind(author.id)
        .execute(&mut tx)
        .await?;

    tx.commit().await?;

    match fetch_project_in_db(pool, project_id).await? {
        Some(project) => Ok(project),
        None => Err(RequestError::NotFound("Project not found")),
    }
}

/// Plain read of a project row, with no view-count side effect.
pub async fn fetch_project_in_db(
    pool: &SqlitePool,
    project_id: i64,
) -> Result<Option<Project>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Project>(&single_project_query())
        .bind(project_id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

/// Fetch-by-id as the API observes it: every successful call counts one
/// view. The atomic increment doubles as the existence check.
pub async fn get_project_in_db(
    pool: &SqlitePool,
    project_id: i64,
) -> Result<Project, RequestError> {
    let updated = sqlx::query("UPDATE projects SET views = views + 1 WHERE id = $1")
        .bind(project_id)
        .execute(pool)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(RequestError::NotFound("Project not found"));
    }
    match fetch_project_in_db(pool, project_id).await? {
        Some(project) => Ok(project),
        None => Err(RequestError::NotFound("Project not found")),
    }
}

pub async fn list_projects_in_db(
    pool: &SqlitePool,
    ProjectQueryParams {
        search,
        tag,
        author,
        page,
        limit,
    }: &ProjectQueryParams,
) -> Result<(Vec<Project>, i64), RequestError> {
    let author = author
        .as_deref()
        .filter(|a| !a.is_empty());
    let tag = tag
        .as_deref()
        .filter(|t| !t.is_empty() && *t != TAG_FILTER_OFF);
    let pattern = search
        .as_ref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s));
    let limit = (*limit).max(1) as i64;
    let offset = (page.saturating_sub(1) as i64) * limit;

    let list_query = format!(
        r#"
        SELECT projects.*, {TAG_LIST_SELECT}
        FROM projects
        {PROJECT_FILTERS}
        ORDER BY projects.created_at DESC, projects.id DESC
        LIMIT $4 OFFSET $5
        "#
    );
    let projects = sqlx::query_as::<Sqlite, Project>(&list_query)
        .bind(author)
        .bind(tag)
        .bind(pattern.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let count_query = format!("SELECT COUNT(*) FROM projects {PROJECT_FILTERS}");
    let total = sqlx::query_scalar::<Sqlite, i64>(&count_query)
        .bind(author)
        .bind(tag)
        .bind(pattern.as_deref())
        .fetch_one(pool)
        .await?;

    Ok((projects, total))
}

/// Flips the star relation for (user, project) and keeps the cached star
/// count in step. Returns the resulting state and the post-toggle count.
pub async fn toggle_star_in_db(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
) -> Result<(bool, i64), RequestError> {
    let project = sqlx::query("SELECT id FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_optional(pool)
        .await?;
    if project.is_none() {
        return Err(RequestError::NotFound("Project not found"));
    }

    let mut tx = pool.begin().await?;

    let existing = sqlx::query("SELECT 1 FROM stars WHERE user_id = $1 AND project_id = $2")
        .bind(user_id)
        .bind(project_id)
        .fetch_optional(&mut tx)
        .await?;

    let starred = if existing.is_some() {
        let deleted = sqlx::query("DELETE FROM stars WHERE user_id = $1 AND project_id = $2")
            .bind(user_id)
            .bind(project_id)
            .execute(&mut tx)
            .await?;
        // Counters move only when the relation row actually changed.
        if deleted.rows_affected() > 0 {
            sqlx::query("UPDATE projects SET stars = stars - 1 WHERE id = $1")
                .bind(project_id)
                .execute(&mut tx)
                .await?;
        }
        false
    } else {
        let inserted = sqlx::query(
            r#"
            INSERT INTO stars (user_id, project_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, project_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .execute(&mut tx)
        .await?;
        if inserted.rows_affected() > 0 {
            sqlx::query("UPDATE projects SET stars = stars + 1 WHERE id = $1")
                .bind(project_id)
                .execute(&mut tx)
                .await?;
        }
        true
    };

    let stars = sqlx::query_scalar::<Sqlite, i64>("SELECT stars FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_one(&mut tx)
        .await?;

    tx.commit().await?;
    Ok((starred, stars))
}
