use sqlx::SqlitePool;

use crate::errors::RequestError;

use super::get_user_by_id;

/// Flips the follow relation for (follower, followed) and keeps both
/// denormalized counters in step with it. Returns the resulting state:
/// true when the caller now follows the target.
pub async fn toggle_follow_in_db(
    pool: &SqlitePool,
    follower_id: i64,
    followed_id: i64,
) -> Result<bool, RequestError> {
    if follower_id == followed_id {
        return Err(RequestError::InvalidInput("Cannot follow yourself"));
    }
    if get_user_by_id(pool, follower_id).await?.is_none()
        || get_user_by_id(pool, followed_id).await?.is_none()
    {
        return Err(RequestError::NotFound("User not found"));
    }

    let mut tx = pool.begin().await?;

    let existing = sqlx::query("SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2")
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(&mut tx)
        .await?;

    let following = if existing.is_some() {
        let deleted =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
                .bind(follower_id)
                .bind(followed_id)
                .execute(&mut tx)
                .await?;
        // Counters move only when the relation row actually changed.
        if deleted.rows_affected() > 0 {
            adjust_follow_counts(&mut tx, follower_id, followed_id, -1).await?;
        }
        false
    } else {
        let inserted = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followed_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&mut tx)
        .await?;
        if inserted.rows_affected() > 0 {
            adjust_follow_counts(&mut tx, follower_id, followed_id, 1).await?;
        }
        true
    };

    tx.commit().await?;
    Ok(following)
}

async fn adjust_follow_counts(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    follower_id: i64,
    followed_id: i64,
    delta: i64,
) -> Result<(), RequestError> {
    sqlx::query("UPDATE users SET following_count = following_count + $1 WHERE id = $2")
        .bind(delta)
        .bind(follower_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE users SET followers_count = followers_count + $1 WHERE id = $2")
        .bind(delta)
        .bind(followed_id)
        .execute(&mut *tx)
        .await?;
    Ok(())
}
