use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::User};

mod follow_helpers;
mod message_helpers;
mod project_helpers;
mod user_helpers;

pub use follow_helpers::*;
pub use message_helpers::*;
pub use project_helpers::*;
pub use user_helpers::*;

/// Builds `UPDATE ... SET` statements over whichever optional fields are
/// actually present.
struct QueryBuilder {
    query: String,
    params: Vec<String>,
    seperator: &'static str,
    counter: usize,
}

impl QueryBuilder {
    fn new(initial: &str, seperator: &'static str) -> Self {
        Self {
            query: initial.to_owned(),
            params: Vec::new(),
            seperator,
            counter: 0,
        }
    }

    fn add_param(mut self, column: &str, param: Option<String>) -> Self {
        if let Some(value) = param {
            if self.counter > 0 {
                self.query.push_str(self.seperator);
            }
            self.query.push_str(column);
            self.query.push_str(" = ?");
            self.params.push(value);
            self.counter += 1;
        }
        self
    }

    fn is_empty(&self) -> bool {
        self.counter == 0
    }

    fn append(mut self, fragment: &str, param: String) -> Self {
        self.query.push_str(fragment);
        self.params.push(param);
        self
    }

    fn build(self) -> (String, Vec<String>) {
        (self.query, self.params)
    }
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(e) if e.message().contains("UNIQUE constraint failed"))
}

// ----------------- Helper Functions -----------------

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, RequestError> {
    let result = sqlx::query_as::<Sqlite, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, RequestError> {
    let result = sqlx::query_as::<Sqlite, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, RequestError> {
    let result = sqlx::query_as::<Sqlite, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::QueryBuilder;

    #[test]
    fn builds_nothing_when_no_fields_are_present() {
        let builder = QueryBuilder::new("UPDATE users SET ", ", ")
            .add_param("full_name", None)
            .add_param("bio", None);
        assert!(builder.is_empty());
    }

    #[test]
    fn builds_only_present_fields_in_order() {
        let builder = QueryBuilder::new("UPDATE users SET ", ", ")
            .add_param("full_name", Some("Alice".to_owned()))
            .add_param("bio", None)
            .add_param("location", Some("Lagos".to_owned()));
        assert!(!builder.is_empty());
        let (query, params) = builder.append(" WHERE id = ?", "7".to_owned()).build();
        assert_eq!(
            query,
            "UPDATE users SET full_name = ?, location = ? WHERE id = ?"
        );
        assert_eq!(params, vec!["Alice", "Lagos", "7"]);
    }

    #[test]
    fn single_field_has_no_seperator() {
        let builder = QueryBuilder::new("UPDATE users SET ", ", ")
            .add_param("bio", Some("hi".to_owned()));
        let (query, params) = builder.append(" WHERE id = ?", "1".to_owned()).build();
        assert_eq!(query, "UPDATE users SET bio = ? WHERE id = ?");
        assert_eq!(params, vec!["hi", "1"]);
    }
}
