//! SQLite implementation of UserRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::foundation::{DomainError, ErrorCode, LanguageCode, UserId};
use crate::domain::user::{User, UserProfile};
use crate::ports::UserRepository;

type UserRow = (i64, String, Option<String>, bool, String);

/// SQLite implementation of UserRepository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn ensure(
        &self,
        profile: &UserProfile,
        is_admin: bool,
        default_language: &LanguageCode,
    ) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (telegram_id, first_name, username, is_admin, language_code)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(telegram_id) DO UPDATE SET
                first_name = excluded.first_name,
                username = excluded.username,
                is_admin = excluded.is_admin
            RETURNING telegram_id, first_name, username, is_admin, language_code
            "#,
        )
        .bind(profile.id.as_i64())
        .bind(&profile.display_name)
        .bind(profile.handle.as_deref())
        .bind(is_admin)
        .bind(default_language.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert user: {}", e),
            )
        })?;

        row_to_user(row)
    }

    async fn set_language(&self, id: UserId, language: &LanguageCode) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET language_code = ? WHERE telegram_id = ?")
            .bind(language.as_str())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to update language: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn find(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT telegram_id, first_name, username, is_admin, language_code FROM users WHERE telegram_id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch user: {}", e),
            )
        })?;

        row.map(row_to_user).transpose()
    }
}

fn row_to_user((id, display_name, handle, is_admin, language): UserRow) -> Result<User, DomainError> {
    let language = LanguageCode::new(&language).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored language for user {}: {}", id, e),
        )
    })?;
    Ok(User {
        id: UserId::new(id),
        display_name,
        handle,
        is_admin,
        language,
    })
}
