//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LanguageCode, UserId};
use crate::domain::user::{User, UserProfile};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Upserts a user on contact.
    ///
    /// Names and the admin flag are refreshed; a stored language is kept and
    /// `default_language` only applies to new users.
    async fn ensure(
        &self,
        profile: &UserProfile,
        is_admin: bool,
        default_language: &LanguageCode,
    ) -> Result<User, DomainError>;

    /// Persists a language choice.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user was never stored
    async fn set_language(&self, id: UserId, language: &LanguageCode) -> Result<(), DomainError>;

    /// Finds a user by id. Returns `None` if not found.
    async fn find(&self, id: UserId) -> Result<Option<User>, DomainError>;
}
