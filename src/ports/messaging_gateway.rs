//! Messaging gateway port - delivers replies to chat users.

use async_trait::async_trait;

use crate::domain::conversation::Reply;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors that can occur while delivering a message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Platform rejected message: {0}")]
    Rejected(String),
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        DomainError::new(ErrorCode::DeliveryFailed, err.to_string())
    }
}

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Sends one reply to a user's chat.
    async fn send(&self, to: UserId, reply: &Reply) -> Result<(), GatewayError>;
}
