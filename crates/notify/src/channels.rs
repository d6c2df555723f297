//! Channel capability interfaces (external collaborators).
//!
//! Implementations wrap the actual provider SDKs; everything here is an
//! injected trait object so the dispatcher and lifecycle stay provider-free.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use fieldops_core::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The provider rejected the message (bad address, quota, ...).
    #[error("channel rejected message: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("channel unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), ChannelError>;
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, to: &str, text: &str) -> Result<(), ChannelError>;
}

/// Real-time push to connected user sessions.
///
/// Best-effort: callers fire and log, a failed push never fails the
/// operation that triggered it.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn push_to_user(
        &self,
        user_id: &UserId,
        event: &str,
        payload: Value,
    ) -> Result<(), ChannelError>;
}
