//! Directory capabilities backed by the external identity provider.
//!
//! Contact details always come from the user directory; the system never
//! synthesizes addresses for a user it cannot resolve.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fieldops_core::{DomainError, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("profile not found")]
    ProfileNotFound,

    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for DomainError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::ProfileNotFound => DomainError::NotFound,
            DirectoryError::Unavailable(msg) => DomainError::storage(msg),
        }
    }
}

/// Contact details resolved from a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    /// E.164 phone number.
    pub phone: String,
}

/// Read access to user profiles (external collaborator).
#[async_trait]
pub trait UserProfiles: Send + Sync {
    async fn contact(&self, user_id: &UserId) -> Result<ContactInfo, DirectoryError>;
}

/// Result of a business-to-business invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// URL the invited user follows to redeem the invitation.
    pub redeem_url: String,
}

/// Sends identity-provider invitations (external collaborator).
#[async_trait]
pub trait IdentityInviter: Send + Sync {
    async fn invite(&self, email: &str, redirect_url: &str) -> Result<Invitation, DirectoryError>;
}
