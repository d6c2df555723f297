//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures scoped to a single operation.
/// Per-recipient channel delivery problems are reported in notification
/// results, not here; nothing in this enum is fatal to the process and none
/// of these is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A requested entity is absent.
    #[error("not found")]
    NotFound,

    /// Cross-tenant access attempt. Internally distinct from `NotFound` for
    /// logging; external callers must only ever see [`DomainError::redacted`].
    #[error("tenant mismatch")]
    TenantMismatch,

    /// The customer does not exist or belongs to a different company.
    #[error("customer not found")]
    CustomerNotFound,

    /// A state-machine rule was violated.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// A concurrent writer won (e.g. stale version on save).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The request itself is unusable (empty recipients, bad address, ...).
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The caller lacks a required capability.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A directly-awaited channel send failed (fan-out failures are recorded
    /// per recipient instead).
    #[error("channel delivery failed: {0}")]
    ChannelDelivery(String),

    /// The storage collaborator failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// The error an external caller is allowed to observe.
    ///
    /// A cross-tenant probe must be indistinguishable from a missing entity,
    /// so `TenantMismatch` collapses to `NotFound` at the trust boundary.
    pub fn redacted(&self) -> DomainError {
        match self {
            DomainError::TenantMismatch => DomainError::NotFound,
            other => other.clone(),
        }
    }
}
