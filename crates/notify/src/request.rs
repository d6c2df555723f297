use serde::{Deserialize, Serialize};

use fieldops_core::DomainError;

/// Delivery channel of one notification entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

/// One recipient × channel pair of a notification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub channel: Channel,
    /// Channel address: an email address or an E.164 phone number.
    pub to: String,
}

/// Ephemeral description of one logical notification. Never persisted;
/// produces one [`NotificationResult`] per recipient entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub subject: String,
    pub body: String,
    pub recipients: Vec<Recipient>,
}

impl NotificationRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.recipients.is_empty() {
            return Err(DomainError::malformed("notification has no recipients"));
        }
        if self.body.trim().is_empty() {
            return Err(DomainError::malformed("notification body is empty"));
        }
        Ok(())
    }
}

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    Delivered,
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// Per-recipient, per-channel delivery record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    pub channel: Channel,
    pub to: String,
    pub outcome: DeliveryOutcome,
}
