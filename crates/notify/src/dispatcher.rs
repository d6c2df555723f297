//! Notification fan-out with partial-failure tolerance.

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tracing::warn;

use fieldops_core::DomainError;

use crate::{
    Channel, DeliveryOutcome, EmailSender, NotificationRequest, NotificationResult, Recipient,
    SmsSender,
};

/// Dispatcher tuning, passed in at construction.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Upper bound for a single channel send; an overrun counts as a failed
    /// delivery for that pair only.
    pub channel_timeout: Duration,
    /// Maximum concurrent in-flight sends.
    pub max_in_flight: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            channel_timeout: Duration::from_secs(10),
            max_in_flight: 8,
        }
    }
}

/// Fans one notification request out across its recipient × channel pairs.
pub struct NotificationDispatcher {
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    config: DispatcherConfig,
}

impl NotificationDispatcher {
    pub fn new(
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
        config: DispatcherConfig,
    ) -> Self {
        Self { email, sms, config }
    }

    /// Deliver to every recipient entry concurrently (bounded).
    ///
    /// Fails only for a malformed request. One pair's failure never blocks
    /// or fails the others; every pair yields exactly one result.
    pub async fn dispatch(
        &self,
        request: &NotificationRequest,
    ) -> Result<Vec<NotificationResult>, DomainError> {
        request.validate()?;

        let sends = request
            .recipients
            .iter()
            .map(|recipient| self.deliver(recipient, &request.subject, &request.body))
            .collect::<Vec<_>>();

        let results = stream::iter(sends)
            .buffer_unordered(self.config.max_in_flight)
            .collect::<Vec<_>>()
            .await;

        Ok(results)
    }

    async fn deliver(
        &self,
        recipient: &Recipient,
        subject: &str,
        body: &str,
    ) -> NotificationResult {
        let send = async {
            match recipient.channel {
                Channel::Email => self.email.send_email(&recipient.to, subject, body).await,
                Channel::Sms => self.sms.send_sms(&recipient.to, body).await,
            }
        };

        let outcome = match tokio::time::timeout(self.config.channel_timeout, send).await {
            Ok(Ok(())) => DeliveryOutcome::Delivered,
            Ok(Err(err)) => {
                warn!(channel = ?recipient.channel, to = %recipient.to, error = %err, "delivery failed");
                DeliveryOutcome::Failed {
                    reason: err.to_string(),
                }
            }
            Err(_) => {
                warn!(channel = ?recipient.channel, to = %recipient.to, "channel send timed out");
                DeliveryOutcome::Failed {
                    reason: "channel send timed out".to_string(),
                }
            }
        };

        NotificationResult {
            channel: recipient.channel,
            to: recipient.to.clone(),
            outcome,
        }
    }
}
