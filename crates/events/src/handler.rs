use async_trait::async_trait;

use crate::DomainEvent;

/// A subscriber reacting to published domain events.
///
/// Handlers must be idempotent: the bus makes no exactly-once promise and an
/// event may be redelivered. A handler's error is logged by the bus and never
/// reaches the publisher; the state change that caused the event is already
/// durable.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Stable handler name for logging.
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()>;
}
