use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldops_core::{CompanyId, OrderId};

/// Fact: a service order reached `Completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub order_id: OrderId,
    pub company_id: CompanyId,
    pub occurred_at: DateTime<Utc>,
}

/// All domain events, as a closed set of variants.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - published once per causing transition, after the state commit
/// - consumed by zero or more independent handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    OrderCompleted(OrderCompleted),
}

/// Discriminant used to key handler registration on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    OrderCompleted,
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::OrderCompleted(_) => EventKind::OrderCompleted,
        }
    }

    /// Stable event name (e.g. "orders.order.completed") for logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::OrderCompleted(_) => "orders.order.completed",
        }
    }

    /// When the event occurred (business time).
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::OrderCompleted(e) => e.occurred_at,
        }
    }
}
