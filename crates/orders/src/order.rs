use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldops_core::{CompanyId, CustomerId, DomainError, OrderId};

/// Service-order status lifecycle.
///
/// `Completed` and `Cancelled` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether a transition from `self` to `next` is permitted.
    ///
    /// Work never moves backwards: an in-progress order cannot return to
    /// `Scheduled`, and nothing leaves a terminal state.
    pub fn allows(&self, next: OrderStatus) -> bool {
        match self {
            OrderStatus::Scheduled => matches!(
                next,
                OrderStatus::InProgress | OrderStatus::Completed | OrderStatus::Cancelled
            ),
            OrderStatus::InProgress => {
                matches!(next, OrderStatus::Completed | OrderStatus::Cancelled)
            }
            OrderStatus::Completed | OrderStatus::Cancelled => false,
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            OrderStatus::Scheduled => "Scheduled",
            OrderStatus::InProgress => "InProgress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Postal address of the job site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {}, {} {}", self.line, self.city, self.state, self.zip)
    }
}

/// Optional geocoordinates of the job site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// The central entity: one unit of scheduled field work.
///
/// State changes go through [`ServiceOrder::transition`] and
/// [`ServiceOrder::reschedule`] so the status rules cannot be bypassed.
/// `version` backs the store's optimistic save and only the store advances it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrder {
    id: OrderId,
    company_id: CompanyId,
    customer_id: CustomerId,
    address: Address,
    description: String,
    scheduled_date: DateTime<Utc>,
    status: OrderStatus,
    last_updated: DateTime<Utc>,
    geo: Option<GeoPoint>,
    version: u64,
}

impl ServiceOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        company_id: CompanyId,
        customer_id: CustomerId,
        address: Address,
        description: impl Into<String>,
        scheduled_date: DateTime<Utc>,
        geo: Option<GeoPoint>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            company_id,
            customer_id,
            address,
            description: description.into(),
            scheduled_date,
            status: OrderStatus::Scheduled,
            last_updated: now,
            geo,
            version: 0,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn scheduled_date(&self) -> DateTime<Utc> {
        self.scheduled_date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn geo(&self) -> Option<GeoPoint> {
        self.geo
    }

    /// Version of the stored copy this instance was loaded from.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Advance the stored version. Called by the store after a successful
    /// optimistic save; domain code never touches it.
    pub fn advance_version(&mut self) {
        self.version += 1;
    }

    /// Move the order to `next`, enforcing the transition table.
    pub fn transition(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.status.allows(next) {
            return Err(DomainError::invalid_transition(format!(
                "{} -> {}",
                self.status, next
            )));
        }
        self.status = next;
        self.last_updated = now;
        Ok(())
    }

    /// Move the scheduled date. Only meaningful while work is still open.
    pub fn reschedule(
        &mut self,
        new_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::invalid_transition(format!(
                "cannot reschedule a {} order",
                self.status
            )));
        }
        self.scheduled_date = new_date;
        self.last_updated = now;
        Ok(())
    }
}
