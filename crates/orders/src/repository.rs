//! Storage port for the orders domain.
//!
//! The repository is an external collaborator: implementations live outside
//! the domain crates and are injected at wiring time. Writes the lifecycle
//! relies on for correctness (`save_order`, `replace_assignments`,
//! `upsert_role`) must each be atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use fieldops_auth::Role;
use fieldops_core::{CompanyId, CustomerId, DomainError, OrderId, UserId};

use crate::{Company, Customer, EmployeeInvite, ServiceOrder, UserRoleBinding};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic version check failed or a uniqueness rule was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The storage backend could not serve the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(msg) => DomainError::conflict(msg),
            StoreError::Unavailable(msg) => DomainError::storage(msg),
        }
    }
}

/// Durable storage of companies, customers, orders, assignments, role
/// bindings and invites.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn company(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;

    async fn insert_company(&self, company: Company) -> Result<(), StoreError>;

    /// Load a customer, scoped to its company: a customer id from another
    /// company resolves to `None`.
    async fn customer(
        &self,
        company_id: CompanyId,
        id: CustomerId,
    ) -> Result<Option<Customer>, StoreError>;

    async fn order(&self, id: OrderId) -> Result<Option<ServiceOrder>, StoreError>;

    async fn insert_order(&self, order: ServiceOrder) -> Result<(), StoreError>;

    /// Persist an updated order. `order.version()` is the expected stored
    /// version; a mismatch fails with [`StoreError::Conflict`]. Returns the
    /// saved order with its version advanced.
    async fn save_order(&self, order: &ServiceOrder) -> Result<ServiceOrder, StoreError>;

    /// Orders of a company whose scheduled date falls within `[from, to]`.
    async fn orders_in_window(
        &self,
        company_id: CompanyId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ServiceOrder>, StoreError>;

    async fn assignments(&self, order_id: OrderId) -> Result<Vec<UserId>, StoreError>;

    /// Replace the full assignment set of an order in one atomic step
    /// (remove-all-then-insert; sets are never merged).
    async fn replace_assignments(
        &self,
        order_id: OrderId,
        technicians: &[UserId],
    ) -> Result<(), StoreError>;

    async fn orders_for_technician(
        &self,
        technician: &UserId,
    ) -> Result<Vec<ServiceOrder>, StoreError>;

    async fn roles_for_company(
        &self,
        company_id: CompanyId,
        role: Role,
    ) -> Result<Vec<UserRoleBinding>, StoreError>;

    /// Upsert a role binding: at most one binding per (company, user);
    /// an existing binding is overwritten.
    async fn upsert_role(&self, binding: UserRoleBinding) -> Result<(), StoreError>;

    async fn insert_invite(&self, invite: EmployeeInvite) -> Result<(), StoreError>;
}
