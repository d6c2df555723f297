//! In-memory store for tests/dev.
//!
//! - No IO
//! - Whole-state lock per call; every write is atomic from the callers'
//!   point of view
//! - Enforces the same conflict rules a real backend would (optimistic
//!   order version, one invoice per order, one role binding per
//!   (company, user))

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use fieldops_auth::Role;
use fieldops_core::{CompanyId, CustomerId, InviteId, InvoiceId, OrderId, UserId};
use fieldops_invoicing::{Invoice, InvoiceStore};
use fieldops_orders::{
    Company, Customer, EmployeeInvite, OrderRepository, ServiceOrder, StoreError, UserRoleBinding,
};

#[derive(Default)]
struct State {
    companies: HashMap<CompanyId, Company>,
    customers: HashMap<CustomerId, Customer>,
    orders: HashMap<OrderId, ServiceOrder>,
    assignments: HashMap<OrderId, Vec<UserId>>,
    roles: Vec<UserRoleBinding>,
    invites: HashMap<InviteId, EmployeeInvite>,
    invoices: HashMap<InvoiceId, Invoice>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a customer directly (customers are otherwise owned by an
    /// out-of-scope CRM surface).
    pub fn seed_customer(&self, customer: Customer) {
        if let Ok(mut state) = self.state.write() {
            state.customers.insert(customer.id, customer);
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("state lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("state lock poisoned".to_string()))
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        Ok(self.read()?.companies.get(&id).cloned())
    }

    async fn insert_company(&self, company: Company) -> Result<(), StoreError> {
        self.write()?.companies.insert(company.id, company);
        Ok(())
    }

    async fn customer(
        &self,
        company_id: CompanyId,
        id: CustomerId,
    ) -> Result<Option<Customer>, StoreError> {
        Ok(self
            .read()?
            .customers
            .get(&id)
            .filter(|customer| customer.company_id == company_id)
            .cloned())
    }

    async fn order(&self, id: OrderId) -> Result<Option<ServiceOrder>, StoreError> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    async fn insert_order(&self, order: ServiceOrder) -> Result<(), StoreError> {
        self.write()?.orders.insert(order.id(), order);
        Ok(())
    }

    async fn save_order(&self, order: &ServiceOrder) -> Result<ServiceOrder, StoreError> {
        let mut state = self.write()?;
        let Some(stored) = state.orders.get(&order.id()) else {
            return Err(StoreError::Conflict(format!(
                "order {} does not exist",
                order.id()
            )));
        };
        if stored.version() != order.version() {
            return Err(StoreError::Conflict(format!(
                "order {} version {} is stale (stored {})",
                order.id(),
                order.version(),
                stored.version()
            )));
        }

        let mut saved = order.clone();
        saved.advance_version();
        state.orders.insert(saved.id(), saved.clone());
        Ok(saved)
    }

    async fn orders_in_window(
        &self,
        company_id: CompanyId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ServiceOrder>, StoreError> {
        let state = self.read()?;
        let mut orders: Vec<ServiceOrder> = state
            .orders
            .values()
            .filter(|order| {
                order.company_id() == company_id
                    && order.scheduled_date() >= from
                    && order.scheduled_date() <= to
            })
            .cloned()
            .collect();
        orders.sort_by_key(|order| order.scheduled_date());
        Ok(orders)
    }

    async fn assignments(&self, order_id: OrderId) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .read()?
            .assignments
            .get(&order_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_assignments(
        &self,
        order_id: OrderId,
        technicians: &[UserId],
    ) -> Result<(), StoreError> {
        let mut state = self.write()?;
        // Remove-all-then-insert under one lock: the set is replaced, never
        // merged with a concurrent writer's.
        state.assignments.insert(order_id, technicians.to_vec());
        Ok(())
    }

    async fn orders_for_technician(
        &self,
        technician: &UserId,
    ) -> Result<Vec<ServiceOrder>, StoreError> {
        let state = self.read()?;
        let mut orders: Vec<ServiceOrder> = state
            .assignments
            .iter()
            .filter(|(_, assigned)| assigned.contains(technician))
            .filter_map(|(order_id, _)| state.orders.get(order_id).cloned())
            .collect();
        orders.sort_by_key(|order| order.scheduled_date());
        Ok(orders)
    }

    async fn roles_for_company(
        &self,
        company_id: CompanyId,
        role: Role,
    ) -> Result<Vec<UserRoleBinding>, StoreError> {
        Ok(self
            .read()?
            .roles
            .iter()
            .filter(|binding| binding.company_id == company_id && binding.role == role)
            .cloned()
            .collect())
    }

    async fn upsert_role(&self, binding: UserRoleBinding) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if let Some(existing) = state
            .roles
            .iter_mut()
            .find(|b| b.company_id == binding.company_id && b.user_id == binding.user_id)
        {
            existing.role = binding.role;
        } else {
            state.roles.push(binding);
        }
        Ok(())
    }

    async fn insert_invite(&self, invite: EmployeeInvite) -> Result<(), StoreError> {
        self.write()?.invites.insert(invite.id, invite);
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    async fn create_invoice(&self, invoice: Invoice) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if state
            .invoices
            .values()
            .any(|existing| existing.order_id() == invoice.order_id())
        {
            return Err(StoreError::Conflict(format!(
                "invoice already exists for order {}",
                invoice.order_id()
            )));
        }
        state.invoices.insert(invoice.id(), invoice);
        Ok(())
    }

    async fn invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.read()?.invoices.get(&id).cloned())
    }

    async fn invoice_for_order(&self, order_id: OrderId) -> Result<Option<Invoice>, StoreError> {
        Ok(self
            .read()?
            .invoices
            .values()
            .find(|invoice| invoice.order_id() == order_id)
            .cloned())
    }

    async fn save_invoice(&self, invoice: Invoice) -> Result<(), StoreError> {
        self.write()?.invoices.insert(invoice.id(), invoice);
        Ok(())
    }
}
