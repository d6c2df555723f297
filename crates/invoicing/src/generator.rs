//! The `OrderCompleted` → invoice handler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use fieldops_events::{DomainEvent, EventHandler, OrderCompleted};
use fieldops_orders::{OrderRepository, StoreError};

use crate::{FlatRatePolicy, Invoice, InvoiceStore};

/// Subscriber that turns a completed order into exactly one invoice.
///
/// Idempotent against duplicate event delivery: an existing invoice for the
/// order id is a no-op, and losing a create race to a concurrent duplicate
/// counts as success.
pub struct InvoiceGenerator {
    orders: Arc<dyn OrderRepository>,
    invoices: Arc<dyn InvoiceStore>,
    policy: FlatRatePolicy,
}

impl InvoiceGenerator {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        invoices: Arc<dyn InvoiceStore>,
        policy: FlatRatePolicy,
    ) -> Self {
        Self {
            orders,
            invoices,
            policy,
        }
    }

    async fn on_order_completed(&self, event: &OrderCompleted) -> anyhow::Result<()> {
        let Some(order) = self.orders.order(event.order_id).await? else {
            // The order may have been deleted concurrently; nothing to bill.
            debug!(order = %event.order_id, "completed order no longer exists, skipping invoice");
            return Ok(());
        };

        if self.invoices.invoice_for_order(order.id()).await?.is_some() {
            debug!(order = %order.id(), "invoice already exists, duplicate delivery ignored");
            return Ok(());
        }

        let invoice = Invoice::flat_rate(&self.policy, &order, Utc::now());
        let invoice_id = invoice.id();

        match self.invoices.create_invoice(invoice).await {
            Ok(()) => {
                info!(order = %order.id(), invoice = %invoice_id, "invoice created");
                Ok(())
            }
            // A concurrent duplicate delivery won the insert; the invariant
            // (one invoice per order) holds either way.
            Err(StoreError::Conflict(_)) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl EventHandler for InvoiceGenerator {
    fn name(&self) -> &'static str {
        "invoice-generator"
    }

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
        match event {
            DomainEvent::OrderCompleted(completed) => self.on_order_completed(completed).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    use fieldops_auth::Role;
    use fieldops_core::{CompanyId, CustomerId, InvoiceId, OrderId, UserId};
    use fieldops_orders::{
        Address, Company, Customer, EmployeeInvite, ServiceOrder, UserRoleBinding,
    };

    #[derive(Default)]
    struct FakeStore {
        orders: Mutex<HashMap<OrderId, ServiceOrder>>,
        invoices: Mutex<Vec<Invoice>>,
    }

    #[async_trait]
    impl OrderRepository for FakeStore {
        async fn company(&self, _id: CompanyId) -> Result<Option<Company>, StoreError> {
            Ok(None)
        }

        async fn insert_company(&self, _company: Company) -> Result<(), StoreError> {
            Ok(())
        }

        async fn customer(
            &self,
            _company_id: CompanyId,
            _id: CustomerId,
        ) -> Result<Option<Customer>, StoreError> {
            Ok(None)
        }

        async fn order(&self, id: OrderId) -> Result<Option<ServiceOrder>, StoreError> {
            Ok(self.orders.lock().unwrap().get(&id).cloned())
        }

        async fn insert_order(&self, order: ServiceOrder) -> Result<(), StoreError> {
            self.orders.lock().unwrap().insert(order.id(), order);
            Ok(())
        }

        async fn save_order(&self, order: &ServiceOrder) -> Result<ServiceOrder, StoreError> {
            Ok(order.clone())
        }

        async fn orders_in_window(
            &self,
            _company_id: CompanyId,
            _from: DateTime<Utc>,
            _to: DateTime<Utc>,
        ) -> Result<Vec<ServiceOrder>, StoreError> {
            Ok(Vec::new())
        }

        async fn assignments(&self, _order_id: OrderId) -> Result<Vec<UserId>, StoreError> {
            Ok(Vec::new())
        }

        async fn replace_assignments(
            &self,
            _order_id: OrderId,
            _technicians: &[UserId],
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn orders_for_technician(
            &self,
            _technician: &UserId,
        ) -> Result<Vec<ServiceOrder>, StoreError> {
            Ok(Vec::new())
        }

        async fn roles_for_company(
            &self,
            _company_id: CompanyId,
            _role: Role,
        ) -> Result<Vec<UserRoleBinding>, StoreError> {
            Ok(Vec::new())
        }

        async fn upsert_role(&self, _binding: UserRoleBinding) -> Result<(), StoreError> {
            Ok(())
        }

        async fn insert_invite(&self, _invite: EmployeeInvite) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[async_trait]
    impl InvoiceStore for FakeStore {
        async fn create_invoice(&self, invoice: Invoice) -> Result<(), StoreError> {
            let mut invoices = self.invoices.lock().unwrap();
            if invoices.iter().any(|i| i.order_id() == invoice.order_id()) {
                return Err(StoreError::Conflict(format!(
                    "invoice exists for order {}",
                    invoice.order_id()
                )));
            }
            invoices.push(invoice);
            Ok(())
        }

        async fn invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
            Ok(self
                .invoices
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id() == id)
                .cloned())
        }

        async fn invoice_for_order(
            &self,
            order_id: OrderId,
        ) -> Result<Option<Invoice>, StoreError> {
            Ok(self
                .invoices
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.order_id() == order_id)
                .cloned())
        }

        async fn save_invoice(&self, _invoice: Invoice) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn seeded_store() -> (Arc<FakeStore>, ServiceOrder) {
        let store = Arc::new(FakeStore::default());
        let order = ServiceOrder::new(
            OrderId::new(),
            CompanyId::new(),
            CustomerId::new(),
            Address {
                line: "8 Oak Rd".to_string(),
                city: "Boise".to_string(),
                state: "ID".to_string(),
                zip: "83702".to_string(),
            },
            "Install thermostat",
            Utc::now(),
            None,
            Utc::now(),
        );
        store.orders.lock().unwrap().insert(order.id(), order.clone());
        (store, order)
    }

    fn event_for(order: &ServiceOrder) -> OrderCompleted {
        OrderCompleted {
            order_id: order.id(),
            company_id: order.company_id(),
            occurred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn completion_creates_one_flat_rate_invoice() {
        let (store, order) = seeded_store();
        let generator = InvoiceGenerator::new(
            store.clone(),
            store.clone(),
            FlatRatePolicy::default(),
        );

        generator.on_order_completed(&event_for(&order)).await.unwrap();

        let invoices = store.invoices.lock().unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].order_id(), order.id());
        assert_eq!(invoices[0].amount_due(), 10_000);
        assert_eq!(invoices[0].lines().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_delivery_does_not_create_a_second_invoice() {
        let (store, order) = seeded_store();
        let generator = InvoiceGenerator::new(
            store.clone(),
            store.clone(),
            FlatRatePolicy::default(),
        );

        let event = event_for(&order);
        generator.on_order_completed(&event).await.unwrap();
        generator.on_order_completed(&event).await.unwrap();

        assert_eq!(store.invoices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_order_is_a_no_op_not_an_error() {
        let store = Arc::new(FakeStore::default());
        let generator = InvoiceGenerator::new(
            store.clone(),
            store.clone(),
            FlatRatePolicy::default(),
        );

        let event = OrderCompleted {
            order_id: OrderId::new(),
            company_id: CompanyId::new(),
            occurred_at: Utc::now(),
        };
        generator.on_order_completed(&event).await.unwrap();

        assert!(store.invoices.lock().unwrap().is_empty());
    }
}
