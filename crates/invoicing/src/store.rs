//! Storage port for invoices.

use async_trait::async_trait;

use fieldops_core::{InvoiceId, OrderId};
use fieldops_orders::StoreError;

use crate::Invoice;

/// Durable storage of invoices.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice. Fails with [`StoreError::Conflict`] if an
    /// invoice already exists for the same service order; this uniqueness
    /// rule is what makes invoice generation idempotent.
    async fn create_invoice(&self, invoice: Invoice) -> Result<(), StoreError>;

    async fn invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError>;

    async fn invoice_for_order(&self, order_id: OrderId) -> Result<Option<Invoice>, StoreError>;

    /// Persist an updated invoice (status changes).
    async fn save_invoice(&self, invoice: Invoice) -> Result<(), StoreError>;
}
