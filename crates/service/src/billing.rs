//! Invoice delivery to customers.

use std::sync::Arc;

use tracing::info;

use fieldops_auth::{CallerContext, Role, capability};
use fieldops_core::{DomainError, InvoiceId};
use fieldops_invoicing::{Invoice, InvoiceStore};
use fieldops_notify::EmailSender;
use fieldops_orders::OrderRepository;

use crate::guard::TenantGuard;

/// Billing-side operations on generated invoices.
pub struct BillingService {
    repo: Arc<dyn OrderRepository>,
    invoices: Arc<dyn InvoiceStore>,
    email: Arc<dyn EmailSender>,
    guard: TenantGuard,
}

impl BillingService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        invoices: Arc<dyn InvoiceStore>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            guard: TenantGuard::new(repo.clone()),
            repo,
            invoices,
            email,
        }
    }

    /// Email an invoice notice to its customer and mark the invoice sent.
    ///
    /// Unlike fan-out notifications, this send is the point of the
    /// operation: a channel failure fails the call and the invoice stays in
    /// its previous status.
    pub async fn email_invoice(
        &self,
        caller: &CallerContext,
        invoice_id: InvoiceId,
    ) -> Result<Invoice, DomainError> {
        capability::require_role(caller, Role::Biller)?;

        let Some(mut invoice) = self.invoices.invoice(invoice_id).await? else {
            return Err(DomainError::NotFound);
        };
        self.guard
            .authorize_company(caller, invoice.company_id())
            .await?;

        let Some(customer) = self
            .repo
            .customer(invoice.company_id(), invoice.customer_id())
            .await?
        else {
            return Err(DomainError::NotFound);
        };

        let subject = format!("Invoice {}", invoice.id());
        let body = format!(
            "Hello {},\n\nInvoice {} over {} cents for service order {} is due on {}.",
            customer.name,
            invoice.id(),
            invoice.amount_due(),
            invoice.order_id(),
            invoice.due_date().format("%Y-%m-%d"),
        );
        self.email
            .send_email(&customer.email, &subject, &body)
            .await
            .map_err(|err| DomainError::ChannelDelivery(err.to_string()))?;

        invoice.mark_sent()?;
        self.invoices.save_invoice(invoice.clone()).await?;

        info!(invoice = %invoice_id, customer = %customer.id, "invoice emailed");
        Ok(invoice)
    }
}
