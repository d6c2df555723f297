use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use fieldops_core::{CompanyId, CustomerId, DomainError, InvoiceId, OrderId};
use fieldops_orders::ServiceOrder;

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Sent,
    Paid,
}

/// One billed position on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: u32,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
}

impl InvoiceLineItem {
    pub fn line_total(&self) -> u64 {
        u64::from(self.quantity) * self.unit_price
    }
}

/// Flat-rate pricing policy: every completed order bills one line at a
/// fixed unit price.
#[derive(Debug, Clone)]
pub struct FlatRatePolicy {
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    /// Days until payment is due.
    pub due_days: i64,
}

impl Default for FlatRatePolicy {
    fn default() -> Self {
        Self {
            unit_price: 10_000,
            due_days: 30,
        }
    }
}

/// Invoice for a completed service order.
///
/// Invariants:
/// - at most one invoice exists per service order (enforced by the store)
/// - the line totals always sum to `amount_due`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    company_id: CompanyId,
    customer_id: CustomerId,
    order_id: OrderId,
    amount_due: u64,
    created_on: DateTime<Utc>,
    due_date: DateTime<Utc>,
    status: InvoiceStatus,
    lines: Vec<InvoiceLineItem>,
}

impl Invoice {
    /// Build a flat-rate invoice for a completed order: a single line,
    /// quantity 1, due `policy.due_days` from `now`.
    pub fn flat_rate(policy: &FlatRatePolicy, order: &ServiceOrder, now: DateTime<Utc>) -> Self {
        let line = InvoiceLineItem {
            description: format!("Service call - {}", order.description()),
            quantity: 1,
            unit_price: policy.unit_price,
        };
        let amount_due = line.line_total();

        Self {
            id: InvoiceId::new(),
            company_id: order.company_id(),
            customer_id: order.customer_id(),
            order_id: order.id(),
            amount_due,
            created_on: now,
            due_date: now + Duration::days(policy.due_days),
            status: InvoiceStatus::Pending,
            lines: vec![line],
        }
    }

    pub fn id(&self) -> InvoiceId {
        self.id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn amount_due(&self) -> u64 {
        self.amount_due
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn lines(&self) -> &[InvoiceLineItem] {
        &self.lines
    }

    pub fn lines_total(&self) -> u64 {
        self.lines.iter().map(InvoiceLineItem::line_total).sum()
    }

    /// Mark the invoice as sent to the customer.
    ///
    /// Re-sending an already-sent invoice is allowed; a paid invoice is not
    /// re-sent.
    pub fn mark_sent(&mut self) -> Result<(), DomainError> {
        match self.status {
            InvoiceStatus::Pending | InvoiceStatus::Sent => {
                self.status = InvoiceStatus::Sent;
                Ok(())
            }
            InvoiceStatus::Paid => Err(DomainError::invalid_transition(
                "cannot re-send a paid invoice",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldops_core::OrderId;
    use fieldops_orders::Address;
    use proptest::prelude::*;

    fn test_order(description: &str) -> ServiceOrder {
        ServiceOrder::new(
            OrderId::new(),
            CompanyId::new(),
            CustomerId::new(),
            Address {
                line: "4 Elm Ave".to_string(),
                city: "Dayton".to_string(),
                state: "OH".to_string(),
                zip: "45402".to_string(),
            },
            description,
            Utc::now(),
            None,
            Utc::now(),
        )
    }

    #[test]
    fn flat_rate_invoice_has_one_line_at_the_fixed_price() {
        let policy = FlatRatePolicy::default();
        let order = test_order("Annual furnace inspection");
        let now = Utc::now();

        let invoice = Invoice::flat_rate(&policy, &order, now);

        assert_eq!(invoice.lines().len(), 1);
        assert_eq!(invoice.lines()[0].quantity, 1);
        assert_eq!(invoice.lines()[0].unit_price, policy.unit_price);
        assert_eq!(invoice.amount_due(), policy.unit_price);
        assert_eq!(invoice.status(), InvoiceStatus::Pending);
        assert_eq!(invoice.order_id(), order.id());
        assert_eq!(invoice.due_date(), now + Duration::days(30));
        assert!(invoice.lines()[0]
            .description
            .contains("Annual furnace inspection"));
    }

    #[test]
    fn pending_invoice_can_be_sent_and_resent() {
        let mut invoice = Invoice::flat_rate(
            &FlatRatePolicy::default(),
            &test_order("Repair"),
            Utc::now(),
        );
        invoice.mark_sent().unwrap();
        assert_eq!(invoice.status(), InvoiceStatus::Sent);
        invoice.mark_sent().unwrap();
        assert_eq!(invoice.status(), InvoiceStatus::Sent);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any flat rate and due window, the generated
        /// invoice's line totals equal its amount due.
        #[test]
        fn flat_rate_invoices_always_balance(
            unit_price in 1u64..100_000_000u64,
            due_days in 1i64..365i64,
        ) {
            let policy = FlatRatePolicy { unit_price, due_days };
            let invoice = Invoice::flat_rate(&policy, &test_order("Job"), Utc::now());

            prop_assert_eq!(invoice.lines_total(), invoice.amount_due());
            prop_assert_eq!(invoice.amount_due(), unit_price);
        }
    }
}
