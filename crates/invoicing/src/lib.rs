//! `fieldops-invoicing` — invoices and the completion-driven generator.
//!
//! Invoicing reacts to the orders domain through the event bus: when an
//! order completes, [`InvoiceGenerator`] creates exactly one flat-rate
//! invoice for it, tolerating duplicate event delivery.

pub mod generator;
pub mod invoice;
pub mod store;

pub use generator::InvoiceGenerator;
pub use invoice::{FlatRatePolicy, Invoice, InvoiceLineItem, InvoiceStatus};
pub use store::InvoiceStore;
