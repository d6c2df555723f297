//! `fieldops-notify` — notification model, channel capabilities and fan-out.
//!
//! A notification request names every recipient × channel pair explicitly;
//! the dispatcher delivers them concurrently and reports one result per
//! pair. Partial failure is normal operation here, never an error of the
//! dispatch as a whole.

pub mod channels;
pub mod dispatcher;
pub mod request;

pub use channels::{ChannelError, EmailSender, PushGateway, SmsSender};
pub use dispatcher::{DispatcherConfig, NotificationDispatcher};
pub use request::{Channel, DeliveryOutcome, NotificationRequest, NotificationResult, Recipient};
