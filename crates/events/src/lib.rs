//! `fieldops-events` — typed domain events and the in-process event bus.
//!
//! Events decouple a state change from its effects: the lifecycle publishes
//! a fact and registered handlers react to it. Handlers must be idempotent
//! (delivery is at-least-once from their point of view).

pub mod bus;
pub mod event;
pub mod handler;

pub use bus::EventBus;
pub use event::{DomainEvent, EventKind, OrderCompleted};
pub use handler::EventHandler;
