//! In-process publish/subscribe for domain events.
//!
//! The bus is an explicit dispatch table: each event kind maps to a list of
//! registered handlers. `publish` awaits every handler before returning, so
//! the publisher knows downstream effects were at least attempted. A handler
//! failure is caught and logged, never re-thrown: the state change that
//! produced the event is already committed and must not be undone by a
//! downstream failure.
//!
//! One subscriber's failure does not affect another's execution.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::error;

use crate::{DomainEvent, EventHandler, EventKind};

#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind.
    ///
    /// Registration order is preserved per kind; handlers run in that order.
    pub fn subscribe(&mut self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Publish an event to every handler registered for its kind.
    ///
    /// Blocks until all handlers have run. Never returns an error: handler
    /// failures are logged per handler and swallowed.
    pub async fn publish(&self, event: &DomainEvent) {
        let Some(handlers) = self.handlers.get(&event.kind()) else {
            return;
        };

        for handler in handlers {
            if let Err(err) = handler.handle(event).await {
                error!(
                    handler = handler.name(),
                    event = event.event_type(),
                    error = ?err,
                    "event handler failed"
                );
            }
        }
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (kind, handlers) in &self.handlers {
            let names: Vec<&'static str> = handlers.iter().map(|h| h.name()).collect();
            map.entry(kind, &names);
        }
        map.finish()
    }
}
