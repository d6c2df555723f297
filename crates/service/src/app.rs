//! Component wiring for an embedding API layer.
//!
//! All external collaborators and all configuration arrive explicitly here;
//! nothing reads process-wide state. The event bus is assembled with its
//! subscribers before any service can publish to it.

use std::sync::Arc;

use fieldops_auth::{IdentityInviter, UserProfiles};
use fieldops_events::{EventBus, EventKind};
use fieldops_invoicing::{FlatRatePolicy, InvoiceGenerator, InvoiceStore};
use fieldops_notify::{DispatcherConfig, EmailSender, NotificationDispatcher, PushGateway, SmsSender};
use fieldops_orders::OrderRepository;

use crate::billing::BillingService;
use crate::onboarding::{OnboardingConfig, OnboardingService};
use crate::orders::ServiceOrderService;

/// Top-level configuration, passed in by the host process at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub flat_rate: FlatRatePolicy,
    pub dispatcher: DispatcherConfig,
    pub onboarding: OnboardingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flat_rate: FlatRatePolicy::default(),
            dispatcher: DispatcherConfig::default(),
            onboarding: OnboardingConfig {
                invite_redirect_url: "https://app.fieldops.example/post-invitation".to_string(),
            },
        }
    }
}

/// External collaborators supplied by the host process.
pub struct Collaborators {
    pub repo: Arc<dyn OrderRepository>,
    pub invoices: Arc<dyn InvoiceStore>,
    pub email: Arc<dyn EmailSender>,
    pub sms: Arc<dyn SmsSender>,
    pub push: Arc<dyn PushGateway>,
    pub profiles: Arc<dyn UserProfiles>,
    pub inviter: Arc<dyn IdentityInviter>,
}

/// The assembled operation surface.
pub struct App {
    pub orders: ServiceOrderService,
    pub billing: BillingService,
    pub onboarding: OnboardingService,
    pub bus: Arc<EventBus>,
}

/// Wire the services together: register the invoice generator on the bus,
/// build the dispatcher, and hand each service its collaborators.
pub fn build(config: AppConfig, collab: Collaborators) -> App {
    let mut bus = EventBus::new();
    bus.subscribe(
        EventKind::OrderCompleted,
        Arc::new(InvoiceGenerator::new(
            collab.repo.clone(),
            collab.invoices.clone(),
            config.flat_rate.clone(),
        )),
    );
    let bus = Arc::new(bus);

    let dispatcher = Arc::new(NotificationDispatcher::new(
        collab.email.clone(),
        collab.sms.clone(),
        config.dispatcher.clone(),
    ));

    App {
        orders: ServiceOrderService::new(
            collab.repo.clone(),
            bus.clone(),
            dispatcher,
            collab.push.clone(),
            collab.profiles.clone(),
        ),
        billing: BillingService::new(
            collab.repo.clone(),
            collab.invoices.clone(),
            collab.email.clone(),
        ),
        onboarding: OnboardingService::new(
            collab.repo.clone(),
            collab.inviter.clone(),
            config.onboarding,
        ),
        bus,
    }
}
