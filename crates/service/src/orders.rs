//! Service-order lifecycle operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use fieldops_auth::{CallerContext, Role, UserProfiles, capability};
use fieldops_core::{CompanyId, CustomerId, DomainError, OrderId, UserId};
use fieldops_events::{DomainEvent, EventBus, OrderCompleted};
use fieldops_notify::{
    Channel, NotificationDispatcher, NotificationRequest, PushGateway, Recipient,
};
use fieldops_orders::{Address, GeoPoint, OrderRepository, OrderStatus, ServiceOrder};

use crate::guard::TenantGuard;
use crate::locks::OrderLocks;

/// Typed request to create a service order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub company_id: CompanyId,
    pub customer_id: CustomerId,
    pub address: Address,
    pub description: String,
    pub scheduled_date: DateTime<Utc>,
    pub geo: Option<GeoPoint>,
}

/// One order projected onto a calendar window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub order_id: OrderId,
    pub scheduled_date: DateTime<Utc>,
    pub title: String,
    pub status: OrderStatus,
}

/// One order as seen by its assigned technician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedOrder {
    pub order_id: OrderId,
    pub customer_name: String,
    pub address: Address,
    pub scheduled_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub geo: Option<GeoPoint>,
}

/// The order state machine and its side-effect pipeline.
pub struct ServiceOrderService {
    repo: Arc<dyn OrderRepository>,
    bus: Arc<EventBus>,
    dispatcher: Arc<NotificationDispatcher>,
    push: Arc<dyn PushGateway>,
    profiles: Arc<dyn UserProfiles>,
    guard: TenantGuard,
    locks: OrderLocks,
}

impl ServiceOrderService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        bus: Arc<EventBus>,
        dispatcher: Arc<NotificationDispatcher>,
        push: Arc<dyn PushGateway>,
        profiles: Arc<dyn UserProfiles>,
    ) -> Self {
        Self {
            guard: TenantGuard::new(repo.clone()),
            locks: OrderLocks::new(),
            repo,
            bus,
            dispatcher,
            push,
            profiles,
        }
    }

    /// Create a new order in `Scheduled`.
    pub async fn create_order(
        &self,
        caller: &CallerContext,
        request: CreateOrderRequest,
    ) -> Result<ServiceOrder, DomainError> {
        capability::require_role(caller, Role::OrganizationAdmin)?;
        self.guard
            .authorize_company(caller, request.company_id)
            .await?;

        if self
            .repo
            .customer(request.company_id, request.customer_id)
            .await?
            .is_none()
        {
            return Err(DomainError::CustomerNotFound);
        }

        let order = ServiceOrder::new(
            OrderId::new(),
            request.company_id,
            request.customer_id,
            request.address,
            request.description,
            request.scheduled_date,
            request.geo,
            Utc::now(),
        );
        self.repo.insert_order(order.clone()).await?;

        info!(order = %order.id(), company = %order.company_id(), "service order created");
        Ok(order)
    }

    /// Replace the technician assignment set of an order.
    ///
    /// Idempotent: re-running with the same set leaves exactly that set.
    /// Both the outgoing and incoming technicians get a push event so
    /// removed crew learns about the change too.
    pub async fn assign_technicians(
        &self,
        caller: &CallerContext,
        order_id: OrderId,
        technicians: Vec<UserId>,
    ) -> Result<(), DomainError> {
        capability::require_role(caller, Role::OrganizationAdmin)?;

        let _mutation = self.locks.acquire(order_id).await;
        let (order, _company) = self.guard.authorize_order(caller, order_id).await?;

        if order.status().is_terminal() {
            return Err(DomainError::invalid_transition(format!(
                "cannot assign technicians to a {} order",
                order.status()
            )));
        }

        let previous = self.repo.assignments(order_id).await?;
        let incoming = dedupe(technicians);
        self.repo.replace_assignments(order_id, &incoming).await?;
        drop(_mutation);

        info!(order = %order_id, count = incoming.len(), "assignments replaced");

        let mut notify = previous;
        notify.extend(incoming);
        for technician in dedupe(notify) {
            let payload = serde_json::json!({ "order_id": order_id });
            if let Err(err) = self
                .push
                .push_to_user(&technician, "assignment.updated", payload)
                .await
            {
                warn!(technician = %technician, order = %order_id, error = %err, "assignment push failed");
            }
        }

        Ok(())
    }

    /// Move the order through its status state machine.
    ///
    /// On a transition to `Completed`, the `OrderCompleted` event is
    /// published only after the status write is durably committed, and at
    /// most once per successful transition: a repeat request fails
    /// `InvalidTransition` without publishing.
    pub async fn update_status(
        &self,
        caller: &CallerContext,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<ServiceOrder, DomainError> {
        capability::require_role(caller, Role::Technician)?;

        let _mutation = self.locks.acquire(order_id).await;
        // Read inside the lock: state may have moved while we waited.
        let (mut order, _company) = self.guard.authorize_order(caller, order_id).await?;

        order.transition(new_status, Utc::now())?;
        let saved = self.repo.save_order(&order).await?;

        info!(order = %order_id, status = %new_status, "service order status updated");

        if new_status == OrderStatus::Completed {
            let event = DomainEvent::OrderCompleted(OrderCompleted {
                order_id,
                company_id: saved.company_id(),
                occurred_at: Utc::now(),
            });
            self.bus.publish(&event).await;
        }

        Ok(saved)
    }

    /// Move the scheduled date of an open order and notify the company's
    /// admins by email and SMS.
    ///
    /// The notification is initiated, not awaited: its failures are
    /// observability events, never errors of the reschedule itself.
    pub async fn reschedule(
        &self,
        caller: &CallerContext,
        order_id: OrderId,
        new_date: DateTime<Utc>,
    ) -> Result<ServiceOrder, DomainError> {
        capability::require_role(caller, Role::OrganizationAdmin)?;

        let _mutation = self.locks.acquire(order_id).await;
        let (mut order, company) = self.guard.authorize_order(caller, order_id).await?;

        order.reschedule(new_date, Utc::now())?;
        let saved = self.repo.save_order(&order).await?;
        drop(_mutation);

        info!(order = %order_id, date = %new_date, "service order rescheduled");

        let repo = self.repo.clone();
        let profiles = self.profiles.clone();
        let dispatcher = self.dispatcher.clone();
        let company_id = company.id;
        tokio::spawn(async move {
            notify_admins_of_reschedule(repo, profiles, dispatcher, company_id, order_id, new_date)
                .await;
        });

        Ok(saved)
    }

    /// Tenant-guarded single-order read.
    pub async fn get_order(
        &self,
        caller: &CallerContext,
        order_id: OrderId,
    ) -> Result<ServiceOrder, DomainError> {
        let (order, _company) = self.guard.authorize_order(caller, order_id).await?;
        Ok(order)
    }

    /// Orders of a company scheduled within `[from, to]`.
    pub async fn calendar(
        &self,
        caller: &CallerContext,
        company_id: CompanyId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CalendarEntry>, DomainError> {
        self.guard.authorize_company(caller, company_id).await?;

        let orders = self.repo.orders_in_window(company_id, from, to).await?;
        Ok(orders
            .into_iter()
            .map(|order| CalendarEntry {
                order_id: order.id(),
                scheduled_date: order.scheduled_date(),
                title: order.description().to_string(),
                status: order.status(),
            })
            .collect())
    }

    /// Orders assigned to a technician, joined with customer details.
    ///
    /// Identity-scoped: callers may only request their own assignments.
    pub async fn assigned_orders(
        &self,
        caller: &CallerContext,
        technician: &UserId,
    ) -> Result<Vec<AssignedOrder>, DomainError> {
        capability::require_self(caller, technician)?;

        let orders = self.repo.orders_for_technician(technician).await?;
        let mut assigned = Vec::with_capacity(orders.len());
        for order in orders {
            let customer_name = self
                .repo
                .customer(order.company_id(), order.customer_id())
                .await?
                .map(|customer| customer.name)
                .unwrap_or_default();

            assigned.push(AssignedOrder {
                order_id: order.id(),
                customer_name,
                address: order.address().clone(),
                scheduled_date: order.scheduled_date(),
                status: order.status(),
                geo: order.geo(),
            });
        }
        Ok(assigned)
    }
}

/// Resolve the company's admins through the directory and fan the
/// reschedule notice out by email and SMS. Runs detached from the
/// triggering operation; every failure here is logged and dropped.
async fn notify_admins_of_reschedule(
    repo: Arc<dyn OrderRepository>,
    profiles: Arc<dyn UserProfiles>,
    dispatcher: Arc<NotificationDispatcher>,
    company_id: CompanyId,
    order_id: OrderId,
    new_date: DateTime<Utc>,
) {
    let admins = match repo
        .roles_for_company(company_id, Role::OrganizationAdmin)
        .await
    {
        Ok(admins) => admins,
        Err(err) => {
            warn!(company = %company_id, error = %err, "admin lookup for reschedule notice failed");
            return;
        }
    };

    let mut recipients = Vec::with_capacity(admins.len() * 2);
    for admin in &admins {
        match profiles.contact(&admin.user_id).await {
            Ok(contact) => {
                recipients.push(Recipient {
                    channel: Channel::Email,
                    to: contact.email,
                });
                recipients.push(Recipient {
                    channel: Channel::Sms,
                    to: contact.phone,
                });
            }
            Err(err) => {
                warn!(user = %admin.user_id, error = %err, "admin contact lookup failed, skipping recipient");
            }
        }
    }

    if recipients.is_empty() {
        return;
    }

    let request = NotificationRequest {
        subject: "Service order rescheduled".to_string(),
        body: format!(
            "Service order {} has been rescheduled to {}",
            order_id,
            new_date.format("%Y-%m-%d %H:%M")
        ),
        recipients,
    };

    match dispatcher.dispatch(&request).await {
        Ok(results) => {
            let failed = results.iter().filter(|r| !r.outcome.is_delivered()).count();
            if failed > 0 {
                warn!(order = %order_id, failed, "reschedule notice had failed deliveries");
            }
        }
        Err(err) => warn!(order = %order_id, error = %err, "reschedule notice rejected"),
    }
}

/// De-duplicate while preserving first-seen order.
fn dedupe(ids: Vec<UserId>) -> Vec<UserId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
