//! `fieldops-orders` — the work-order domain.
//!
//! Companies, customers, role bindings and the service-order state machine,
//! plus the storage port the lifecycle operations are written against.

pub mod company;
pub mod customer;
pub mod order;
pub mod repository;
pub mod role_binding;

pub use company::{Company, EmployeeInvite, InviteStatus};
pub use customer::Customer;
pub use order::{Address, GeoPoint, OrderStatus, ServiceOrder};
pub use repository::{OrderRepository, StoreError};
pub use role_binding::UserRoleBinding;
