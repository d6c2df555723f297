//! `fieldops-auth` — caller identity, typed roles and capability checks.
//!
//! Authorization here is ordinary conditional guards over a caller context,
//! composed at the start of each operation. No declarative policies, no
//! claim-string matching beyond the context the API layer already resolved.

pub mod capability;
pub mod context;
pub mod directory;
pub mod roles;

pub use capability::{require_role, require_self};
pub use context::CallerContext;
pub use directory::{ContactInfo, DirectoryError, IdentityInviter, Invitation, UserProfiles};
pub use roles::Role;
