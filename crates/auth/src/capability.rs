//! Capability checks evaluated at the start of each operation.
//!
//! - No IO
//! - No panics
//! - No business logic (pure allow/deny over the caller context)

use fieldops_core::{DomainError, UserId};

use crate::{CallerContext, Role};

/// Require the caller to hold `role` in their current context.
pub fn require_role(caller: &CallerContext, role: Role) -> Result<(), DomainError> {
    if caller.has_role(role) {
        Ok(())
    } else {
        Err(DomainError::forbidden(format!(
            "missing role '{}'",
            role.as_str()
        )))
    }
}

/// Require the caller to be acting on their own identity.
///
/// Used for reads like "my assigned orders" where the target user id arrives
/// as request data.
pub fn require_self(caller: &CallerContext, user_id: &UserId) -> Result<(), DomainError> {
    if caller.caller_id() == user_id {
        Ok(())
    } else {
        Err(DomainError::forbidden("may only act on own identity"))
    }
}
