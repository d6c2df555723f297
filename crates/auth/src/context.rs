use fieldops_core::{TenantId, UserId};

use crate::Role;

/// Authenticated caller identity for a single request.
///
/// Resolved by the API layer from the incoming token and supplied fresh on
/// every call; nothing here is cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    tenant_id: TenantId,
    caller_id: UserId,
    roles: Vec<Role>,
}

impl CallerContext {
    pub fn new(tenant_id: TenantId, caller_id: UserId, roles: Vec<Role>) -> Self {
        Self {
            tenant_id,
            caller_id,
            roles,
        }
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn caller_id(&self) -> &UserId {
        &self.caller_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
