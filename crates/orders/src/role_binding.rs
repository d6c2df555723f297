use serde::{Deserialize, Serialize};

use fieldops_auth::Role;
use fieldops_core::{CompanyId, UserId};

/// Binding of a user identity to a role within a company.
///
/// Invariant: at most one binding per (company, user) pair. Re-assignment
/// overwrites the existing binding, never duplicates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleBinding {
    pub company_id: CompanyId,
    pub user_id: UserId,
    pub role: Role,
}
