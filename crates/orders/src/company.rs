use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldops_auth::Role;
use fieldops_core::{CompanyId, InviteId, TenantId};

/// Organizational unit owning customers, service orders and role bindings.
///
/// Every company belongs to exactly one tenant realm; child entities carry
/// the tenant transitively through their company, never redundantly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// Email domain of the organization (e.g. "acme.example").
    pub domain: String,
    pub tenant_id: TenantId,
    pub created_on: DateTime<Utc>,
}

/// Lifecycle of an employee invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Revoked,
}

/// A pending invitation of an employee into a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInvite {
    pub id: InviteId,
    pub company_id: CompanyId,
    pub email: String,
    pub role: Role,
    pub status: InviteStatus,
    pub sent_on: DateTime<Utc>,
}
