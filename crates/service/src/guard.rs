//! Tenant isolation guard.
//!
//! Every lifecycle operation that touches a company-scoped entity routes
//! through this check before reading or mutating anything. The company is
//! re-loaded on every call: caller identity arrives fresh per request and
//! the verdict is never cached.

use std::sync::Arc;

use tracing::warn;

use fieldops_auth::CallerContext;
use fieldops_core::{CompanyId, DomainError, OrderId};
use fieldops_orders::{Company, OrderRepository, ServiceOrder};

pub struct TenantGuard {
    repo: Arc<dyn OrderRepository>,
}

impl TenantGuard {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Verify the company exists and belongs to the caller's tenant.
    pub async fn authorize_company(
        &self,
        caller: &CallerContext,
        company_id: CompanyId,
    ) -> Result<Company, DomainError> {
        let Some(company) = self.repo.company(company_id).await? else {
            return Err(DomainError::NotFound);
        };

        if company.tenant_id != *caller.tenant_id() {
            // Internally distinct from NotFound so probes are visible in
            // logs; callers outside the trust boundary see `redacted()`.
            warn!(
                company = %company_id,
                caller_tenant = %caller.tenant_id(),
                "cross-tenant access attempt"
            );
            return Err(DomainError::TenantMismatch);
        }

        Ok(company)
    }

    /// Load an order and verify its company belongs to the caller's tenant.
    pub async fn authorize_order(
        &self,
        caller: &CallerContext,
        order_id: OrderId,
    ) -> Result<(ServiceOrder, Company), DomainError> {
        let Some(order) = self.repo.order(order_id).await? else {
            return Err(DomainError::NotFound);
        };
        let company = self.authorize_company(caller, order.company_id()).await?;
        Ok((order, company))
    }
}
