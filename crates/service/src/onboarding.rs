//! Company registration, employee invitations and role assignment.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use fieldops_auth::{CallerContext, IdentityInviter, Invitation, Role, capability};
use fieldops_core::{CompanyId, DomainError, InviteId, TenantId, UserId};
use fieldops_orders::{
    Company, EmployeeInvite, InviteStatus, OrderRepository, UserRoleBinding,
};

use crate::guard::TenantGuard;

/// Onboarding configuration, passed in at construction.
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Where the identity provider sends invited users after redemption.
    pub invite_redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCompanyRequest {
    pub company_name: String,
    pub domain: String,
    pub admin_email: String,
    /// Tenant realm the registering organization authenticates against.
    pub tenant_id: TenantId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCompany {
    pub company: Company,
    pub invitation: Invitation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteEmployeeRequest {
    pub company_id: CompanyId,
    pub email: String,
    pub role: Role,
}

/// Registration and membership management.
pub struct OnboardingService {
    repo: Arc<dyn OrderRepository>,
    inviter: Arc<dyn IdentityInviter>,
    guard: TenantGuard,
    config: OnboardingConfig,
}

impl OnboardingService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        inviter: Arc<dyn IdentityInviter>,
        config: OnboardingConfig,
    ) -> Self {
        Self {
            guard: TenantGuard::new(repo.clone()),
            repo,
            inviter,
            config,
        }
    }

    /// Register a new company and invite its first admin.
    ///
    /// Pre-authentication operation: there is no caller context yet, the
    /// tenant realm comes from the registration request itself.
    pub async fn register_company(
        &self,
        request: RegisterCompanyRequest,
    ) -> Result<RegisteredCompany, DomainError> {
        let admin_domain = request
            .admin_email
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .ok_or_else(|| DomainError::malformed("admin email is not a valid address"))?;

        if !admin_domain.eq_ignore_ascii_case(&request.domain) {
            return Err(DomainError::malformed(
                "admin email domain must match company domain",
            ));
        }

        let company = Company {
            id: CompanyId::new(),
            name: request.company_name,
            domain: request.domain,
            tenant_id: request.tenant_id,
            created_on: Utc::now(),
        };
        self.repo.insert_company(company.clone()).await?;

        let invitation = self
            .inviter
            .invite(&request.admin_email, &self.config.invite_redirect_url)
            .await?;

        info!(company = %company.id, "company registered");
        Ok(RegisteredCompany {
            company,
            invitation,
        })
    }

    /// Invite an employee into a company the caller administers.
    pub async fn invite_employee(
        &self,
        caller: &CallerContext,
        request: InviteEmployeeRequest,
    ) -> Result<(EmployeeInvite, Invitation), DomainError> {
        capability::require_role(caller, Role::OrganizationAdmin)?;
        self.guard
            .authorize_company(caller, request.company_id)
            .await?;

        let invitation = self
            .inviter
            .invite(&request.email, &self.config.invite_redirect_url)
            .await?;

        let invite = EmployeeInvite {
            id: InviteId::new(),
            company_id: request.company_id,
            email: request.email,
            role: request.role,
            status: InviteStatus::Pending,
            sent_on: Utc::now(),
        };
        self.repo.insert_invite(invite.clone()).await?;

        info!(company = %request.company_id, invite = %invite.id, "employee invited");
        Ok((invite, invitation))
    }

    /// Bind a user to a role within a company.
    ///
    /// Upsert semantics: a second assignment for the same (company, user)
    /// overwrites the previous binding, never duplicates it.
    pub async fn assign_role(
        &self,
        caller: &CallerContext,
        company_id: CompanyId,
        user_id: UserId,
        role: Role,
    ) -> Result<(), DomainError> {
        capability::require_role(caller, Role::OrganizationAdmin)?;
        self.guard.authorize_company(caller, company_id).await?;

        self.repo
            .upsert_role(UserRoleBinding {
                company_id,
                user_id,
                role,
            })
            .await?;
        Ok(())
    }
}
