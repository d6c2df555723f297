use core::str::FromStr;

use serde::{Deserialize, Serialize};

use fieldops_core::DomainError;

/// Role a user can hold within a company.
///
/// Roles are a closed set matched by name, never by a positional id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    OrganizationAdmin,
    Technician,
    Biller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::OrganizationAdmin => "OrganizationAdmin",
            Role::Technician => "Technician",
            Role::Biller => "Biller",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Names are normalized case-insensitively (identity providers differ).
        match s.to_ascii_uppercase().as_str() {
            "ORGANIZATIONADMIN" => Ok(Role::OrganizationAdmin),
            "TECHNICIAN" => Ok(Role::Technician),
            "BILLER" => Ok(Role::Biller),
            other => Err(DomainError::malformed(format!("unknown role '{other}'"))),
        }
    }
}
