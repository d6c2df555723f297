use serde::{Deserialize, Serialize};

use fieldops_core::{CompanyId, CustomerId};

/// Customer of a company; the party a service order is carried out for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub company_id: CompanyId,
    pub name: String,
    pub email: String,
}
