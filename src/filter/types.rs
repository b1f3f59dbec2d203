use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::PartnershipStatus;

/// Visibility boundary derived from the acting user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantScope {
    /// SuperAdmin: no tenant predicate at all
    Global,
    Campus(String),
    /// A non-SuperAdmin account without a campus can see nothing
    Nothing,
}

impl TenantScope {
    pub fn admits(&self, campus_id: &str) -> bool {
        match self {
            TenantScope::Global => true,
            TenantScope::Campus(campus) => campus == campus_id,
            TenantScope::Nothing => false,
        }
    }
}

/// Raw list query string as received on `GET /partnerships`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub type_of_organization: Option<String>,
    pub potential_start_date: Option<String>,
    pub duration_of_partnership: Option<String>,
    pub archived: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Validated partnership predicate; every field is ANDed with the tenant scope
#[derive(Debug, Clone)]
pub struct PartnershipFilter {
    pub scope: TenantScope,
    pub status: Option<PartnershipStatus>,
    pub organization_type: Option<String>,
    pub start_from: Option<DateTime<Utc>>,
    pub duration: Option<String>,
    /// `None` matches archived and non-archived records alike
    pub archived: Option<bool>,
}

impl PartnershipFilter {
    pub fn scoped(scope: TenantScope) -> Self {
        Self {
            scope,
            status: None,
            organization_type: None,
            start_from: None,
            duration: None,
            archived: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn describe(&self, total: i64) -> Pagination {
        Pagination {
            total,
            page: self.page,
            pages: (total + self.limit - 1) / self.limit,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub limit: i64,
}
