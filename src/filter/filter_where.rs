use sqlx::{Postgres, QueryBuilder};

use super::types::{PartnershipFilter, TenantScope};
use crate::database::models::Partnership;

/// WHERE-clause generation for the partnerships table and the equivalent
/// in-memory predicate. Both must stay in lockstep.
pub struct FilterWhere;

impl FilterWhere {
    /// Appends ` WHERE ...` for a full list/count query
    pub fn push_sql(filter: &PartnershipFilter, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE 1=1");
        Self::push_scope(&filter.scope, qb);

        if let Some(status) = filter.status {
            qb.push(" AND \"status\" = ").push_bind(status.as_str());
        }
        if let Some(org_type) = &filter.organization_type {
            qb.push(" AND \"partner_institution\"->>'typeOfOrganization' = ")
                .push_bind(org_type.clone());
        }
        if let Some(duration) = &filter.duration {
            qb.push(" AND \"duration_of_partnership\" = ").push_bind(duration.clone());
        }
        if let Some(start_from) = filter.start_from {
            qb.push(" AND \"potential_start_date\" >= ").push_bind(start_from);
        }
        if let Some(archived) = filter.archived {
            qb.push(" AND \"is_archived\" = ").push_bind(archived);
        }
    }

    /// Appends the tenant predicate as ` AND ...`; a global scope adds nothing
    pub fn push_scope(scope: &TenantScope, qb: &mut QueryBuilder<'_, Postgres>) {
        match scope {
            TenantScope::Global => {}
            TenantScope::Campus(campus_id) => {
                qb.push(" AND \"campus_id\" = ").push_bind(campus_id.clone());
            }
            TenantScope::Nothing => {
                qb.push(" AND 1=0");
            }
        }
    }

    pub fn matches(filter: &PartnershipFilter, record: &Partnership) -> bool {
        if !filter.scope.admits(&record.campus_id) {
            return false;
        }
        if let Some(status) = filter.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(org_type) = &filter.organization_type {
            if record.organization_type() != Some(org_type.as_str()) {
                return false;
            }
        }
        if let Some(duration) = &filter.duration {
            if record.duration_of_partnership.as_deref() != Some(duration.as_str()) {
                return false;
            }
        }
        if let Some(start_from) = filter.start_from {
            if record.potential_start_date < start_from {
                return false;
            }
        }
        if let Some(archived) = filter.archived {
            if record.is_archived != archived {
                return false;
            }
        }
        true
    }
}
