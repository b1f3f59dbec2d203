use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::error::FilterError;
use super::types::{ListQuery, Page, PartnershipFilter, TenantScope};
use crate::config::PaginationConfig;
use crate::types::PartnershipStatus;

/// Turns a raw list query into a validated filter and page
pub struct Filter {
    filter: PartnershipFilter,
    page: Page,
}

impl Filter {
    pub fn new(scope: TenantScope, pagination: &PaginationConfig) -> Self {
        Self {
            filter: PartnershipFilter::scoped(scope),
            page: Page { page: 1, limit: pagination.default_limit },
        }
    }

    pub fn assign(mut self, query: ListQuery, pagination: &PaginationConfig) -> Result<Self, FilterError> {
        if let Some(status) = non_empty(query.status) {
            let status = status.parse::<PartnershipStatus>().map_err(FilterError::InvalidStatus)?;
            self.filter.status = Some(status);
        }
        self.filter.organization_type = non_empty(query.type_of_organization);
        self.filter.duration = non_empty(query.duration_of_partnership);
        if let Some(date) = non_empty(query.potential_start_date) {
            self.filter.start_from = Some(parse_date(&date)?);
        }
        // Only the literal "true" selects archived records
        self.filter.archived = Some(query.archived.as_deref() == Some("true"));

        self.limit(query.page, query.limit, pagination)?;
        Ok(self)
    }

    fn limit(
        &mut self,
        page: Option<String>,
        limit: Option<String>,
        pagination: &PaginationConfig,
    ) -> Result<(), FilterError> {
        let page = parse_integer("page", page, 1)?;
        let limit = parse_integer("limit", limit, pagination.default_limit)?;

        if page < 1 || limit < 1 {
            return Err(FilterError::NotPositive);
        }
        if limit > pagination.max_limit {
            return Err(FilterError::LimitTooLarge(pagination.max_limit));
        }
        // The row offset must fit in a signed 64-bit OFFSET
        if (page - 1).checked_mul(limit).is_none() {
            return Err(FilterError::PageOutOfRange(page));
        }

        self.page = Page { page, limit };
        Ok(())
    }

    pub fn into_parts(self) -> (PartnershipFilter, Page) {
        (self.filter, self.page)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_integer(field: &'static str, value: Option<String>, default: i64) -> Result<i64, FilterError> {
    match non_empty(value) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| FilterError::InvalidNumber { field, value: raw }),
    }
}

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` and plain `YYYY-MM-DD` dates (UTC midnight).
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, FilterError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(FilterError::InvalidDate(raw.to_string()))
}
