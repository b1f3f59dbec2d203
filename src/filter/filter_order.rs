use std::cmp::Ordering;

use crate::database::models::Partnership;

/// Stable listing order shared by the SQL and in-memory stores
pub struct FilterOrder;

impl FilterOrder {
    pub fn to_sql() -> &'static str {
        "ORDER BY \"created_at\" ASC, \"id\" ASC"
    }

    pub fn compare(a: &Partnership, b: &Partnership) -> Ordering {
        a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
    }

    pub fn sort(records: &mut [Partnership]) {
        records.sort_by(Self::compare);
    }
}
