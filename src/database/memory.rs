//! In-memory stores for database-less development and the test suite.
//! Each method holds the lock for its whole read-modify-write, so the
//! compare-and-set operations are atomic exactly like their SQL counterparts.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Partnership, User};
use super::store::{PartnershipStore, UserStore};
use crate::filter::filter_order::FilterOrder;
use crate::filter::filter_where::FilterWhere;
use crate::filter::{Page, PartnershipFilter, TenantScope};
use crate::types::PartnershipStatus;

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict(format!("email {}", user.email)));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<Option<User>, DatabaseError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email && u.id != user.id) {
            return Err(DatabaseError::Conflict(format!("email {}", user.email)));
        }
        let Some(existing) = users.get_mut(&user.id) else {
            return Ok(None);
        };
        let mut updated = user.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }
}

#[derive(Default)]
pub struct MemoryPartnershipStore {
    records: RwLock<HashMap<Uuid, Partnership>>,
}

#[async_trait]
impl PartnershipStore for MemoryPartnershipStore {
    async fn insert(&self, partnership: &Partnership) -> Result<(), DatabaseError> {
        let mut records = self.records.write().await;
        if records.contains_key(&partnership.id) {
            return Err(DatabaseError::Conflict(format!("partnership {}", partnership.id)));
        }
        records.insert(partnership.id, partnership.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid, scope: &TenantScope) -> Result<Option<Partnership>, DatabaseError> {
        let records = self.records.read().await;
        Ok(records.get(&id).filter(|p| scope.admits(&p.campus_id)).cloned())
    }

    async fn count(&self, filter: &PartnershipFilter) -> Result<i64, DatabaseError> {
        let records = self.records.read().await;
        Ok(records.values().filter(|p| FilterWhere::matches(filter, p)).count() as i64)
    }

    async fn select(
        &self,
        filter: &PartnershipFilter,
        page: Option<Page>,
    ) -> Result<Vec<Partnership>, DatabaseError> {
        let records = self.records.read().await;
        let mut matching: Vec<Partnership> = records
            .values()
            .filter(|p| FilterWhere::matches(filter, p))
            .cloned()
            .collect();
        FilterOrder::sort(&mut matching);

        Ok(match page {
            Some(page) => matching
                .into_iter()
                .skip(page.offset().max(0) as usize)
                .take(page.limit.max(0) as usize)
                .collect(),
            None => matching,
        })
    }

    async fn update(
        &self,
        partnership: &Partnership,
        scope: &TenantScope,
    ) -> Result<Option<Partnership>, DatabaseError> {
        let mut records = self.records.write().await;
        let Some(existing) = records
            .get_mut(&partnership.id)
            .filter(|p| scope.admits(&p.campus_id))
        else {
            return Ok(None);
        };

        let mut updated = partnership.clone();
        updated.status = existing.status;
        updated.is_archived = existing.is_archived;
        updated.campus_id = existing.campus_id.clone();
        updated.created_by = existing.created_by;
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn transition_status(
        &self,
        id: Uuid,
        scope: &TenantScope,
        from: PartnershipStatus,
        to: PartnershipStatus,
    ) -> Result<Option<Partnership>, DatabaseError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) if scope.admits(&record.campus_id) && record.status == from => {
                record.status = to;
                record.updated_at = Utc::now();
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn archive(&self, id: Uuid, scope: &TenantScope) -> Result<Option<Partnership>, DatabaseError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) if scope.admits(&record.campus_id) && !record.is_archived => {
                record.is_archived = true;
                record.updated_at = Utc::now();
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid, scope: &TenantScope) -> Result<bool, DatabaseError> {
        let mut records = self.records.write().await;
        let in_scope = records.get(&id).is_some_and(|p| scope.admits(&p.campus_id));
        if in_scope {
            records.remove(&id);
        }
        Ok(in_scope)
    }
}
