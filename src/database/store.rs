use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::memory::{MemoryPartnershipStore, MemoryUserStore};
use super::models::{Partnership, User};
use super::postgres::{PgPartnershipStore, PgUserStore};
use crate::filter::{Page, PartnershipFilter, TenantScope};
use crate::types::PartnershipStatus;

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    /// Exact, case-sensitive lookup
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Fails with `DatabaseError::Conflict` when the email is taken
    async fn insert(&self, user: &User) -> Result<(), DatabaseError>;

    /// Replaces every mutable column; `None` when the id does not exist
    async fn update(&self, user: &User) -> Result<Option<User>, DatabaseError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;

    async fn list(&self) -> Result<Vec<User>, DatabaseError>;
}

/// Partnership store. Every single-record operation takes the caller's
/// tenant scope so an out-of-tenant id behaves exactly like a missing one.
#[async_trait]
pub trait PartnershipStore: Send + Sync {
    async fn insert(&self, partnership: &Partnership) -> Result<(), DatabaseError>;

    async fn find(&self, id: Uuid, scope: &TenantScope) -> Result<Option<Partnership>, DatabaseError>;

    async fn count(&self, filter: &PartnershipFilter) -> Result<i64, DatabaseError>;

    /// Ordered by creation time; `None` page returns the whole matching set
    async fn select(
        &self,
        filter: &PartnershipFilter,
        page: Option<Page>,
    ) -> Result<Vec<Partnership>, DatabaseError>;

    /// Writes the descriptive fields of an existing record. Status, archive
    /// flag, campus and owner are left untouched.
    async fn update(
        &self,
        partnership: &Partnership,
        scope: &TenantScope,
    ) -> Result<Option<Partnership>, DatabaseError>;

    /// Compare-and-set on status: `None` when the record is gone or no longer in `from`
    async fn transition_status(
        &self,
        id: Uuid,
        scope: &TenantScope,
        from: PartnershipStatus,
        to: PartnershipStatus,
    ) -> Result<Option<Partnership>, DatabaseError>;

    /// Compare-and-set on the archive flag: `None` unless it flipped false → true
    async fn archive(&self, id: Uuid, scope: &TenantScope) -> Result<Option<Partnership>, DatabaseError>;

    async fn delete(&self, id: Uuid, scope: &TenantScope) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Both stores behind trait objects, cheap to clone into handlers
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub partnerships: Arc<dyn PartnershipStore>,
}

impl Stores {
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            partnerships: Arc::new(MemoryPartnershipStore::default()),
        }
    }

    pub fn postgres(manager: &DatabaseManager) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(manager.pool().clone())),
            partnerships: Arc::new(PgPartnershipStore::new(manager.pool().clone())),
        }
    }
}
