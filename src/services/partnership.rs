use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::error::ServiceError;
use super::policy::{self, NOT_IN_CAMPUS};
use crate::auth::Actor;
use crate::config::PaginationConfig;
use crate::database::models::{ContactPerson, Partnership, PartnerInstitution, UniversityContact};
use crate::database::PartnershipStore;
use crate::filter::{parse_date, Filter, ListQuery, Pagination, PartnershipFilter, TenantScope};
use crate::types::{PartnershipStatus, Transition, UserStatus, DEFAULT_CAMPUS};

/// Partnership body accepted by create and update. Every field is optional so
/// the same shape serves both full creation and partial merges.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnershipInput {
    pub partner_institution: Option<PartnerInstitution>,
    pub aau_contact: Option<UniversityContact>,
    pub potential_areas_of_collaboration: Option<Vec<String>>,
    pub other_collaboration_area: Option<String>,
    pub potential_start_date: Option<String>,
    pub duration_of_partnership: Option<String>,
    pub partner_contact_person: Option<ContactPerson>,
    pub partner_contact_person_secondary: Option<ContactPerson>,
    pub aau_contact_person: Option<ContactPerson>,
    pub aau_contact_person_secondary: Option<ContactPerson>,
    pub description: Option<String>,
    pub mou_file_url: Option<String>,
    pub status: Option<String>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewInput {
    pub potential_start_date: Option<String>,
    pub duration_of_partnership: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PartnershipPage {
    pub partnerships: Vec<Partnership>,
    pub pagination: Pagination,
}

pub struct PartnershipService {
    store: Arc<dyn PartnershipStore>,
    pagination: PaginationConfig,
}

impl PartnershipService {
    pub fn new(store: Arc<dyn PartnershipStore>, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }

    pub async fn create(&self, actor: &Actor, input: PartnershipInput) -> Result<Partnership, ServiceError> {
        if actor.status != UserStatus::Active {
            return Err(ServiceError::Forbidden(format!(
                "User account not active. Current status: {}",
                actor.status
            )));
        }

        let areas = input.potential_areas_of_collaboration.unwrap_or_default();
        policy::check_collaboration_areas(&areas, input.other_collaboration_area.as_deref())?;

        let status = match input.status.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<PartnershipStatus>().map_err(ServiceError::Validation)?,
            None => PartnershipStatus::Pending,
        };

        let partner_institution = input
            .partner_institution
            .filter(|p| !p.name.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("Partner institution name is required"))?;

        let raw_date = input
            .potential_start_date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("Potential start date is required"))?;
        let potential_start_date = parse_date(&raw_date)?;

        let campus_id = match policy::tenant_filter(actor) {
            TenantScope::Global => DEFAULT_CAMPUS.to_string(),
            TenantScope::Campus(campus) => campus,
            TenantScope::Nothing => {
                return Err(ServiceError::Forbidden("User account has no campus assigned".into()))
            }
        };

        let now = Utc::now();
        let partnership = Partnership {
            id: Uuid::new_v4(),
            partner_institution,
            aau_contact: input.aau_contact.unwrap_or_default(),
            potential_areas_of_collaboration: areas,
            other_collaboration_area: input.other_collaboration_area,
            potential_start_date,
            duration_of_partnership: input.duration_of_partnership,
            partner_contact_person: input.partner_contact_person.unwrap_or_default(),
            partner_contact_person_secondary: input.partner_contact_person_secondary,
            aau_contact_person: input.aau_contact_person.unwrap_or_default(),
            aau_contact_person_secondary: input.aau_contact_person_secondary,
            description: input.description,
            mou_file_url: input.mou_file_url,
            status,
            is_archived: false,
            campus_id,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(&partnership).await?;
        info!(
            "Partnership {} created by {} in campus {}",
            partnership.id, actor.user_id, partnership.campus_id
        );
        Ok(partnership)
    }

    pub async fn list(&self, actor: &Actor, query: ListQuery) -> Result<PartnershipPage, ServiceError> {
        let (filter, page) = Filter::new(policy::tenant_filter(actor), &self.pagination)
            .assign(query, &self.pagination)?
            .into_parts();

        let total = self.store.count(&filter).await?;
        let partnerships = self.store.select(&filter, Some(page)).await?;
        Ok(PartnershipPage { partnerships, pagination: page.describe(total) })
    }

    pub async fn get(&self, actor: &Actor, id: Uuid) -> Result<Partnership, ServiceError> {
        self.find_scoped(id, &policy::tenant_filter(actor)).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        input: PartnershipInput,
    ) -> Result<Partnership, ServiceError> {
        if let Some(areas) = &input.potential_areas_of_collaboration {
            policy::check_collaboration_areas(areas, input.other_collaboration_area.as_deref())?;
        }

        let scope = policy::tenant_filter(actor);
        let mut record = self.find_scoped(id, &scope).await?;

        if let Some(raw) = input.status.as_deref() {
            let requested = raw.parse::<PartnershipStatus>().map_err(ServiceError::Validation)?;
            if requested != record.status {
                return Err(ServiceError::validation(
                    "Status can only be changed through approve or reject",
                ));
            }
        }
        if input.is_archived.is_some_and(|flag| flag != record.is_archived) {
            return Err(ServiceError::validation("Archiving is only possible through archive"));
        }

        merge(&mut record, input)?;
        policy::check_collaboration_areas(
            &record.potential_areas_of_collaboration,
            record.other_collaboration_area.as_deref(),
        )?;

        let updated = self
            .store
            .update(&record, &scope)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_IN_CAMPUS.into()))?;
        info!("Partnership {} updated by {}", id, actor.user_id);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete(id, &policy::tenant_filter(actor)).await? {
            return Err(ServiceError::NotFound(NOT_IN_CAMPUS.into()));
        }
        info!("Partnership {} deleted by {}", id, actor.user_id);
        Ok(())
    }

    /// Moves a Pending record to Active or Rejected. The store write is a
    /// compare-and-set on Pending, so a concurrent loser gets the same refusal.
    pub async fn transition(
        &self,
        actor: &Actor,
        id: Uuid,
        action: Transition,
    ) -> Result<Partnership, ServiceError> {
        let scope = policy::tenant_filter(actor);
        let current = self.find_scoped(id, &scope).await?;

        if !policy::can_transition(current.status, action, actor.role) {
            return Err(policy::transition_refused(action));
        }

        let updated = self
            .store
            .transition_status(id, &scope, PartnershipStatus::Pending, action.target())
            .await?
            .ok_or_else(|| policy::transition_refused(action))?;

        info!("Partnership {} {} by {}", id, action.verb(), actor.user_id);
        Ok(updated)
    }

    pub async fn archive(&self, actor: &Actor, id: Uuid) -> Result<Partnership, ServiceError> {
        let scope = policy::tenant_filter(actor);
        let current = self.find_scoped(id, &scope).await?;
        if current.is_archived {
            return Err(ServiceError::conflict("Partnership is already archived"));
        }

        let archived = self
            .store
            .archive(id, &scope)
            .await?
            .ok_or_else(|| ServiceError::conflict("Partnership is already archived"))?;

        info!("Partnership {} archived by {}", id, actor.user_id);
        Ok(archived)
    }

    pub async fn renew(&self, actor: &Actor, id: Uuid, input: RenewInput) -> Result<Partnership, ServiceError> {
        let (Some(raw_date), Some(duration)) = (
            input.potential_start_date.filter(|d| !d.trim().is_empty()),
            input.duration_of_partnership.filter(|d| !d.trim().is_empty()),
        ) else {
            return Err(ServiceError::validation(
                "Potential start date and duration of partnership are required",
            ));
        };
        let start = parse_date(&raw_date)?;

        let scope = policy::tenant_filter(actor);
        let mut record = self.find_scoped(id, &scope).await?;
        record.potential_start_date = start;
        record.duration_of_partnership = Some(duration);

        let renewed = self
            .store
            .update(&record, &scope)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_IN_CAMPUS.into()))?;
        info!("Partnership {} renewed by {}", id, actor.user_id);
        Ok(renewed)
    }

    /// Whole tenant-visible set, archived records included
    pub async fn export(&self, actor: &Actor) -> Result<Vec<Partnership>, ServiceError> {
        let filter = PartnershipFilter::scoped(policy::tenant_filter(actor));
        Ok(self.store.select(&filter, None).await?)
    }

    /// Every campus, every record
    pub async fn list_all(&self) -> Result<Vec<Partnership>, ServiceError> {
        let filter = PartnershipFilter::scoped(TenantScope::Global);
        Ok(self.store.select(&filter, None).await?)
    }

    async fn find_scoped(&self, id: Uuid, scope: &TenantScope) -> Result<Partnership, ServiceError> {
        self.store
            .find(id, scope)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_IN_CAMPUS.into()))
    }
}

fn merge(record: &mut Partnership, input: PartnershipInput) -> Result<(), ServiceError> {
    if let Some(v) = input.partner_institution {
        if v.name.trim().is_empty() {
            return Err(ServiceError::validation("Partner institution name is required"));
        }
        record.partner_institution = v;
    }
    if let Some(v) = input.aau_contact {
        record.aau_contact = v;
    }
    if let Some(v) = input.potential_areas_of_collaboration {
        record.potential_areas_of_collaboration = v;
    }
    if let Some(v) = input.other_collaboration_area {
        record.other_collaboration_area = Some(v);
    }
    if let Some(raw) = input.potential_start_date {
        record.potential_start_date = parse_date(&raw)?;
    }
    if let Some(v) = input.duration_of_partnership {
        record.duration_of_partnership = Some(v);
    }
    if let Some(v) = input.partner_contact_person {
        record.partner_contact_person = v;
    }
    if let Some(v) = input.partner_contact_person_secondary {
        record.partner_contact_person_secondary = Some(v);
    }
    if let Some(v) = input.aau_contact_person {
        record.aau_contact_person = v;
    }
    if let Some(v) = input.aau_contact_person_secondary {
        record.aau_contact_person_secondary = Some(v);
    }
    if let Some(v) = input.description {
        record.description = Some(v);
    }
    if let Some(v) = input.mou_file_url {
        record.mou_file_url = Some(v);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryPartnershipStore;
    use crate::types::Role;

    fn service() -> PartnershipService {
        PartnershipService::new(
            Arc::new(MemoryPartnershipStore::default()),
            PaginationConfig { default_limit: 10, max_limit: 100 },
        )
    }

    fn actor(role: Role, campus: Option<&str>) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            email: "admin@example.com".into(),
            role,
            campus_id: campus.map(String::from),
            status: UserStatus::Active,
        }
    }

    fn input() -> PartnershipInput {
        PartnershipInput {
            partner_institution: Some(PartnerInstitution {
                name: "Partner University".into(),
                type_of_organization: Some("University".into()),
                ..Default::default()
            }),
            potential_start_date: Some("2025-09-01".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn super_admin_creations_land_in_default_campus() {
        let svc = service();
        let created = svc.create(&actor(Role::SuperAdmin, None), input()).await.unwrap();
        assert_eq!(created.campus_id, DEFAULT_CAMPUS);
        assert_eq!(created.status, PartnershipStatus::Pending);
        assert!(!created.is_archived);
    }

    #[tokio::test]
    async fn inactive_actor_cannot_create() {
        let svc = service();
        let mut pending = actor(Role::Admin, Some("north"));
        pending.status = UserStatus::Pending;
        let err = svc.create(&pending, input()).await.unwrap_err();
        assert_eq!(err.to_string(), "User account not active. Current status: pending");
    }

    #[tokio::test]
    async fn update_cannot_flip_status_or_archive() {
        let svc = service();
        let admin = actor(Role::Admin, Some("north"));
        let created = svc.create(&admin, input()).await.unwrap();

        let err = svc
            .update(&admin, created.id, PartnershipInput { status: Some("Active".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = svc
            .update(&admin, created.id, PartnershipInput { is_archived: Some(true), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_checks_other_rule_against_merged_record() {
        let svc = service();
        let admin = actor(Role::Admin, Some("north"));
        let mut with_other = input();
        with_other.potential_areas_of_collaboration = Some(vec!["Other".into()]);
        with_other.other_collaboration_area = Some("Sports".into());
        let created = svc.create(&admin, with_other).await.unwrap();

        let cleared = PartnershipInput { other_collaboration_area: Some(String::new()), ..Default::default() };
        assert!(svc.update(&admin, created.id, cleared).await.is_err());

        let unrelated = PartnershipInput { description: Some("note".into()), ..Default::default() };
        assert!(svc.update(&admin, created.id, unrelated).await.is_ok());
    }

    #[tokio::test]
    async fn renew_requires_both_fields() {
        let svc = service();
        let admin = actor(Role::Admin, Some("north"));
        let created = svc.create(&admin, input()).await.unwrap();

        let missing = RenewInput { potential_start_date: Some("2026-01-01".into()), duration_of_partnership: None };
        assert!(matches!(svc.renew(&admin, created.id, missing).await, Err(ServiceError::Validation(_))));

        let renewed = svc
            .renew(
                &admin,
                created.id,
                RenewInput {
                    potential_start_date: Some("2026-01-01".into()),
                    duration_of_partnership: Some("2 years".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(renewed.duration_of_partnership.as_deref(), Some("2 years"));
        assert_eq!(renewed.potential_start_date, parse_date("2026-01-01").unwrap());
    }

    #[tokio::test]
    async fn export_includes_archived_records() {
        let svc = service();
        let admin = actor(Role::Admin, Some("north"));
        let a = svc.create(&admin, input()).await.unwrap();
        svc.create(&admin, input()).await.unwrap();
        svc.archive(&admin, a.id).await.unwrap();

        assert_eq!(svc.export(&admin).await.unwrap().len(), 2);
        let listed = svc.list(&admin, ListQuery::default()).await.unwrap();
        assert_eq!(listed.pagination.total, 1);
    }
}
