use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{ContactPerson, Partnership, PartnerInstitution, UniversityContact, User};
use super::store::{PartnershipStore, UserStore};
use crate::filter::filter_order::FilterOrder;
use crate::filter::filter_where::FilterWhere;
use crate::filter::{Page, PartnershipFilter, TenantScope};
use crate::types::PartnershipStatus;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password, role, campus_id, status, created_at, updated_at";

const PARTNERSHIP_COLUMNS: &str = "id, partner_institution, aau_contact, potential_areas_of_collaboration, \
     other_collaboration_area, potential_start_date, duration_of_partnership, partner_contact_person, \
     partner_contact_person_secondary, aau_contact_person, aau_contact_person_secondary, description, \
     mou_file_url, status, is_archived, campus_id, created_by, created_at, updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    role: String,
    campus_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password: row.password,
            role: row.role.parse().map_err(DatabaseError::Corrupt)?,
            campus_id: row.campus_id,
            status: row.status.parse().map_err(DatabaseError::Corrupt)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct PartnershipRow {
    id: Uuid,
    partner_institution: Json<PartnerInstitution>,
    aau_contact: Json<UniversityContact>,
    potential_areas_of_collaboration: Vec<String>,
    other_collaboration_area: Option<String>,
    potential_start_date: DateTime<Utc>,
    duration_of_partnership: Option<String>,
    partner_contact_person: Json<ContactPerson>,
    partner_contact_person_secondary: Option<Json<ContactPerson>>,
    aau_contact_person: Json<ContactPerson>,
    aau_contact_person_secondary: Option<Json<ContactPerson>>,
    description: Option<String>,
    mou_file_url: Option<String>,
    status: String,
    is_archived: bool,
    campus_id: String,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PartnershipRow> for Partnership {
    type Error = DatabaseError;

    fn try_from(row: PartnershipRow) -> Result<Self, Self::Error> {
        Ok(Partnership {
            id: row.id,
            partner_institution: row.partner_institution.0,
            aau_contact: row.aau_contact.0,
            potential_areas_of_collaboration: row.potential_areas_of_collaboration,
            other_collaboration_area: row.other_collaboration_area,
            potential_start_date: row.potential_start_date,
            duration_of_partnership: row.duration_of_partnership,
            partner_contact_person: row.partner_contact_person.0,
            partner_contact_person_secondary: row.partner_contact_person_secondary.map(|j| j.0),
            aau_contact_person: row.aau_contact_person.0,
            aau_contact_person_secondary: row.aau_contact_person_secondary.map(|j| j.0),
            description: row.description,
            mou_file_url: row.mou_file_url,
            status: row.status.parse().map_err(DatabaseError::Corrupt)?,
            is_archived: row.is_archived,
            campus_id: row.campus_id,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_partnerships(rows: Vec<PartnershipRow>) -> Result<Vec<Partnership>, DatabaseError> {
    rows.into_iter().map(Partnership::try_from).collect()
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, password, role, campus_id, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(&user.campus_id)
        .bind(user.status.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, &format!("email {}", user.email)))?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET first_name = $2, last_name = $3, email = $4, password = $5, role = $6, \
             campus_id = $7, status = $8, updated_at = now() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.role.as_str())
            .bind(&user.campus_id)
            .bind(user.status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, &format!("email {}", user.email)))?
            .map(User::try_from)
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at ASC, id ASC", USER_COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }
}

pub struct PgPartnershipStore {
    pool: PgPool,
}

impl PgPartnershipStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn scoped_by_id<'a>(prefix: &str, id: Uuid, scope: &TenantScope) -> QueryBuilder<'a, Postgres> {
        let mut qb = QueryBuilder::new(prefix);
        qb.push(" WHERE \"id\" = ").push_bind(id);
        FilterWhere::push_scope(scope, &mut qb);
        qb
    }
}

#[async_trait]
impl PartnershipStore for PgPartnershipStore {
    async fn insert(&self, p: &Partnership) -> Result<(), DatabaseError> {
        let sql = format!(
            "INSERT INTO partnerships ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)",
            PARTNERSHIP_COLUMNS
        );
        sqlx::query(&sql)
            .bind(p.id)
            .bind(Json(&p.partner_institution))
            .bind(Json(&p.aau_contact))
            .bind(&p.potential_areas_of_collaboration)
            .bind(&p.other_collaboration_area)
            .bind(p.potential_start_date)
            .bind(&p.duration_of_partnership)
            .bind(Json(&p.partner_contact_person))
            .bind(p.partner_contact_person_secondary.as_ref().map(Json))
            .bind(Json(&p.aau_contact_person))
            .bind(p.aau_contact_person_secondary.as_ref().map(Json))
            .bind(&p.description)
            .bind(&p.mou_file_url)
            .bind(p.status.as_str())
            .bind(p.is_archived)
            .bind(&p.campus_id)
            .bind(p.created_by)
            .bind(p.created_at)
            .bind(p.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, &format!("partnership {}", p.id)))?;
        Ok(())
    }

    async fn find(&self, id: Uuid, scope: &TenantScope) -> Result<Option<Partnership>, DatabaseError> {
        let prefix = format!("SELECT {} FROM partnerships", PARTNERSHIP_COLUMNS);
        let mut qb = Self::scoped_by_id(&prefix, id, scope);
        qb.build_query_as::<PartnershipRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Partnership::try_from)
            .transpose()
    }

    async fn count(&self, filter: &PartnershipFilter) -> Result<i64, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM partnerships");
        FilterWhere::push_sql(filter, &mut qb);
        let (count,) = qb.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn select(
        &self,
        filter: &PartnershipFilter,
        page: Option<Page>,
    ) -> Result<Vec<Partnership>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM partnerships", PARTNERSHIP_COLUMNS));
        FilterWhere::push_sql(filter, &mut qb);
        qb.push(" ").push(FilterOrder::to_sql());
        if let Some(page) = page {
            qb.push(" LIMIT ").push_bind(page.limit);
            qb.push(" OFFSET ").push_bind(page.offset());
        }
        let rows = qb.build_query_as::<PartnershipRow>().fetch_all(&self.pool).await?;
        into_partnerships(rows)
    }

    async fn update(&self, p: &Partnership, scope: &TenantScope) -> Result<Option<Partnership>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE partnerships SET ");
        let mut set = qb.separated(", ");
        set.push("partner_institution = ").push_bind_unseparated(Json(p.partner_institution.clone()));
        set.push("aau_contact = ").push_bind_unseparated(Json(p.aau_contact.clone()));
        set.push("potential_areas_of_collaboration = ")
            .push_bind_unseparated(p.potential_areas_of_collaboration.clone());
        set.push("other_collaboration_area = ").push_bind_unseparated(p.other_collaboration_area.clone());
        set.push("potential_start_date = ").push_bind_unseparated(p.potential_start_date);
        set.push("duration_of_partnership = ").push_bind_unseparated(p.duration_of_partnership.clone());
        set.push("partner_contact_person = ").push_bind_unseparated(Json(p.partner_contact_person.clone()));
        set.push("partner_contact_person_secondary = ")
            .push_bind_unseparated(p.partner_contact_person_secondary.clone().map(Json));
        set.push("aau_contact_person = ").push_bind_unseparated(Json(p.aau_contact_person.clone()));
        set.push("aau_contact_person_secondary = ")
            .push_bind_unseparated(p.aau_contact_person_secondary.clone().map(Json));
        set.push("description = ").push_bind_unseparated(p.description.clone());
        set.push("mou_file_url = ").push_bind_unseparated(p.mou_file_url.clone());
        set.push("updated_at = now()");

        qb.push(" WHERE \"id\" = ").push_bind(p.id);
        FilterWhere::push_scope(scope, &mut qb);
        qb.push(" RETURNING ").push(PARTNERSHIP_COLUMNS);

        qb.build_query_as::<PartnershipRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Partnership::try_from)
            .transpose()
    }

    async fn transition_status(
        &self,
        id: Uuid,
        scope: &TenantScope,
        from: PartnershipStatus,
        to: PartnershipStatus,
    ) -> Result<Option<Partnership>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE partnerships SET status = ");
        qb.push_bind(to.as_str());
        qb.push(", updated_at = now() WHERE \"id\" = ").push_bind(id);
        qb.push(" AND \"status\" = ").push_bind(from.as_str());
        FilterWhere::push_scope(scope, &mut qb);
        qb.push(" RETURNING ").push(PARTNERSHIP_COLUMNS);

        qb.build_query_as::<PartnershipRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Partnership::try_from)
            .transpose()
    }

    async fn archive(&self, id: Uuid, scope: &TenantScope) -> Result<Option<Partnership>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE partnerships SET is_archived = true, updated_at = now()");
        qb.push(" WHERE \"id\" = ").push_bind(id);
        qb.push(" AND \"is_archived\" = false");
        FilterWhere::push_scope(scope, &mut qb);
        qb.push(" RETURNING ").push(PARTNERSHIP_COLUMNS);

        qb.build_query_as::<PartnershipRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Partnership::try_from)
            .transpose()
    }

    async fn delete(&self, id: Uuid, scope: &TenantScope) -> Result<bool, DatabaseError> {
        let mut qb = Self::scoped_by_id("DELETE FROM partnerships", id, scope);
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
