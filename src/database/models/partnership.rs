use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PartnershipStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnerInstitution {
    pub name: String,
    pub address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub type_of_organization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UniversityContact {
    pub interested_college_or_department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPerson {
    pub name: Option<String>,
    pub title: Option<String>,
    pub institutional_email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Collaboration agreement owned by exactly one campus
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partnership {
    pub id: Uuid,
    pub partner_institution: PartnerInstitution,
    pub aau_contact: UniversityContact,
    pub potential_areas_of_collaboration: Vec<String>,
    pub other_collaboration_area: Option<String>,
    pub potential_start_date: DateTime<Utc>,
    pub duration_of_partnership: Option<String>,
    pub partner_contact_person: ContactPerson,
    pub partner_contact_person_secondary: Option<ContactPerson>,
    pub aau_contact_person: ContactPerson,
    pub aau_contact_person_secondary: Option<ContactPerson>,
    pub description: Option<String>,
    pub mou_file_url: Option<String>,
    pub status: PartnershipStatus,
    pub is_archived: bool,
    pub campus_id: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Partnership {
    pub fn organization_type(&self) -> Option<&str> {
        self.partner_institution.type_of_organization.as_deref()
    }
}
