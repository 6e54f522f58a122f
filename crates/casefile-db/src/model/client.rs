use chrono::{DateTime, NaiveDate, Utc};
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use casefile_core::constants::DELETED_STATUS_CODE;

use crate::db::schema;

/// A client record. Reference relations are stored by catalog code and
/// resolved against the catalogs when assembling responses.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::client)]
#[diesel(check_for_backend(Pg))]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status_code: String,
    pub primary_language_code: Option<String>,
    pub pronoun_code: Option<String>,
    pub sex_code: Option<String>,
    pub interpreter_needed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Client {
    /// A live client is neither soft-deleted nor parked on the reserved
    /// `deleted` status.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none() && self.status_code != DELETED_STATUS_CODE
    }
}

/// Field-level changes applied to a client row. `None` leaves a column
/// untouched; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::client)]
pub struct ClientChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub status_code: Option<String>,
    pub primary_language_code: Option<Option<String>>,
    pub pronoun_code: Option<Option<String>>,
    pub sex_code: Option<Option<String>>,
    pub interpreter_needed: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
    pub deleted_at: Option<Option<DateTime<Utc>>>,
}

impl ClientChanges {
    /// ## Summary
    /// Applies the changeset to an in-memory row, mirroring the SQL
    /// `UPDATE ... SET` the changeset produces against PostgreSQL.
    pub fn apply_to(&self, row: &mut Client) {
        if let Some(value) = &self.first_name {
            row.first_name = value.clone();
        }
        if let Some(value) = &self.last_name {
            row.last_name = value.clone();
        }
        if let Some(value) = self.date_of_birth {
            row.date_of_birth = value;
        }
        if let Some(value) = &self.email {
            row.email = value.clone();
        }
        if let Some(value) = &self.phone {
            row.phone = value.clone();
        }
        if let Some(value) = &self.status_code {
            row.status_code = value.clone();
        }
        if let Some(value) = &self.primary_language_code {
            row.primary_language_code = value.clone();
        }
        if let Some(value) = &self.pronoun_code {
            row.pronoun_code = value.clone();
        }
        if let Some(value) = &self.sex_code {
            row.sex_code = value.clone();
        }
        if let Some(value) = self.interpreter_needed {
            row.interpreter_needed = value;
        }
        if let Some(value) = self.updated_at {
            row.updated_at = value;
        }
        if let Some(value) = self.updated_by {
            row.updated_by = value;
        }
        if let Some(value) = self.deleted_at {
            row.deleted_at = value;
        }
    }
}
