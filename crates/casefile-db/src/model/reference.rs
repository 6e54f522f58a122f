use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::client_status)]
#[diesel(check_for_backend(Pg))]
pub struct ClientStatus {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: Option<i32>,
    pub color_hex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::language)]
#[diesel(check_for_backend(Pg))]
pub struct Language {
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    pub is_active: bool,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::pronoun)]
#[diesel(check_for_backend(Pg))]
pub struct Pronoun {
    pub code: String,
    pub display_text: String,
    pub is_active: bool,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::sex_value)]
#[diesel(check_for_backend(Pg))]
pub struct SexValue {
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub display_order: Option<i32>,
}

/// One snapshot of all four reference catalogs, active and inactive rows
/// included. Catalogs are small; callers resolve codes against the snapshot.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub client_statuses: Vec<ClientStatus>,
    pub languages: Vec<Language>,
    pub pronouns: Vec<Pronoun>,
    pub sex_values: Vec<SexValue>,
}

impl Catalogs {
    /// Resolves a status by exact, case-sensitive code match. Inactive
    /// entries resolve too; activity only affects catalog listings.
    #[must_use]
    pub fn status(&self, code: &str) -> Option<&ClientStatus> {
        self.client_statuses.iter().find(|item| item.code == code)
    }

    #[must_use]
    pub fn language(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|item| item.code == code)
    }

    #[must_use]
    pub fn pronoun(&self, code: &str) -> Option<&Pronoun> {
        self.pronouns.iter().find(|item| item.code == code)
    }

    #[must_use]
    pub fn sex(&self, code: &str) -> Option<&SexValue> {
        self.sex_values.iter().find(|item| item.code == code)
    }
}
