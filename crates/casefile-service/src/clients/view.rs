//! Response shapes for client reads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use casefile_core::error::CoreError;
use casefile_db::model::client::Client;
use casefile_db::model::reference::{Catalogs, ClientStatus, Language, Pronoun, SexValue};

use crate::error::ServiceResult;

/// A client as exposed over the API: reference codes resolved to their
/// catalog entries, plus the derived `full_name`.
#[derive(Debug, Clone, Serialize)]
pub struct ClientView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub date_of_birth: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ClientStatus,
    pub primary_language: Option<Language>,
    pub pronoun: Option<Pronoun>,
    pub sex: Option<SexValue>,
    pub interpreter_needed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ClientView {
    /// ## Summary
    /// Resolves a stored row against the catalogs.
    ///
    /// ## Errors
    /// Fails when the row references a status code missing from the
    /// catalog; the status relation is protected, so this indicates a
    /// broken deployment rather than bad input.
    pub fn assemble(client: Client, catalogs: &Catalogs) -> ServiceResult<Self> {
        let status = catalogs
            .status(&client.status_code)
            .cloned()
            .ok_or(CoreError::InvariantViolation(
                "client references a status code missing from the catalog",
            ))?;

        let full_name = if client.first_name.is_empty() || client.last_name.is_empty() {
            None
        } else {
            Some(format!("{} {}", client.first_name, client.last_name))
        };

        Ok(Self {
            id: client.id,
            full_name,
            primary_language: client
                .primary_language_code
                .as_deref()
                .and_then(|code| catalogs.language(code))
                .cloned(),
            pronoun: client
                .pronoun_code
                .as_deref()
                .and_then(|code| catalogs.pronoun(code))
                .cloned(),
            sex: client
                .sex_code
                .as_deref()
                .and_then(|code| catalogs.sex(code))
                .cloned(),
            first_name: client.first_name,
            last_name: client.last_name,
            date_of_birth: client.date_of_birth,
            email: client.email,
            phone: client.phone,
            status,
            interpreter_needed: client.interpreter_needed,
            created_at: client.created_at,
            updated_at: client.updated_at,
            created_by: client.created_by,
            updated_by: client.updated_by,
            deleted_at: client.deleted_at,
        })
    }
}

/// One page of list results with offset-based navigation metadata.
#[derive(Debug, Serialize)]
pub struct ClientListPage {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ClientView>,
}

impl ClientListPage {
    #[must_use]
    pub fn new(total: i64, limit: i64, offset: i64, results: Vec<ClientView>) -> Self {
        let next = (offset + limit < total)
            .then(|| format!("?limit={limit}&offset={}", offset + limit));
        let previous =
            (offset > 0).then(|| format!("?limit={limit}&offset={}", (offset - limit).max(0)));

        Self {
            count: total,
            next,
            previous,
            results,
        }
    }
}

/// Search results: count reflects the returned rows, not the total
/// matching population.
#[derive(Debug, Serialize)]
pub struct ClientSearchResults {
    pub query: Option<String>,
    pub count: usize,
    pub results: Vec<ClientView>,
}
