//! In-memory store.
//!
//! Used when no database URL is configured (development mode) and by the
//! integration tests. Mirrors the PostgreSQL store's semantics, including
//! the live-row guard on updates and the case-insensitive email uniqueness
//! enforcement.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::db::params::{ClientListParams, ClientPage, ClientSearchParams, ListOrder};
use crate::db::{ClientStore, ReferenceStore};
use crate::error::{DbError, DbResult};
use crate::model::client::{Client, ClientChanges};
use crate::model::reference::Catalogs;

pub struct MemoryStore {
    clients: RwLock<Vec<Client>>,
    catalogs: Catalogs,
}

impl MemoryStore {
    #[must_use]
    pub fn new(catalogs: Catalogs) -> Self {
        Self {
            clients: RwLock::new(Vec::new()),
            catalogs,
        }
    }

    /// Store initialized with the same catalogs the migrations seed.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(crate::db::seed::reference_catalogs())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Client>> {
        match self.clients.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Client>> {
        match self.clients.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn email_collides(rows: &[Client], email: &str, exclude: Option<Uuid>) -> bool {
    rows.iter().any(|row| {
        row.deleted_at.is_none()
            && exclude != Some(row.id)
            && row
                .email
                .as_deref()
                .is_some_and(|existing| existing.eq_ignore_ascii_case(email))
    })
}

fn matches_list(row: &Client, params: &ClientListParams) -> bool {
    row.is_live()
        && params
            .status_code
            .as_deref()
            .is_none_or(|code| row.status_code.eq_ignore_ascii_case(code))
        && params.language_code.as_deref().is_none_or(|code| {
            row.primary_language_code
                .as_deref()
                .is_some_and(|lang| lang.eq_ignore_ascii_case(code))
        })
        && params
            .interpreter_needed
            .is_none_or(|flag| row.interpreter_needed == flag)
        && params
            .created_since
            .is_none_or(|since| row.created_at >= since)
        && params
            .updated_since
            .is_none_or(|since| row.updated_at >= since)
}

fn matches_search(row: &Client, params: &ClientSearchParams) -> bool {
    row.is_live()
        && params.text.as_deref().is_none_or(|text| text_match(row, text))
        && params
            .status_code
            .as_deref()
            .is_none_or(|code| row.status_code.eq_ignore_ascii_case(code))
        && params.language_code.as_deref().is_none_or(|code| {
            row.primary_language_code
                .as_deref()
                .is_some_and(|lang| lang.eq_ignore_ascii_case(code))
        })
        && params
            .interpreter_needed
            .is_none_or(|flag| row.interpreter_needed == flag)
        && params
            .born_on_or_before
            .is_none_or(|bound| row.date_of_birth <= bound)
        && params
            .born_after
            .is_none_or(|bound| row.date_of_birth > bound)
}

fn text_match(row: &Client, text: &str) -> bool {
    let needle = text.to_lowercase();
    row.first_name.to_lowercase().contains(&needle)
        || row.last_name.to_lowercase().contains(&needle)
        || row
            .email
            .as_deref()
            .is_some_and(|email| email.to_lowercase().contains(&needle))
        || row
            .phone
            .as_deref()
            .is_some_and(|phone| phone.to_lowercase().contains(&needle))
}

#[async_trait::async_trait]
impl ClientStore for MemoryStore {
    async fn insert(&self, record: Client) -> DbResult<Client> {
        let mut rows = self.write();
        if let Some(email) = record.email.as_deref()
            && email_collides(&rows, email, Some(record.id))
        {
            return Err(DbError::UniqueViolation("client email"));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid, include_deleted: bool) -> DbResult<Option<Client>> {
        let rows = self.read();
        Ok(rows
            .iter()
            .find(|row| row.id == id && (include_deleted || row.deleted_at.is_none()))
            .cloned())
    }

    async fn update(&self, id: Uuid, changes: ClientChanges) -> DbResult<Option<Client>> {
        let mut rows = self.write();

        let Some(index) = rows
            .iter()
            .position(|row| row.id == id && row.deleted_at.is_none())
        else {
            return Ok(None);
        };

        let mut updated = rows[index].clone();
        changes.apply_to(&mut updated);

        if let Some(email) = updated.email.as_deref()
            && updated.deleted_at.is_none()
            && email_collides(&rows, email, Some(id))
        {
            return Err(DbError::UniqueViolation("client email"));
        }

        rows[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> DbResult<bool> {
        let rows = self.read();
        Ok(email_collides(&rows, email, exclude))
    }

    async fn list(&self, params: &ClientListParams) -> DbResult<ClientPage> {
        let rows = self.read();

        let mut items: Vec<Client> = rows
            .iter()
            .filter(|row| matches_list(row, params))
            .cloned()
            .collect();
        items.sort_by(|a, b| params.order.compare(a, b));

        let total = i64::try_from(items.len()).unwrap_or(i64::MAX);
        let offset = usize::try_from(params.offset).unwrap_or(0);
        let limit = usize::try_from(params.limit).unwrap_or(0);
        let items = items.into_iter().skip(offset).take(limit).collect();

        Ok(ClientPage { total, items })
    }

    async fn search(&self, params: &ClientSearchParams) -> DbResult<Vec<Client>> {
        let rows = self.read();

        let mut items: Vec<Client> = rows
            .iter()
            .filter(|row| matches_search(row, params))
            .cloned()
            .collect();
        items.sort_by(|a, b| ListOrder::default().compare(a, b));
        items.truncate(usize::try_from(params.limit).unwrap_or(0));

        Ok(items)
    }
}

#[async_trait::async_trait]
impl ReferenceStore for MemoryStore {
    async fn catalogs(&self) -> DbResult<Catalogs> {
        Ok(self.catalogs.clone())
    }
}
