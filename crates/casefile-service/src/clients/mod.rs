//! Client record operations: the gate every read and write goes through.
//!
//! Each write validates against the resulting record state before touching
//! the store, and stamps the acting identity passed in by the caller.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use casefile_core::constants::DELETED_STATUS_CODE;
use casefile_core::types::FieldErrors;
use casefile_db::db::{ClientStore, ReferenceStore};
use casefile_db::error::DbError;
use casefile_db::model::client::{Client, ClientChanges};

use crate::error::{ServiceError, ServiceResult};

pub mod payload;
pub mod query;
pub mod validate;
pub mod view;

use payload::{ClientPatch, ClientPayload};
use query::{ListRequest, SearchRequest};
use validate::{Draft, NormalizedClient};
use view::{ClientListPage, ClientSearchResults, ClientView};

fn not_found(id: Uuid) -> ServiceError {
    let mut details = FieldErrors::new();
    details.insert("client_id".to_owned(), format!("No client found with ID {id}"));
    ServiceError::NotFound { details }
}

fn duplicate_email(email: &str) -> ServiceError {
    let mut details = FieldErrors::new();
    details.insert(
        "email".to_owned(),
        format!("A client with email '{email}' already exists."),
    );
    ServiceError::DuplicateEmail { details }
}

/// The store's uniqueness guard is authoritative; a violation that slips
/// past the pre-write check still surfaces as the same conflict.
fn map_write_error(err: DbError, email: Option<&str>) -> ServiceError {
    match err {
        DbError::UniqueViolation(_) => duplicate_email(email.unwrap_or_default()),
        other => ServiceError::DatabaseError(other),
    }
}

/// Whether the resulting email differs from the stored one; unchanged
/// emails are exempt from the duplicate check.
fn email_changed(existing: Option<&Client>, resulting: Option<&str>) -> bool {
    match resulting {
        None => false,
        Some(new) => !existing
            .and_then(|client| client.email.as_deref())
            .is_some_and(|old| old.eq_ignore_ascii_case(new)),
    }
}

async fn reject_duplicate_email(
    clients: &dyn ClientStore,
    existing: Option<&Client>,
    normalized: &NormalizedClient,
) -> ServiceResult<()> {
    let Some(email) = normalized.email.as_deref() else {
        return Ok(());
    };
    if !email_changed(existing, Some(email)) {
        return Ok(());
    }
    if clients
        .email_in_use(email, existing.map(|client| client.id))
        .await?
    {
        return Err(duplicate_email(email));
    }
    Ok(())
}

fn full_changes(normalized: &NormalizedClient, actor: Uuid, now: DateTime<Utc>) -> ClientChanges {
    ClientChanges {
        first_name: Some(normalized.first_name.clone()),
        last_name: Some(normalized.last_name.clone()),
        date_of_birth: Some(normalized.date_of_birth),
        email: Some(normalized.email.clone()),
        phone: Some(normalized.phone.clone()),
        status_code: Some(normalized.status.code.clone()),
        primary_language_code: Some(
            normalized
                .primary_language
                .as_ref()
                .map(|language| language.code.clone()),
        ),
        pronoun_code: Some(normalized.pronoun.as_ref().map(|pronoun| pronoun.code.clone())),
        sex_code: Some(normalized.sex.as_ref().map(|sex| sex.code.clone())),
        interpreter_needed: Some(normalized.interpreter_needed),
        updated_at: Some(now),
        updated_by: Some(actor),
        deleted_at: None,
    }
}

/// Only the fields the patch actually touched make it into the changeset.
fn patch_changes(
    patch: &ClientPatch,
    normalized: &NormalizedClient,
    actor: Uuid,
    now: DateTime<Utc>,
) -> ClientChanges {
    ClientChanges {
        first_name: patch
            .first_name
            .is_some()
            .then(|| normalized.first_name.clone()),
        last_name: patch.last_name.is_some().then(|| normalized.last_name.clone()),
        date_of_birth: patch
            .date_of_birth
            .is_some()
            .then_some(normalized.date_of_birth),
        email: patch.email.is_some().then(|| normalized.email.clone()),
        phone: patch.phone.is_some().then(|| normalized.phone.clone()),
        status_code: patch
            .status_code
            .is_some()
            .then(|| normalized.status.code.clone()),
        primary_language_code: patch.primary_language_code.is_some().then(|| {
            normalized
                .primary_language
                .as_ref()
                .map(|language| language.code.clone())
        }),
        pronoun_code: patch
            .pronoun_code
            .is_some()
            .then(|| normalized.pronoun.as_ref().map(|pronoun| pronoun.code.clone())),
        sex_code: patch
            .sex_code
            .is_some()
            .then(|| normalized.sex.as_ref().map(|sex| sex.code.clone())),
        interpreter_needed: patch
            .interpreter_needed
            .is_some()
            .then_some(normalized.interpreter_needed),
        updated_at: Some(now),
        updated_by: Some(actor),
        deleted_at: None,
    }
}

/// ## Summary
/// Creates a client record.
///
/// ## Errors
/// Validation, invalid-reference, or duplicate-email failures; store
/// errors pass through.
#[tracing::instrument(skip(clients, references, payload))]
pub async fn create_client(
    clients: &dyn ClientStore,
    references: &dyn ReferenceStore,
    actor: Uuid,
    payload: &ClientPayload,
) -> ServiceResult<ClientView> {
    let catalogs = references.catalogs().await?;
    let draft = Draft::from_payload(payload);
    let normalized = validate::check(&draft, &catalogs, Utc::now().date_naive())?;

    reject_duplicate_email(clients, None, &normalized).await?;

    let now = Utc::now();
    let record = Client {
        id: Uuid::now_v7(),
        first_name: normalized.first_name.clone(),
        last_name: normalized.last_name.clone(),
        date_of_birth: normalized.date_of_birth,
        email: normalized.email.clone(),
        phone: normalized.phone.clone(),
        status_code: normalized.status.code.clone(),
        primary_language_code: normalized
            .primary_language
            .as_ref()
            .map(|language| language.code.clone()),
        pronoun_code: normalized.pronoun.as_ref().map(|pronoun| pronoun.code.clone()),
        sex_code: normalized.sex.as_ref().map(|sex| sex.code.clone()),
        interpreter_needed: normalized.interpreter_needed,
        created_at: now,
        updated_at: now,
        created_by: actor,
        updated_by: actor,
        deleted_at: None,
    };

    let row = clients
        .insert(record)
        .await
        .map_err(|err| map_write_error(err, normalized.email.as_deref()))?;

    tracing::info!(client_id = %row.id, "Client created");

    ClientView::assemble(row, &catalogs)
}

/// ## Summary
/// Direct lookup by id. This is the one read that returns soft-deleted
/// records.
///
/// ## Errors
/// Not-found when no record with this id exists at all.
#[tracing::instrument(skip(clients, references))]
pub async fn get_client(
    clients: &dyn ClientStore,
    references: &dyn ReferenceStore,
    id: Uuid,
) -> ServiceResult<ClientView> {
    let Some(row) = clients.get(id, true).await? else {
        return Err(not_found(id));
    };
    let catalogs = references.catalogs().await?;
    ClientView::assemble(row, &catalogs)
}

/// ## Summary
/// Overwrites all mutable fields of a live client.
///
/// ## Errors
/// Not-found for missing or soft-deleted records; validation,
/// invalid-reference, and duplicate-email failures as on create.
#[tracing::instrument(skip(clients, references, payload))]
pub async fn update_client(
    clients: &dyn ClientStore,
    references: &dyn ReferenceStore,
    actor: Uuid,
    id: Uuid,
    payload: &ClientPayload,
) -> ServiceResult<ClientView> {
    let Some(existing) = clients.get(id, false).await? else {
        return Err(not_found(id));
    };

    let catalogs = references.catalogs().await?;
    let draft = Draft::from_payload(payload);
    let normalized = validate::check(&draft, &catalogs, Utc::now().date_naive())?;

    reject_duplicate_email(clients, Some(&existing), &normalized).await?;

    let changes = full_changes(&normalized, actor, Utc::now());
    let row = clients
        .update(id, changes)
        .await
        .map_err(|err| map_write_error(err, normalized.email.as_deref()))?
        .ok_or_else(|| not_found(id))?;

    ClientView::assemble(row, &catalogs)
}

/// ## Summary
/// Applies a partial update; absent fields keep their stored value. An
/// empty patch returns the record unchanged without writing.
///
/// ## Errors
/// As on full update.
#[tracing::instrument(skip(clients, references, patch))]
pub async fn patch_client(
    clients: &dyn ClientStore,
    references: &dyn ReferenceStore,
    actor: Uuid,
    id: Uuid,
    patch: &ClientPatch,
) -> ServiceResult<ClientView> {
    let Some(existing) = clients.get(id, false).await? else {
        return Err(not_found(id));
    };

    let catalogs = references.catalogs().await?;

    if patch.is_empty() {
        return ClientView::assemble(existing, &catalogs);
    }

    let draft = validate::merge_patch(&existing, patch)?;
    let normalized = validate::check(&draft, &catalogs, Utc::now().date_naive())?;

    reject_duplicate_email(clients, Some(&existing), &normalized).await?;

    let changes = patch_changes(patch, &normalized, actor, Utc::now());
    let row = clients
        .update(id, changes)
        .await
        .map_err(|err| map_write_error(err, normalized.email.as_deref()))?
        .ok_or_else(|| not_found(id))?;

    ClientView::assemble(row, &catalogs)
}

/// ## Summary
/// Soft-deletes a live client: parks it on the reserved `deleted` status
/// and stamps `deleted_at`. There is no way back to live.
///
/// ## Errors
/// Not-found for missing or already-deleted records; a configuration
/// failure when the `deleted` status is not seeded.
#[tracing::instrument(skip(clients, references))]
pub async fn delete_client(
    clients: &dyn ClientStore,
    references: &dyn ReferenceStore,
    actor: Uuid,
    id: Uuid,
) -> ServiceResult<()> {
    if clients.get(id, false).await?.is_none() {
        return Err(not_found(id));
    }

    let catalogs = references.catalogs().await?;
    if catalogs.status(DELETED_STATUS_CODE).is_none() {
        return Err(ServiceError::Configuration(format!(
            "'{DELETED_STATUS_CODE}' client status not found"
        )));
    }

    let now = Utc::now();
    let changes = ClientChanges {
        status_code: Some(DELETED_STATUS_CODE.to_owned()),
        deleted_at: Some(Some(now)),
        updated_at: Some(now),
        updated_by: Some(actor),
        ..ClientChanges::default()
    };

    if clients.update(id, changes).await?.is_none() {
        return Err(not_found(id));
    }

    tracing::info!(client_id = %id, "Client soft-deleted");

    Ok(())
}

/// ## Summary
/// Filtered, ordered, paginated listing over live clients.
///
/// ## Errors
/// A validation failure for an ordering field outside the allow-list;
/// store errors pass through.
#[tracing::instrument(skip(clients, references, request))]
pub async fn list_clients(
    clients: &dyn ClientStore,
    references: &dyn ReferenceStore,
    request: &ListRequest,
) -> ServiceResult<ClientListPage> {
    let params = query::build_list_params(request)?;
    let page = clients.list(&params).await?;
    let catalogs = references.catalogs().await?;

    let results = page
        .items
        .into_iter()
        .map(|row| ClientView::assemble(row, &catalogs))
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(ClientListPage::new(
        page.total,
        params.limit,
        params.offset,
        results,
    ))
}

/// ## Summary
/// Multi-criteria search over live clients, truncated to the limit. The
/// reported count covers the returned rows only.
///
/// ## Errors
/// Store errors pass through.
#[tracing::instrument(skip(clients, references, request))]
pub async fn search_clients(
    clients: &dyn ClientStore,
    references: &dyn ReferenceStore,
    request: &SearchRequest,
) -> ServiceResult<ClientSearchResults> {
    let params = query::build_search_params(request, Utc::now().date_naive());
    let items = clients.search(&params).await?;
    let catalogs = references.catalogs().await?;

    let results = items
        .into_iter()
        .map(|row| ClientView::assemble(row, &catalogs))
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(ClientSearchResults {
        query: request.q.clone(),
        count: results.len(),
        results,
    })
}
