//! Reference-data listing for UI consumption.

use serde::Serialize;

use casefile_db::db::ReferenceStore;
use casefile_db::model::reference::{ClientStatus, Language, Pronoun, SexValue};

use crate::error::ServiceResult;

/// The four catalogs, filtered to active entries and ordered for display.
#[derive(Debug, Serialize)]
pub struct ReferenceData {
    pub client_statuses: Vec<ClientStatus>,
    pub languages: Vec<Language>,
    pub pronouns: Vec<Pronoun>,
    pub sex_values: Vec<SexValue>,
}

/// Display ordering: `display_order` ascending with unset orders last,
/// ties broken by code.
fn display_cmp(
    a_order: Option<i32>,
    a_code: &str,
    b_order: Option<i32>,
    b_code: &str,
) -> std::cmp::Ordering {
    let a_key = a_order.unwrap_or(i32::MAX);
    let b_key = b_order.unwrap_or(i32::MAX);
    a_key.cmp(&b_key).then_with(|| a_code.cmp(b_code))
}

/// ## Summary
/// Returns all active reference data values, ordered for display.
///
/// ## Errors
/// Store errors pass through.
pub async fn reference_data(references: &dyn ReferenceStore) -> ServiceResult<ReferenceData> {
    let catalogs = references.catalogs().await?;

    let mut client_statuses: Vec<ClientStatus> = catalogs
        .client_statuses
        .into_iter()
        .filter(|item| item.is_active)
        .collect();
    client_statuses
        .sort_by(|a, b| display_cmp(a.display_order, &a.code, b.display_order, &b.code));

    let mut languages: Vec<Language> = catalogs
        .languages
        .into_iter()
        .filter(|item| item.is_active)
        .collect();
    languages.sort_by(|a, b| display_cmp(a.display_order, &a.code, b.display_order, &b.code));

    let mut pronouns: Vec<Pronoun> = catalogs
        .pronouns
        .into_iter()
        .filter(|item| item.is_active)
        .collect();
    pronouns.sort_by(|a, b| display_cmp(a.display_order, &a.code, b.display_order, &b.code));

    let mut sex_values: Vec<SexValue> = catalogs
        .sex_values
        .into_iter()
        .filter(|item| item.is_active)
        .collect();
    sex_values.sort_by(|a, b| display_cmp(a.display_order, &a.code, b.display_order, &b.code));

    Ok(ReferenceData {
        client_statuses,
        languages,
        pronouns,
        sex_values,
    })
}
