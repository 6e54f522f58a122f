//! Pure validation for client writes.
//!
//! Every write path (create, full update, partial update) reduces to a
//! [`Draft`] of the *resulting* record state, which is then checked against
//! the rules in order: contact-method presence, birth-date sanity,
//! reference-code resolution. The duplicate-email rule needs the store and
//! lives with the operations. A failure keeps the kind of the first
//! violated rule but collects a detail for every offending field.

use chrono::NaiveDate;

use casefile_core::types::{ALL_FIELDS_KEY, CatalogKind, FieldErrors};
use casefile_db::model::client::Client;
use casefile_db::model::reference::{Catalogs, ClientStatus, Language, Pronoun, SexValue};

use crate::clients::payload::{ClientPatch, ClientPayload};
use crate::error::{ServiceError, ServiceResult};

/// Resulting record state for a write, before reference resolution.
#[derive(Debug, Clone)]
pub struct Draft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status_code: Option<String>,
    pub primary_language_code: Option<String>,
    pub pronoun_code: Option<String>,
    pub sex_code: Option<String>,
    pub interpreter_needed: bool,
}

/// A validated write with reference codes resolved to catalog entries.
#[derive(Debug, Clone)]
pub struct NormalizedClient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ClientStatus,
    pub primary_language: Option<Language>,
    pub pronoun: Option<Pronoun>,
    pub sex: Option<SexValue>,
    pub interpreter_needed: bool,
}

/// An explicitly-empty contact value clears the field.
fn normalize_contact(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

impl Draft {
    #[must_use]
    pub fn from_payload(payload: &ClientPayload) -> Self {
        Self {
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            date_of_birth: payload.date_of_birth,
            email: normalize_contact(payload.email.as_deref()),
            phone: normalize_contact(payload.phone.as_deref()),
            status_code: Some(payload.status_code.clone()),
            primary_language_code: payload.primary_language_code.clone(),
            pronoun_code: payload.pronoun_code.clone(),
            sex_code: payload.sex_code.clone(),
            interpreter_needed: payload.interpreter_needed,
        }
    }
}

/// ## Summary
/// Merges a partial update over the existing record: absent fields keep
/// their stored value, explicitly-null required fields are rejected.
///
/// ## Errors
/// Returns a validation failure naming every required field sent as null.
pub fn merge_patch(existing: &Client, patch: &ClientPatch) -> ServiceResult<Draft> {
    let mut details = FieldErrors::new();
    let mut required = |field: &str| {
        details.insert(field.to_owned(), "This field may not be null.".to_owned());
    };

    let first_name = match &patch.first_name {
        None => existing.first_name.clone(),
        Some(Some(value)) => value.clone(),
        Some(None) => {
            required("first_name");
            existing.first_name.clone()
        }
    };
    let last_name = match &patch.last_name {
        None => existing.last_name.clone(),
        Some(Some(value)) => value.clone(),
        Some(None) => {
            required("last_name");
            existing.last_name.clone()
        }
    };
    let date_of_birth = match patch.date_of_birth {
        None => existing.date_of_birth,
        Some(Some(value)) => value,
        Some(None) => {
            required("date_of_birth");
            existing.date_of_birth
        }
    };
    let interpreter_needed = match patch.interpreter_needed {
        None => existing.interpreter_needed,
        Some(Some(value)) => value,
        Some(None) => {
            required("interpreter_needed");
            existing.interpreter_needed
        }
    };

    if !details.is_empty() {
        return Err(ServiceError::Validation { details });
    }

    Ok(Draft {
        first_name,
        last_name,
        date_of_birth,
        email: match &patch.email {
            None => existing.email.clone(),
            Some(value) => normalize_contact(value.as_deref()),
        },
        phone: match &patch.phone {
            None => existing.phone.clone(),
            Some(value) => normalize_contact(value.as_deref()),
        },
        // A null status falls through to the mandatory-reference check.
        status_code: match &patch.status_code {
            None => Some(existing.status_code.clone()),
            Some(value) => value.clone(),
        },
        primary_language_code: match &patch.primary_language_code {
            None => existing.primary_language_code.clone(),
            Some(value) => value.clone(),
        },
        pronoun_code: match &patch.pronoun_code {
            None => existing.pronoun_code.clone(),
            Some(value) => value.clone(),
        },
        sex_code: match &patch.sex_code {
            None => existing.sex_code.clone(),
            Some(value) => value.clone(),
        },
        interpreter_needed,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    Validation,
    InvalidReference,
}

#[derive(Debug, Default)]
struct Failure {
    details: FieldErrors,
    kind: Option<FailureKind>,
}

impl Failure {
    fn record(&mut self, kind: FailureKind, field: &str, message: String) {
        self.details.insert(field.to_owned(), message);
        self.kind.get_or_insert(kind);
    }

    fn into_result(self) -> ServiceResult<()> {
        match self.kind {
            None => Ok(()),
            Some(FailureKind::Validation) => Err(ServiceError::Validation {
                details: self.details,
            }),
            Some(FailureKind::InvalidReference) => Err(ServiceError::InvalidReference {
                details: self.details,
            }),
        }
    }
}

fn reference_label(kind: CatalogKind) -> &'static str {
    kind.field_name()
        .strip_suffix("_code")
        .unwrap_or(kind.field_name())
}

fn resolve<'a, T>(
    failure: &mut Failure,
    kind: CatalogKind,
    code: Option<&str>,
    lookup: impl Fn(&str) -> Option<&'a T>,
) -> Option<&'a T> {
    let code = code?;
    let resolved = lookup(code);
    if resolved.is_none() {
        failure.record(
            FailureKind::InvalidReference,
            kind.field_name(),
            format!(
                "Invalid {} code provided: {code}",
                reference_label(kind)
            ),
        );
    }
    resolved
}

/// ## Summary
/// Checks a draft against the validation rules and resolves its reference
/// codes. `today` is the evaluation date for the birth-date rule.
///
/// ## Errors
/// Returns a validation or invalid-reference failure carrying one detail
/// per violated field; the failure kind follows the first violated rule.
pub fn check(draft: &Draft, catalogs: &Catalogs, today: NaiveDate) -> ServiceResult<NormalizedClient> {
    let mut failure = Failure::default();

    // Rule 1: the resulting record must keep at least one contact method.
    if draft.email.is_none() && draft.phone.is_none() {
        failure.record(
            FailureKind::Validation,
            ALL_FIELDS_KEY,
            "At least one of email or phone must be provided.".to_owned(),
        );
    }

    // Rule 2: birth date may not lie in the future.
    if draft.date_of_birth > today {
        failure.record(
            FailureKind::Validation,
            "date_of_birth",
            "Date of birth cannot be in the future.".to_owned(),
        );
    }

    // Rule 3: reference codes must resolve; status is mandatory.
    let status = match draft.status_code.as_deref() {
        None => {
            failure.record(
                FailureKind::InvalidReference,
                CatalogKind::Status.field_name(),
                "status code cannot be null.".to_owned(),
            );
            None
        }
        Some(code) => resolve(&mut failure, CatalogKind::Status, Some(code), |c| {
            catalogs.status(c)
        }),
    };
    let primary_language = resolve(
        &mut failure,
        CatalogKind::Language,
        draft.primary_language_code.as_deref(),
        |c| catalogs.language(c),
    );
    let pronoun = resolve(
        &mut failure,
        CatalogKind::Pronoun,
        draft.pronoun_code.as_deref(),
        |c| catalogs.pronoun(c),
    );
    let sex = resolve(&mut failure, CatalogKind::Sex, draft.sex_code.as_deref(), |c| {
        catalogs.sex(c)
    });

    failure.into_result()?;

    let Some(status) = status else {
        return Err(ServiceError::CoreError(
            casefile_core::error::CoreError::InvariantViolation(
                "status unresolved after passing validation",
            ),
        ));
    };

    Ok(NormalizedClient {
        first_name: draft.first_name.clone(),
        last_name: draft.last_name.clone(),
        date_of_birth: draft.date_of_birth,
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        status: status.clone(),
        primary_language: primary_language.cloned(),
        pronoun: pronoun.cloned(),
        sex: sex.cloned(),
        interpreter_needed: draft.interpreter_needed,
    })
}
