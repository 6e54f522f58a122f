//! Query-engine parameter construction for the list and search operations.

use chrono::{Months, NaiveDate, NaiveTime};
use serde::Deserialize;

use casefile_core::constants::{
    DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_LIST_LIMIT, MAX_SEARCH_LIMIT,
};
use casefile_core::types::FieldErrors;
use casefile_db::db::params::{ClientListParams, ClientSearchParams, ListOrder};

use crate::error::{ServiceError, ServiceResult};

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequest {
    pub status: Option<String>,
    pub language: Option<String>,
    pub interpreter_needed: Option<bool>,
    pub created_since: Option<NaiveDate>,
    pub updated_since: Option<NaiveDate>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters accepted by the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub q: Option<String>,
    pub status: Option<String>,
    pub language: Option<String>,
    pub interpreter_needed: Option<bool>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub limit: Option<i64>,
}

fn clamp_limit(requested: Option<i64>, default: i64, cap: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, cap)
}

fn none_if_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

/// ## Summary
/// Builds store parameters from a list request.
///
/// ## Errors
/// Returns a validation failure when the ordering field is outside the
/// allow-list.
pub fn build_list_params(request: &ListRequest) -> ServiceResult<ClientListParams> {
    let order = match request.ordering.as_deref() {
        None | Some("") => ListOrder::default(),
        Some(raw) => ListOrder::parse(raw).ok_or_else(|| {
            let mut details = FieldErrors::new();
            details.insert(
                "ordering".to_owned(),
                format!("Unknown ordering field: {raw}"),
            );
            ServiceError::Validation { details }
        })?,
    };

    Ok(ClientListParams {
        status_code: none_if_empty(request.status.as_deref()),
        language_code: none_if_empty(request.language.as_deref()),
        interpreter_needed: request.interpreter_needed,
        created_since: request
            .created_since
            .map(|date| date.and_time(NaiveTime::MIN).and_utc()),
        updated_since: request
            .updated_since
            .map(|date| date.and_time(NaiveTime::MIN).and_utc()),
        order,
        limit: clamp_limit(request.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
        offset: request.offset.unwrap_or(0).max(0),
    })
}

/// ## Summary
/// Builds store parameters from a search request. Age bounds become birth
/// date thresholds relative to `today` using calendar-year arithmetic, so
/// a person reaches age N exactly on their N-th birthday.
#[must_use]
pub fn build_search_params(request: &SearchRequest, today: NaiveDate) -> ClientSearchParams {
    ClientSearchParams {
        text: none_if_empty(request.q.as_deref()),
        status_code: none_if_empty(request.status.as_deref()),
        language_code: none_if_empty(request.language.as_deref()),
        interpreter_needed: request.interpreter_needed,
        born_on_or_before: request.age_min.map(|years| years_before(today, years)),
        born_after: request
            .age_max
            .map(|years| years_before(today, years.saturating_add(1))),
        limit: clamp_limit(request.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT),
    }
}

/// Calendar-year subtraction; Feb 29 clamps to Feb 28 on non-leap years.
#[must_use]
pub fn years_before(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}
