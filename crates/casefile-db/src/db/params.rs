//! Query parameter types shared by the storage backends.
//!
//! The service layer builds these from request input; both the PostgreSQL
//! and the in-memory store execute them with identical semantics.

use chrono::{DateTime, NaiveDate, Utc};

use casefile_core::constants::{DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT};

use crate::model::client::Client;

/// Columns clients may be ordered by. Anything outside this allow-list is
/// rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKey {
    FirstName,
    LastName,
    CreatedAt,
    UpdatedAt,
}

/// Ordering for the list operation. Every ordering carries an implicit
/// trailing `id` ascending tiebreak so pagination stays stable under ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOrder {
    pub key: OrderKey,
    pub descending: bool,
}

impl Default for ListOrder {
    fn default() -> Self {
        Self {
            key: OrderKey::CreatedAt,
            descending: false,
        }
    }
}

impl ListOrder {
    /// ## Summary
    /// Parses an ordering request such as `last_name` or `-created_at`.
    /// Returns `None` for fields outside the allow-list.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (descending, name) = raw
            .strip_prefix('-')
            .map_or((false, raw), |rest| (true, rest));

        let key = match name {
            "first_name" => OrderKey::FirstName,
            "last_name" => OrderKey::LastName,
            "created_at" => OrderKey::CreatedAt,
            "updated_at" => OrderKey::UpdatedAt,
            _ => return None,
        };

        Some(Self { key, descending })
    }

    /// Comparator matching the SQL ordering, including the `id` tiebreak.
    #[must_use]
    pub fn compare(&self, a: &Client, b: &Client) -> std::cmp::Ordering {
        let primary = match self.key {
            OrderKey::FirstName => a.first_name.cmp(&b.first_name),
            OrderKey::LastName => a.last_name.cmp(&b.last_name),
            OrderKey::CreatedAt => a.created_at.cmp(&b.created_at),
            OrderKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        let primary = if self.descending {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Filters, ordering, and pagination for the list operation. Soft-deleted
/// and status-`deleted` rows are always excluded by the stores.
#[derive(Debug, Clone)]
pub struct ClientListParams {
    pub status_code: Option<String>,
    pub language_code: Option<String>,
    pub interpreter_needed: Option<bool>,
    pub created_since: Option<DateTime<Utc>>,
    pub updated_since: Option<DateTime<Utc>>,
    pub order: ListOrder,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ClientListParams {
    fn default() -> Self {
        Self {
            status_code: None,
            language_code: None,
            interpreter_needed: None,
            created_since: None,
            updated_since: None,
            order: ListOrder::default(),
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

/// Filters for the search operation. Age bounds arrive pre-computed as
/// birth-date thresholds; see the service layer for the calendar math.
#[derive(Debug, Clone)]
pub struct ClientSearchParams {
    pub text: Option<String>,
    pub status_code: Option<String>,
    pub language_code: Option<String>,
    pub interpreter_needed: Option<bool>,
    /// Inclusive upper bound on birth date (minimum age).
    pub born_on_or_before: Option<NaiveDate>,
    /// Exclusive lower bound on birth date (maximum age).
    pub born_after: Option<NaiveDate>,
    pub limit: i64,
}

impl Default for ClientSearchParams {
    fn default() -> Self {
        Self {
            text: None,
            status_code: None,
            language_code: None,
            interpreter_needed: None,
            born_on_or_before: None,
            born_after: None,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// One page of list results plus the total matching-row count.
#[derive(Debug, Clone)]
pub struct ClientPage {
    pub total: i64,
    pub items: Vec<Client>,
}
