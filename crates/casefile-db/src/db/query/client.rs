//! Query builder functions for client rows.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types;

use casefile_core::constants::DELETED_STATUS_CODE;

use crate::db::params::{ClientListParams, ClientSearchParams, ListOrder, OrderKey};
use crate::db::schema::client;

diesel::define_sql_function! {
    fn lower(x: sql_types::Text) -> sql_types::Text;
}

diesel::define_sql_function! {
    #[sql_name = "lower"]
    fn lower_nullable(x: sql_types::Nullable<sql_types::Text>) -> sql_types::Nullable<sql_types::Text>;
}

/// ## Summary
/// Returns a query over live clients: not soft-deleted and not parked on
/// the reserved `deleted` status.
#[must_use]
pub fn live() -> client::BoxedQuery<'static, Pg> {
    client::table
        .filter(client::deleted_at.is_null())
        .filter(client::status_code.ne(DELETED_STATUS_CODE))
        .into_boxed()
}

/// ## Summary
/// Returns a query to find a client by id, optionally including
/// soft-deleted rows.
#[must_use]
pub fn by_id(id: uuid::Uuid, include_deleted: bool) -> client::BoxedQuery<'static, Pg> {
    let mut query = client::table.filter(client::id.eq(id)).into_boxed();
    if !include_deleted {
        query = query.filter(client::deleted_at.is_null());
    }
    query
}

/// ## Summary
/// Returns a query counting live clients holding this email, compared
/// case-insensitively, excluding `exclude` when given.
#[must_use]
pub fn by_email(email: &str, exclude: Option<uuid::Uuid>) -> client::BoxedQuery<'static, Pg> {
    let mut query = client::table
        .filter(client::deleted_at.is_null())
        .filter(lower_nullable(client::email).eq(Some(email.to_lowercase())))
        .into_boxed();
    if let Some(id) = exclude {
        query = query.filter(client::id.ne(id));
    }
    query
}

/// ## Summary
/// Returns a query applying the list filters (AND semantics) over live
/// clients. Status and language codes compare case-insensitively.
#[must_use]
pub fn filtered_list(params: &ClientListParams) -> client::BoxedQuery<'static, Pg> {
    let mut query = live();

    if let Some(code) = &params.status_code {
        query = query.filter(lower(client::status_code).eq(code.to_lowercase()));
    }
    if let Some(code) = &params.language_code {
        query = query
            .filter(lower_nullable(client::primary_language_code).eq(Some(code.to_lowercase())));
    }
    if let Some(flag) = params.interpreter_needed {
        query = query.filter(client::interpreter_needed.eq(flag));
    }
    if let Some(since) = params.created_since {
        query = query.filter(client::created_at.ge(since));
    }
    if let Some(since) = params.updated_since {
        query = query.filter(client::updated_at.ge(since));
    }

    query
}

/// ## Summary
/// Returns a query applying the search filters over live clients. The free
/// text matches as a case-insensitive substring of first name, last name,
/// email, or phone.
#[must_use]
pub fn filtered_search(params: &ClientSearchParams) -> client::BoxedQuery<'static, Pg> {
    let mut query = live();

    if let Some(text) = &params.text {
        let pattern = format!("%{}%", escape_like_pattern(text));
        query = query.filter(
            client::first_name
                .ilike(pattern.clone())
                .nullable()
                .or(client::last_name.ilike(pattern.clone()).nullable())
                .or(client::email.ilike(pattern.clone()))
                .or(client::phone.ilike(pattern)),
        );
    }
    if let Some(code) = &params.status_code {
        query = query.filter(lower(client::status_code).eq(code.to_lowercase()));
    }
    if let Some(code) = &params.language_code {
        query = query
            .filter(lower_nullable(client::primary_language_code).eq(Some(code.to_lowercase())));
    }
    if let Some(flag) = params.interpreter_needed {
        query = query.filter(client::interpreter_needed.eq(flag));
    }
    if let Some(bound) = params.born_on_or_before {
        query = query.filter(client::date_of_birth.le(bound));
    }
    if let Some(bound) = params.born_after {
        query = query.filter(client::date_of_birth.gt(bound));
    }

    query
}

/// ## Summary
/// Applies the requested ordering plus the `id` ascending tiebreak.
#[must_use]
pub fn apply_order(
    query: client::BoxedQuery<'static, Pg>,
    order: ListOrder,
) -> client::BoxedQuery<'static, Pg> {
    let query = match (order.key, order.descending) {
        (OrderKey::FirstName, false) => query.order(client::first_name.asc()),
        (OrderKey::FirstName, true) => query.order(client::first_name.desc()),
        (OrderKey::LastName, false) => query.order(client::last_name.asc()),
        (OrderKey::LastName, true) => query.order(client::last_name.desc()),
        (OrderKey::CreatedAt, false) => query.order(client::created_at.asc()),
        (OrderKey::CreatedAt, true) => query.order(client::created_at.desc()),
        (OrderKey::UpdatedAt, false) => query.order(client::updated_at.asc()),
        (OrderKey::UpdatedAt, true) => query.order(client::updated_at.desc()),
    };
    query.then_order_by(client::id.asc())
}

/// ## Summary
/// Escapes special SQL LIKE/ILIKE pattern characters.
///
/// Escapes `%`, `_`, and `\` so they match literally.
#[must_use]
pub fn escape_like_pattern(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
