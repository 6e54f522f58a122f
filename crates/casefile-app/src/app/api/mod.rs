mod app_specific;
mod clients;
mod reference_data;

use salvo::Router;

use crate::middleware::request_id::RequestIdMiddleware;

// Re-export route constants from core
pub use casefile_core::constants::{API_ROUTE_COMPONENT, API_ROUTE_PREFIX};

/// ## Summary
/// Constructs the main API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(RequestIdMiddleware)
        .push(app_specific::routes())
        .push(reference_data::routes())
        .push(clients::routes())
}
