//! Per-request identifier, surfaced in every error envelope.

use salvo::async_trait;

const REQUEST_ID_DEPOT_KEY: &str = "casefile::request_id";

pub struct RequestIdMiddleware;

#[async_trait]
impl salvo::Handler for RequestIdMiddleware {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let id = format!("req_{}", uuid::Uuid::now_v7().as_simple());
        depot.insert(REQUEST_ID_DEPOT_KEY, id);
    }
}

/// ## Summary
/// Reads the request id set by the middleware; falls back to a fixed
/// marker for failures raised outside the request pipeline.
#[must_use]
pub fn from_depot(depot: &salvo::Depot) -> String {
    depot
        .get::<String>(REQUEST_ID_DEPOT_KEY)
        .map(String::clone)
        .unwrap_or_else(|_| "req_unknown".to_owned())
}
