//! Client record endpoints.

use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use uuid::Uuid;

use casefile_core::constants::{CLIENTS_ROUTE_COMPONENT, PLACEHOLDER_ACTOR};
use casefile_service::clients;
use casefile_service::clients::payload::{ClientPatch, ClientPayload};
use casefile_service::clients::query::{ListRequest, SearchRequest};

use crate::error::{AppError, AppResult};
use crate::store_handler::get_stores_from_depot;

async fn parse_body<T>(req: &mut Request) -> AppResult<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    req.parse_json::<T>()
        .await
        .map_err(|err| AppError::ParseBody(err.to_string()))
}

fn client_id(req: &Request) -> AppResult<Uuid> {
    let raw = req
        .param::<String>("id")
        .ok_or_else(|| AppError::BadClientId("missing id".to_owned()))?;
    Uuid::parse_str(&raw).map_err(|_err| AppError::BadClientId(raw))
}

/// ## Summary
/// POST /api/clients - Create a new client record.
///
/// ## Errors
/// Returns HTTP 400 for validation or reference failures
/// Returns HTTP 409 for a duplicate email
#[handler]
async fn create_client_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let stores = get_stores_from_depot(depot)?;
    let payload: ClientPayload = parse_body(req).await?;

    let view = clients::create_client(
        stores.clients.as_ref(),
        stores.references.as_ref(),
        PLACEHOLDER_ACTOR,
        &payload,
    )
    .await?;

    res.status_code(StatusCode::CREATED);
    res.render(Json(view));
    Ok(())
}

/// ## Summary
/// GET /api/clients/{id} - Get client details by ID. The one read that
/// also returns soft-deleted records.
///
/// ## Errors
/// Returns HTTP 404 if the client does not exist
#[handler]
async fn get_client_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let stores = get_stores_from_depot(depot)?;
    let id = client_id(req)?;

    let view = clients::get_client(stores.clients.as_ref(), stores.references.as_ref(), id).await?;

    res.render(Json(view));
    Ok(())
}

/// ## Summary
/// PUT /api/clients/{id} - Full update of a live client.
///
/// ## Errors
/// Returns HTTP 404 for missing or soft-deleted clients
/// Returns HTTP 400 / 409 as on create
#[handler]
async fn update_client_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let stores = get_stores_from_depot(depot)?;
    let id = client_id(req)?;
    let payload: ClientPayload = parse_body(req).await?;

    let view = clients::update_client(
        stores.clients.as_ref(),
        stores.references.as_ref(),
        PLACEHOLDER_ACTOR,
        id,
        &payload,
    )
    .await?;

    res.render(Json(view));
    Ok(())
}

/// ## Summary
/// PATCH /api/clients/{id} - Partial update; only fields present in the
/// body are touched. An empty body is a no-op returning the record.
///
/// ## Errors
/// As on full update
#[handler]
async fn patch_client_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let stores = get_stores_from_depot(depot)?;
    let id = client_id(req)?;
    let patch: ClientPatch = parse_body(req).await?;

    let view = clients::patch_client(
        stores.clients.as_ref(),
        stores.references.as_ref(),
        PLACEHOLDER_ACTOR,
        id,
        &patch,
    )
    .await?;

    res.render(Json(view));
    Ok(())
}

/// ## Summary
/// DELETE /api/clients/{id} - Soft delete: parks the record on the
/// `deleted` status and stamps `deleted_at`.
///
/// ## Errors
/// Returns HTTP 404 for missing or already-deleted clients
/// Returns HTTP 500 when the `deleted` status is not seeded
#[handler]
async fn delete_client_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let stores = get_stores_from_depot(depot)?;
    let id = client_id(req)?;

    clients::delete_client(
        stores.clients.as_ref(),
        stores.references.as_ref(),
        PLACEHOLDER_ACTOR,
        id,
    )
    .await?;

    res.status_code(StatusCode::NO_CONTENT);
    Ok(())
}

/// ## Summary
/// GET /api/clients - List and filter clients, paginated.
///
/// ## Errors
/// Returns HTTP 400 for an ordering field outside the allow-list
#[handler]
async fn list_clients_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let stores = get_stores_from_depot(depot)?;
    let request: ListRequest = req
        .parse_queries()
        .map_err(|err| AppError::ParseQuery(err.to_string()))?;

    let page =
        clients::list_clients(stores.clients.as_ref(), stores.references.as_ref(), &request)
            .await?;

    res.render(Json(page));
    Ok(())
}

/// ## Summary
/// GET /api/clients/search - Multi-criteria search. The reported count
/// covers returned rows only.
#[handler]
async fn search_clients_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let stores = get_stores_from_depot(depot)?;
    let request: SearchRequest = req
        .parse_queries()
        .map_err(|err| AppError::ParseQuery(err.to_string()))?;

    let results =
        clients::search_clients(stores.clients.as_ref(), stores.references.as_ref(), &request)
            .await?;

    res.render(Json(results));
    Ok(())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CLIENTS_ROUTE_COMPONENT)
        .get(list_clients_handler)
        .post(create_client_handler)
        .push(Router::with_path("search").get(search_clients_handler))
        .push(
            Router::with_path("{id}")
                .get(get_client_handler)
                .put(update_client_handler)
                .patch(patch_client_handler)
                .delete(delete_client_handler),
        )
}
