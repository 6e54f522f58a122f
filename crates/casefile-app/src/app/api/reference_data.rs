use salvo::{Depot, Response, Router, handler, writing::Json};

use casefile_core::constants::REFERENCE_DATA_ROUTE_COMPONENT;

use crate::error::AppResult;
use crate::store_handler::get_stores_from_depot;

/// ## Summary
/// GET /api/reference-data - all active reference data values, ordered for
/// display. Used to populate dropdowns and selection fields.
#[handler]
async fn get_reference_data(depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let stores = get_stores_from_depot(depot)?;

    let data = casefile_service::reference::reference_data(stores.references.as_ref()).await?;

    res.render(Json(data));
    Ok(())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(REFERENCE_DATA_ROUTE_COMPONENT).get(get_reference_data)
}
