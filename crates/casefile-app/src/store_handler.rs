use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use casefile_core::error::CoreError;
use casefile_db::db::{ClientStore, ReferenceStore};

/// The storage handles shared with every request.
#[derive(Clone)]
pub struct Stores {
    pub clients: Arc<dyn ClientStore>,
    pub references: Arc<dyn ReferenceStore>,
}

pub struct StoreHandler {
    pub stores: Stores,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.stores.clone());
    }
}

/// ## Summary
/// Retrieves the storage handles from the depot.
///
/// ## Errors
/// Returns an error if the stores are not found in the depot.
pub fn get_stores_from_depot(depot: &salvo::Depot) -> AppResult<Stores> {
    depot
        .obtain::<Stores>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Stores not found in depot").into())
}
