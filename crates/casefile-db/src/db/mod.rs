use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::model::client::{Client, ClientChanges};
use crate::model::reference::Catalogs;

pub mod connection;
pub mod memory;
pub mod params;
pub mod pg;
pub mod query;
pub mod schema;
pub mod seed;

use params::{ClientListParams, ClientPage, ClientSearchParams};

/// Persistence boundary for client records. Implemented by the PostgreSQL
/// store and the in-memory store; the service layer only sees this trait.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Persists a fully-assembled record.
    async fn insert(&self, record: Client) -> DbResult<Client>;

    /// Direct lookup by id. `include_deleted` is the only way a
    /// soft-deleted row is ever returned.
    async fn get(&self, id: Uuid, include_deleted: bool) -> DbResult<Option<Client>>;

    /// Applies a changeset to a live row. Returns `None` when no live row
    /// with this id exists.
    async fn update(&self, id: Uuid, changes: ClientChanges) -> DbResult<Option<Client>>;

    /// Whether a live client other than `exclude` already uses this email,
    /// compared case-insensitively.
    async fn email_in_use(&self, email: &str, exclude: Option<Uuid>) -> DbResult<bool>;

    /// Filtered, ordered, paginated page over live clients.
    async fn list(&self, params: &ClientListParams) -> DbResult<ClientPage>;

    /// Multi-criteria search over live clients, truncated to the limit.
    async fn search(&self, params: &ClientSearchParams) -> DbResult<Vec<Client>>;
}

/// Read boundary for the reference catalogs.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Returns all four catalogs, inactive entries included.
    async fn catalogs(&self) -> DbResult<Catalogs>;
}
