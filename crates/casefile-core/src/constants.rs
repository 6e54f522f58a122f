/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const CLIENTS_ROUTE_COMPONENT: &str = "clients";
pub const CLIENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", CLIENTS_ROUTE_COMPONENT);

pub const REFERENCE_DATA_ROUTE_COMPONENT: &str = "reference-data";

/// Status code reserved for soft-deleted clients. Must be seeded in the
/// status catalog; soft delete fails with a configuration error otherwise.
pub const DELETED_STATUS_CODE: &str = "deleted";

/// Placeholder actor stamped on writes until real authentication lands.
pub const PLACEHOLDER_ACTOR: uuid::Uuid = uuid::Uuid::nil();

/// List pagination limits
pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 200;

/// Search result limits
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
pub const MAX_SEARCH_LIMIT: i64 = 100;
