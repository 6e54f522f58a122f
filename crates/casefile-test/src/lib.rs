//! Casefile client records service - integration test support.
//!
//! This crate re-exports the workspace crates to support integration tests
//! that use `casefile::` paths.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    // Re-export core and service modules at the component level
    pub use casefile_core::*;
    pub use casefile_service::*;

    // Re-export db crate with all its public modules
    pub mod db {
        pub use casefile_db::db::*;
    }

    // Re-export models
    pub mod model {
        pub use casefile_db::model::*;
    }
}

// Re-export top-level modules for convenience
pub mod app {
    pub use casefile_app::*;

    pub mod api {
        pub use casefile_app::app::api::*;
    }
}
