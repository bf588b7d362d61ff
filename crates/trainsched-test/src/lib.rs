//! Training schedule server - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can reach
//! every layer through one path.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    pub use trainsched_core::*;
    pub use trainsched_service::*;

    pub mod layout {
        pub use trainsched_layout::*;
    }

    // Re-export config from both core and app
    pub mod config {
        pub use trainsched_app::config::ConfigHandler;
        pub use trainsched_core::config::*;
    }

    pub mod service_handler {
        pub use trainsched_app::service_handler::*;
    }
}

pub mod app {
    pub use trainsched_app::app::*;
}
