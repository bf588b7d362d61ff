//! Training schedule server: HTTP routes over the calendar service.

pub mod app;
pub mod config;
pub mod error;
pub mod service_handler;
