//! Event records, the event table and the calendar use cases built on the layout engine.

pub mod calendar;
pub mod draft;
pub mod error;
pub mod memory;
pub mod model;
pub mod notes;
pub mod repository;
