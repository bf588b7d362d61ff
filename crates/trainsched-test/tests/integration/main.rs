//! Integration tests for the training schedule HTTP API.

mod calendar;
mod helpers;
mod persistence;
