//! Month-grid event layout.
//!
//! ## Summary
//! Given a visible range of whole weeks, a set of dated events and the
//! measured width of one grid cell, computes the height of every week row and
//! a pixel rectangle for every event segment. Multi-day events are stacked in
//! lanes so bars never overlap within a row.

pub mod controller;
pub mod engine;
pub mod lanes;
pub mod metrics;
pub mod range;
pub mod segment;

pub use controller::{CellMeasure, LayoutController, LayoutUpdate};
pub use engine::{
    LanePlan, Layout, LayoutItem, PlacedSegment, Placement, Rect, WeekRow, compute_layout,
    plan_lanes,
};
pub use metrics::LayoutMetrics;
pub use range::{DayCell, VisibleRange, Week, YearMonth};
