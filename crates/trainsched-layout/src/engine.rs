//! Event layout engine.
//!
//! ## Summary
//! Splits events into per-week segments, assigns each segment a lane with a
//! greedy first-fit pass, and converts (week, lane, day span) into absolute
//! pixel rectangles. Lane assignment does not depend on the measured cell
//! width, so it is planned once ([`LanePlan`]) and turned into geometry per
//! width ([`LanePlan::to_layout`]).

use chrono::NaiveDate;
use serde::Serialize;

use crate::lanes::LaneGrid;
use crate::metrics::LayoutMetrics;
use crate::range::{VisibleRange, Week};
use crate::segment::{Clamp, Segment, clamp_to_week};

/// Anything that occupies an inclusive range of calendar days.
pub trait LayoutItem {
    /// Value identifying the originating item in the layout output.
    type Key: Clone + PartialEq + std::fmt::Debug;

    fn key(&self) -> Self::Key;
    fn start_date(&self) -> NaiveDate;
    fn end_date(&self) -> NaiveDate;
}

/// Absolute pixel rectangle relative to the top-left corner of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// A segment with its lane, before geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<K> {
    pub key: K,
    pub week: usize,
    pub lane: usize,
    pub segment: Segment,
}

/// Width-independent result of lane assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct LanePlan<K> {
    /// Lanes used by each week row.
    pub week_lanes: Vec<usize>,
    /// Placements in sorted-event order, week order within an event.
    pub placements: Vec<Placement<K>>,
}

impl<K> Default for LanePlan<K> {
    fn default() -> Self {
        Self {
            week_lanes: Vec::new(),
            placements: Vec::new(),
        }
    }
}

/// Height and vertical offset of one week row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekRow {
    pub lanes: usize,
    pub top: f64,
    pub height: f64,
}

/// Positioned bar for one event segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSegment<K> {
    pub key: K,
    pub week: usize,
    pub lane: usize,
    pub start_day: usize,
    pub span: usize,
    pub rect: Rect,
}

/// Complete layout of a visible range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout<K> {
    pub weeks: Vec<WeekRow>,
    pub segments: Vec<PlacedSegment<K>>,
}

impl<K> Default for Layout<K> {
    fn default() -> Self {
        Self {
            weeks: Vec::new(),
            segments: Vec::new(),
        }
    }
}

impl<K> Layout<K> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty() && self.segments.is_empty()
    }

    pub fn segments_in_week(&self, week: usize) -> impl Iterator<Item = &PlacedSegment<K>> {
        self.segments.iter().filter(move |placed| placed.week == week)
    }
}

/// ## Summary
/// Assigns every event segment of `range` to a lane.
///
/// Events are stable-sorted by start date, so ties keep their input order.
/// Segments whose clamped interval is invalid are dropped with a warning.
#[must_use]
pub fn plan_lanes<E: LayoutItem>(range: &VisibleRange, events: &[E]) -> LanePlan<E::Key> {
    let mut sorted: Vec<&E> = events.iter().collect();
    sorted.sort_by_key(|event| event.start_date());

    let weeks: Vec<Week> = range.weeks().collect();
    let mut grids = vec![LaneGrid::new(); weeks.len()];
    let mut placements = Vec::new();

    for event in sorted {
        let (start, end) = (event.start_date(), event.end_date());
        for (week, grid) in weeks.iter().zip(grids.iter_mut()) {
            match clamp_to_week(start, end, week) {
                Clamp::Outside => {}
                Clamp::Invalid { start_day, span } => {
                    tracing::warn!(
                        key = ?event.key(),
                        %start,
                        %end,
                        week = week.index,
                        start_day,
                        span,
                        "Dropping event segment with no valid day slots"
                    );
                }
                Clamp::Inside(segment) => {
                    let lane = grid.place(segment);
                    tracing::trace!(
                        key = ?event.key(),
                        week = week.index,
                        lane,
                        start_day = segment.start_day,
                        span = segment.span,
                        "Placed event segment"
                    );
                    placements.push(Placement {
                        key: event.key(),
                        week: week.index,
                        lane,
                        segment,
                    });
                }
            }
        }
    }

    LanePlan {
        week_lanes: grids.iter().map(LaneGrid::lane_count).collect(),
        placements,
    }
}

impl<K: Clone> LanePlan<K> {
    /// ## Summary
    /// Converts the plan into pixel geometry for a measured `cell_width`.
    ///
    /// Returns `None` when the width is not positive: the grid has not been
    /// rendered yet and the computation must wait for a real measurement.
    #[must_use]
    pub fn to_layout(&self, cell_width: f64, metrics: &LayoutMetrics) -> Option<Layout<K>> {
        if cell_width.is_nan() || cell_width <= 0.0 {
            tracing::debug!(cell_width, "Cell width not measured yet, deferring layout");
            return None;
        }

        let mut weeks = Vec::with_capacity(self.week_lanes.len());
        let mut top = 0.0;
        for &lanes in &self.week_lanes {
            let height = metrics.row_height(lanes);
            weeks.push(WeekRow { lanes, top, height });
            top += height + metrics.gap;
        }

        let segments = self
            .placements
            .iter()
            .filter_map(|placement| {
                let row = weeks.get(placement.week)?;
                let (left, width) = metrics.horizontal(
                    cell_width,
                    placement.segment.start_day,
                    placement.segment.span,
                );
                Some(PlacedSegment {
                    key: placement.key.clone(),
                    week: placement.week,
                    lane: placement.lane,
                    start_day: placement.segment.start_day,
                    span: placement.segment.span,
                    rect: Rect {
                        top: row.top + metrics.lane_top(placement.lane),
                        left,
                        width,
                        height: metrics.bar_height,
                    },
                })
            })
            .collect();

        Some(Layout { weeks, segments })
    }
}

/// ## Summary
/// Lays out `events` over `range` for a measured `cell_width`.
///
/// Returns `None` when the width is not positive (see [`LanePlan::to_layout`]).
#[must_use]
pub fn compute_layout<E: LayoutItem>(
    range: &VisibleRange,
    events: &[E],
    cell_width: f64,
    metrics: &LayoutMetrics,
) -> Option<Layout<E::Key>> {
    plan_lanes(range, events).to_layout(cell_width, metrics)
}
