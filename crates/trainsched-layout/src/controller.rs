//! Recomputation driver sitting between the rendering surface and the engine.
//!
//! ## Summary
//! The engine is pure. `LayoutController` owns the latest snapshot of its
//! inputs (range, events, cell width), recomputes when any of them changes or
//! when the rendering surface reports a new cell width, and only reports a new
//! layout when it differs in value from the one already published.

use crate::engine::{LanePlan, Layout, LayoutItem, plan_lanes};
use crate::metrics::LayoutMetrics;
use crate::range::VisibleRange;

/// Source of the rendered width of one grid cell.
pub trait CellMeasure {
    /// Current cell width in pixels, or `None` if the grid is not rendered.
    fn cell_width(&self) -> Option<f64>;
}

/// Result of a recomputation request.
#[derive(Debug, PartialEq)]
pub enum LayoutUpdate<'a, K> {
    /// A layout different from the previous one was produced.
    Changed(&'a Layout<K>),
    /// The new layout equals the published one; nothing to re-render.
    Unchanged,
    /// No usable cell width yet; the published layout is kept.
    Deferred,
}

impl<K> LayoutUpdate<'_, K> {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

pub struct LayoutController<E: LayoutItem> {
    metrics: LayoutMetrics,
    range: VisibleRange,
    events: Vec<E>,
    plan: LanePlan<E::Key>,
    cell_width: f64,
    published: Layout<E::Key>,
}

impl<E: LayoutItem> LayoutController<E> {
    #[must_use]
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self {
            metrics,
            range: VisibleRange::default(),
            events: Vec::new(),
            plan: LanePlan::default(),
            cell_width: 0.0,
            published: Layout::default(),
        }
    }

    /// The most recently published layout (empty until the first one).
    #[must_use]
    pub fn layout(&self) -> &Layout<E::Key> {
        &self.published
    }

    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    #[must_use]
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// ## Summary
    /// Replaces the visible range and the event set, then recomputes.
    pub fn set_inputs(&mut self, range: VisibleRange, events: Vec<E>) -> LayoutUpdate<'_, E::Key> {
        self.range = range;
        self.events = events;
        self.plan = plan_lanes(&self.range, &self.events);
        self.recompute()
    }

    /// Replaces the event set, keeping the current range.
    pub fn set_events(&mut self, events: Vec<E>) -> LayoutUpdate<'_, E::Key> {
        let range = std::mem::take(&mut self.range);
        self.set_inputs(range, events)
    }

    /// ## Summary
    /// Records a new cell width reported by the rendering surface and recomputes.
    ///
    /// A zero (or otherwise unusable) width leaves the published layout untouched.
    pub fn on_width_changed(&mut self, cell_width: f64) -> LayoutUpdate<'_, E::Key> {
        self.cell_width = cell_width;
        self.recompute()
    }

    /// ## Summary
    /// Reads the cell width from `measure` and recomputes.
    pub fn observe(&mut self, measure: &impl CellMeasure) -> LayoutUpdate<'_, E::Key> {
        match measure.cell_width() {
            Some(width) => self.on_width_changed(width),
            None => {
                tracing::debug!("Grid not rendered, deferring layout");
                LayoutUpdate::Deferred
            }
        }
    }

    /// ## Summary
    /// Drops all events, e.g. while events are loading, and publishes the
    /// current range's rows without bars.
    ///
    /// Before a width is measured the published layout becomes empty.
    pub fn clear(&mut self) -> LayoutUpdate<'_, E::Key> {
        self.events.clear();
        self.plan = plan_lanes(&self.range, &self.events);
        let next = self
            .plan
            .to_layout(self.cell_width, &self.metrics)
            .unwrap_or_default();
        self.publish(next)
    }

    fn recompute(&mut self) -> LayoutUpdate<'_, E::Key> {
        let next = self.plan.to_layout(self.cell_width, &self.metrics);
        match next {
            Some(layout) => self.publish(layout),
            None => LayoutUpdate::Deferred,
        }
    }

    fn publish(&mut self, layout: Layout<E::Key>) -> LayoutUpdate<'_, E::Key> {
        if layout == self.published {
            tracing::trace!("Layout unchanged, suppressing update");
            return LayoutUpdate::Unchanged;
        }
        tracing::debug!(
            weeks = layout.weeks.len(),
            segments = layout.segments.len(),
            "Publishing new layout"
        );
        self.published = layout;
        LayoutUpdate::Changed(&self.published)
    }
}
