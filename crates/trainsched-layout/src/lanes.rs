use crate::segment::{DAYS_PER_WEEK, Segment};

/// Occupancy of one lane, one flag per weekday.
pub type LaneSlots = [bool; DAYS_PER_WEEK];

/// Lanes of one week row, grown on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneGrid {
    lanes: Vec<LaneSlots>,
}

impl LaneGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Whether every slot of `segment` is free in `lane`. Missing lanes are free.
    #[must_use]
    pub fn is_free(&self, lane: usize, segment: Segment) -> bool {
        self.lanes
            .get(lane)
            .is_none_or(|slots| slots[segment.slots()].iter().all(|taken| !taken))
    }

    /// ## Summary
    /// Places `segment` in the first lane with all of its slots free, appending
    /// a lane when none fits, and returns the lane index.
    pub fn place(&mut self, segment: Segment) -> usize {
        let lane = (0..self.lanes.len())
            .find(|&lane| self.is_free(lane, segment))
            .unwrap_or_else(|| {
                self.lanes.push([false; DAYS_PER_WEEK]);
                self.lanes.len() - 1
            });

        if let Some(slots) = self.lanes.get_mut(lane) {
            slots[segment.slots()].fill(true);
        }
        lane
    }
}
