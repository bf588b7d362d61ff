use serde::Serialize;
use trainsched_core::config::LayoutConfig;

/// Fixed vertical and horizontal metrics of the month grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutMetrics {
    /// Height a week row never shrinks below.
    pub min_row_height: f64,
    /// Space reserved at the top of each row for the day number.
    pub header_height: f64,
    pub bar_height: f64,
    /// Vertical space between two stacked bars.
    pub bar_margin: f64,
    pub bottom_padding: f64,
    /// Gap between adjacent cells, horizontally and between rows.
    pub gap: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            min_row_height: 112.0,
            header_height: 32.0,
            bar_height: 22.0,
            bar_margin: 3.0,
            bottom_padding: 8.0,
            gap: 4.0,
        }
    }
}

impl From<&LayoutConfig> for LayoutMetrics {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            min_row_height: config.min_row_height,
            header_height: config.header_height,
            bar_height: config.bar_height,
            bar_margin: config.bar_margin,
            bottom_padding: config.bottom_padding,
            gap: config.gap,
        }
    }
}

impl LayoutMetrics {
    /// Vertical distance between the tops of two consecutive lanes.
    #[must_use]
    pub fn lane_pitch(&self) -> f64 {
        self.bar_height + self.bar_margin
    }

    /// ## Summary
    /// Height of a week row holding `lanes` lanes of bars.
    #[must_use]
    pub fn row_height(&self, lanes: usize) -> f64 {
        let content = self.header_height + px(lanes) * self.lane_pitch() + self.bottom_padding;
        content.max(self.min_row_height)
    }

    /// Top edge of `lane` relative to the top of its row.
    #[must_use]
    pub fn lane_top(&self, lane: usize) -> f64 {
        self.header_height + px(lane) * self.lane_pitch()
    }

    /// ## Summary
    /// Left edge and width of a bar starting at `start_day` and covering `span` days.
    #[must_use]
    pub fn horizontal(&self, cell_width: f64, start_day: usize, span: usize) -> (f64, f64) {
        let left = px(start_day) * (cell_width + self.gap);
        let width = px(span) * cell_width + px(span.saturating_sub(1)) * self.gap;
        (left, width)
    }
}

/// Converts a lane or day count into pixel arithmetic.
///
/// Counts in a month grid stay far below `u32::MAX`.
pub(crate) fn px(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}
