//! Visible date range of the month grid.
//!
//! ## Summary
//! A month is shown as whole Monday-first weeks: trailing days of the previous
//! month pad the first row and leading days of the next month pad the last.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use trainsched_core::error::{CoreError, CoreResult};
use trainsched_core::types::DateRange;

use crate::segment::DAYS_PER_WEEK;

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// ## Summary
    /// Builds the month from a year and a 1-based month number.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if the month is not in `1..=12` or the year is out of range.
    pub fn new(year: i32, month: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| CoreError::InvalidInput(format!("invalid month {year}-{month}")))
    }

    /// The month `date` falls in.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Following month; saturates at the last representable month.
    #[must_use]
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(*self, |first| Self { first })
    }

    /// Preceding month; saturates at the first representable month.
    #[must_use]
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(*self, |first| Self { first })
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Heading shown above the grid, e.g. "January 2024".
    #[must_use]
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// One rendered week of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    /// Zero-based row index within the visible range.
    pub index: usize,
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// A day cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
}

/// Ordered, contiguous dates shown by the grid; always whole weeks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleRange {
    days: Vec<NaiveDate>,
}

impl VisibleRange {
    /// ## Summary
    /// Range for `month`, padded on both sides to whole Monday-first weeks.
    #[must_use]
    pub fn for_month(month: YearMonth) -> Self {
        let first = month.first_day();
        let last = month.last_day();

        let lead = u64::from(first.weekday().num_days_from_monday());
        let trail = u64::from(6 - last.weekday().num_days_from_monday());

        let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
        let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

        Self {
            days: start.iter_days().take_while(|day| *day <= end).collect(),
        }
    }

    /// ## Summary
    /// Range of `weeks` whole rows beginning at `start`.
    #[must_use]
    pub fn from_start(start: NaiveDate, weeks: usize) -> Self {
        Self {
            days: start.iter_days().take(weeks * DAYS_PER_WEEK).collect(),
        }
    }

    #[must_use]
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    #[must_use]
    pub fn week_count(&self) -> usize {
        self.days.len() / DAYS_PER_WEEK
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Week rows in display order.
    pub fn weeks(&self) -> impl Iterator<Item = Week> + '_ {
        self.days
            .chunks_exact(DAYS_PER_WEEK)
            .enumerate()
            .filter_map(|(index, chunk)| {
                Some(Week {
                    index,
                    first: *chunk.first()?,
                    last: *chunk.last()?,
                })
            })
    }

    /// First and last visible date, if any.
    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        Some(DateRange {
            start: *self.days.first()?,
            end: *self.days.last()?,
        })
    }

    /// ## Summary
    /// Day cells for rendering, flagging days outside `month` and `today`.
    #[must_use]
    pub fn day_cells(&self, month: YearMonth, today: NaiveDate) -> Vec<DayCell> {
        self.days
            .iter()
            .map(|&date| DayCell {
                date,
                in_current_month: month.contains(date),
                is_today: date == today,
            })
            .collect()
    }
}
