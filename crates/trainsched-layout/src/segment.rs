use chrono::NaiveDate;

use crate::range::Week;

pub const DAYS_PER_WEEK: usize = 7;

/// Portion of an event inside one week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// 0 = Monday .. 6 = Sunday.
    pub start_day: usize,
    /// Number of days covered, at least 1.
    pub span: usize,
}

impl Segment {
    /// Day slots covered by the segment.
    #[must_use]
    pub fn slots(&self) -> std::ops::Range<usize> {
        self.start_day..self.start_day + self.span
    }
}

/// Outcome of clamping an event interval to a week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamp {
    /// The event does not touch the week.
    Outside,
    /// The clamped interval has no valid day slots (e.g. end before start).
    Invalid { start_day: i64, span: i64 },
    Inside(Segment),
}

/// ## Summary
/// Clamps the inclusive interval `[start, end]` to `week`.
///
/// The start day is measured from the first date of the row and the span is
/// the inclusive day count of the clamped interval.
#[must_use]
pub fn clamp_to_week(start: NaiveDate, end: NaiveDate, week: &Week) -> Clamp {
    if start > week.last || end < week.first {
        return Clamp::Outside;
    }

    let segment_start = start.max(week.first);
    let segment_end = end.min(week.last);

    let start_day = (segment_start - week.first).num_days();
    let span = (segment_end - segment_start).num_days() + 1;

    match (usize::try_from(start_day), usize::try_from(span)) {
        (Ok(day), Ok(days)) if days >= 1 && day + days <= DAYS_PER_WEEK => {
            Clamp::Inside(Segment {
                start_day: day,
                span: days,
            })
        }
        _ => Clamp::Invalid { start_day, span },
    }
}
