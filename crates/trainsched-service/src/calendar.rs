//! Calendar use cases: fetching a month, saving and deleting events, and
//! assembling everything the month view renders.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use trainsched_core::constants::DAYS_OF_WEEK;
use trainsched_core::types::{DateRange, EventId};
use trainsched_layout::{DayCell, Layout, LayoutMetrics, VisibleRange, YearMonth, compute_layout};

use crate::draft::EventDraft;
use crate::error::ServiceResult;
use crate::model::TrainingEvent;
use crate::notes::{CategoryNotes, group_by_category};
use crate::repository::EventRepository;

/// Days fetched beyond each end of a month, enough to cover the padded grid.
pub const FETCH_MARGIN_DAYS: u64 = 7;

/// Everything needed to render one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub days_of_week: [&'static str; 7],
    pub days: Vec<DayCell>,
    pub events: Vec<TrainingEvent>,
    pub notes: Vec<CategoryNotes>,
    /// `None` until a cell width has been measured.
    pub layout: Option<Layout<EventId>>,
}

/// ## Summary
/// Date window queried for `month`: the month widened by a week on each side.
#[must_use]
pub fn fetch_window(month: YearMonth) -> DateRange {
    let margin = Days::new(FETCH_MARGIN_DAYS);
    let first = month.first_day();
    let last = month.last_day();

    DateRange {
        start: first.checked_sub_days(margin).unwrap_or(first),
        end: last.checked_add_days(margin).unwrap_or(last),
    }
}

#[derive(Clone)]
pub struct CalendarService {
    repo: Arc<dyn EventRepository>,
}

impl CalendarService {
    #[must_use]
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    /// ## Summary
    /// Events overlapping the fetch window of `month`, ordered by start date.
    ///
    /// ## Errors
    /// Returns an error if the repository query fails.
    pub async fn month_events(&self, month: YearMonth) -> ServiceResult<Vec<TrainingEvent>> {
        let window = fetch_window(month);
        tracing::debug!(%month, %window, "Fetching month events");
        self.repo.list_overlapping(window).await
    }

    /// ## Summary
    /// Validates `draft` and inserts it, or updates the event it was opened from.
    ///
    /// ## Errors
    /// Returns a validation error for an invalid form, `NotFound` when updating
    /// a missing event, or the repository's error.
    pub async fn save(&self, draft: EventDraft) -> ServiceResult<TrainingEvent> {
        let (id, fields) = draft.validate()?;
        match id {
            Some(id) => self.repo.update(id, fields).await,
            None => self.repo.insert(fields).await,
        }
    }

    /// ## Errors
    /// Returns `NotFound` if the event does not exist, or the repository's error.
    pub async fn delete(&self, id: EventId) -> ServiceResult<()> {
        self.repo.delete(id).await
    }

    /// ## Errors
    /// Returns an error if the repository lookup fails.
    pub async fn event(&self, id: EventId) -> ServiceResult<Option<TrainingEvent>> {
        self.repo.get(id).await
    }

    /// ## Summary
    /// Builds the month view for a grid whose cells are `cell_width` pixels wide
    /// and whose rows follow `metrics`.
    ///
    /// A `cell_width` of zero yields no layout; the caller asks again once the
    /// grid has been measured.
    ///
    /// ## Errors
    /// Returns an error if fetching the month's events fails.
    pub async fn month_view(
        &self,
        month: YearMonth,
        cell_width: f64,
        metrics: &LayoutMetrics,
        today: NaiveDate,
    ) -> ServiceResult<MonthView> {
        let events = self.month_events(month).await?;
        let range = VisibleRange::for_month(month);
        let layout = compute_layout(&range, &events, cell_width, metrics);

        Ok(MonthView {
            year: month.year(),
            month: month.month(),
            title: month.title(),
            days_of_week: DAYS_OF_WEEK,
            days: range.day_cells(month, today),
            notes: group_by_category(&events),
            events,
            layout,
        })
    }
}
