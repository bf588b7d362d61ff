use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use trainsched_core::constants::DEFAULT_CATEGORY;
use trainsched_core::types::{DateRange, EventId};
use trainsched_layout::LayoutItem;

/// A row of the event table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingEvent {
    pub id: EventId,
    /// Label drawn on the calendar bar.
    pub short_name: String,
    pub full_name: String,
    pub trainer: String,
    #[serde(default)]
    pub category: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Fill colour class, e.g. `bg-blue-500`.
    pub color: String,
    /// Text colour class, e.g. `text-white`.
    pub text_color: String,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl TrainingEvent {
    /// Category for grouping, `"Uncategorized"` when missing or empty.
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    #[must_use]
    pub fn overlaps(&self, range: &DateRange) -> bool {
        range.overlaps(self.start_date, self.end_date)
    }
}

impl LayoutItem for TrainingEvent {
    type Key = EventId;

    fn key(&self) -> EventId {
        self.id
    }

    fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

/// Validated column values written on insert or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFields {
    pub short_name: String,
    pub full_name: String,
    pub trainer: String,
    pub category: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub color: String,
    pub text_color: String,
}

impl EventFields {
    /// ## Summary
    /// Builds the stored row from these fields.
    #[must_use]
    pub fn into_event(self, id: EventId, created_at: DateTime<Utc>) -> TrainingEvent {
        TrainingEvent {
            id,
            short_name: self.short_name,
            full_name: self.full_name,
            trainer: self.trainer,
            category: Some(self.category),
            start_date: self.start_date,
            end_date: self.end_date,
            color: self.color,
            text_color: self.text_color,
            created_at,
        }
    }
}
