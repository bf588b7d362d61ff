//! Create/edit form data and its validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trainsched_core::types::EventId;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{EventFields, TrainingEvent};

pub const DEFAULT_COLOR: &str = "bg-blue-500";
pub const DEFAULT_TEXT_COLOR: &str = "text-white";
pub const SHORT_NAME_MAX_CHARS: usize = 4;

/// Form contents; `id` is set when editing an existing event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(default)]
    pub id: Option<EventId>,
    pub full_name: String,
    pub short_name: String,
    pub trainer: String,
    #[serde(default)]
    pub category: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_text_color() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}

impl EventDraft {
    /// ## Summary
    /// Blank form opened by clicking `date`: a single-day event with default colours.
    #[must_use]
    pub fn for_day(date: NaiveDate) -> Self {
        Self {
            id: None,
            full_name: String::new(),
            short_name: String::new(),
            trainer: String::new(),
            category: String::new(),
            start_date: date,
            end_date: date,
            color: default_color(),
            text_color: default_text_color(),
        }
    }

    /// Form pre-filled from an existing event.
    #[must_use]
    pub fn from_event(event: &TrainingEvent) -> Self {
        Self {
            id: Some(event.id),
            full_name: event.full_name.clone(),
            short_name: event.short_name.clone(),
            trainer: event.trainer.clone(),
            category: event.category.clone().unwrap_or_default(),
            start_date: event.start_date,
            end_date: event.end_date,
            color: event.color.clone(),
            text_color: event.text_color.clone(),
        }
    }

    /// ## Summary
    /// Checks the form and splits it into the target id and the column values.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if a required field is blank,
    /// the short name is too long, the end date precedes the start date or the
    /// category is blank.
    pub fn validate(self) -> ServiceResult<(Option<EventId>, EventFields)> {
        for (value, label) in [
            (&self.full_name, "Full name"),
            (&self.short_name, "Short name"),
            (&self.trainer, "Trainer"),
        ] {
            if value.trim().is_empty() {
                return Err(ServiceError::ValidationError(format!("{label} is required.")));
            }
        }

        if self.short_name.chars().count() > SHORT_NAME_MAX_CHARS {
            return Err(ServiceError::ValidationError(format!(
                "Short name must be at most {SHORT_NAME_MAX_CHARS} characters."
            )));
        }

        if self.end_date < self.start_date {
            return Err(ServiceError::ValidationError(
                "End date cannot be before start date.".to_string(),
            ));
        }

        if self.category.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Category is required.".to_string(),
            ));
        }

        Ok((
            self.id,
            EventFields {
                short_name: self.short_name,
                full_name: self.full_name,
                trainer: self.trainer,
                category: self.category,
                start_date: self.start_date,
                end_date: self.end_date,
                color: self.color,
                text_color: self.text_color,
            },
        ))
    }
}
