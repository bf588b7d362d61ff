//! Side panel listing the month's events grouped by category.

use serde::Serialize;
use trainsched_core::types::EventId;

use crate::model::TrainingEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEntry {
    pub id: EventId,
    pub short_name: String,
    pub full_name: String,
    pub trainer: String,
    pub color: String,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNotes {
    pub category: String,
    pub events: Vec<NoteEntry>,
}

/// ## Summary
/// Groups `events` by category after a stable sort on start date.
///
/// Groups appear in the order their first event appears.
#[must_use]
pub fn group_by_category(events: &[TrainingEvent]) -> Vec<CategoryNotes> {
    let mut sorted: Vec<&TrainingEvent> = events.iter().collect();
    sorted.sort_by_key(|event| event.start_date);

    let mut groups: Vec<CategoryNotes> = Vec::new();
    for event in sorted {
        let category = event.category_or_default();
        let entry = NoteEntry {
            id: event.id,
            short_name: event.short_name.clone(),
            full_name: event.full_name.clone(),
            trainer: event.trainer.clone(),
            color: event.color.clone(),
            text_color: event.text_color.clone(),
        };

        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.events.push(entry),
            None => groups.push(CategoryNotes {
                category: category.to_string(),
                events: vec![entry],
            }),
        }
    }
    groups
}
