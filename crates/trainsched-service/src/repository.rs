use std::future::Future;
use std::pin::Pin;

use trainsched_core::types::{DateRange, EventId};

use crate::error::ServiceResult;
use crate::model::{EventFields, TrainingEvent};

pub type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = ServiceResult<T>> + Send + 'a>>;

/// Storage of the event table.
pub trait EventRepository: Send + Sync {
    /// ## Summary
    /// Events whose `[start_date, end_date]` overlaps `range`, ordered by start date.
    fn list_overlapping<'a>(&'a self, range: DateRange) -> RepoFuture<'a, Vec<TrainingEvent>>;

    fn get<'a>(&'a self, id: EventId) -> RepoFuture<'a, Option<TrainingEvent>>;

    /// Stores a new event; the table assigns its id and creation time.
    fn insert<'a>(&'a self, fields: EventFields) -> RepoFuture<'a, TrainingEvent>;

    /// ## Summary
    /// Overwrites the columns of an existing event.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if no event has this id.
    fn update<'a>(&'a self, id: EventId, fields: EventFields) -> RepoFuture<'a, TrainingEvent>;

    /// ## Errors
    /// Returns `ServiceError::NotFound` if no event has this id.
    fn delete<'a>(&'a self, id: EventId) -> RepoFuture<'a, ()>;
}
