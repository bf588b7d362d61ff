//! In-process event table with an optional JSON snapshot file.

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use trainsched_core::types::{DateRange, EventId};

use crate::error::{ServiceError, ServiceResult};
use crate::model::{EventFields, TrainingEvent};
use crate::repository::{EventRepository, RepoFuture};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Table {
    next_id: i64,
    events: Vec<TrainingEvent>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            events: Vec::new(),
        }
    }
}

impl Table {
    fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|event| event.id == id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    table: RwLock<Table>,
    snapshot: Option<PathBuf>,
}

impl InMemoryEventRepository {
    /// Empty table kept in memory only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Opens a table mirrored to `path`, loading it if the file exists.
    ///
    /// ## Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> ServiceResult<Self> {
        let path = path.into();
        let mut table = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Table>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No event snapshot found, starting empty");
                Table::default()
            }
            Err(e) => return Err(e.into()),
        };

        let max_id = table.events.iter().map(|event| event.id.0).max().unwrap_or(0);
        table.next_id = table.next_id.max(max_id + 1);

        tracing::info!(
            path = %path.display(),
            events = table.events.len(),
            "Event table loaded"
        );

        Ok(Self {
            table: RwLock::new(table),
            snapshot: Some(path),
        })
    }

    async fn persist(&self, table: &Table) -> ServiceResult<()> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(table)?;
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, path).await?;

        tracing::trace!(path = %path.display(), "Event snapshot written");
        Ok(())
    }

    /// ## Summary
    /// Persists `next` and only then makes it the live table.
    ///
    /// ## Errors
    /// Returns the snapshot error; `table` is left unchanged.
    async fn commit(&self, table: &mut Table, next: Table) -> ServiceResult<()> {
        if let Err(e) = self.persist(&next).await {
            tracing::error!(error = %e, "Failed to write event snapshot, change discarded");
            return Err(e);
        }
        *table = next;
        Ok(())
    }
}

impl EventRepository for InMemoryEventRepository {
    fn list_overlapping<'a>(&'a self, range: DateRange) -> RepoFuture<'a, Vec<TrainingEvent>> {
        Box::pin(async move {
            let table = self.table.read().await;
            let mut events: Vec<TrainingEvent> = table
                .events
                .iter()
                .filter(|event| event.overlaps(&range))
                .cloned()
                .collect();
            events.sort_by_key(|event| event.start_date);

            tracing::debug!(%range, count = events.len(), "Listed overlapping events");
            Ok(events)
        })
    }

    fn get<'a>(&'a self, id: EventId) -> RepoFuture<'a, Option<TrainingEvent>> {
        Box::pin(async move {
            let table = self.table.read().await;
            Ok(table.position(id).map(|index| table.events[index].clone()))
        })
    }

    fn insert<'a>(&'a self, fields: EventFields) -> RepoFuture<'a, TrainingEvent> {
        Box::pin(async move {
            let mut table = self.table.write().await;
            let mut next = table.clone();

            let id = EventId(next.next_id);
            next.next_id += 1;
            let event = fields.into_event(id, Utc::now());
            next.events.push(event.clone());

            self.commit(&mut table, next).await?;
            tracing::info!(%id, short_name = %event.short_name, "Event created");
            Ok(event)
        })
    }

    fn update<'a>(&'a self, id: EventId, fields: EventFields) -> RepoFuture<'a, TrainingEvent> {
        Box::pin(async move {
            let mut table = self.table.write().await;

            let index = table
                .position(id)
                .ok_or_else(|| ServiceError::NotFound(format!("event {id}")))?;
            let mut next = table.clone();
            let created_at = next.events[index].created_at;
            let event = fields.into_event(id, created_at);
            next.events[index] = event.clone();

            self.commit(&mut table, next).await?;
            tracing::info!(%id, "Event updated");
            Ok(event)
        })
    }

    fn delete<'a>(&'a self, id: EventId) -> RepoFuture<'a, ()> {
        Box::pin(async move {
            let mut table = self.table.write().await;

            let index = table
                .position(id)
                .ok_or_else(|| ServiceError::NotFound(format!("event {id}")))?;
            let mut next = table.clone();
            next.events.remove(index);

            self.commit(&mut table, next).await?;
            tracing::info!(%id, "Event deleted");
            Ok(())
        })
    }
}
