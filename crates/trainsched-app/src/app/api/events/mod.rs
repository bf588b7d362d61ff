//! CRUD over the event table.

use chrono::Local;
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use trainsched_core::constants::EVENTS_ROUTE_COMPONENT;
use trainsched_core::types::EventId;
use trainsched_layout::YearMonth;
use trainsched_service::draft::EventDraft;
use trainsched_service::error::ServiceError;
use trainsched_service::model::TrainingEvent;

use super::params::{path_param, query_param};
use crate::error::{AppError, AppResult};
use crate::service_handler::get_calendar_from_depot;

/// ## Summary
/// Month selected by the `year` and `month` query parameters; each one
/// missing falls back to the current month.
fn requested_month(req: &Request) -> AppResult<YearMonth> {
    let current = YearMonth::containing(Local::now().date_naive());
    let year = query_param::<i32>(req, "year")?.unwrap_or(current.year());
    let month = query_param::<u32>(req, "month")?.unwrap_or(current.month());
    Ok(YearMonth::new(year, month)?)
}

async fn parse_draft(req: &mut Request) -> AppResult<EventDraft> {
    req.parse_json::<EventDraft>().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse event body");
        AppError::BadRequest("Invalid request body".to_string())
    })
}

/// ## Summary
/// GET /api/events?year=&month= - Events overlapping the month's fetch window
#[handler]
async fn list_events(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let month = requested_month(req)?;
        let calendar = get_calendar_from_depot(depot)?;
        Ok::<_, AppError>(calendar.month_events(month).await?)
    }
    .await;

    match result {
        Ok(events) => res.render(Json(events)),
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// GET /api/events/{id} - A single event
///
/// ## Errors
/// Returns HTTP 400 for a malformed id and HTTP 404 if the event does not exist.
#[handler]
async fn get_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let id = path_param::<EventId>(req, "id")?;
        let calendar = get_calendar_from_depot(depot)?;
        calendar
            .event(id)
            .await?
            .ok_or_else(|| AppError::from(ServiceError::NotFound(format!("event {id}"))))
    }
    .await;

    match result {
        Ok(event) => res.render(Json(event)),
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// POST /api/events - Validates the form and creates an event
///
/// Any `id` in the body is ignored.
///
/// ## Errors
/// Returns HTTP 400 with the validation message if the form is rejected.
#[handler]
async fn create_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let mut draft = parse_draft(req).await?;
        draft.id = None;
        let calendar = get_calendar_from_depot(depot)?;
        Ok::<TrainingEvent, AppError>(calendar.save(draft).await?)
    }
    .await;

    match result {
        Ok(event) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(event));
        }
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// PUT /api/events/{id} - Validates the form and overwrites the event
///
/// ## Errors
/// Returns HTTP 400 if the form is rejected and HTTP 404 if the event does not exist.
#[handler]
async fn update_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let id = path_param::<EventId>(req, "id")?;
        let mut draft = parse_draft(req).await?;
        draft.id = Some(id);
        let calendar = get_calendar_from_depot(depot)?;
        Ok::<TrainingEvent, AppError>(calendar.save(draft).await?)
    }
    .await;

    match result {
        Ok(event) => res.render(Json(event)),
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// DELETE /api/events/{id}
///
/// ## Errors
/// Returns HTTP 404 if the event does not exist.
#[handler]
async fn delete_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let id = path_param::<EventId>(req, "id")?;
        let calendar = get_calendar_from_depot(depot)?;
        Ok::<(), AppError>(calendar.delete(id).await?)
    }
    .await;

    match result {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => e.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .get(list_events)
        .post(create_event)
        .push(
            Router::with_path("{id}")
                .get(get_event)
                .put(update_event)
                .delete(delete_event),
        )
}
