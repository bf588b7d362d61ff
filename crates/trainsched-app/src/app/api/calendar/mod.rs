//! Month view: grid cells, events, category notes and bar geometry.

use chrono::{Local, NaiveDate};
use salvo::caching_headers::CachingHeaders;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use trainsched_core::constants::CALENDAR_ROUTE_COMPONENT;
use trainsched_layout::{LayoutMetrics, YearMonth};
use trainsched_service::calendar::MonthView;

use super::params::{path_param, query_param};
use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};
use crate::service_handler::get_calendar_from_depot;

fn parse_today(req: &Request) -> AppResult<NaiveDate> {
    match req.query::<String>("today") {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_err| {
            AppError::BadRequest(format!("Invalid date '{raw}', expected YYYY-MM-DD"))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

async fn build_view(req: &Request, depot: &Depot) -> AppResult<MonthView> {
    let year = path_param::<i32>(req, "year")?;
    let month = YearMonth::new(year, path_param::<u32>(req, "month")?)?;

    let cell_width = query_param::<f64>(req, "cell_width")?.unwrap_or(0.0);
    if !cell_width.is_finite() || cell_width < 0.0 {
        return Err(AppError::BadRequest(
            "cell_width must be a non-negative number".to_string(),
        ));
    }
    let today = parse_today(req)?;

    let settings = get_config_from_depot(depot)?;
    let metrics = LayoutMetrics::from(&settings.layout);
    let calendar = get_calendar_from_depot(depot)?;

    Ok(calendar
        .month_view(month, cell_width, &metrics, today)
        .await?)
}

/// ## Summary
/// GET /api/calendar/{year}/{month}?cell_width=&today=
///
/// Without a positive `cell_width` the view carries no layout. Repeated
/// requests for an unchanged view are answered with 304 through the ETag.
///
/// ## Errors
/// Returns HTTP 400 for an invalid month, width or date.
#[handler]
async fn month_view(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match build_view(req, depot).await {
        Ok(view) => {
            tracing::debug!(
                month = %format_args!("{}-{:02}", view.year, view.month),
                events = view.events.len(),
                laid_out = view.layout.is_some(),
                "Month view built"
            );
            res.render(Json(view));
        }
        Err(e) => e.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CALENDAR_ROUTE_COMPONENT).push(
        Router::with_path("{year}/{month}")
            .hoop(CachingHeaders::new())
            .get(month_view),
    )
}
