mod app_specific;
mod calendar;
mod events;
mod params;

use salvo::Router;

use trainsched_core::constants::API_ROUTE_COMPONENT;

/// ## Summary
/// Constructs the main API router with all handlers.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(events::routes())
        .push(calendar::routes()))
}
