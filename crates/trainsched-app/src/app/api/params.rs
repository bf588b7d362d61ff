use std::str::FromStr;

use salvo::Request;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Parses an optional query parameter.
///
/// ## Errors
/// Returns `AppError::BadRequest` if the parameter is present but malformed.
pub(super) fn query_param<T: FromStr>(req: &Request, name: &str) -> AppResult<Option<T>> {
    req.query::<String>(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|_err| {
                AppError::BadRequest(format!("Invalid value '{raw}' for query parameter '{name}'"))
            })
        })
        .transpose()
}

/// ## Errors
/// Returns `AppError::BadRequest` if the path parameter is missing or malformed.
pub(super) fn path_param<T: FromStr>(req: &Request, name: &str) -> AppResult<T> {
    let raw = req
        .param::<String>(name)
        .ok_or_else(|| AppError::BadRequest(format!("Missing path parameter '{name}'")))?;
    raw.parse::<T>().map_err(|_err| {
        AppError::BadRequest(format!("Invalid value '{raw}' for path parameter '{name}'"))
    })
}
