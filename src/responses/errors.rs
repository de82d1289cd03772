use crate::errors::ServerError;
pub use crate::errors::ResultResp;
use crate::templates;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

fn log_error(err: &ServerError) {
    match err {
        ServerError::DbError(msg) => tracing::error!(error = %msg, "storage failure"),
        ServerError::InternalError => tracing::error!("internal error"),
        _ => {}
    }
}

/// Convert a ServerError into an HTML error page.
pub fn html_error_response(err: ServerError) -> Response {
    log_error(&err);
    let status = err.status();
    let body = match err {
        ServerError::NotFound => templates::pages::not_found_page("Wrong Route"),
        other => templates::pages::error_page(status, &other.public_message()),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(body.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

/// Convert a ServerError into a JSON error body.
///
/// Not-found answers `{ "message": ... }`, everything else `{ "error": ... }`.
pub fn json_error_response(err: ServerError) -> Response {
    log_error(&err);
    let status = err.status();
    let body = match &err {
        ServerError::NotFound => json!({ "message": err.public_message() }),
        _ => json!({ "error": err.public_message() }),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
