use std::convert::Infallible;
use tracing::warn;
use warp::{
    filters::body::BodyDeserializeError,
    reject::{
        InvalidQuery, LengthRequired, MethodNotAllowed, PayloadTooLarge, UnsupportedMediaType,
    },
    Rejection,
};

use crate::Status;

use super::handlers;

/// Turns rejected requests into JSON error responses.
pub async fn recover(rejection: Rejection) -> Result<Box<dyn warp::Reply>, Infallible> {
    if rejection.is_not_found() {
        return Ok(handlers::error(Status::not_found("Route not found")));
    }

    let status = if let Some(e) = rejection.find::<BodyDeserializeError>() {
        Status::invalid_argument(format!("Malformed JSON body: {e}"))
    } else if let Some(e) = rejection.find::<InvalidQuery>() {
        Status::invalid_argument(format!("{e}"))
    } else if rejection.find::<PayloadTooLarge>().is_some() {
        Status::invalid_argument("Request body is too large")
    } else if rejection.find::<LengthRequired>().is_some() {
        Status::invalid_argument("Request body requires a content-length")
    } else if rejection.find::<UnsupportedMediaType>().is_some() {
        Status::invalid_argument("Request body must be JSON")
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        warn! {"Rejected route: {:?}", rejection};
        return Ok(Box::new(warp::reply::with_status(
            warp::reply::json(&super::models::ErrorResponse {
                error: "Method not allowed".to_owned(),
            }),
            warp::http::StatusCode::METHOD_NOT_ALLOWED,
        )));
    } else {
        Status::internal(format!("Unhandled rejection: {rejection:?}"))
    };

    warn! {"Rejected route: {:?}", rejection};
    Ok(handlers::error(status))
}
