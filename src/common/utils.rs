use lambda_http::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ALLOW, CONTENT_TYPE,
};
use lambda_http::http::{HeaderValue, StatusCode};
use lambda_http::{Body, Error as LambdaError, Request, RequestExt, Response};
use serde::Serialize;
use serde_json::json;
use tracing::Level;

use crate::common::errors::Error;
use crate::common::PATH_PARAMETERS;

const ALLOW_ORIGIN: &str = "*";
const ALLOW_HEADERS: &str = "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const COLLECTION_METHODS: &str = "GET,POST,OPTIONS";
pub const ITEM_METHODS: &str = "PUT,PATCH,DELETE,OPTIONS";

pub fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();
}

/// The task identifier bound by the gateway, if any and non-empty.
pub fn task_id_parameter(request: &Request) -> Option<String> {
    let params = request.path_parameters();
    PATH_PARAMETERS
        .iter()
        .find_map(|name| params.first(name).filter(|id| !id.is_empty()))
        .map(str::to_string)
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?;

    Ok(response)
}

pub fn empty_response(status: StatusCode) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)
        .body(Body::Empty)?;

    Ok(response)
}

pub fn preflight_response(methods: &str) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)
        .header(ACCESS_CONTROL_ALLOW_METHODS, methods)
        .header(ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS)
        .body(Body::Empty)?;

    Ok(response)
}

pub fn method_not_allowed(method: &str, allowed: &str) -> Result<Response<Body>, Error> {
    let mut response = error_response(&Error::MethodNotAllowed(method.to_string()))?;
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_str(allowed).map_err(LambdaError::from)?);

    Ok(response)
}

pub fn error_response(err: &Error) -> Result<Response<Body>, Error> {
    json_response(err.status_code(), &json!({ "description": err.to_string() }))
}

/// Renders a handler outcome. Domain errors become JSON error responses;
/// only failures to build a response reach the Lambda runtime.
pub fn respond(result: Result<Response<Body>, Error>) -> Result<Response<Body>, LambdaError> {
    match result.or_else(|err| error_response(&err)) {
        Ok(response) => Ok(response),
        Err(Error::LambdaError(err)) => Err(err),
        Err(err) => Err(err.into()),
    }
}
