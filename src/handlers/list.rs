use lambda_http::http::StatusCode;
use lambda_http::{Body, Error as LambdaError, Request, Response};
use tracing::info;

use crate::common::encoding::items_to_json;
use crate::common::errors::Error;
use crate::common::store::TaskStore;
use crate::common::utils::{json_response, respond};

/// `GET /task`: every row in the table as a JSON array.
pub async fn list_tasks<S: TaskStore>(
    store: &S,
    _request: Request,
) -> Result<Response<Body>, LambdaError> {
    respond(process_request(store).await)
}

#[tracing::instrument(skip_all)]
async fn process_request<S: TaskStore>(store: &S) -> Result<Response<Body>, Error> {
    let items = store.scan().await?;
    info!("Scanned {} tasks", items.len());

    json_response(StatusCode::OK, &items_to_json(&items))
}
