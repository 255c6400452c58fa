use lambda_http::http::StatusCode;
use lambda_http::{Body, Error as LambdaError, Request, Response};
use tracing::info;

use crate::common::errors::Error;
use crate::common::store::TaskStore;
use crate::common::utils::{empty_response, respond, task_id_parameter};

/// `DELETE /task/{task_id}`: removes the row. Deleting an absent row is
/// still a 204, which carries no body.
pub async fn delete_task<S: TaskStore>(
    store: &S,
    request: Request,
) -> Result<Response<Body>, LambdaError> {
    respond(process_request(store, request).await)
}

#[tracing::instrument(skip_all)]
async fn process_request<S: TaskStore>(store: &S, request: Request) -> Result<Response<Body>, Error> {
    let task_id = task_id_parameter(&request).ok_or_else(Error::missing_path_parameter)?;

    info!("Deleting task {}", task_id);
    store.delete(&task_id).await?;

    empty_response(StatusCode::NO_CONTENT)
}
