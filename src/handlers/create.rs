use chrono::Utc;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error as LambdaError, Request, Response};
use serde::Serialize;
use tracing::{info, warn};

use crate::common::errors::Error;
use crate::common::store::TaskStore;
use crate::common::utils::{json_response, respond};
use crate::common::NewTask;

const CREATED_DESCRIPTION: &str = "Successfully added a new task.";

#[derive(Debug, Serialize)]
struct Created {
    description: &'static str,
    task_id: String,
}

/// `POST /task`: validates the body and writes a new, freshly keyed row.
pub async fn create_task<S: TaskStore>(
    store: &S,
    request: Request,
) -> Result<Response<Body>, LambdaError> {
    respond(process_request(store, request).await)
}

#[tracing::instrument(skip_all)]
async fn process_request<S: TaskStore>(store: &S, request: Request) -> Result<Response<Body>, Error> {
    let new_task = NewTask::from_body(request.body().as_ref()).map_err(|errors| {
        warn!("Rejected create request: {:?}", errors);
        Error::from(errors)
    })?;

    let task = new_task.into_task(Utc::now());
    let task_id = task.task_id.clone();

    info!("Creating task {} for {}", task_id, task.username);
    store.put(task).await?;

    json_response(
        StatusCode::CREATED,
        &Created {
            description: CREATED_DESCRIPTION,
            task_id,
        },
    )
}
