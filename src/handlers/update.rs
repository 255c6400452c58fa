use lambda_http::http::StatusCode;
use lambda_http::{Body, Error as LambdaError, Request, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::common::encoding::item_to_json;
use crate::common::errors::Error;
use crate::common::store::TaskStore;
use crate::common::utils::{json_response, respond, task_id_parameter};
use crate::common::StatusUpdate;

const UPDATED_DESCRIPTION: &str = "Update successful";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Updated {
    description: &'static str,
    updated_attributes: Value,
}

/// `PUT|PATCH /task/{task_id}`: sets `Finished` on an existing row.
pub async fn update_task_status<S: TaskStore>(
    store: &S,
    request: Request,
) -> Result<Response<Body>, LambdaError> {
    respond(process_request(store, request).await)
}

#[tracing::instrument(skip_all)]
async fn process_request<S: TaskStore>(store: &S, request: Request) -> Result<Response<Body>, Error> {
    let task_id = task_id_parameter(&request).ok_or_else(Error::missing_path_parameter)?;
    let update = StatusUpdate::from_body(request.body().as_ref())?;

    info!("Setting Finished={} on task {}", update.finished, task_id);
    let attributes = store
        .set_finished(&task_id, update.finished)
        .await?
        .ok_or_else(|| Error::NotFound(task_id.clone()))?;

    json_response(
        StatusCode::OK,
        &Updated {
            description: UPDATED_DESCRIPTION,
            updated_attributes: item_to_json(&attributes),
        },
    )
}
