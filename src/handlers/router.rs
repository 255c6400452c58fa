//! Single-function entry point serving the whole `/task` resource.

use std::collections::HashMap;

use lambda_http::http::Method;
use lambda_http::{Body, Error as LambdaError, Request, RequestExt, Response};
use tracing::info;

use crate::common::errors::Error;
use crate::common::store::TaskStore;
use crate::common::utils::{
    error_response, method_not_allowed, preflight_response, respond, task_id_parameter,
    COLLECTION_METHODS, ITEM_METHODS,
};
use crate::common::KEY_ATTRIBUTE;
use crate::handlers::{create_task, delete_task, list_tasks, update_task_status};

const RESOURCE: &str = "task";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Collection,
    Item(String),
}

impl Route {
    /// Matches `/task` and `/task/{id}`, optionally behind one stage segment.
    pub fn resolve(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [RESOURCE] => Some(Route::Collection),
            [RESOURCE, id] => Some(Route::Item(id.to_string())),
            [_, RESOURCE] => Some(Route::Collection),
            [_, RESOURCE, id] => Some(Route::Item(id.to_string())),
            _ => None,
        }
    }
}

pub async fn route<S: TaskStore>(store: &S, request: Request) -> Result<Response<Body>, LambdaError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    info!("{} {}", method, path);

    match Route::resolve(&path) {
        Some(Route::Collection) => match method {
            Method::GET => list_tasks(store, request).await,
            Method::POST => create_task(store, request).await,
            Method::OPTIONS => respond(preflight_response(COLLECTION_METHODS)),
            _ => respond(method_not_allowed(method.as_str(), COLLECTION_METHODS)),
        },
        Some(Route::Item(id)) => {
            let request = with_task_id(request, id);
            match method {
                Method::PUT | Method::PATCH => update_task_status(store, request).await,
                Method::DELETE => delete_task(store, request).await,
                Method::OPTIONS => respond(preflight_response(ITEM_METHODS)),
                _ => respond(method_not_allowed(method.as_str(), ITEM_METHODS)),
            }
        }
        None => respond(error_response(&Error::UnknownRoute)),
    }
}

/// Proxy integrations do not bind `{task_id}`; take it from the path instead.
fn with_task_id(request: Request, id: String) -> Request {
    if task_id_parameter(&request).is_some() {
        return request;
    }

    request.with_path_parameters(HashMap::from([(KEY_ATTRIBUTE.to_string(), id)]))
}
