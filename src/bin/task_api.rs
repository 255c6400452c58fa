//! One function serving the whole `/task` resource behind a proxy integration.

use lambda_http::{run, service_fn, Error as LambdaError, Request};
use taskr::common::config::Config;
use taskr::common::store::shared_table;
use taskr::common::utils::init_tracing;
use taskr::handlers::route;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing(Config::from_env().log_level);

    run(service_fn(|request: Request| async move {
        route(shared_table().await, request).await
    }))
    .await
}
