use lambda_http::{run, service_fn, Error as LambdaError, Request};
use taskr::common::config::Config;
use taskr::common::store::shared_table;
use taskr::common::utils::init_tracing;
use taskr::handlers::update_task_status;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing(Config::from_env().log_level);

    run(service_fn(|request: Request| async move {
        update_task_status(shared_table().await, request).await
    }))
    .await
}
