pub mod config;
pub mod encoding;
pub mod errors;
pub mod store;
pub mod task;
pub mod utils;

pub use task::{FieldError, NewTask, StatusUpdate, Task};

pub const TABLE_NAME_DEFAULT: &str = "taskr-table";

/// Partition key of the task table.
pub const KEY_ATTRIBUTE: &str = "task_id";
pub const FINISHED_ATTRIBUTE: &str = "Finished";

/// Path parameter names the gateway may bind the identifier to.
pub const PATH_PARAMETERS: [&str; 2] = ["task_id", "item_id"];
