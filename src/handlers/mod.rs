mod create;
mod delete;
mod list;
pub mod router;
mod update;

pub use create::create_task;
pub use delete::delete_task;
pub use list::list_tasks;
pub use router::route;
pub use update::update_task_status;
