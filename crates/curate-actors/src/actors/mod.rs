mod dry_create_actor;
mod file_actor;
mod order_actor;

pub use dry_create_actor::{DryCreateActor, ErrorHandler};
pub use file_actor::{FileActor, FileUpload};
pub use order_actor::OrderActor;
