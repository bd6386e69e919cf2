pub mod create_work;
pub mod steps;

pub use create_work::{create_work, StepArgs};
