pub mod enums;
pub mod task;

pub use enums::{Filter, Phase, UiMode};
pub use task::{Task, TaskId, TaskPatch, TaskUpdate};
