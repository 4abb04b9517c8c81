pub mod http;
pub mod memory;

pub use http::HttpTaskRepository;
pub use memory::InMemoryTaskRepository;

use crate::domain::{Task, TaskId, TaskUpdate};
use thiserror::Error;

/// Anything that went wrong talking to the task backend
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a delete call that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    /// The server answered, but not with the confirmation payload
    Rejected { message: String },
}

/// Remote store of tasks. Implementations are shared with worker threads.
pub trait TaskRepository: Send + Sync {
    fn fetch_all(&self) -> Result<Vec<Task>, NetworkError>;
    fn add(&self, text: &str) -> Result<Task, NetworkError>;
    fn update(&self, id: &TaskId, fields: &TaskUpdate) -> Result<Task, NetworkError>;
    fn delete(&self, id: &TaskId) -> Result<DeleteStatus, NetworkError>;
}
