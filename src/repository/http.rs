use super::{DeleteStatus, NetworkError, TaskRepository};
use crate::domain::{Task, TaskId, TaskUpdate};
use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Payload the backend sends back when a delete went through
pub const DELETE_CONFIRMATION: &str = "Task deleted successfully";

#[derive(Debug, Deserialize)]
struct AllTasksResponse {
    #[serde(rename = "allTasks")]
    all_tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct SavedTaskResponse {
    #[serde(rename = "savedNewtask")]
    saved: Task,
}

#[derive(Debug, Deserialize)]
struct EditedTaskResponse {
    #[serde(rename = "editOneTask")]
    edited: Task,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    msg: String,
}

/// Task repository speaking the REST dialect of the todo backend
pub struct HttpTaskRepository {
    client: Client,
    base_url: Url,
    fetch_limit: usize,
}

impl HttpTaskRepository {
    /// `timeout` of `None` lets a request wait forever
    pub fn new(base_url: &str, fetch_limit: usize, timeout: Option<Duration>) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API URL cannot hold a path: {}", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            fetch_limit,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`, the base always takes path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn fetch_url(&self) -> Url {
        let mut url = self.endpoint(&["getAllTask"]);
        url.query_pairs_mut()
            .append_pair("_limit", &self.fetch_limit.to_string());
        url
    }

    /// Send and return the body of a 2xx response
    fn send(&self, request: RequestBuilder, url: &Url) -> Result<String, NetworkError> {
        let response = request.send().map_err(|source| NetworkError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| NetworkError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

fn decode_body<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, NetworkError> {
    serde_json::from_str(body).map_err(|source| NetworkError::Decode {
        url: url.to_string(),
        source,
    })
}

fn delete_status(response: DeleteResponse) -> DeleteStatus {
    if response.msg == DELETE_CONFIRMATION {
        DeleteStatus::Deleted
    } else {
        DeleteStatus::Rejected {
            message: response.msg,
        }
    }
}

impl TaskRepository for HttpTaskRepository {
    fn fetch_all(&self) -> Result<Vec<Task>, NetworkError> {
        let url = self.fetch_url();
        tracing::debug!(%url, "fetching tasks");
        let body = self.send(self.client.get(url.clone()), &url)?;
        let response: AllTasksResponse = decode_body(&url, &body)?;
        Ok(response.all_tasks)
    }

    fn add(&self, text: &str) -> Result<Task, NetworkError> {
        let url = self.endpoint(&["addingTask"]);
        let body = TaskUpdate {
            text: text.to_string(),
            completed: false,
        };
        tracing::debug!(%url, "adding task");
        let body = self.send(self.client.post(url.clone()).json(&body), &url)?;
        let response: SavedTaskResponse = decode_body(&url, &body)?;
        Ok(response.saved)
    }

    fn update(&self, id: &TaskId, fields: &TaskUpdate) -> Result<Task, NetworkError> {
        let url = self.endpoint(&["editTask", id.as_str()]);
        tracing::debug!(%url, "updating task");
        let body = self.send(self.client.put(url.clone()).json(fields), &url)?;
        let response: EditedTaskResponse = decode_body(&url, &body)?;
        Ok(response.edited)
    }

    fn delete(&self, id: &TaskId) -> Result<DeleteStatus, NetworkError> {
        let url = self.endpoint(&["deleteTask", id.as_str()]);
        tracing::debug!(%url, "deleting task");
        let body = self.send(self.client.delete(url.clone()), &url)?;
        let response: DeleteResponse = decode_body(&url, &body)?;
        Ok(delete_status(response))
    }
}
