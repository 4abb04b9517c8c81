use crate::controller::{Completion, RemoteCall};
use crate::repository::TaskRepository;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Runs repository calls off the UI thread.
///
/// Every call gets its own thread, so a slow request never holds up
/// the others. Completions come back in the order they finish.
pub struct Worker {
    repo: Arc<dyn TaskRepository>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl Worker {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            repo,
            sender,
            receiver,
        }
    }

    pub fn spawn(&self, call: RemoteCall) {
        let repo = Arc::clone(&self.repo);
        let sender = self.sender.clone();
        tracing::debug!(?call, "dispatching repository call");

        thread::spawn(move || {
            let completion = call.execute(repo.as_ref());
            // The receiver only goes away when the app is shutting down
            let _ = sender.send(completion);
        });
    }

    /// Completions that have arrived since the last drain
    pub fn drain(&self) -> Vec<Completion> {
        self.receiver.try_iter().collect()
    }

    #[cfg(test)]
    pub fn wait(&self, timeout: std::time::Duration) -> Option<Completion> {
        self.receiver.recv_timeout(timeout).ok()
    }
}
