use crate::{ListenerState, ListenerSummary, NetworkListener};

use std::sync::Arc;

use log::info;
use tokio::sync::Mutex;

/// Ordered collection of the listeners created by one or more `start` calls.
///
/// Clones share the same underlying list, so the caller that starts servers
/// and an independent shutdown path (signal handler, test teardown) see the
/// same listeners. Appended to only by `ServerLifecycleManager::start` and
/// drained only by `ServerLifecycleManager::stop_all`.
#[derive(Clone, Default)]
pub struct ServerRegistry {
    inner: Arc<Mutex<Vec<NetworkListener>>>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn append(&self, listener: NetworkListener) {
        let mut members = self.inner.lock().await;
        members.push(listener);
        info!(
            "Registered listener '{}' ({} total)",
            members.last().map(|l| l.name()).unwrap_or_default(),
            members.len()
        );
    }

    /// Remove every member, in registration order
    pub(crate) async fn drain(&self) -> Vec<NetworkListener> {
        std::mem::take(&mut *self.inner.lock().await)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Summaries in registration order
    pub async fn snapshot(&self) -> Vec<ListenerSummary> {
        self.inner
            .lock()
            .await
            .iter()
            .map(NetworkListener::summary)
            .collect()
    }

    /// Number of members currently `Listening`
    pub async fn listening_count(&self) -> usize {
        self.inner
            .lock()
            .await
            .iter()
            .filter(|l| l.state() == ListenerState::Listening)
            .count()
    }

    /// Whether two registries are handles to the same list
    pub fn same_as(&self, other: &ServerRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
