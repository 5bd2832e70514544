use crate::{ServerLifecycleManager, ServerRegistry, ShutdownGuard};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, broadcast};

/// Process-level shutdown coordinator
///
/// Knows every live registry so an interrupt can stop all of them.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
    registries: Arc<Mutex<Vec<ServerRegistry>>>,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            shutdown_tx,
            triggered: Arc::new(AtomicBool::new(false)),
            registries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Track a registry so `drain_all` stops its listeners
    pub async fn track(&self, registry: &ServerRegistry) {
        let mut registries = self.registries.lock().await;
        if !registries.iter().any(|r| r.same_as(registry)) {
            registries.push(registry.clone());
        }
    }

    /// Get a receiver for shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown (call this from signal handler)
    pub fn shutdown(&self) {
        log::info!("Shutdown signal received, notifying all subsystems");
        self.triggered.store(true, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(());
    }

    /// Check if shutdown has been triggered (non-blocking)
    pub fn is_shutdown(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Convenience method to create a guard
    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }

    /// Run `stop_all` on every tracked registry, awaiting each.
    ///
    /// Returns the number of listeners that were drained.
    pub async fn drain_all(&self, manager: &ServerLifecycleManager) -> usize {
        let registries = self.registries.lock().await.clone();

        let mut drained = 0;
        for registry in &registries {
            drained += manager.stop_all(registry).await.len();
        }

        log::info!(
            "Drained {} listener(s) across {} registr{}",
            drained,
            registries.len(),
            if registries.len() == 1 { "y" } else { "ies" }
        );

        drained
    }

    pub(crate) fn triggered_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.triggered)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
