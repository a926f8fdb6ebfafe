// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - Persist bridge
//
// Bridges synchronous selection mutators with background storage writes.
// Writes are fire-and-forget. Pending writes are kept per key, so a newer
// value replaces one that has not been written yet and the last write for a
// key always wins.

use crate::storage::KeyValueStore;
use crate::types::AppError;
use async_channel::{Receiver, Sender, TrySendError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Runtime;

/// Queued wake-ups; a full queue already guarantees another drain
const COMMAND_QUEUE_SIZE: usize = 16;

type PendingWrites = Arc<Mutex<BTreeMap<&'static str, String>>>;

/// Commands handled by the writer task
#[derive(Debug)]
pub enum PersistCommand {
    /// Pending writes are waiting
    Wake,
    Flush {
        reply: Sender<()>,
    },
}

/// Handle to the background writer
pub struct PersistBridge {
    command_tx: Sender<PersistCommand>,
    pending: PendingWrites,
    storage: Arc<dyn KeyValueStore>,
    _runtime: Arc<Runtime>,
}

impl PersistBridge {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let (command_tx, command_rx) = async_channel::bounded::<PersistCommand>(COMMAND_QUEUE_SIZE);
        let pending = PendingWrites::default();

        let runtime = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("course-browser-persist")
                .enable_all()
                .build()
                .map_err(|e| AppError::InvalidConfig(format!("Failed to create runtime: {}", e)))?,
        );

        runtime.spawn(Self::run_writer(
            storage.clone(),
            pending.clone(),
            command_rx,
        ));

        Ok(Self {
            command_tx,
            pending,
            storage,
            _runtime: runtime,
        })
    }

    async fn run_writer(
        storage: Arc<dyn KeyValueStore>,
        pending: PendingWrites,
        command_rx: Receiver<PersistCommand>,
    ) {
        while let Ok(cmd) = command_rx.recv().await {
            Self::drain(&storage, &pending).await;
            if let PersistCommand::Flush { reply } = cmd {
                let _ = reply.send(()).await;
            }
        }
        tracing::debug!("Persist queue closed");
    }

    async fn drain(storage: &Arc<dyn KeyValueStore>, pending: &PendingWrites) {
        let batch = std::mem::take(&mut *pending.lock().unwrap_or_else(PoisonError::into_inner));
        if batch.is_empty() {
            return;
        }

        let storage = storage.clone();
        let result = tokio::task::spawn_blocking(move || {
            for (key, value) in batch {
                match storage.set(key, &value) {
                    Ok(()) => tracing::debug!("Persisted {}", key),
                    Err(e) => tracing::error!("Failed to persist {}: {}", key, e),
                }
            }
        })
        .await;

        if let Err(e) = result {
            tracing::error!("Persist task failed: {}", e);
        }
    }

    /// Storage the bridge writes to; reads go straight through
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Queue a write without waiting for it
    pub fn schedule(&self, key: &'static str, value: String) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);

        match self.command_tx.try_send(PersistCommand::Wake) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Closed(_)) => {
                tracing::warn!("Persist queue closed, write for {} not applied", key);
            }
        }
    }

    /// Block until every write queued so far has been applied
    pub fn flush(&self) {
        let (reply_tx, reply_rx) = async_channel::bounded(1);
        if self
            .command_tx
            .send_blocking(PersistCommand::Flush { reply: reply_tx })
            .is_err()
        {
            tracing::warn!("Persist queue closed before flush");
            return;
        }
        let _ = reply_rx.recv_blocking();
    }
}
