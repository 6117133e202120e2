use std::sync::Arc;
use std::thread::JoinHandle;

use futures::StreamExt;
use futures::channel::{mpsc, oneshot};
use parking_lot::RwLock;

use super::DrawCommand;

/// Work items consumed by the append worker, in the order they were issued
enum LogMessage {
    /// Append a batch as one contiguous unit
    Append(Vec<DrawCommand>),
    /// Drop every entry at or past the given index
    Truncate(usize),
    /// Signalled once every earlier message has been applied
    Barrier(oneshot::Sender<()>),
}

/// Applied commands plus the number of truncations applied so far
#[derive(Debug, Default)]
struct LogEntries {
    commands: Vec<DrawCommand>,
    truncations: u64,
}

/// Commands past a cursor, read under one lock
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pending {
    pub commands: Vec<DrawCommand>,
    /// Log length when the copy was taken
    pub len: usize,
    /// Truncations the worker had applied when the copy was taken
    pub truncations: u64,
}

/// Append-only, ordered history of draw commands.
///
/// Writes never happen on the caller's thread: batches are queued on an
/// unbounded channel and applied by a single dedicated worker, so batches land
/// in issue order and are never interleaved. Readers take a short read lock.
pub struct CommandLog {
    entries: Arc<RwLock<LogEntries>>,
    sender: Option<mpsc::UnboundedSender<LogMessage>>,
    worker: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for CommandLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLog")
            .field("entries", &format!("<{} commands>", self.entries.read().commands.len()))
            .field("worker", &self.worker.is_some())
            .finish()
    }
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLog {
    /// Creates an empty log and starts its append worker
    pub fn new() -> Self {
        let entries = Arc::new(RwLock::new(LogEntries::default()));
        let (sender, receiver) = mpsc::unbounded();

        let worker_entries = Arc::clone(&entries);
        let spawned = std::thread::Builder::new()
            .name("command-log-append".to_owned())
            .spawn(move || run_append_worker(receiver, worker_entries));

        match spawned {
            Ok(worker) => Self {
                entries,
                sender: Some(sender),
                worker: Some(worker),
            },
            Err(err) => {
                // Without a worker every message is applied on the calling thread,
                // which keeps ordering intact since there is only one caller.
                log::error!("Failed to start command log worker, appending inline: {}", err);
                Self {
                    entries,
                    sender: None,
                    worker: None,
                }
            }
        }
    }

    /// Queues a batch for appending. Returns immediately.
    pub fn append(&self, batch: Vec<DrawCommand>) {
        if batch.is_empty() {
            return;
        }
        log::debug!("Queueing batch of {} commands", batch.len());
        self.dispatch(LogMessage::Append(batch));
    }

    /// Queues a truncation to `len` entries, ordered after every batch queued so far
    pub fn truncate(&self, len: usize) {
        self.dispatch(LogMessage::Truncate(len));
    }

    /// Blocks until every message queued before this call has been applied
    pub fn sync(&self) {
        let (done, wait) = oneshot::channel();
        self.dispatch(LogMessage::Barrier(done));
        if futures::executor::block_on(wait).is_err() {
            log::warn!("Command log worker exited before reaching the barrier");
        }
    }

    /// Number of commands currently applied
    pub fn len(&self) -> usize {
        self.entries.read().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().commands.is_empty()
    }

    /// Number of truncations the worker has applied
    pub fn truncations(&self) -> u64 {
        self.entries.read().truncations
    }

    /// Copies the commands from `since` to the end, together with the log length
    /// and truncation count observed under the same lock.
    pub fn pending_since(&self, since: usize) -> Pending {
        let entries = self.entries.read();
        Pending {
            commands: entries
                .commands
                .get(since..)
                .map(<[DrawCommand]>::to_vec)
                .unwrap_or_default(),
            len: entries.commands.len(),
            truncations: entries.truncations,
        }
    }

    /// A copy of every applied command
    pub fn snapshot(&self) -> Vec<DrawCommand> {
        self.entries.read().commands.clone()
    }

    fn dispatch(&self, message: LogMessage) {
        let message = match &self.sender {
            Some(sender) => match sender.unbounded_send(message) {
                Ok(()) => return,
                Err(err) => {
                    log::warn!("Command log worker is gone, applying inline");
                    err.into_inner()
                }
            },
            None => message,
        };
        apply_message(&self.entries, message);
    }
}

impl Drop for CommandLog {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Command log worker panicked");
            }
        }
    }
}

fn run_append_worker(
    mut receiver: mpsc::UnboundedReceiver<LogMessage>,
    entries: Arc<RwLock<LogEntries>>,
) {
    futures::executor::block_on(async move {
        while let Some(message) = receiver.next().await {
            apply_message(&entries, message);
        }
    });
    log::debug!("Command log worker stopped");
}

fn apply_message(entries: &RwLock<LogEntries>, message: LogMessage) {
    match message {
        LogMessage::Append(batch) => {
            entries.write().commands.extend(batch);
        }
        LogMessage::Truncate(len) => {
            let mut entries = entries.write();
            entries.commands.truncate(len);
            entries.truncations += 1;
        }
        LogMessage::Barrier(done) => {
            // The waiter may have given up; nothing to do then.
            let _ = done.send(());
        }
    }
}
