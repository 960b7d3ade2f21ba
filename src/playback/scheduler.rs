//! Single cancellable timer for the sequencer

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::sequencer::Timer;

/// Runs at most one pending timer at a time.
///
/// When a timer elapses it is sent on the channel given at construction.
/// Scheduling a new timer replaces the previous one, and dropping the
/// scheduler aborts whatever is still pending so nothing fires after
/// teardown.
pub struct Scheduler {
    tx: mpsc::UnboundedSender<Timer>,
    task: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(tx: mpsc::UnboundedSender<Timer>) -> Self {
        Self { tx, task: None }
    }

    /// Start `timer`, cancelling any timer already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, timer: Timer) {
        self.cancel();
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(timer.delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(timer);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether a timer is still waiting to fire
    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
