//! Delayed mock operations with cancellation
//!
//! Each operation that would be a network call in a real deployment (load,
//! save, upload, auto-fill) runs as a tokio task that sleeps for a configured
//! delay and then produces its result. The UI thread polls the result every
//! frame; a repaint callback wakes it up when the result is ready.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// Outcome of polling a task
#[derive(Debug, PartialEq, Eq)]
pub enum TaskPoll<T> {
    Pending,
    Ready(T),
    Cancelled,
}

/// Cancels the associated task when triggered or dropped
#[derive(Debug)]
pub struct CancelToken {
    tx: Option<oneshot::Sender<()>>,
}

impl CancelToken {
    fn new() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn cancel(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(());
        }
    }
}

/// A spawned mock operation
#[derive(Debug)]
pub struct PendingTask<T> {
    label: &'static str,
    result_rx: Receiver<T>,
    cancel: CancelToken,
}

impl<T: Send + 'static> PendingTask<T> {
    /// Run `work` on the runtime after `delay`, unless cancelled first
    pub fn spawn<F, W>(handle: &Handle, label: &'static str, delay: Duration, work: F, on_ready: W) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        W: Fn() + Send + 'static,
    {
        let (result_tx, result_rx) = mpsc::channel();
        let (cancel, cancel_rx) = CancelToken::new();

        tracing::debug!("Starting {} ({} ms)", label, delay.as_millis());
        handle.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if result_tx.send(work()).is_ok() {
                        on_ready();
                    }
                }
                _ = cancel_rx => {
                    tracing::debug!("Cancelled {}", label);
                }
            }
        });

        Self {
            label,
            result_rx,
            cancel,
        }
    }
}

impl<T> PendingTask<T> {
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Non-blocking check for the result
    pub fn poll(&self) -> TaskPoll<T> {
        match self.result_rx.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Cancelled,
        }
    }

    pub fn cancel(&mut self) {
        self.cancel.cancel();
    }
}

/// Holds at most one running task of a kind.
///
/// Starting while a task is pending is refused rather than queued.
#[derive(Debug)]
pub struct TaskSlot<T> {
    task: Option<PendingTask<T>>,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<T: Send + 'static> TaskSlot<T> {
    /// Start a task unless one is already running; returns whether it started
    pub fn start<F, W>(&mut self, handle: &Handle, label: &'static str, delay: Duration, work: F, on_ready: W) -> bool
    where
        F: FnOnce() -> T + Send + 'static,
        W: Fn() + Send + 'static,
    {
        if let Some(task) = &self.task {
            tracing::warn!("{} already in progress, ignoring request", task.label());
            return false;
        }

        self.task = Some(PendingTask::spawn(handle, label, delay, work, on_ready));
        true
    }
}

impl<T> TaskSlot<T> {
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    /// Take the result if the task has finished; frees the slot
    pub fn poll(&mut self) -> Option<T> {
        let poll = self.task.as_ref()?.poll();
        match poll {
            TaskPoll::Pending => None,
            TaskPoll::Ready(value) => {
                self.task = None;
                Some(value)
            }
            TaskPoll::Cancelled => {
                self.task = None;
                None
            }
        }
    }

    /// Cancel the running task, if any, and free the slot
    pub fn cancel(&mut self) {
        if let Some(mut task) = self.task.take() {
            task.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .unwrap()
    }

    fn wait_for<T>(slot: &mut TaskSlot<T>) -> Option<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(value) = slot.poll() {
                return Some(value);
            }
            if !slot.is_busy() {
                return None;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_task_completes_and_signals() {
        let rt = runtime();
        let woken = Arc::new(AtomicUsize::new(0));
        let counter = woken.clone();

        let mut slot = TaskSlot::default();
        assert!(slot.start(rt.handle(), "load", Duration::ZERO, || 42, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(slot.is_busy());

        assert_eq!(wait_for(&mut slot), Some(42));
        assert!(!slot.is_busy());

        // the wake-up runs right after the result is sent
        let deadline = Instant::now() + Duration::from_secs(5);
        while woken.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(woken.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_second_start_is_refused_while_pending() {
        let rt = runtime();
        let mut slot = TaskSlot::default();
        assert!(slot.start(rt.handle(), "save", Duration::from_secs(30), || 1, || {}));
        assert!(!slot.start(rt.handle(), "save", Duration::ZERO, || 2, || {}));
        assert_eq!(slot.poll(), None);
        assert!(slot.is_busy());
        slot.cancel();
    }

    #[test]
    fn test_cancel_prevents_result() {
        let rt = runtime();
        let ran = Arc::new(AtomicUsize::new(0));
        let flag = ran.clone();

        let mut task = PendingTask::spawn(
            rt.handle(),
            "autofill",
            Duration::from_millis(200),
            move || {
                flag.fetch_add(1, Ordering::SeqCst);
            },
            || {},
        );
        task.cancel();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut outcome = task.poll();
        while outcome == TaskPoll::Pending && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            outcome = task.poll();
        }
        assert_eq!(outcome, TaskPoll::Cancelled);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_slot_can_restart_after_cancel() {
        let rt = runtime();
        let mut slot = TaskSlot::default();
        assert!(slot.start(rt.handle(), "upload", Duration::from_secs(30), || "a", || {}));
        slot.cancel();
        assert!(!slot.is_busy());
        assert!(slot.start(rt.handle(), "upload", Duration::ZERO, || "b", || {}));
        assert_eq!(wait_for(&mut slot), Some("b"));
    }
}
