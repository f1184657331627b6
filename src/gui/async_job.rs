//! Fetch life-cycle handling for GUI views
//!
//! Every backend call runs on a background thread and is polled from the
//! GUI thread each frame. `AsyncJob` is the single-shot channel wrapper;
//! `FetchState` is the life-cycle the views render from.

use anyhow::{anyhow, Result};
use std::sync::mpsc::{Receiver, TryRecvError};

/// Helper struct for async jobs - polls a background task
pub struct AsyncJob<T> {
    receiver: Option<Receiver<Result<T>>>,
}

impl<T> AsyncJob<T> {
    /// Create a new async job with the given receiver
    pub fn new(receiver: Receiver<Result<T>>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// Poll the job for completion
    /// Returns Some(result) if the job has completed, None if still running
    pub fn poll(&mut self) -> Option<Result<T>> {
        if let Some(rx) = &self.receiver {
            match rx.try_recv() {
                Ok(res) => {
                    self.receiver = None;
                    return Some(res);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.receiver = None;
                    return Some(Err(anyhow!("Worker task disconnected")));
                }
            }
        }
        None
    }

    /// Check if the job is still running
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Life-cycle of a single fetch as seen by the rendering code.
///
/// Starting a new fetch replaces the whole state; completions of a
/// superseded job are dropped along with its channel.
pub enum FetchState<T> {
    /// Nothing requested yet
    Idle,
    /// A job is in flight
    Loading(AsyncJob<T>),
    /// The last fetch failed with this message
    Failed(String),
    /// The last fetch succeeded
    Ready(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Advance the state if the in-flight job has completed.
    pub fn poll(&mut self) {
        if let FetchState::Loading(job) = self {
            match job.poll() {
                Some(Ok(value)) => *self = FetchState::Ready(value),
                Some(Err(e)) => *self = FetchState::Failed(e.to_string()),
                None => {}
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    /// The fetched value, if the last fetch succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    // ==================== AsyncJob tests ====================

    #[test]
    fn test_job_pending_while_channel_empty() {
        let (_tx, rx) = mpsc::channel::<Result<u32>>();
        let mut job = AsyncJob::new(rx);

        assert!(job.poll().is_none());
        assert!(job.is_running());
    }

    #[test]
    fn test_job_completes_once() {
        let (tx, rx) = mpsc::channel::<Result<u32>>();
        let mut job = AsyncJob::new(rx);

        tx.send(Ok(7)).unwrap();
        let result = job.poll().unwrap();
        assert_eq!(result.unwrap(), 7);
        assert!(!job.is_running());
        assert!(job.poll().is_none());
    }

    #[test]
    fn test_job_disconnected_worker_is_error() {
        let (tx, rx) = mpsc::channel::<Result<u32>>();
        let mut job = AsyncJob::new(rx);

        drop(tx);
        let result = job.poll().unwrap();
        assert!(result.is_err());
    }

    // ==================== FetchState tests ====================

    #[test]
    fn test_fetch_state_loading_to_ready() {
        let (tx, rx) = mpsc::channel::<Result<u32>>();
        let mut state = FetchState::Loading(AsyncJob::new(rx));

        state.poll();
        assert!(state.is_loading());

        tx.send(Ok(42)).unwrap();
        state.poll();
        assert_eq!(state.value(), Some(&42));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_fetch_state_loading_to_failed() {
        let (tx, rx) = mpsc::channel::<Result<u32>>();
        let mut state = FetchState::Loading(AsyncJob::new(rx));

        tx.send(Err(anyhow!("daemon unreachable"))).unwrap();
        state.poll();
        assert_eq!(state.error(), Some("daemon unreachable"));
        assert!(state.value().is_none());
    }

    #[test]
    fn test_fetch_state_disconnected_worker_fails() {
        let (tx, rx) = mpsc::channel::<Result<u32>>();
        let mut state = FetchState::Loading(AsyncJob::new(rx));

        drop(tx);
        state.poll();
        assert!(state.error().is_some());
    }

    #[test]
    fn test_fetch_state_default_is_idle() {
        let state: FetchState<u32> = FetchState::default();
        assert!(state.is_idle());
        assert!(state.value().is_none());
        assert!(state.error().is_none());
    }
}
