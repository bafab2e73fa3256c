//! Transient notifications with timed auto-dismiss
//!
//! A [`ToastQueue`] owns every toast shown during a session. Each toast gets a
//! one-shot timer running on the Tokio runtime; when it fires, the expired id is
//! sent back over the queue's command channel and the owner applies it with
//! [`ToastQueue::process_pending`] (or [`ToastQueue::recv`] + [`ToastQueue::apply`]).
//! Components that only need to notify hold a cloneable [`Toaster`].

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio_util::sync::CancellationToken;

use crate::config::DEFAULT_TOAST_DURATION_MS;
use crate::error::Error;

/// Lifetime of a toast when none is given
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(DEFAULT_TOAST_DURATION_MS);

/// Unique toast identifier, monotonic within a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Info => "i",
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
}

/// Messages delivered to a queue from timers and [`Toaster`] handles
#[derive(Debug, Clone, PartialEq)]
pub enum ToastCommand {
    Show {
        message: String,
        kind: ToastKind,
        duration: Option<Duration>,
    },
    Expired(ToastId),
}

/// Ordered collection of live toasts, oldest first
pub struct ToastQueue {
    toasts: Vec<Toast>,
    timers: HashMap<ToastId, CancellationToken>,
    next_id: u64,
    default_duration: Duration,
    command_tx: mpsc::UnboundedSender<ToastCommand>,
    command_rx: mpsc::UnboundedReceiver<ToastCommand>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_TOAST_DURATION)
    }

    pub fn with_default_duration(default_duration: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        Self {
            toasts: Vec::new(),
            timers: HashMap::new(),
            next_id: 1,
            default_duration,
            command_tx,
            command_rx,
        }
    }

    /// Handle that can show toasts on this queue from anywhere
    pub fn toaster(&self) -> Toaster {
        Toaster {
            tx: self.command_tx.clone(),
        }
    }

    /// Append a toast and schedule its removal after `duration`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
    ) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let message = message.into();
        tracing::debug!(%id, ?kind, %message, "toast enqueued");
        self.toasts.push(Toast { id, message, kind });

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.command_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    // The queue may be gone already; nothing left to dismiss then.
                    let _ = tx.send(ToastCommand::Expired(id));
                }
            }
        });
        self.timers.insert(id, token);

        id
    }

    /// Enqueue with the queue's default lifetime
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.enqueue(message, kind, self.default_duration)
    }

    /// Remove a toast and cancel its timer. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        if let Some(token) = self.timers.remove(&id) {
            token.cancel();
        }
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        let removed = self.toasts.len() != before;
        if removed {
            tracing::debug!(%id, "toast dismissed");
        }
        removed
    }

    /// Apply one command; returns the id of the toast it created or removed
    pub fn apply(&mut self, command: ToastCommand) -> Option<ToastId> {
        match command {
            ToastCommand::Show {
                message,
                kind,
                duration,
            } => {
                let duration = duration.unwrap_or(self.default_duration);
                Some(self.enqueue(message, kind, duration))
            }
            ToastCommand::Expired(id) => self.dismiss(id).then_some(id),
        }
    }

    /// Apply every command received so far without waiting.
    ///
    /// Returns the number of commands processed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        loop {
            match self.command_rx.try_recv() {
                Ok(command) => {
                    self.apply(command);
                    processed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        processed
    }

    /// Wait for the next command from a timer or a [`Toaster`]
    pub async fn recv(&mut self) -> Option<ToastCommand> {
        self.command_rx.recv().await
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ToastQueue {
    fn drop(&mut self) {
        for token in self.timers.values() {
            token.cancel();
        }
    }
}

impl fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastQueue")
            .field("toasts", &self.toasts)
            .field("pending_timers", &self.timers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Cloneable entry point for showing toasts on a running [`ToastQueue`]
#[derive(Debug, Clone)]
pub struct Toaster {
    tx: mpsc::UnboundedSender<ToastCommand>,
}

impl Toaster {
    /// Show a toast with the queue's default lifetime.
    ///
    /// Fails with [`Error::ToastUnavailable`] once the queue has been dropped.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> Result<(), Error> {
        self.send(ToastCommand::Show {
            message: message.into(),
            kind,
            duration: None,
        })
    }

    pub fn show_for(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
    ) -> Result<(), Error> {
        self.send(ToastCommand::Show {
            message: message.into(),
            kind,
            duration: Some(duration),
        })
    }

    pub fn info(&self, message: impl Into<String>) -> Result<(), Error> {
        self.show(message, ToastKind::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> Result<(), Error> {
        self.show(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Result<(), Error> {
        self.show(message, ToastKind::Error)
    }

    /// Whether the owning queue still exists
    pub fn is_live(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send(&self, command: ToastCommand) -> Result<(), Error> {
        self.tx.send(command).map_err(|_| Error::ToastUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_enqueue_appends_in_order() {
        let mut queue = ToastQueue::new();
        let a = queue.show("A", ToastKind::Info);
        let b = queue.show("B", ToastKind::Success);
        let c = queue.show("C", ToastKind::Error);

        assert!(a < b && b < c);
        let messages: Vec<_> = queue.toasts().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["A", "B", "C"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_is_idempotent() {
        let mut queue = ToastQueue::new();
        let id = queue.show("Compte supprime", ToastKind::Success);

        assert!(queue.dismiss(id));
        assert!(queue.is_empty());
        assert!(!queue.dismiss(id));
        assert!(!queue.dismiss(ToastId(999)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_expiry_removes_toast() {
        let mut queue = ToastQueue::new();
        let id = queue.enqueue("Erreur", ToastKind::Error, Duration::from_millis(3500));

        let command = queue.recv().await.unwrap();
        assert_eq!(command, ToastCommand::Expired(id));
        assert_eq!(queue.apply(command), Some(id));
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_dismiss_cancels_timer() {
        let mut queue = ToastQueue::new();
        let id = queue.enqueue("x", ToastKind::Info, Duration::from_millis(100));
        assert!(queue.dismiss(id));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(queue.process_pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toaster_routes_to_queue() {
        let mut queue = ToastQueue::new();
        let toaster = queue.toaster();
        assert!(toaster.is_live());

        toaster.success("Compte cree avec succes").unwrap();
        assert_eq!(queue.process_pending(), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.toasts()[0].kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn test_toaster_without_queue_is_fatal() {
        let queue = ToastQueue::new();
        let toaster = queue.toaster();
        drop(queue);

        let err = toaster.info("hello").unwrap_err();
        assert!(matches!(err, Error::ToastUnavailable));
        assert!(err.is_fatal());
        assert!(!toaster.is_live());
    }
}
