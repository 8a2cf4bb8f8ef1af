//! Shared stop flag for the session tasks.
//!
//! Both loops and the controller hold a clone of the same [`StopSignal`].
//! Whichever side notices termination first records its [`StopReason`]; later
//! triggers are ignored so the reported reason is always the first cause.

use std::{fmt, sync::Arc};

use tokio::sync::watch;

use crate::error::TransportError;

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Server closed the connection.
    PeerClosed,
    /// No bytes arrived within the I/O timeout.
    Timeout,
    /// User entered the quit command.
    Quit,
    /// Local input reached end of file.
    InputClosed,
    /// Stop requested from outside the session (e.g. Ctrl-C).
    Interrupted,
    /// Socket error while reading or writing.
    Transport(String),
    /// Outbound frame could not be encoded.
    Protocol(String),
}

impl StopReason {
    /// Returns true if the session ended because something went wrong, as
    /// opposed to the user or the server closing it normally.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport(_) | Self::Protocol(_))
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerClosed => write!(f, "connection closed by server"),
            Self::Timeout => write!(f, "timed out"),
            Self::Quit => write!(f, "quit"),
            Self::InputClosed => write!(f, "input closed"),
            Self::Interrupted => write!(f, "interrupted"),
            Self::Transport(e) => write!(f, "{e}"),
            Self::Protocol(e) => write!(f, "protocol error: {e}"),
        }
    }
}

impl From<TransportError> for StopReason {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::ConnectionClosed => Self::PeerClosed,
            TransportError::Timeout(_) => Self::Timeout,
            TransportError::Io(e) => Self::Transport(e.to_string()),
            TransportError::Protocol(e) => Self::Protocol(e.to_string()),
        }
    }
}

/// Cloneable one-shot stop flag.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<Option<StopReason>>>,
}

impl StopSignal {
    /// Create an untriggered signal.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Request a stop. Returns true if this call set the reason.
    ///
    /// Idempotent: once a reason is recorded, further calls change nothing.
    pub fn trigger(&self, reason: StopReason) -> bool {
        let set = self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason.clone());
            true
        });

        if set {
            tracing::debug!(%reason, "stop requested");
        }
        set
    }

    /// Returns true once any party has triggered the signal.
    pub fn is_stopped(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// The recorded reason, if stopped.
    pub fn reason(&self) -> Option<StopReason> {
        self.tx.borrow().clone()
    }

    /// Wait until the signal is triggered and return the first reason.
    ///
    /// Returns immediately if already triggered. Cancel safe.
    pub async fn stopped(&self) -> StopReason {
        let mut rx = self.tx.subscribe();
        let result = rx.wait_for(Option::is_some).await.map(|r| (*r).clone());

        // The sender lives as long as `self`, so `wait_for` cannot observe a
        // closed channel here.
        match result {
            Ok(Some(reason)) => reason,
            Ok(None) | Err(_) => StopReason::Interrupted,
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn first_trigger_wins() {
        let stop = StopSignal::new();
        assert!(!stop.is_stopped());

        assert!(stop.trigger(StopReason::Quit));
        assert!(!stop.trigger(StopReason::PeerClosed));

        assert!(stop.is_stopped());
        assert_eq!(stop.reason(), Some(StopReason::Quit));
    }

    #[test]
    fn clones_share_state() {
        let stop = StopSignal::new();
        let other = stop.clone();

        other.trigger(StopReason::InputClosed);
        assert_eq!(stop.reason(), Some(StopReason::InputClosed));
    }

    #[tokio::test]
    async fn stopped_returns_immediately_when_already_triggered() {
        let stop = StopSignal::new();
        stop.trigger(StopReason::Timeout);

        let reason = tokio::time::timeout(Duration::from_secs(1), stop.stopped())
            .await
            .expect("should not wait");
        assert_eq!(reason, StopReason::Timeout);
    }

    #[tokio::test]
    async fn stopped_wakes_waiters() {
        let stop = StopSignal::new();
        let waiter = {
            let stop = stop.clone();
            tokio::spawn(async move { stop.stopped().await })
        };

        tokio::task::yield_now().await;
        stop.trigger(StopReason::PeerClosed);

        assert_eq!(waiter.await.expect("waiter"), StopReason::PeerClosed);
    }

    #[test]
    fn transport_errors_map_to_reasons() {
        assert_eq!(StopReason::from(TransportError::ConnectionClosed), StopReason::PeerClosed);
        assert_eq!(
            StopReason::from(TransportError::Timeout(Duration::from_secs(600))),
            StopReason::Timeout
        );

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        assert_eq!(
            StopReason::from(TransportError::Io(io)),
            StopReason::Transport("reset by peer".to_string())
        );
    }

    #[test]
    fn error_classification() {
        assert!(StopReason::Timeout.is_error());
        assert!(StopReason::Transport("x".into()).is_error());
        assert!(!StopReason::Quit.is_error());
        assert!(!StopReason::PeerClosed.is_error());
        assert!(!StopReason::InputClosed.is_error());
        assert!(!StopReason::Interrupted.is_error());
    }
}
