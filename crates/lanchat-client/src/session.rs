//! Session controller.
//!
//! Owns the TCP stream from connect to close. After the HELLO frame is sent
//! the stream is split between a [`ReceiveLoop`] and a [`SendLoop`], each on
//! its own task. The controller then waits for the shared [`StopSignal`],
//! collects both halves back, and shuts the socket down. Loops never close
//! the socket; the controller does it exactly once.

use std::{
    io,
    net::{Shutdown, SocketAddr},
    time::Duration,
};

use lanchat_proto::Frame;
use tokio::{net::TcpStream, sync::mpsc, task::JoinHandle, time::timeout};

use crate::{
    ChatEvent, ReceiveLoop, SendLoop, SessionConfig, StopReason, StopSignal, error::SessionError,
    transport,
};

/// How long the controller waits for each loop to hand back its half after
/// the stop signal is set. A loop that overruns is aborted.
const JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// A connected, greeted chat session.
#[derive(Debug)]
pub struct Session {
    stream: TcpStream,
    config: SessionConfig,
    stop: StopSignal,
}

impl Session {
    /// Validate `config`, connect, and send HELLO.
    ///
    /// No response to HELLO is awaited: the server may answer with `OK`,
    /// `ERR`, or nothing, and all of those are handled by the receive loop.
    ///
    /// # Errors
    ///
    /// - `SessionError::Config` if the settings are invalid
    /// - `SessionError::Connect` / `SessionError::ConnectTimeout` if the TCP
    ///   connection cannot be established (not retried)
    /// - `SessionError::Handshake` if HELLO cannot be written; the socket is
    ///   closed before returning
    pub async fn connect(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let addr = config.addr();
        tracing::debug!(%addr, username = %config.username, "connecting");

        let connect = TcpStream::connect((config.host.as_str(), config.port));
        let mut stream = match timeout(config.connect_timeout, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(SessionError::Connect { addr, source }),
            Err(_) => {
                return Err(SessionError::ConnectTimeout { addr, timeout: config.connect_timeout });
            },
        };

        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(error = %e, "failed to set TCP_NODELAY");
        }

        let hello = Frame::hello(&config.username);
        if let Err(e) = transport::write_frame(&mut stream, &hello, config.io_timeout).await {
            close_transport(stream);
            return Err(SessionError::Handshake(e));
        }

        tracing::info!(%addr, username = %config.username, "connected");

        Ok(Self { stream, config, stop: StopSignal::new() })
    }

    /// Handle for stopping the session from outside, e.g. on Ctrl-C.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Local address of the connection.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.stream.local_addr()
    }

    /// Settings the session was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run both loops until the session stops, then close the connection.
    ///
    /// Lines from `input` are sent as `MSG` frames; inbound frames are
    /// delivered to `events`. The `events` channel closes once the receive
    /// loop has exited. Returns the first reason the session stopped.
    pub async fn run(
        self,
        input: mpsc::Receiver<String>,
        events: mpsc::Sender<ChatEvent>,
    ) -> StopReason {
        let Self { stream, config, stop } = self;
        let (reader, writer) = stream.into_split();

        let receive =
            tokio::spawn(ReceiveLoop::new(reader, config.io_timeout, events, stop.clone()).run());
        let send = tokio::spawn(SendLoop::new(writer, config.io_timeout, input, stop.clone()).run());

        let reason = stop.stopped().await;
        tracing::info!(%reason, "session stopping");

        let reader = join_loop("receive", receive).await;
        let writer = join_loop("send", send).await;

        // A missing half has already been dropped, which closes its side.
        if let (Some(reader), Some(writer)) = (reader, writer) {
            match reader.reunite(writer) {
                Ok(stream) => close_transport(stream),
                Err(e) => tracing::debug!(error = %e, "stream halves did not match"),
            }
        }

        tracing::debug!("session closed");
        reason
    }
}

/// Wait for a loop task to return its stream half.
async fn join_loop<T>(name: &'static str, mut handle: JoinHandle<T>) -> Option<T> {
    match timeout(JOIN_TIMEOUT, &mut handle).await {
        Ok(Ok(half)) => Some(half),
        Ok(Err(e)) => {
            tracing::warn!(task = name, error = %e, "loop task failed");
            None
        },
        Err(_) => {
            tracing::warn!(task = name, "loop did not stop in time, aborting");
            handle.abort();
            None
        },
    }
}

/// Best-effort bidirectional shutdown, then drop. Errors are ignored.
fn close_transport(stream: TcpStream) {
    match stream.into_std() {
        Ok(stream) => {
            if let Err(e) = stream.shutdown(Shutdown::Both) {
                tracing::trace!(error = %e, "shutdown failed");
            }
        },
        Err(e) => tracing::trace!(error = %e, "could not detach stream for shutdown"),
    }
}
