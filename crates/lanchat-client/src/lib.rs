//! Client
//!
//! Full-duplex TCP session for the lanchat protocol. A [`Session`] connects,
//! announces the user with a single HELLO frame, then runs two independent
//! tasks over the split stream until either side ends the conversation.
//!
//! # Architecture
//!
//! - [`ReceiveLoop`]: reads frames and turns them into [`ChatEvent`]s
//! - [`SendLoop`]: turns local input lines into `MSG` frames
//! - [`StopSignal`]: the single cancellation primitive shared by both loops
//!   and the controller; records the first [`StopReason`]
//! - [`Session`]: connects, spawns the loops, waits for the stop signal and
//!   closes the socket exactly once
//!
//! Frames are read through [`transport`], which owns partial-read assembly and
//! per-call deadlines. Presentation is left to the caller: events arrive on a
//! channel and the session returns why it stopped.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod error;
mod event;
pub mod input;
mod receive_loop;
mod send_loop;
mod session;
mod stop;
pub mod transport;

pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_IO_TIMEOUT, DEFAULT_PORT, SessionConfig,
};
pub use error::{ConfigError, SessionError, TransportError};
pub use event::ChatEvent;
pub use lanchat_proto::{Broadcast, ProtocolError};
pub use receive_loop::ReceiveLoop;
pub use send_loop::{LineCommand, QUIT_COMMAND, SendLoop, parse_line};
pub use session::Session;
pub use stop::{StopReason, StopSignal};
