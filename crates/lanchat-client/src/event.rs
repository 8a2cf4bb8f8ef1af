//! Events delivered to the presentation layer.

use lanchat_proto::{Broadcast, Frame, FrameType, ProtocolError};

/// Something the user should see, derived from one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Server acknowledged a request (`OK`).
    Ack,
    /// Server rejected a request (`ERR`).
    ServerError {
        /// Error text from the payload (lossy UTF-8).
        text: String,
    },
    /// Chat message relayed by the server (`MSG_BROADCAST`).
    Message(Broadcast),
    /// A `MSG_BROADCAST` whose payload could not be parsed. The session
    /// continues.
    MalformedBroadcast {
        /// Why the payload was rejected.
        error: ProtocolError,
    },
}

impl ChatEvent {
    /// Interpret an inbound frame.
    ///
    /// Returns `None` for frames the client does not display: unknown types
    /// and the client-to-server types `HELLO` and `MSG`.
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        match frame.frame_type() {
            Some(FrameType::Ok) => Some(Self::Ack),
            Some(FrameType::Err) => Some(Self::ServerError { text: frame.text_lossy() }),
            Some(FrameType::MsgBroadcast) => match Broadcast::decode(&frame.payload) {
                Ok(broadcast) => Some(Self::Message(broadcast)),
                Err(error) => {
                    tracing::warn!(%error, size = frame.payload.len(), "malformed broadcast");
                    Some(Self::MalformedBroadcast { error })
                },
            },
            Some(other @ (FrameType::Hello | FrameType::Msg)) => {
                tracing::trace!(frame_type = %other, "ignoring client-bound frame type");
                None
            },
            None => {
                tracing::trace!(
                    frame_type = frame.header.frame_type(),
                    size = frame.payload.len(),
                    "discarding unknown frame"
                );
                None
            },
        }
    }
}
