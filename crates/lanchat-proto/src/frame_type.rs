//! Frame type byte.

use std::fmt;

/// Known frame types.
///
/// The set is closed and the values are fixed by the wire format. Frames with
/// other type bytes are still valid on the wire; they simply have no
/// `FrameType` (see [`FrameType::from_u8`]).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Client handshake carrying the UTF-8 username.
    Hello = 0x01,
    /// Client chat line carrying UTF-8 text.
    Msg = 0x02,
    /// Server error carrying UTF-8 text.
    Err = 0x05,
    /// Server acknowledgement, empty payload.
    Ok = 0x06,
    /// Server broadcast carrying a [`crate::Broadcast`].
    MsgBroadcast = 0x12,
}

impl FrameType {
    /// All known frame types.
    pub const ALL: [Self; 5] = [Self::Hello, Self::Msg, Self::Err, Self::Ok, Self::MsgBroadcast];

    /// Map a wire byte to a known type. `None` if unrecognized.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Hello),
            0x02 => Some(Self::Msg),
            0x05 => Some(Self::Err),
            0x06 => Some(Self::Ok),
            0x12 => Some(Self::MsgBroadcast),
            _ => None,
        }
    }

    /// Wire byte for this type.
    #[must_use]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Protocol name as used in the wire format description.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hello => "HELLO",
            Self::Msg => "MSG",
            Self::Err => "ERR",
            Self::Ok => "OK",
            Self::MsgBroadcast => "MSG_BROADCAST",
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:#04x})", self.name(), self.to_u8())
    }
}
