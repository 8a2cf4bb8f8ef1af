//! # lanchat: Wire Format
//!
//! This crate implements the binary framing layer for the lanchat protocol.
//! It is pure encode/decode: no I/O, no concurrency.
//!
//! ## Protocol Design
//!
//! Every message on the stream is a [`Frame`]:
//!
//! ```text
//! Frame := type:u8  length:u32  payload:byte[length]
//! ```
//!
//! All multi-byte integers are Big Endian. The [`FrameType`] byte selects how
//! the payload is interpreted. Most payloads are plain UTF-8 text; the server
//! broadcast carries a structured [`Broadcast`]:
//!
//! ```text
//! Broadcast := ts_ms:u64  ulen:u16  username:byte[ulen]  mlen:u32  message:byte[mlen]
//! ```
//!
//! ## Implementation Notes
//!
//! - **Zero-Copy Header**: The 5-byte [`FrameHeader`] is parsed with
//!   [`zerocopy`](https://docs.rs/zerocopy). Every 5-byte pattern is a valid
//!   header, so parsing only fails on short input.
//!
//! - **Unknown Types Are Frames**: A header with an unrecognized type byte is
//!   still a well-formed frame. Readers consume its payload and move on, so an
//!   extension never desynchronizes the stream.
//!
//! - **Lenient Text**: Usernames and messages are display-only. Malformed UTF-8
//!   is replaced with U+FFFD instead of failing the frame.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod broadcast;
pub mod errors;
pub mod frame;
pub mod frame_type;
pub mod header;

pub use broadcast::Broadcast;
pub use errors::{ProtocolError, Result};
pub use frame::Frame;
pub use frame_type::FrameType;
pub use header::FrameHeader;
