//! Frame transport over a byte stream.
//!
//! [`read_exact`] is the only place partial reads are handled; everything
//! above it works with whole frames. Deadlines apply to each individual read
//! or write call, so a slow but steady peer never times out while an idle one
//! does.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use lanchat_proto::{Frame, FrameHeader};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    time::timeout,
};

use crate::error::TransportError;

/// Upper bound on buffer growth per read, so a header declaring a huge payload
/// does not allocate before the bytes actually arrive.
const READ_CHUNK: usize = 64 * 1024;

/// Read exactly `n` bytes from `reader`.
///
/// # Errors
///
/// - `TransportError::ConnectionClosed` if a read returns zero bytes before
///   `n` bytes are collected
/// - `TransportError::Timeout` if any single read waits longer than
///   `deadline`
/// - `TransportError::Io` on socket errors
pub async fn read_exact<R>(
    reader: &mut R,
    n: usize,
    deadline: Duration,
) -> Result<Bytes, TransportError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = BytesMut::with_capacity(n.min(READ_CHUNK));

    while buf.len() < n {
        let remaining = n - buf.len();
        buf.reserve(remaining.min(READ_CHUNK));

        let mut limited = (&mut *reader).take(remaining as u64);
        let read = timeout(deadline, limited.read_buf(&mut buf))
            .await
            .map_err(|_| TransportError::Timeout(deadline))??;

        if read == 0 {
            return Err(TransportError::ConnectionClosed);
        }
    }

    debug_assert_eq!(buf.len(), n);
    Ok(buf.freeze())
}

/// Read one complete frame: a 5-byte header, then exactly `payload_size`
/// bytes.
///
/// Unknown frame types are returned like any other frame; the caller decides
/// whether to ignore them. Either way the stream stays aligned on the next
/// header.
pub async fn read_frame<R>(reader: &mut R, deadline: Duration) -> Result<Frame, TransportError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let header_bytes = read_exact(reader, FrameHeader::SIZE, deadline).await?;
    let header = FrameHeader::from_bytes(&header_bytes)?;

    let payload = read_exact(reader, header.payload_size() as usize, deadline).await?;

    Ok(Frame { header, payload })
}

/// Write one complete frame and flush it.
///
/// The frame is encoded into a single buffer first so header and payload go
/// out in one `write_all`.
pub async fn write_frame<W>(
    writer: &mut W,
    frame: &Frame,
    deadline: Duration,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let buf = frame.to_vec()?;

    timeout(deadline, async {
        writer.write_all(&buf).await?;
        writer.flush().await?;
        Ok::<(), std::io::Error>(())
    })
    .await
    .map_err(|_| TransportError::Timeout(deadline))??;

    Ok(())
}
