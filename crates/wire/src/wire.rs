// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefix framing and bincode encoding.
//!
//! `encode`/`decode` are pure byte transforms; `read_message`/
//! `write_message` move one frame; the typed helpers bound a whole
//! job or result transfer with a timeout. A truncated or structurally
//! invalid stream fails closed, never yielding a partial entity.

use std::time::Duration;

use fcc_core::{CompileJob, CompileResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Hard cap on a single frame. A malformed length prefix must not be
/// able to exhaust memory.
pub const MAX_FRAME_LEN: usize = 256 * 1024 * 1024;

/// Errors from wire encode/decode and framed I/O.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection closed before a complete frame")]
    ConnectionClosed,

    #[error("timed out waiting on the peer")]
    Timeout,

    #[error("frame of {0} bytes exceeds the {MAX_FRAME_LEN}-byte cap")]
    FrameTooLarge(usize),

    #[error("encode failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("decode failed: {0}")]
    Decode(#[source] bincode::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Serialize a value to its payload bytes (no length prefix).
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    bincode::serialize(value).map_err(ProtocolError::Encode)
}

/// Deserialize a payload produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    bincode::deserialize(bytes).map_err(ProtocolError::Decode)
}

/// Read one length-prefixed frame as a complete unit.
pub async fn read_message<R>(reader: &mut R) -> Result<Vec<u8>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await.map_err(map_eof)?;

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge(len));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await.map_err(map_eof)?;
    Ok(payload)
}

/// Write one length-prefixed frame.
pub async fn write_message<W>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge(payload.len()));
    }
    writer.write_all(&(payload.len() as u32).to_be_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Read a complete [`CompileJob`] within `timeout`.
pub async fn read_job<R>(reader: &mut R, timeout: Duration) -> Result<CompileJob, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let payload = with_timeout(timeout, read_message(reader)).await?;
    decode(&payload)
}

/// Write a [`CompileJob`] within `timeout`.
pub async fn write_job<W>(
    writer: &mut W,
    job: &CompileJob,
    timeout: Duration,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let payload = encode(job)?;
    with_timeout(timeout, write_message(writer, &payload)).await
}

/// Read a complete [`CompileResult`] within `timeout`.
pub async fn read_result<R>(
    reader: &mut R,
    timeout: Duration,
) -> Result<CompileResult, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let payload = with_timeout(timeout, read_message(reader)).await?;
    decode(&payload)
}

/// Write a [`CompileResult`] within `timeout`.
pub async fn write_result<W>(
    writer: &mut W,
    result: &CompileResult,
    timeout: Duration,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let payload = encode(result)?;
    with_timeout(timeout, write_message(writer, &payload)).await
}

async fn with_timeout<F, T>(timeout: Duration, fut: F) -> Result<T, ProtocolError>
where
    F: std::future::Future<Output = Result<T, ProtocolError>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| ProtocolError::Timeout)?
}

fn map_eof(e: std::io::Error) -> ProtocolError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        ProtocolError::ConnectionClosed
    } else {
        ProtocolError::Io(e)
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
