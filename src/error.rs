//! Error taxonomy
//!
//! None of these are fatal: the orchestrator turns every one of them into a
//! fallback message on the display and keeps the loop running.

use embedded_io::ErrorKind;
use thiserror::Error;

/// Network failures while fetching an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed")]
    Connect,
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("body read failed: {0:?}")]
    Read(ErrorKind),
}

/// Local storage failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("could not create directory")]
    CreateDir,
    #[error("could not open file for writing")]
    Open,
    #[error("write failed: {0:?}")]
    Write(ErrorKind),
    #[error("read failed")]
    Read,
    #[error("remove failed")]
    Remove,
    #[error("stored file is missing or empty")]
    Empty,
    #[error("could not allocate {0} bytes")]
    NoMemory(usize),
}

/// Image decoding failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("not a recognised image")]
    BadSignature,
    #[error("image data ended early")]
    Truncated,
    #[error("malformed image data")]
    Malformed,
    #[error("invalid image dimensions")]
    BadDimensions,
    #[error("unsupported image feature")]
    Unsupported,
    #[error("decoder backend failed")]
    Backend,
}

/// Everything that can go wrong while delivering a notification asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
    #[error("asset not found")]
    NotFound,
    #[error("invalid asset name")]
    InvalidName,
}
