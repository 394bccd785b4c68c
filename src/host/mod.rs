//! Host backends
//!
//! Implementations of the seams on top of the standard library, for
//! targets with `std` (ESP-IDF, simulators, tools and tests).

mod fs;
mod gif_decoder;
#[cfg(feature = "http")]
mod http;
mod image_decoder;

pub use fs::{FsStorage, FsWriter};
pub use gif_decoder::GifDecoder;
#[cfg(feature = "http")]
pub use http::{HttpBody, HttpTransport};
pub use image_decoder::ImageStillDecoder;

/// Map a `std::io` error onto the `embedded-io` error kinds
pub(crate) fn io_kind(error: &std::io::Error) -> embedded_io::ErrorKind {
    use embedded_io::ErrorKind;
    use std::io::ErrorKind as Std;

    match error.kind() {
        Std::NotFound => ErrorKind::NotFound,
        Std::PermissionDenied => ErrorKind::PermissionDenied,
        Std::ConnectionRefused => ErrorKind::ConnectionRefused,
        Std::ConnectionReset => ErrorKind::ConnectionReset,
        Std::ConnectionAborted => ErrorKind::ConnectionAborted,
        Std::NotConnected => ErrorKind::NotConnected,
        Std::AlreadyExists => ErrorKind::AlreadyExists,
        Std::BrokenPipe => ErrorKind::BrokenPipe,
        Std::InvalidInput => ErrorKind::InvalidInput,
        Std::InvalidData => ErrorKind::InvalidData,
        Std::TimedOut => ErrorKind::TimedOut,
        Std::Interrupted => ErrorKind::Interrupted,
        Std::Unsupported => ErrorKind::Unsupported,
        Std::OutOfMemory => ErrorKind::OutOfMemory,
        _ => ErrorKind::Other,
    }
}
