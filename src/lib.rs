#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod asset;
pub mod blit;
pub mod buffer;
pub mod color;
pub mod command;
pub mod config;
pub mod decode;
pub mod effect;
pub mod error;
pub mod fetch;
pub mod heartbeat;
pub mod led_engine;
pub mod math8;
pub mod message;
pub mod orchestrator;
pub mod playback;
pub mod still;
pub mod storage;
pub mod surface;

#[cfg(feature = "std")]
pub mod host;

pub use asset::{AssetKind, AssetName};
pub use command::LedCommand;
pub use config::{DeviceConfig, Endpoint};
pub use decode::{AnimationDecoder, LineSink, ScanLine, StillDecoder};
pub use effect::LedMode;
pub use error::{DecodeError, NotifyError, StorageError, TransportError};
pub use fetch::Transport;
#[cfg(feature = "std")]
pub use host::GifDecoder;
pub use led_engine::LedEngine;
pub use message::NotificationEvent;
pub use orchestrator::{Board, Orchestrator, Peripherals};
pub use playback::{PlaybackSession, PlaybackState, SessionStats};
pub use storage::AssetStorage;
pub use surface::Surface;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract status LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The LED engine is generic over this trait.
pub trait LedDriver {
    /// Write a color to the LED
    fn write(&mut self, color: Rgb);
}
