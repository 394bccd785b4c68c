//! Decoder seams
//!
//! Decoders never own the encoded bytes or the display. Every call receives
//! the session's buffer and a [`LineSink`] explicitly, so any number of
//! sessions can exist side by side without shared state.

use embassy_time::Duration;
use embedded_graphics::prelude::Size;

use crate::error::DecodeError;

/// Pixel payload of one decoded row
#[derive(Debug, Clone, Copy)]
pub enum Pixels<'a> {
    /// Palette indices with an RGB888 palette (3 bytes per entry)
    Indexed {
        indices: &'a [u8],
        palette: &'a [u8],
        transparent: Option<u8>,
    },
    /// Packed RGB888 triples
    Rgb888(&'a [u8]),
}

/// One decoded row, positioned on the image's logical canvas
#[derive(Debug, Clone, Copy)]
pub struct ScanLine<'a> {
    /// Size of the whole image canvas
    pub canvas: Size,
    /// Column of the first pixel on the canvas
    pub x: u16,
    /// Row on the canvas
    pub y: u16,
    pub pixels: Pixels<'a>,
}

/// Receives decoded rows
pub trait LineSink {
    fn line(&mut self, line: &ScanLine<'_>);
}

/// Outcome of [`AnimationDecoder::next_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was drawn; show it for `delay`
    Drawn { delay: Duration },
    /// No frames left; rewind to loop
    EndOfStream,
}

/// Frame-by-frame decoder over an in-memory animation
pub trait AnimationDecoder: Sized {
    /// Validate `data` and prepare to decode its first frame
    fn open(data: &[u8]) -> Result<Self, DecodeError>;

    /// Decode the next frame of `data` into `sink`
    ///
    /// `data` must be the same bytes passed to [`AnimationDecoder::open`].
    fn next_frame<S: LineSink>(&mut self, data: &[u8], sink: &mut S) -> Result<FrameStatus, DecodeError>;

    /// Go back to the first frame
    fn rewind(&mut self);

    /// Size of the animation canvas
    fn canvas(&self) -> Size;
}

/// Single-pass decoder for still images
pub trait StillDecoder {
    /// Decode the whole of `data` into `sink`
    fn decode<S: LineSink>(&mut self, data: &[u8], sink: &mut S) -> Result<(), DecodeError>;
}
