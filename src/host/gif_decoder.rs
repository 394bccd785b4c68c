//! GIF animation backend
//!
//! Drives the `gif` crate's streaming decoder over the session's buffer.
//! Only the decoder state survives between frames: the encoded bytes are
//! borrowed again on every call and decoded indices go to the sink one row
//! at a time, so memory use is one row plus the LZW tables.
//!
//! Frame disposal methods are not applied: each frame is drawn over the
//! previous one, which is what the appliance's animations are authored for.

use alloc::vec::Vec;

use embassy_time::Duration;
use embedded_graphics::prelude::Size;
use gif::DecodingError;
use gif::streaming_decoder::{Block, Decoded, OutputBuffer, StreamingDecoder};
use log::warn;

use crate::decode::{AnimationDecoder, FrameStatus, LineSink, Pixels, ScanLine};
use crate::error::DecodeError;

/// Largest LZW minimum code size that still yields 8-bit indices
const MAX_MIN_CODE_SIZE: u8 = 8;

/// (first row, step) of each interlace pass
const PASSES: [(u16, u16); 4] = [(0, 8), (4, 8), (2, 4), (1, 2)];

impl From<DecodingError> for DecodeError {
    fn from(error: DecodingError) -> Self {
        warn!("gif: {}", error);
        match error {
            DecodingError::Format(_) => Self::Malformed,
            DecodingError::Io(e) => match e.kind() {
                std::io::ErrorKind::UnexpectedEof => Self::Truncated,
                std::io::ErrorKind::InvalidData => Self::Malformed,
                _ => Self::Backend,
            },
        }
    }
}

/// What the stream reached next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    /// Metadata of a new frame is available
    Frame,
    /// This many indices were written to the output buffer
    Pixels(usize),
    FrameEnd,
    /// Trailer, or the end of the data between two blocks
    End,
}

/// Streaming decoder plus its read position in the buffer
struct Stream {
    decoder: StreamingDecoder,
    cursor: usize,
    global_palette: Vec<u8>,
    /// Inside a block, where running out of data means truncation
    pending: bool,
    ended: bool,
}

impl Stream {
    fn new() -> Self {
        Self {
            decoder: StreamingDecoder::new(),
            cursor: 0,
            global_palette: Vec::new(),
            pending: true,
            ended: false,
        }
    }

    fn next_event(&mut self, data: &[u8], out: &mut OutputBuffer<'_>) -> Result<Event, DecodeError> {
        while !self.ended {
            let input = data.get(self.cursor..).unwrap_or_default();
            if input.is_empty() {
                if self.pending {
                    return Err(DecodeError::Truncated);
                }
                // A missing trailer is tolerated
                return Ok(Event::End);
            }

            let (consumed, decoded) = self.decoder.update(input, out)?;
            self.cursor += consumed;
            match decoded {
                Decoded::GlobalPalette(palette) => self.global_palette = palette.into_vec(),
                Decoded::HeaderEnd | Decoded::BlockFinished(_) => self.pending = false,
                // Nothing may be fed after the trailer
                Decoded::BlockStart(Block::Trailer) => self.ended = true,
                Decoded::BlockStart(_) => self.pending = true,
                Decoded::FrameMetadata(_) => {
                    // The code size byte sits just before the first sub-block length
                    let code_size = self.cursor.checked_sub(2).and_then(|pos| data.get(pos)).copied();
                    if code_size.is_none_or(|size| size > MAX_MIN_CODE_SIZE) {
                        return Err(DecodeError::Malformed);
                    }
                    return Ok(Event::Frame);
                }
                Decoded::BytesDecoded(len) => return Ok(Event::Pixels(len.get())),
                Decoded::DataEnd => {
                    self.pending = false;
                    return Ok(Event::FrameEnd);
                }
                _ => {}
            }
        }
        Ok(Event::End)
    }
}

/// Row order of a frame, following the four interlace passes when needed
struct RowOrder {
    height: u16,
    interlaced: bool,
    pass: usize,
    next: u16,
}

impl RowOrder {
    const fn new(height: u16, interlaced: bool) -> Self {
        Self {
            height,
            interlaced,
            pass: 0,
            next: 0,
        }
    }

    fn next_row(&mut self) -> Option<u16> {
        if !self.interlaced {
            let row = (self.next < self.height).then_some(self.next)?;
            self.next += 1;
            return Some(row);
        }
        while let Some(&(_, step)) = PASSES.get(self.pass) {
            if self.next < self.height {
                let row = self.next;
                self.next = self.next.saturating_add(step);
                return Some(row);
            }
            self.pass += 1;
            if let Some(&(start, _)) = PASSES.get(self.pass) {
                self.next = start;
            }
        }
        None
    }
}

/// Placement and appearance of the frame being decoded
#[derive(Debug, Clone, Copy)]
struct FrameInfo {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    interlaced: bool,
    delay: Duration,
    transparent: Option<u8>,
}

/// Frame-by-frame GIF decoder over a borrowed buffer
pub struct GifDecoder {
    canvas: Size,
    frame_count: usize,
    stream: Stream,
    /// RGB888 palette of the current frame
    palette: Vec<u8>,
    row: Vec<u8>,
}

impl GifDecoder {
    /// Number of frames found while validating the stream
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Read the metadata of the frame the stream just reached
    fn frame_info(&mut self) -> Result<FrameInfo, DecodeError> {
        let frame = self.stream.decoder.current_frame();
        if frame.width == 0 || frame.height == 0 {
            return Err(DecodeError::BadDimensions);
        }
        let palette = match frame.palette.as_deref() {
            Some(local) => local,
            None if !self.stream.global_palette.is_empty() => &self.stream.global_palette,
            None => return Err(DecodeError::Unsupported),
        };
        self.palette.clear();
        self.palette.extend_from_slice(palette);

        Ok(FrameInfo {
            left: frame.left,
            top: frame.top,
            width: frame.width,
            height: frame.height,
            interlaced: frame.interlaced,
            delay: Duration::from_millis(u64::from(frame.delay) * 10),
            transparent: frame.transparent,
        })
    }

    fn draw_frame<S: LineSink>(&mut self, data: &[u8], info: FrameInfo, sink: &mut S) -> Result<(), DecodeError> {
        let width = usize::from(info.width);
        self.row.clear();
        self.row.resize(width, 0);

        let mut rows = RowOrder::new(info.height, info.interlaced);
        let mut filled = 0;
        loop {
            let mut out = OutputBuffer::Slice(&mut self.row[filled..]);
            match self.stream.next_event(data, &mut out)? {
                Event::Pixels(len) => {
                    filled += len;
                    if filled < width {
                        continue;
                    }
                    filled = 0;
                    // Rows past the frame height are decoded and dropped
                    let Some(y) = rows.next_row() else {
                        continue;
                    };
                    sink.line(&ScanLine {
                        canvas: self.canvas,
                        x: info.left,
                        y: info.top.saturating_add(y),
                        pixels: Pixels::Indexed {
                            indices: &self.row,
                            palette: &self.palette,
                            transparent: info.transparent,
                        },
                    });
                }
                Event::FrameEnd => return Ok(()),
                Event::Frame => return Err(DecodeError::Malformed),
                Event::End => return Err(DecodeError::Truncated),
            }
        }
    }
}

impl AnimationDecoder for GifDecoder {
    fn open(data: &[u8]) -> Result<Self, DecodeError> {
        let Some(signature) = data.get(..6) else {
            return Err(DecodeError::Truncated);
        };
        if signature != b"GIF87a" && signature != b"GIF89a" {
            return Err(DecodeError::BadSignature);
        }

        let mut decoder = Self {
            canvas: Size::zero(),
            frame_count: 0,
            stream: Stream::new(),
            palette: Vec::new(),
            row: Vec::new(),
        };

        // Walk every block once without decompressing to validate the stream
        loop {
            match decoder.stream.next_event(data, &mut OutputBuffer::None)? {
                Event::Frame => {
                    decoder.frame_info()?;
                    decoder.frame_count += 1;
                }
                Event::End => break,
                Event::Pixels(_) | Event::FrameEnd => {}
            }
        }

        let width = decoder.stream.decoder.width();
        let height = decoder.stream.decoder.height();
        if width == 0 || height == 0 {
            return Err(DecodeError::BadDimensions);
        }
        if decoder.frame_count == 0 {
            return Err(DecodeError::Truncated);
        }

        decoder.canvas = Size::new(u32::from(width), u32::from(height));
        decoder.rewind();
        Ok(decoder)
    }

    fn next_frame<S: LineSink>(&mut self, data: &[u8], sink: &mut S) -> Result<FrameStatus, DecodeError> {
        loop {
            match self.stream.next_event(data, &mut OutputBuffer::None)? {
                Event::Frame => {
                    let info = self.frame_info()?;
                    self.draw_frame(data, info, sink)?;
                    return Ok(FrameStatus::Drawn { delay: info.delay });
                }
                Event::End => return Ok(FrameStatus::EndOfStream),
                Event::Pixels(_) | Event::FrameEnd => {}
            }
        }
    }

    fn rewind(&mut self) {
        self.stream = Stream::new();
    }

    fn canvas(&self) -> Size {
        self.canvas
    }
}
