#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::BTreeMap;

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::{PointsIter, Rectangle};
use embedded_hal::delay::DelayNs;
use lovebyte_composer::decode::{LineSink, Pixels, ScanLine, StillDecoder};
use lovebyte_composer::error::DecodeError;
use lovebyte_composer::fetch::{Response, Transport};
use lovebyte_composer::surface::{Surface, TextStyle};
use lovebyte_composer::{AssetStorage, LedDriver, Rgb};
#[cfg(feature = "std")]
use lovebyte_composer::{Board, GifDecoder};

/// Surface backed by a framebuffer that also records text
pub struct RecordingSurface {
    size: Size,
    pixels: Vec<Rgb565>,
    pub texts: Vec<(Point, String, TextStyle)>,
    pub rows: usize,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
            texts: Vec::new(),
            rows: 0,
            clears: 0,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[(y as u32 * self.size.width + x as u32) as usize]
    }

    pub fn last_text(&self) -> Option<&str> {
        self.texts.last().map(|(_, text, _)| text.as_str())
    }

    fn set(&mut self, x: i32, y: i32, color: Rgb565) {
        if x >= 0 && y >= 0 && (x as u32) < self.size.width && (y as u32) < self.size.height {
            let index = (y as u32 * self.size.width + x as u32) as usize;
            self.pixels[index] = color;
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, area: Rectangle, color: Rgb565) {
        if area == Rectangle::new(Point::zero(), self.size) {
            self.clears += 1;
        }
        for point in area.points() {
            self.set(point.x, point.y, color);
        }
    }

    fn draw_text(&mut self, origin: Point, text: &str, style: TextStyle) {
        self.texts.push((origin, text.to_string(), style));
    }

    fn blit_row(&mut self, origin: Point, pixels: &[Rgb565]) {
        self.rows += 1;
        for (i, color) in pixels.iter().enumerate() {
            self.set(origin.x + i as i32, origin.y, *color);
        }
    }
}

#[derive(Debug)]
pub struct MemError;

/// In-memory storage keyed by logical path
#[derive(Default)]
pub struct MemStorage {
    pub files: BTreeMap<String, Vec<u8>>,
    pub fail_dirs: bool,
    pub reads: usize,
}

impl MemStorage {
    pub fn with_file(path: &str, bytes: Vec<u8>) -> Self {
        let mut storage = Self::default();
        storage.files.insert(path.to_string(), bytes);
        storage
    }
}

pub struct MemWriter<'a> {
    file: &'a mut Vec<u8>,
}

impl embedded_io::ErrorType for MemWriter<'_> {
    type Error = core::convert::Infallible;
}

impl embedded_io::Write for MemWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.file.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl AssetStorage for MemStorage {
    type Error = MemError;
    type Writer<'a> = MemWriter<'a>;

    fn ensure_dir(&mut self, _dir: &str) -> Result<(), Self::Error> {
        if self.fail_dirs { Err(MemError) } else { Ok(()) }
    }

    fn create(&mut self, path: &str) -> Result<Self::Writer<'_>, Self::Error> {
        let file = self.files.entry(path.to_string()).or_default();
        file.clear();
        Ok(MemWriter { file })
    }

    fn size(&mut self, path: &str) -> Option<usize> {
        self.files.get(path).map(Vec::len)
    }

    fn read(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.reads += 1;
        let file = self.files.get(path).ok_or(MemError)?;
        let len = file.len().min(buf.len());
        buf[..len].copy_from_slice(&file[..len]);
        Ok(len)
    }

    fn list(&mut self, dir: &str) -> Result<Vec<String>, Self::Error> {
        let prefix = format!("{dir}/");
        Ok(self
            .files
            .keys()
            .filter_map(|path| path.strip_prefix(&prefix))
            .map(str::to_string)
            .collect())
    }

    fn remove(&mut self, path: &str) -> Result<(), Self::Error> {
        self.files.remove(path).map(|_| ()).ok_or(MemError)
    }
}

/// Transport serving canned responses; unknown URLs fail to connect
#[derive(Default)]
pub struct MockTransport {
    pub responses: BTreeMap<String, (u16, Vec<u8>)>,
    pub requests: Vec<String>,
}

impl MockTransport {
    pub fn serving(url: &str, status: u16, body: Vec<u8>) -> Self {
        let mut transport = Self::default();
        transport.responses.insert(url.to_string(), (status, body));
        transport
    }
}

impl Transport for MockTransport {
    type Error = MemError;
    type Body<'a> = &'a [u8];

    fn get(&mut self, url: &str) -> Result<Response<Self::Body<'_>>, Self::Error> {
        self.requests.push(url.to_string());
        let (status, body) = self.responses.get(url).ok_or(MemError)?;
        Ok(Response {
            status: *status,
            body: body.as_slice(),
        })
    }
}

/// LED driver remembering every color written
#[derive(Default)]
pub struct RecordingLed {
    pub writes: Vec<Rgb>,
}

impl RecordingLed {
    pub fn last(&self) -> Option<Rgb> {
        self.writes.last().copied()
    }
}

impl LedDriver for RecordingLed {
    fn write(&mut self, color: Rgb) {
        self.writes.push(color);
    }
}

/// Delay that returns at once and adds up what was asked for
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
    pub calls_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Still decoder reading a tiny raw format: width, height, then RGB888 rows
#[derive(Default)]
pub struct RawStillDecoder;

impl StillDecoder for RawStillDecoder {
    fn decode<S: LineSink>(&mut self, data: &[u8], sink: &mut S) -> Result<(), DecodeError> {
        let [width, height, rest @ ..] = data else {
            return Err(DecodeError::Truncated);
        };
        if *width == 0 || *height == 0 {
            return Err(DecodeError::BadDimensions);
        }
        let stride = usize::from(*width) * 3;
        if rest.len() < stride * usize::from(*height) {
            return Err(DecodeError::Truncated);
        }
        let canvas = Size::new(u32::from(*width), u32::from(*height));
        for (y, row) in rest.chunks_exact(stride).take(usize::from(*height)).enumerate() {
            sink.line(&ScanLine {
                canvas,
                x: 0,
                y: y as u16,
                pixels: Pixels::Rgb888(row),
            });
        }
        Ok(())
    }
}

/// Encode a raw still image for [`RawStillDecoder`]
pub fn raw_still(width: u8, height: u8, rgb: [u8; 3]) -> Vec<u8> {
    let mut bytes = vec![width, height];
    for _ in 0..usize::from(width) * usize::from(height) {
        bytes.extend_from_slice(&rgb);
    }
    bytes
}

#[cfg(feature = "std")]
pub struct TestBoard;

#[cfg(feature = "std")]
impl Board for TestBoard {
    type Storage = MemStorage;
    type Transport = MockTransport;
    type Surface = RecordingSurface;
    type Delay = RecordingDelay;
    type Led = RecordingLed;
    type Still = RawStillDecoder;
    type Animation = GifDecoder;
}

/// Sink collecting palette indices per row
#[derive(Default)]
pub struct IndexSink {
    pub lines: Vec<(u16, u16, Vec<u8>)>,
    pub transparent: Option<u8>,
}

impl LineSink for IndexSink {
    fn line(&mut self, line: &ScanLine<'_>) {
        if let Pixels::Indexed {
            indices,
            transparent,
            ..
        } = line.pixels
        {
            self.transparent = transparent;
            self.lines.push((line.x, line.y, indices.to_vec()));
        }
    }
}

/// One frame for [`build_gif`]
#[derive(Clone)]
pub struct GifFrame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    /// Row-major indices in display order
    pub indices: Vec<u8>,
    pub delay_cs: u16,
    pub transparent: Option<u8>,
    pub interlaced: bool,
}

impl GifFrame {
    pub fn full(width: u16, height: u16, indices: Vec<u8>, delay_cs: u16) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
            indices,
            delay_cs,
            transparent: None,
            interlaced: false,
        }
    }
}

/// Encode a GIF89a with a global palette
pub fn build_gif(width: u16, height: u16, palette: &[[u8; 3]], frames: &[GifFrame]) -> Vec<u8> {
    let palette: Vec<u8> = palette.iter().flatten().copied().collect();
    let mut encoder = gif::Encoder::new(Vec::new(), width, height, &palette).unwrap();
    for frame in frames {
        // The encoder stores rows as given
        let buffer = if frame.interlaced {
            interlace(&frame.indices, usize::from(frame.width), usize::from(frame.height))
        } else {
            frame.indices.clone()
        };
        encoder
            .write_frame(&gif::Frame {
                left: frame.left,
                top: frame.top,
                width: frame.width,
                height: frame.height,
                delay: frame.delay_cs,
                transparent: frame.transparent,
                interlaced: frame.interlaced,
                buffer: Cow::Owned(buffer),
                ..gif::Frame::default()
            })
            .unwrap();
    }
    encoder.into_inner().unwrap()
}

/// Reorder display-order rows into interlaced storage order
fn interlace(indices: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(indices.len());
    for (start, step) in [(0, 8), (4, 8), (2, 4), (1, 2)] {
        for row in (start..height).step_by(step) {
            out.extend_from_slice(&indices[row * width..(row + 1) * width]);
        }
    }
    out
}

/// 256 grey levels
pub fn grey_palette() -> Vec<[u8; 3]> {
    (0..=255u8).map(|level| [level; 3]).collect()
}

/// Deterministic pseudo-random indices
pub fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (seed >> 24) as u8
        })
        .collect()
}

/// 1x1 GIF89a with a transparent white pixel
pub const TINY_GIF: [u8; 43] = [
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xFF, 0xFF,
    0xFF, 0x00, 0x00, 0x00, 0x21, 0xF9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3B,
];

/// Offset of the LZW minimum code size in [`TINY_GIF`]
pub const TINY_GIF_CODE_SIZE: usize = 37;

/// 1x1 GIF whose image data is clear, then a code not yet defined
pub fn bad_code_gif() -> Vec<u8> {
    let mut data = TINY_GIF[..19].to_vec();
    data.extend_from_slice(&[0x2C, 0, 0, 0, 0, 1, 0, 1, 0, 0x00, 0x02]);
    // codes 4, 7, 5 at three bits each
    data.extend_from_slice(&[0x02, 0x7C, 0x01, 0x00, 0x3B]);
    data
}

pub const PALETTE: [[u8; 3]; 4] = [[0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255]];

pub const RED: Rgb565 = Rgb565::RED;
pub const GREEN: Rgb565 = Rgb565::GREEN;
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Two-frame 2x2 animation: all red (100 ms) then all green (50 ms)
pub fn two_frame_gif() -> Vec<u8> {
    build_gif(
        2,
        2,
        &PALETTE,
        &[
            GifFrame::full(2, 2, vec![1; 4], 10),
            GifFrame::full(2, 2, vec![2; 4], 5),
        ],
    )
}
