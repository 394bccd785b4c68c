use embedded_graphics::prelude::Size;
use log::warn;

use crate::decode::{LineSink, Pixels, ScanLine, StillDecoder};
use crate::error::DecodeError;

/// [`StillDecoder`] backed by the `image` crate (JPEG and PNG)
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageStillDecoder;

impl StillDecoder for ImageStillDecoder {
    fn decode<S: LineSink>(&mut self, data: &[u8], sink: &mut S) -> Result<(), DecodeError> {
        let image = image::load_from_memory(data).map_err(|e| {
            warn!("image: decode failed: {}", e);
            match e {
                image::ImageError::Unsupported(_) => DecodeError::BadSignature,
                _ => DecodeError::Backend,
            }
        })?;
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 || width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(DecodeError::BadDimensions);
        }

        let canvas = Size::new(width, height);
        let stride = width as usize * 3;
        for (y, row) in (0..=u16::MAX).zip(rgb.as_raw().chunks_exact(stride)) {
            sink.line(&ScanLine {
                canvas,
                x: 0,
                y,
                pixels: Pixels::Rgb888(row),
            });
        }
        Ok(())
    }
}
