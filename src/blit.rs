//! Scan line blitter
//!
//! Converts decoder rows to RGB565 and pushes them to a [`Surface`] through
//! a fixed line buffer. `W` is the widest row the display can show; longer
//! rows are clipped.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use heapless::Vec;

use crate::color::to_rgb565;
use crate::decode::{LineSink, Pixels, ScanLine};
use crate::surface::Surface;

/// Where the image canvas goes on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Canvas top-left at the display origin
    #[default]
    Origin,
    /// Canvas centred on the display
    Centered,
}

impl Placement {
    /// Display position of the canvas origin
    #[allow(clippy::cast_possible_wrap)]
    fn offset(self, display: Size, canvas: Size) -> Point {
        match self {
            Self::Origin => Point::zero(),
            Self::Centered => Point::new(
                (display.width as i32 - canvas.width as i32) / 2,
                (display.height as i32 - canvas.height as i32) / 2,
            ),
        }
    }
}

/// [`LineSink`] drawing onto a [`Surface`]
pub struct Blitter<'a, S: Surface, const W: usize> {
    surface: &'a mut S,
    placement: Placement,
    display: Size,
    line: Vec<Rgb565, W>,
    /// Display position of the first pixel in `line`
    run_start: Point,
}

impl<'a, S: Surface, const W: usize> Blitter<'a, S, W> {
    pub fn new(surface: &'a mut S, placement: Placement) -> Self {
        let display = surface.size();
        Self {
            surface,
            placement,
            display,
            line: Vec::new(),
            run_start: Point::zero(),
        }
    }

    fn flush(&mut self) {
        if !self.line.is_empty() {
            self.surface.blit_row(self.run_start, &self.line);
            self.line.clear();
        }
    }

    /// Queue one pixel at display position `at`, `None` leaves it untouched
    fn put(&mut self, at: Point, color: Option<Rgb565>) {
        let Some(color) = color else {
            self.flush();
            return;
        };
        if self.line.is_empty() {
            self.run_start = at;
        }
        if self.line.push(color).is_err() {
            self.flush();
            self.run_start = at;
            // Capacity is at least one once flushed
            let _ = self.line.push(color);
        }
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn visible(&self, at: Point) -> bool {
        at.x >= 0
            && at.y >= 0
            && at.x < self.display.width as i32
            && at.y < self.display.height as i32
            && (at.x as usize) < W
    }
}

fn palette_color(palette: &[u8], index: u8) -> Option<Rgb565> {
    let start = usize::from(index) * 3;
    match palette.get(start..start + 3) {
        Some(&[r, g, b]) => Some(to_rgb565(r, g, b)),
        _ => None,
    }
}

impl<S: Surface, const W: usize> LineSink for Blitter<'_, S, W> {
    fn line(&mut self, line: &ScanLine<'_>) {
        let origin = self.placement.offset(self.display, line.canvas)
            + Point::new(i32::from(line.x), i32::from(line.y));
        if origin.y < 0 || origin.y >= i32::try_from(self.display.height).unwrap_or(i32::MAX) {
            return;
        }

        let mut at = origin;
        match line.pixels {
            Pixels::Indexed {
                indices,
                palette,
                transparent,
            } => {
                for &index in indices {
                    let color = if transparent == Some(index) {
                        None
                    } else {
                        palette_color(palette, index)
                    };
                    let color = color.filter(|_| self.visible(at));
                    self.put(at, color);
                    at.x += 1;
                }
            }
            Pixels::Rgb888(bytes) => {
                for rgb in bytes.chunks_exact(3) {
                    let color = Some(to_rgb565(rgb[0], rgb[1], rgb[2])).filter(|_| self.visible(at));
                    self.put(at, color);
                    at.x += 1;
                }
            }
        }
        self.flush();
    }
}
