//! Display surface seam
//!
//! The engine only needs three primitives: fill a region, draw text and
//! blit a row of pixels. [`GraphicsSurface`] provides them on top of any
//! `embedded-graphics` draw target.

use core::fmt::Debug;

use embedded_graphics::{
    mono_font::{MonoTextStyleBuilder, ascii::FONT_10X20},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};
use log::warn;

/// Text appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Rgb565,
    pub background: Rgb565,
}

impl TextStyle {
    pub const fn new(color: Rgb565, background: Rgb565) -> Self {
        Self { color, background }
    }
}

/// Display primitives used by the renderers
pub trait Surface {
    /// Size of the visible area
    fn size(&self) -> Size;

    /// Fill `area` with a solid color
    fn fill(&mut self, area: Rectangle, color: Rgb565);

    /// Draw (possibly multi-line) text with its top-left corner at `origin`
    fn draw_text(&mut self, origin: Point, text: &str, style: TextStyle);

    /// Copy one row of pixels starting at `origin`
    fn blit_row(&mut self, origin: Point, pixels: &[Rgb565]);

    /// Fill the whole surface
    fn clear(&mut self, color: Rgb565) {
        let area = Rectangle::new(Point::zero(), self.size());
        self.fill(area, color);
    }
}

/// [`Surface`] over an `embedded-graphics` draw target
pub struct GraphicsSurface<D> {
    target: D,
}

impl<D> GraphicsSurface<D> {
    pub const fn new(target: D) -> Self {
        Self { target }
    }

    pub const fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> Surface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
    D::Error: Debug,
{
    fn size(&self) -> Size {
        OriginDimensions::size(&self.target)
    }

    fn fill(&mut self, area: Rectangle, color: Rgb565) {
        if let Err(e) = self.target.fill_solid(&area, color) {
            warn!("display: fill failed: {:?}", e);
        }
    }

    fn draw_text(&mut self, origin: Point, text: &str, style: TextStyle) {
        let character_style = MonoTextStyleBuilder::new()
            .font(&FONT_10X20)
            .text_color(style.color)
            .background_color(style.background)
            .build();
        if let Err(e) = Text::with_baseline(text, origin, character_style, Baseline::Top)
            .draw(&mut self.target)
        {
            warn!("display: text failed: {:?}", e);
        }
    }

    fn blit_row(&mut self, origin: Point, pixels: &[Rgb565]) {
        let Ok(width) = u32::try_from(pixels.len()) else {
            return;
        };
        let area = Rectangle::new(origin, Size::new(width, 1));
        if let Err(e) = self.target.fill_contiguous(&area, pixels.iter().copied()) {
            warn!("display: blit failed: {:?}", e);
        }
    }
}
