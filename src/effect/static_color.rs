//! Static color fill
//!
//! Only redraws when marked dirty by a color or brightness change.

use embassy_time::Duration;

use super::Effect;
use crate::color::Rgb;

#[derive(Debug, Clone)]
pub struct StaticColorEffect {
    color: Rgb,
    dirty: bool,
}

impl StaticColorEffect {
    /// Create a new static color effect
    pub const fn new(color: Rgb) -> Self {
        Self { color, dirty: true }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Replace the color and request a redraw
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
        self.dirty = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Effect for StaticColorEffect {
    const INTERVAL: Duration = Duration::from_millis(0);

    fn first_frame(&self) -> Rgb {
        self.color
    }

    fn step(&mut self) -> Option<Rgb> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.color)
    }

    fn reset(&mut self) {
        // The first frame is drawn by the engine right after a reset
        self.dirty = false;
    }
}
