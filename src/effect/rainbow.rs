//! Rainbow fade
//!
//! A hue counter walks a 1536-step wheel made of six 256-wide linear
//! segments. The counter survives mode switches.

use embassy_time::Duration;

use super::Effect;
use crate::color::Rgb;

const RAINBOW_INTERVAL_MS: u64 = 8;
const HUE_STEP: u16 = 2;
const HUE_CYCLE: u16 = 1536;

#[derive(Debug, Clone, Default)]
pub struct RainbowEffect {
    hue: u16,
}

impl RainbowEffect {
    pub const fn hue(&self) -> u16 {
        self.hue
    }
}

/// Map a position on the 1536-step wheel to a fully saturated color
#[allow(clippy::cast_possible_truncation)]
pub fn hue_wheel(hue: u16) -> Rgb {
    let h = hue % HUE_CYCLE;
    let (r, g, b) = match h {
        0..=255 => (255, h, 0),
        256..=511 => (511 - h, 255, 0),
        512..=767 => (0, 255, h - 512),
        768..=1023 => (0, 1023 - h, 255),
        1024..=1279 => (h - 1024, 0, 255),
        _ => (255, 0, 1535 - h),
    };
    Rgb {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}

impl Effect for RainbowEffect {
    const INTERVAL: Duration = Duration::from_millis(RAINBOW_INTERVAL_MS);

    fn first_frame(&self) -> Rgb {
        hue_wheel(0)
    }

    fn step(&mut self) -> Option<Rgb> {
        self.hue = (self.hue + HUE_STEP) % HUE_CYCLE;
        Some(hue_wheel(self.hue))
    }
}
