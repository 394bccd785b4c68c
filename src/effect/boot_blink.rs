//! Boot blink: white on/off while the device starts up

use embassy_time::Duration;

use super::Effect;
use crate::color::{BLACK, Rgb, WHITE};

const BLINK_INTERVAL_MS: u64 = 300;

#[derive(Debug, Clone, Default)]
pub struct BootBlinkEffect {
    lit: bool,
}

impl BootBlinkEffect {
    pub const fn is_lit(&self) -> bool {
        self.lit
    }
}

impl Effect for BootBlinkEffect {
    const INTERVAL: Duration = Duration::from_millis(BLINK_INTERVAL_MS);

    fn first_frame(&self) -> Rgb {
        WHITE
    }

    fn step(&mut self) -> Option<Rgb> {
        self.lit = !self.lit;
        Some(if self.lit { WHITE } else { BLACK })
    }

    fn reset(&mut self) {
        self.lit = false;
    }
}
