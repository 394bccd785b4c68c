//! Pink breathing effect
//!
//! A triangle wave bounces between 0 and 127; the channels follow it with
//! fixed ratios that approximate hot pink.

use embassy_time::Duration;

use super::Effect;
use crate::color::{HOT_PINK, Rgb};
use crate::math8::mul_percent;

const BREATHE_INTERVAL_MS: u64 = 12;
const BREATHE_PEAK: u8 = 127;

const GREEN_PERCENT: u16 = 41;
const BLUE_PERCENT: u16 = 113;

#[derive(Debug, Clone)]
pub struct BreatheEffect {
    phase: u8,
    rising: bool,
}

impl Default for BreatheEffect {
    fn default() -> Self {
        Self {
            phase: 0,
            rising: true,
        }
    }
}

impl BreatheEffect {
    pub const fn phase(&self) -> u8 {
        self.phase
    }
}

impl Effect for BreatheEffect {
    const INTERVAL: Duration = Duration::from_millis(BREATHE_INTERVAL_MS);

    fn first_frame(&self) -> Rgb {
        HOT_PINK
    }

    fn step(&mut self) -> Option<Rgb> {
        if self.rising {
            self.phase += 1;
        } else {
            self.phase -= 1;
        }
        if self.phase == 0 || self.phase == BREATHE_PEAK {
            self.rising = !self.rising;
        }

        Some(Rgb {
            r: self.phase * 2,
            g: mul_percent(self.phase, GREEN_PERCENT),
            b: mul_percent(self.phase, BLUE_PERCENT),
        })
    }

    fn reset(&mut self) {
        self.phase = 0;
        self.rising = true;
    }
}
