//! Base LED modes with compile-time known variants
//!
//! Every mode keeps its own phase variables so switching back and forth
//! never allocates. Each mode implements the `Effect` trait and is gated by
//! its own minimum step interval.

mod boot_blink;
mod breathe;
mod rainbow;
mod static_color;

use embassy_time::{Duration, Instant};

pub use boot_blink::BootBlinkEffect;
pub use breathe::BreatheEffect;
pub use rainbow::{RainbowEffect, hue_wheel};
pub use static_color::StaticColorEffect;

use crate::color::Rgb;

const MODE_NAME_BOOT_BLINK: &str = "boot_blink";
const MODE_NAME_BREATHE_PINK: &str = "breathe_pink";
const MODE_NAME_STATIC: &str = "static";
const MODE_NAME_RAINBOW: &str = "rainbow";

const MODE_ID_BOOT_BLINK: u8 = 0;
const MODE_ID_BREATHE_PINK: u8 = 1;
const MODE_ID_STATIC: u8 = 2;
const MODE_ID_RAINBOW: u8 = 3;

pub trait Effect {
    /// Minimum time that must pass (exclusive) between two animation steps
    const INTERVAL: Duration;

    /// Color drawn as soon as the mode is selected
    fn first_frame(&self) -> Rgb;

    /// Advance the animation by one step
    ///
    /// Returns the unscaled color to emit, or `None` when nothing changed.
    fn step(&mut self) -> Option<Rgb>;

    /// Reset phase variables
    fn reset(&mut self) {}

    /// Check whether enough time passed since `last` for the next step
    fn is_due(now: Instant, last: Instant) -> bool {
        now.saturating_duration_since(last) > Self::INTERVAL
    }
}

/// Known LED modes that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LedMode {
    #[default]
    BootBlink = MODE_ID_BOOT_BLINK,
    BreathePink = MODE_ID_BREATHE_PINK,
    StaticColor = MODE_ID_STATIC,
    RainbowFade = MODE_ID_RAINBOW,
}

impl LedMode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_BOOT_BLINK => Self::BootBlink,
            MODE_ID_BREATHE_PINK => Self::BreathePink,
            MODE_ID_STATIC => Self::StaticColor,
            MODE_ID_RAINBOW => Self::RainbowFade,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BootBlink => MODE_NAME_BOOT_BLINK,
            Self::BreathePink => MODE_NAME_BREATHE_PINK,
            Self::StaticColor => MODE_NAME_STATIC,
            Self::RainbowFade => MODE_NAME_RAINBOW,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_BOOT_BLINK => Some(Self::BootBlink),
            MODE_NAME_BREATHE_PINK => Some(Self::BreathePink),
            MODE_NAME_STATIC => Some(Self::StaticColor),
            MODE_NAME_RAINBOW => Some(Self::RainbowFade),
            _ => None,
        }
    }
}

/// Phase state of every base mode
#[derive(Debug, Clone)]
pub struct EffectBank {
    pub boot_blink: BootBlinkEffect,
    pub breathe: BreatheEffect,
    pub static_color: StaticColorEffect,
    pub rainbow: RainbowEffect,
    /// Time of the last animation step of the current mode
    last_step: Instant,
}

impl EffectBank {
    pub fn new(color: Rgb, now: Instant) -> Self {
        Self {
            boot_blink: BootBlinkEffect::default(),
            breathe: BreatheEffect::default(),
            static_color: StaticColorEffect::new(color),
            rainbow: RainbowEffect::default(),
            last_step: now,
        }
    }

    /// First frame of `mode`, unscaled
    pub fn first_frame(&self, mode: LedMode) -> Rgb {
        match mode {
            LedMode::BootBlink => self.boot_blink.first_frame(),
            LedMode::BreathePink => self.breathe.first_frame(),
            LedMode::StaticColor => self.static_color.first_frame(),
            LedMode::RainbowFade => self.rainbow.first_frame(),
        }
    }

    /// Reset the phase variables of `mode` and restart its step timer
    pub fn reset(&mut self, mode: LedMode, now: Instant) {
        self.last_step = now;
        match mode {
            LedMode::BootBlink => self.boot_blink.reset(),
            LedMode::BreathePink => self.breathe.reset(),
            LedMode::StaticColor => self.static_color.reset(),
            LedMode::RainbowFade => self.rainbow.reset(),
        }
    }

    /// Advance `mode` if its interval elapsed
    pub fn render(&mut self, mode: LedMode, now: Instant) -> Option<Rgb> {
        let due = match mode {
            LedMode::BootBlink => BootBlinkEffect::is_due(now, self.last_step),
            LedMode::BreathePink => BreatheEffect::is_due(now, self.last_step),
            // Static redraws are driven by the dirty flag only
            LedMode::StaticColor => true,
            LedMode::RainbowFade => RainbowEffect::is_due(now, self.last_step),
        };
        if !due {
            return None;
        }

        let frame = match mode {
            LedMode::BootBlink => self.boot_blink.step(),
            LedMode::BreathePink => self.breathe.step(),
            LedMode::StaticColor => self.static_color.step(),
            LedMode::RainbowFade => self.rainbow.step(),
        };
        if frame.is_some() && mode != LedMode::StaticColor {
            self.last_step = now;
        }
        frame
    }
}
