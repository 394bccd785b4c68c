use embassy_time::Instant;

use crate::LedDriver;
use crate::color::{Rgb, parse_hex_color, rgb_from_u32};
use crate::effect::LedMode;
use crate::led_engine::LedEngine;

/// Direct LED controls issued from the device's local web API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    /// Set brightness (zero is ignored)
    Brightness(u8),
    /// Show a static color
    StaticColor(Rgb),
    /// Play a heartbeat burst
    Heartbeat { color: Rgb, pulses: u8 },
}

impl LedCommand {
    /// Build a brightness command from a raw request value
    ///
    /// Only 1..=255 is accepted.
    pub fn brightness(raw: i32) -> Option<Self> {
        u8::try_from(raw)
            .ok()
            .filter(|b| *b >= 1)
            .map(Self::Brightness)
    }

    /// Build a static color command from a hex string
    pub fn static_color(hex: &str) -> Option<Self> {
        parse_hex_color(hex).map(|c| Self::StaticColor(rgb_from_u32(c)))
    }

    /// Build a heartbeat command from a hex string and pulse count
    ///
    /// Pulse counts outside 0..=255 are clamped; zero is turned into the
    /// default by the engine.
    pub fn heartbeat(hex: &str, pulses: i32) -> Option<Self> {
        let color = rgb_from_u32(parse_hex_color(hex)?);
        let pulses = u8::try_from(pulses.clamp(0, 255)).unwrap_or(u8::MAX);
        Some(Self::Heartbeat { color, pulses })
    }

    /// Apply the command to the engine
    pub fn apply<D: LedDriver>(self, engine: &mut LedEngine<D>, now: Instant) {
        match self {
            Self::Brightness(brightness) => engine.set_brightness(brightness),
            Self::StaticColor(color) => {
                engine.set_color(color);
                engine.set_mode(LedMode::StaticColor, now);
            }
            Self::Heartbeat { color, pulses } => engine.trigger_heartbeat(color, pulses, now),
        }
    }
}
