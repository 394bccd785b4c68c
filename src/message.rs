//! Notification messages
//!
//! A [`NotificationEvent`] is consumed once: it drives the LED effect and is
//! rendered as text, then dropped.

use alloc::format;
use alloc::string::String;

use embassy_time::Instant;
use log::debug;
use serde::{Deserialize, Deserializer};

use crate::LedDriver;
use crate::color::{parse_hex_color, rgb_from_u32};
use crate::effect::LedMode;
use crate::led_engine::LedEngine;

/// Text message with optional LED instructions
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationEvent {
    pub text: String,
    pub sender: String,
    /// Arrival time as `YYYY-MM-DD HH:MM:SS`
    pub time: String,
    pub weather: String,
    pub city: String,
    pub country: String,
    pub temp_f: i32,
    /// 0xRRGGBB, accepted as a number or a hex string
    #[serde(deserialize_with = "color_value")]
    pub led_color: u32,
    pub use_led_color: bool,
    #[serde(deserialize_with = "color_value")]
    pub heartbeat_color: u32,
    pub use_heartbeat: bool,
    pub heartbeat_pulses: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Number(u32),
    Hex(String),
}

/// Colors arrive either as numbers or as hex strings; unparsable means off
fn color_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(match ColorValue::deserialize(deserializer)? {
        ColorValue::Number(value) => value,
        ColorValue::Hex(hex) => parse_hex_color(&hex).unwrap_or(0),
    })
}

impl NotificationEvent {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Multi-line text shown on the display
    ///
    /// Sender, text, a blank line, weather, location, a blank line and the
    /// arrival time. Missing parts leave their line empty.
    pub fn format_for_display(&self) -> String {
        let weather = match (self.weather.is_empty(), self.temp_f) {
            (false, 0) => self.weather.clone(),
            (false, temp) => format!("{} {}F", self.weather, temp),
            (true, 0) => String::new(),
            (true, temp) => format!("{temp}F"),
        };
        let place = match (self.city.is_empty(), self.country.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.country),
            (false, true) => self.city.clone(),
            (true, false) => self.country.clone(),
            (true, true) => String::new(),
        };
        format!(
            "{}\n{}\n\n{}\n{}\n\n{}\n",
            self.sender,
            self.text,
            weather,
            place,
            pretty_time(&self.time)
        )
    }

    /// Drive the LED for this message
    ///
    /// A flagged heartbeat with a color wins over a flagged static color.
    /// Returns `true` when the LED was changed.
    pub fn apply_led_effect<D: LedDriver>(&self, engine: &mut LedEngine<D>, now: Instant) -> bool {
        if self.use_heartbeat && self.heartbeat_color != 0 {
            debug!(
                "message: heartbeat {:06X} x{}",
                self.heartbeat_color, self.heartbeat_pulses
            );
            engine.trigger_heartbeat(rgb_from_u32(self.heartbeat_color), self.heartbeat_pulses, now);
            true
        } else if self.use_led_color && self.led_color != 0 {
            debug!("message: static color {:06X}", self.led_color);
            engine.set_color(rgb_from_u32(self.led_color));
            engine.set_mode(LedMode::StaticColor, now);
            true
        } else {
            debug!("message: no LED effect");
            false
        }
    }
}

/// Turn `YYYY-MM-DD HH:MM:SS` into `MM/DD/YY HH:MM AM/PM`
///
/// Anything else is returned unchanged.
pub fn pretty_time(input: &str) -> String {
    parse_timestamp(input).map_or_else(
        || String::from(input),
        |[year, month, day, hour, minute, _]| {
            let hour12 = match hour % 12 {
                0 => 12,
                h => h,
            };
            let meridiem = if hour < 12 { "AM" } else { "PM" };
            format!(
                "{:02}/{:02}/{:02} {:02}:{:02} {}",
                month,
                day,
                year % 100,
                hour12,
                minute,
                meridiem
            )
        },
    )
}

fn parse_timestamp(input: &str) -> Option<[u32; 6]> {
    let (date, time) = input.trim().split_once(' ')?;
    let mut fields = [0u32; 6];
    let mut parts = date.split('-').chain(time.trim().split(':'));
    for field in &mut fields {
        *field = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(fields)
}
