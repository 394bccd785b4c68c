//! LED effect engine
//!
//! Owns the status LED: base mode, static color, brightness and the
//! heartbeat override. Call [`LedEngine::tick`] on every loop iteration.

use embassy_time::Instant;
use log::debug;

use crate::LedDriver;
use crate::color::{BLACK, Rgb, WHITE, scale_rgb};
use crate::effect::{EffectBank, LedMode};
use crate::heartbeat::{HeartbeatOverride, HeartbeatStep};

/// Brightness used until the user picks another one
pub const DEFAULT_BRIGHTNESS: u8 = 255;

/// Static color used until the user picks another one
pub const DEFAULT_STATIC_COLOR: Rgb = WHITE;

/// LED Engine - single status LED state machine
pub struct LedEngine<D: LedDriver> {
    driver: D,
    mode: LedMode,
    brightness: u8,
    effects: EffectBank,
    heartbeat: HeartbeatOverride,
}

impl<D: LedDriver> LedEngine<D> {
    /// Create a new engine in boot blink mode
    ///
    /// The LED is not touched until [`LedEngine::begin`] or a tick.
    pub fn new(driver: D, now: Instant) -> Self {
        Self {
            driver,
            mode: LedMode::BootBlink,
            brightness: DEFAULT_BRIGHTNESS,
            effects: EffectBank::new(DEFAULT_STATIC_COLOR, now),
            heartbeat: HeartbeatOverride::default(),
        }
    }

    /// Blank the LED and restart in boot blink mode
    pub fn begin(&mut self, now: Instant) {
        self.driver.write(BLACK);
        self.heartbeat = HeartbeatOverride::default();
        self.mode = LedMode::BootBlink;
        self.effects.reset(LedMode::BootBlink, now);
        self.effects.static_color.mark_dirty();
    }

    pub const fn mode(&self) -> LedMode {
        self.mode
    }

    pub const fn color(&self) -> Rgb {
        self.effects.static_color.color()
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn is_heartbeat_active(&self) -> bool {
        self.heartbeat.is_active()
    }

    pub const fn heartbeat(&self) -> &HeartbeatOverride {
        &self.heartbeat
    }

    pub const fn effects(&self) -> &EffectBank {
        &self.effects
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Select a base mode
    ///
    /// Re-selecting the current mode is ignored so running animations are
    /// not restarted. While a heartbeat runs the new mode is only recorded;
    /// its first frame is drawn when the heartbeat completes.
    pub fn set_mode(&mut self, mode: LedMode, now: Instant) {
        if mode == self.mode && !self.heartbeat.is_active() {
            return;
        }
        debug!("led: mode {} -> {}", self.mode.as_str(), mode.as_str());
        self.mode = mode;
        if self.heartbeat.is_active() {
            self.effects.reset(mode, now);
            return;
        }
        self.apply_mode(now);
    }

    /// Set the static color; redraws at once when it is visible
    pub fn set_color(&mut self, color: Rgb) {
        self.effects.static_color.set_color(color);
        if self.mode == LedMode::StaticColor && !self.heartbeat.is_active() {
            self.emit(color);
            self.effects.static_color.mark_clean();
        }
    }

    /// Set the global brightness and redraw the current mode's frame
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.effects.static_color.mark_dirty();
        if self.heartbeat.is_active() {
            return;
        }
        self.emit(self.effects.first_frame(self.mode));
        self.effects.static_color.mark_clean();
    }

    /// Start a heartbeat burst; zero pulses means the default two
    pub fn trigger_heartbeat(&mut self, color: Rgb, pulses: u8, now: Instant) {
        self.heartbeat.trigger(color, pulses, now);
        debug!(
            "led: heartbeat {:06X} x{}",
            crate::color::rgb_to_u32(color),
            self.heartbeat.pulses()
        );
    }

    /// Advance the LED by one step
    pub fn tick(&mut self, now: Instant) {
        if self.heartbeat.is_active() {
            match self.heartbeat.tick(now) {
                HeartbeatStep::Waiting => {}
                HeartbeatStep::Emit(color) => self.emit(color),
                HeartbeatStep::Finished => self.apply_mode(now),
            }
            return;
        }

        if let Some(color) = self.effects.render(self.mode, now) {
            self.emit(color);
        }
    }

    /// Reset the current mode and draw its first frame
    fn apply_mode(&mut self, now: Instant) {
        self.effects.reset(self.mode, now);
        self.emit(self.effects.first_frame(self.mode));
    }

    fn emit(&mut self, color: Rgb) {
        self.driver.write(scale_rgb(color, self.brightness));
    }
}
