//! Heartbeat override
//!
//! A short burst of on/off pulses that masks the base mode while active.

use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb, rgb_from_u32};

/// Phase durations, indexed by `phase % 4`: on, off, on, long off
const BEAT_DURATIONS_MS: [u64; 4] = [80, 80, 80, 300];

/// Pulse count used when zero pulses are requested
pub const DEFAULT_PULSES: u8 = 2;

/// Default heartbeat color (0xFF0055)
pub const DEFAULT_HEARTBEAT_COLOR: Rgb = rgb_from_u32(0x00FF_0055);

/// Result of advancing the override by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatStep {
    /// The current phase has not elapsed yet
    Waiting,
    /// A phase transition happened; emit this (unscaled) color
    Emit(Rgb),
    /// All phases ran; the override is now inactive
    Finished,
}

#[derive(Debug, Clone)]
pub struct HeartbeatOverride {
    active: bool,
    color: Rgb,
    pulses: u8,
    phase: u16,
    phase_start: Instant,
}

impl Default for HeartbeatOverride {
    fn default() -> Self {
        Self {
            active: false,
            color: DEFAULT_HEARTBEAT_COLOR,
            pulses: DEFAULT_PULSES,
            phase: 0,
            phase_start: Instant::from_millis(0),
        }
    }
}

impl HeartbeatOverride {
    /// Arm the override at phase 0
    pub fn trigger(&mut self, color: Rgb, pulses: u8, now: Instant) {
        self.active = true;
        self.color = color;
        self.pulses = if pulses == 0 { DEFAULT_PULSES } else { pulses };
        self.phase = 0;
        self.phase_start = now;
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub const fn pulses(&self) -> u8 {
        self.pulses
    }

    pub const fn phase(&self) -> u16 {
        self.phase
    }

    /// Number of phase transitions before the override clears
    #[allow(clippy::cast_lossless)]
    pub const fn phase_count(&self) -> u16 {
        self.pulses as u16 * 2
    }

    /// Advance the override
    pub fn tick(&mut self, now: Instant) -> HeartbeatStep {
        if !self.active {
            return HeartbeatStep::Finished;
        }

        if self.phase >= self.phase_count() {
            self.active = false;
            self.phase = 0;
            return HeartbeatStep::Finished;
        }

        let duration = Duration::from_millis(BEAT_DURATIONS_MS[usize::from(self.phase % 4)]);
        if now.saturating_duration_since(self.phase_start) < duration {
            return HeartbeatStep::Waiting;
        }

        let on = self.phase % 2 == 0;
        self.phase += 1;
        self.phase_start = now;
        HeartbeatStep::Emit(if on { self.color } else { BLACK })
    }
}
