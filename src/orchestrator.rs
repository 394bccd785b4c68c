//! Notification orchestrator
//!
//! Ties message and image arrival to the display, the playback session and
//! the LED engine. Event entry points may block briefly (network fetch,
//! banner hold); [`Orchestrator::tick`] never does.

use alloc::string::String;
use alloc::vec::Vec;

use embassy_time::Instant;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::Point;
use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::LedDriver;
use crate::asset::{AssetKind, AssetName};
use crate::color::BANNER_PINK;
use crate::command::LedCommand;
use crate::config::Endpoint;
use crate::decode::{AnimationDecoder, StillDecoder};
use crate::error::{NotifyError, StorageError};
use crate::fetch::{Transport, fetch_asset};
use crate::led_engine::LedEngine;
use crate::message::NotificationEvent;
use crate::playback::PlaybackSession;
use crate::still::render_still;
use crate::storage::{AssetStorage, clear_images, list_images};
use crate::surface::{Surface, TextStyle};

/// Banner shown once an asset has been downloaded
pub const BANNER_TEXT: &str = "Incoming LoveByte!";
/// How long the banner stays up before the asset is shown
pub const BANNER_HOLD_MS: u32 = 500;
/// Pause between stopping playback and starting a download
pub const SETTLE_DELAY_MS: u32 = 5;

pub const DOWNLOAD_FAILED_TEXT: &str = "Image download failed";
pub const DOWNLOAD_FAILED_HOLD_MS: u32 = 1200;
pub const NOT_FOUND_TEXT: &str = "Image not found";
pub const NOT_FOUND_HOLD_MS: u32 = 900;
pub const DECODE_FAILED_TEXT: &str = "Image decode failed";
pub const DECODE_FAILED_HOLD_MS: u32 = 900;

/// Glyph width of the display font
const GLYPH_WIDTH: i32 = 10;
/// Half the glyph height, used to centre a line vertically
const HALF_LINE: i32 = 12;
/// Left margin of fallback and message text
const TEXT_MARGIN: i32 = 8;

const FALLBACK_STYLE: TextStyle = TextStyle::new(Rgb565::WHITE, Rgb565::BLACK);
const BANNER_STYLE: TextStyle = TextStyle::new(BANNER_PINK, Rgb565::BLACK);

/// Hardware the orchestrator drives
pub trait Board {
    type Storage: AssetStorage;
    type Transport: Transport;
    type Surface: Surface;
    type Delay: DelayNs;
    type Led: LedDriver;
    type Still: StillDecoder;
    type Animation: AnimationDecoder;
}

/// Owned hardware handed to [`Orchestrator::new`]
pub struct Peripherals<B: Board> {
    pub storage: B::Storage,
    pub transport: B::Transport,
    pub surface: B::Surface,
    pub delay: B::Delay,
    pub led: B::Led,
    pub still: B::Still,
}

/// Fallback shown when an asset cannot be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback {
    DownloadFailed,
    NotFound,
    DecodeFailed,
}

impl Fallback {
    const fn for_display(error: NotifyError) -> Self {
        match error {
            NotifyError::Decode(_) => Self::DecodeFailed,
            _ => Self::NotFound,
        }
    }

    const fn text(self) -> &'static str {
        match self {
            Self::DownloadFailed => DOWNLOAD_FAILED_TEXT,
            Self::NotFound => NOT_FOUND_TEXT,
            Self::DecodeFailed => DECODE_FAILED_TEXT,
        }
    }

    const fn hold_ms(self) -> u32 {
        match self {
            Self::DownloadFailed => DOWNLOAD_FAILED_HOLD_MS,
            Self::NotFound => NOT_FOUND_HOLD_MS,
            Self::DecodeFailed => DECODE_FAILED_HOLD_MS,
        }
    }
}

/// Root of the appliance: owns every peripheral and both state machines
///
/// `W` is the widest display row in pixels.
pub struct Orchestrator<B: Board, const W: usize> {
    storage: B::Storage,
    transport: B::Transport,
    surface: B::Surface,
    delay: B::Delay,
    still: B::Still,
    playback: PlaybackSession<B::Animation, W>,
    led: LedEngine<B::Led>,
}

impl<B: Board, const W: usize> Orchestrator<B, W> {
    /// Take ownership of the hardware and blank the LED
    pub fn new(peripherals: Peripherals<B>, now: Instant) -> Self {
        let Peripherals {
            storage,
            transport,
            surface,
            delay,
            led,
            still,
        } = peripherals;
        let mut led = LedEngine::new(led, now);
        led.begin(now);
        Self {
            storage,
            transport,
            surface,
            delay,
            still,
            playback: PlaybackSession::new(),
            led,
        }
    }

    pub const fn led(&self) -> &LedEngine<B::Led> {
        &self.led
    }

    pub fn led_mut(&mut self) -> &mut LedEngine<B::Led> {
        &mut self.led
    }

    pub const fn playback(&self) -> &PlaybackSession<B::Animation, W> {
        &self.playback
    }

    pub const fn surface(&self) -> &B::Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut B::Surface {
        &mut self.surface
    }

    pub const fn storage(&self) -> &B::Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut B::Storage {
        &mut self.storage
    }

    pub fn transport_mut(&mut self) -> &mut B::Transport {
        &mut self.transport
    }

    pub const fn delay(&self) -> &B::Delay {
        &self.delay
    }

    /// Download `name` from `endpoint`, announce it and show it
    pub fn receive(&mut self, name: &str, endpoint: &Endpoint, now: Instant) -> Result<(), NotifyError> {
        info!("orchestrator: receiving {}", name);
        self.playback.stop();
        self.delay.delay_ms(SETTLE_DELAY_MS);

        let fetched = AssetName::new(name)
            .and_then(|asset| fetch_asset(&mut self.storage, &mut self.transport, endpoint, &asset));
        if let Err(e) = fetched {
            warn!("orchestrator: download of {} failed: {}", name, e);
            self.show_fallback(Fallback::DownloadFailed);
            return Err(e);
        }

        self.show_banner();
        self.delay.delay_ms(BANNER_HOLD_MS);
        self.display(name, now)
    }

    /// Show an asset already in storage
    ///
    /// Animations start playing on the next tick and a repeated request for
    /// the one playing is ignored. Stills are drawn before returning.
    pub fn display(&mut self, name: &str, now: Instant) -> Result<(), NotifyError> {
        let result = AssetName::new(name).and_then(|asset| self.present(&asset, now));
        if let Err(e) = result {
            warn!("orchestrator: cannot display {}: {}", name, e);
            self.show_fallback(Fallback::for_display(e));
            return Err(e);
        }
        Ok(())
    }

    fn present(&mut self, asset: &AssetName, now: Instant) -> Result<(), NotifyError> {
        match asset.kind() {
            AssetKind::Animated => {
                if self.playback.active_asset() == Some(asset) {
                    return self.playback.request_play(asset, &mut self.storage, now);
                }
                self.playback.stop();
                self.surface.clear(Rgb565::BLACK);
                self.playback.request_play(asset, &mut self.storage, now)
            }
            AssetKind::Static => {
                self.playback.stop();
                self.surface.clear(Rgb565::BLACK);
                render_still::<_, _, _, W>(&mut self.storage, &mut self.still, &mut self.surface, asset)
            }
        }
    }

    /// Handle a text message: banner, then the LED effect, then the text
    pub fn on_message(&mut self, event: &NotificationEvent, now: Instant) {
        info!("orchestrator: message from {}", event.sender);
        self.playback.stop();
        self.show_banner();
        self.delay.delay_ms(BANNER_HOLD_MS);

        event.apply_led_effect(&mut self.led, now);
        self.surface.clear(Rgb565::BLACK);
        self.surface.draw_text(
            Point::new(TEXT_MARGIN, TEXT_MARGIN),
            &event.format_for_display(),
            FALLBACK_STYLE,
        );
    }

    /// Apply a direct LED command
    pub fn on_led_command(&mut self, command: LedCommand, now: Instant) {
        command.apply(&mut self.led, now);
    }

    /// Advance playback and the LED; call on every loop iteration
    pub fn tick(&mut self, now: Instant) {
        self.playback.tick(now, &mut self.surface);
        self.led.tick(now);
    }

    /// Names of the displayable images in storage
    pub fn list_assets(&mut self) -> Result<Vec<String>, NotifyError> {
        list_images(&mut self.storage).map_err(|e| {
            warn!("orchestrator: listing images failed: {:?}", e);
            StorageError::Read.into()
        })
    }

    /// Delete every displayable image, returning how many were removed
    pub fn clear_assets(&mut self) -> Result<usize, NotifyError> {
        self.playback.stop();
        let removed = clear_images(&mut self.storage).map_err(|e| {
            warn!("orchestrator: clearing images failed: {:?}", e);
            NotifyError::from(StorageError::Remove)
        })?;
        info!("orchestrator: removed {} images", removed);
        Ok(removed)
    }

    fn show_banner(&mut self) {
        let size = self.surface.size();
        let width = i32::try_from(size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(size.height).unwrap_or(i32::MAX);
        let text_width = i32::try_from(BANNER_TEXT.len()).unwrap_or(0) * GLYPH_WIDTH;
        let origin = Point::new((width - text_width) / 2, height / 2 - HALF_LINE);

        self.surface.clear(Rgb565::BLACK);
        self.surface.draw_text(origin, BANNER_TEXT, BANNER_STYLE);
    }

    fn show_fallback(&mut self, fallback: Fallback) {
        self.playback.stop();
        let height = i32::try_from(self.surface.size().height).unwrap_or(i32::MAX);
        self.surface.clear(Rgb565::BLACK);
        self.surface.draw_text(
            Point::new(TEXT_MARGIN, height / 2 - HALF_LINE),
            fallback.text(),
            FALLBACK_STYLE,
        );
        self.delay.delay_ms(fallback.hold_ms());
    }
}
