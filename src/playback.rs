//! Animated playback session
//!
//! At most one animation plays at a time. The session owns the asset's
//! bytes and the decoder state; [`PlaybackSession::tick`] draws at most one
//! frame per call and never touches storage.

use embassy_time::Instant;
use log::{debug, info, warn};

use crate::asset::AssetName;
use crate::blit::{Blitter, Placement};
use crate::buffer::ScratchBuffer;
use crate::decode::{AnimationDecoder, FrameStatus};
use crate::error::{DecodeError, NotifyError};
use crate::storage::AssetStorage;
use crate::surface::Surface;

/// Observable state of the session
///
/// Loading happens inside [`PlaybackSession::request_play`] and is never
/// seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    /// A stop was requested and runs on the next tick
    Stopping,
}

/// Resource counters, for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub buffers_allocated: u32,
    pub buffers_released: u32,
    pub decoder_opens: u32,
    pub live_buffers: u32,
    pub peak_live_buffers: u32,
}

impl SessionStats {
    fn allocated(&mut self) {
        self.buffers_allocated += 1;
        self.live_buffers += 1;
        self.peak_live_buffers = self.peak_live_buffers.max(self.live_buffers);
    }

    fn released(&mut self) {
        self.buffers_released += 1;
        self.live_buffers = self.live_buffers.saturating_sub(1);
    }
}

struct Active<G> {
    name: AssetName,
    buffer: ScratchBuffer,
    decoder: G,
    next_due: Instant,
}

enum TickOutcome {
    Drawn,
    Failed(DecodeError),
}

/// Single animated playback session
///
/// `W` is the widest display row in pixels.
pub struct PlaybackSession<G: AnimationDecoder, const W: usize> {
    active: Option<Active<G>>,
    stop_requested: bool,
    stats: SessionStats,
}

impl<G: AnimationDecoder, const W: usize> Default for PlaybackSession<G, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: AnimationDecoder, const W: usize> PlaybackSession<G, W> {
    pub const fn new() -> Self {
        Self {
            active: None,
            stop_requested: false,
            stats: SessionStats {
                buffers_allocated: 0,
                buffers_released: 0,
                decoder_opens: 0,
                live_buffers: 0,
                peak_live_buffers: 0,
            },
        }
    }

    pub fn state(&self) -> PlaybackState {
        match (&self.active, self.stop_requested) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Playing,
            (Some(_), true) => PlaybackState::Stopping,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    /// Asset currently held by the session
    pub fn active_asset(&self) -> Option<&AssetName> {
        self.active.as_ref().map(|active| &active.name)
    }

    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// When the next frame is due, if playing
    pub fn next_frame_due(&self) -> Option<Instant> {
        self.active.as_ref().map(|active| active.next_due)
    }

    /// Start playing `name`, replacing whatever is playing
    ///
    /// A request for the asset already playing changes nothing. Otherwise
    /// the current session is torn down before the new buffer is
    /// allocated, then the asset is loaded and its decoder opened. The
    /// first frame is drawn by the next tick.
    pub fn request_play<S: AssetStorage>(
        &mut self,
        name: &AssetName,
        storage: &mut S,
        now: Instant,
    ) -> Result<(), NotifyError> {
        if self.active_asset() == Some(name) {
            debug!("playback: {} already playing", name);
            self.stop_requested = false;
            return Ok(());
        }
        self.stop();

        let path = name.path();
        let len = match storage.size(&path) {
            Some(len) if len > 0 => len,
            _ => {
                warn!("playback: {} not found", path);
                return Err(NotifyError::NotFound);
            }
        };

        let buffer = ScratchBuffer::load(storage, &path, len)?;
        self.stats.allocated();

        let decoder = match G::open(&buffer) {
            Ok(decoder) => decoder,
            Err(e) => {
                warn!("playback: cannot open {}: {}", name, e);
                drop(buffer);
                self.stats.released();
                return Err(e.into());
            }
        };
        self.stats.decoder_opens += 1;

        info!("playback: playing {} ({} bytes)", name, len);
        self.active = Some(Active {
            name: name.clone(),
            buffer,
            decoder,
            next_due: now,
        });
        Ok(())
    }

    /// Ask the session to stop on its next tick
    pub fn request_stop(&mut self) {
        if self.active.is_some() {
            self.stop_requested = true;
        }
    }

    /// Stop right away, releasing the decoder and buffer
    pub fn stop(&mut self) {
        self.stop_requested = false;
        if let Some(active) = self.active.take() {
            let Active {
                name,
                buffer,
                decoder,
                ..
            } = active;
            drop(decoder);
            drop(buffer);
            self.stats.released();
            info!("playback: stopped {}", name);
        }
    }

    /// Advance playback, drawing at most one frame
    ///
    /// Returns `true` when a frame was drawn. A decode error ends the
    /// session.
    pub fn tick<S: Surface>(&mut self, now: Instant, surface: &mut S) -> bool {
        if self.stop_requested {
            self.stop();
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if now < active.next_due {
            return false;
        }

        let outcome = Self::advance(active, now, surface);
        match outcome {
            TickOutcome::Drawn => true,
            TickOutcome::Failed(e) => {
                warn!("playback: frame decode failed: {}", e);
                self.stop();
                false
            }
        }
    }

    fn advance<S: Surface>(active: &mut Active<G>, now: Instant, surface: &mut S) -> TickOutcome {
        let mut sink = Blitter::<S, W>::new(surface, Placement::Centered);
        let mut status = active.decoder.next_frame(&active.buffer, &mut sink);
        if matches!(status, Ok(FrameStatus::EndOfStream)) {
            active.decoder.rewind();
            status = active.decoder.next_frame(&active.buffer, &mut sink);
        }
        match status {
            Ok(FrameStatus::Drawn { delay }) => {
                active.next_due = now + delay;
                TickOutcome::Drawn
            }
            // Nothing to draw even from the start
            Ok(FrameStatus::EndOfStream) => TickOutcome::Failed(DecodeError::Truncated),
            Err(e) => TickOutcome::Failed(e),
        }
    }
}
