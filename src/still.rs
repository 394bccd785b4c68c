//! Static renderer
//!
//! Draws a single-frame image once. The whole file is loaded into a
//! [`ScratchBuffer`] that is released before returning, whatever the
//! outcome.

use log::{info, warn};

use crate::asset::AssetName;
use crate::blit::{Blitter, Placement};
use crate::buffer::ScratchBuffer;
use crate::decode::StillDecoder;
use crate::error::NotifyError;
use crate::storage::AssetStorage;
use crate::surface::Surface;

/// Decode `name` from storage and draw it at the display origin
pub fn render_still<St, D, Su, const W: usize>(
    storage: &mut St,
    decoder: &mut D,
    surface: &mut Su,
    name: &AssetName,
) -> Result<(), NotifyError>
where
    St: AssetStorage,
    D: StillDecoder,
    Su: Surface,
{
    let path = name.path();
    let len = match storage.size(&path) {
        Some(len) if len > 0 => len,
        _ => {
            warn!("still: {} not found", path);
            return Err(NotifyError::NotFound);
        }
    };

    let buffer = ScratchBuffer::load(storage, &path, len)?;
    let mut sink = Blitter::<Su, W>::new(surface, Placement::Origin);
    let result = decoder.decode(&buffer, &mut sink);
    drop(buffer);

    match result {
        Ok(()) => {
            info!("still: drew {} ({} bytes)", name, len);
            Ok(())
        }
        Err(e) => {
            warn!("still: decoding {} failed: {}", name, e);
            Err(e.into())
        }
    }
}
