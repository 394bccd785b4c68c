//! Asset fetcher
//!
//! Downloads one asset into local storage: a single GET, streamed to
//! storage in bounded chunks, then verified. There is no retry; callers
//! decide whether to try again.

use core::fmt::Debug;

use embedded_io::{Error as _, Read, Write};
use log::{info, warn};

use crate::asset::{AssetName, IMAGES_DIR};
use crate::config::Endpoint;
use crate::error::{NotifyError, StorageError, TransportError};
use crate::storage::AssetStorage;

/// Size of the chunks copied from the network to storage
pub const FETCH_CHUNK_SIZE: usize = 2048;

/// HTTP status that counts as success
pub const HTTP_OK: u16 = 200;

/// Response of a GET request
pub struct Response<B> {
    pub status: u16,
    pub body: B,
}

/// Blocking HTTP client seam
pub trait Transport {
    type Error: Debug;

    /// Body reader; the connection is released on drop
    type Body<'a>: Read
    where
        Self: 'a;

    /// Issue a GET request and return the status with a body reader
    fn get(&mut self, url: &str) -> Result<Response<Self::Body<'_>>, Self::Error>;
}

/// Download `name` from `endpoint` into `/images/<name>`
///
/// Returns the stored length. A partially written file is left on storage
/// when the transfer fails midway.
pub fn fetch_asset<S, T>(
    storage: &mut S,
    transport: &mut T,
    endpoint: &Endpoint,
    name: &AssetName,
) -> Result<usize, NotifyError>
where
    S: AssetStorage,
    T: Transport,
{
    let url = endpoint.image_url(name.as_str());
    let path = name.path();
    info!("fetch: downloading {}", url);

    storage.ensure_dir(IMAGES_DIR).map_err(|e| {
        warn!("fetch: cannot create {}: {:?}", IMAGES_DIR, e);
        StorageError::CreateDir
    })?;

    let response = transport.get(&url).map_err(|e| {
        warn!("fetch: GET {} failed: {:?}", url, e);
        TransportError::Connect
    })?;
    info!("fetch: GET returned {}", response.status);
    if response.status != HTTP_OK {
        return Err(TransportError::Status(response.status).into());
    }

    let mut body = response.body;
    let mut file = storage.create(&path).map_err(|e| {
        warn!("fetch: cannot open {}: {:?}", path, e);
        StorageError::Open
    })?;

    let mut chunk = [0u8; FETCH_CHUNK_SIZE];
    let mut total = 0usize;
    loop {
        let read = body
            .read(&mut chunk)
            .map_err(|e| TransportError::Read(e.kind()))?;
        if read == 0 {
            break;
        }
        file.write_all(&chunk[..read])
            .map_err(|e| StorageError::Write(e.kind()))?;
        total += read;
    }
    file.flush().map_err(|e| StorageError::Write(e.kind()))?;
    drop(file);
    drop(body);

    let stored = verify_stored(storage, &path)?;
    info!("fetch: stored {} ({} bytes received)", path, total);
    Ok(stored)
}

/// Check that `path` exists and is not empty, returning its length
pub fn verify_stored<S: AssetStorage>(storage: &mut S, path: &str) -> Result<usize, StorageError> {
    match storage.size(path) {
        Some(len) if len > 0 => Ok(len),
        _ => {
            warn!("fetch: {} missing or empty after write", path);
            Err(StorageError::Empty)
        }
    }
}
