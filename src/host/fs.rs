use std::fs::{self, File};
use std::io::{self, Read as _, Write as _};
use std::path::{Path, PathBuf};

use embedded_io::{ErrorKind, ErrorType};

use super::io_kind;
use crate::storage::AssetStorage;

/// [`AssetStorage`] rooted at a host directory
///
/// Logical paths such as `/images/a.gif` resolve below `root`.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

/// File writer handed out by [`FsStorage::create`]
#[derive(Debug)]
pub struct FsWriter {
    file: File,
}

impl ErrorType for FsWriter {
    type Error = ErrorKind;
}

impl embedded_io::Write for FsWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.file.write(buf).map_err(|e| io_kind(&e))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.file.flush().map_err(|e| io_kind(&e))
    }
}

impl AssetStorage for FsStorage {
    type Error = io::Error;
    type Writer<'a> = FsWriter;

    fn ensure_dir(&mut self, dir: &str) -> Result<(), Self::Error> {
        fs::create_dir_all(self.resolve(dir))
    }

    fn create(&mut self, path: &str) -> Result<Self::Writer<'_>, Self::Error> {
        let file = File::create(self.resolve(path))?;
        Ok(FsWriter { file })
    }

    fn size(&mut self, path: &str) -> Option<usize> {
        let metadata = fs::metadata(self.resolve(path)).ok()?;
        if !metadata.is_file() {
            return None;
        }
        usize::try_from(metadata.len()).ok()
    }

    fn read(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut file = File::open(self.resolve(path))?;
        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn list(&mut self, dir: &str) -> Result<Vec<String>, Self::Error> {
        let dir = self.resolve(dir);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn remove(&mut self, path: &str) -> Result<(), Self::Error> {
        fs::remove_file(self.resolve(path))
    }
}
