//! Read-only byte storage behind a digit store

use std::fs::File;
use std::io;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

/// Immutable bytes of a digit file, mapped once and shared by every reader
#[derive(Debug)]
pub(crate) enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Backing {
    /// Map a file read-only. Empty files get an owned buffer since
    /// zero-length mappings are rejected on some platforms.
    pub(crate) fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        debug!(path = %path.display(), len, "Backing::open: called");

        if len == 0 {
            return Ok(Self::Owned(Vec::new()));
        }

        // SAFETY: the map is only valid while the file stays unchanged. Another
        // process truncating it while mapped makes reads fault with SIGBUS.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self::Mapped(mmap))
    }
}

impl Deref for Backing {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => mmap,
            Self::Owned(bytes) => bytes,
        }
    }
}

impl From<Vec<u8>> for Backing {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Owned(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_maps_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("digits.txt");
        fs::write(&path, b"14159").unwrap();

        let backing = Backing::open(&path).unwrap();
        assert!(matches!(backing, Backing::Mapped(_)));
        assert_eq!(&*backing, b"14159");
    }

    #[test]
    fn test_open_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        let backing = Backing::open(&path).unwrap();
        assert!(backing.is_empty());
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Backing::open(&temp.path().join("missing.bin")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
