use std::io;
use std::path::{Path, PathBuf};

use crate::config::MIB;

/// A video file picked by the user
#[derive(Debug, Clone)]
pub struct VideoFile {
    name: String,
    size: u64,
    content: Content,
}

#[derive(Debug, Clone)]
enum Content {
    Memory(Vec<u8>),
    Disk(PathBuf),
    Discarded,
}

impl VideoFile {
    /// Wrap bytes already received, e.g. from a form upload
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: data.len() as u64,
            content: Content::Memory(data),
        }
    }

    /// A selection whose content was dropped after `size` bytes had been seen.
    ///
    /// Only the size survives, so it can still be reported as too large.
    pub fn discarded(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content: Content::Discarded,
        }
    }

    /// Reference a file on disk; only its metadata is read here
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            name,
            size: metadata.len(),
            content: Content::Disk(path.to_path_buf()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Size in mebibytes
    pub fn size_mib(&self) -> f64 {
        self.size as f64 / MIB as f64
    }

    /// Consume the file and return its raw bytes
    pub async fn into_bytes(self) -> io::Result<Vec<u8>> {
        match self.content {
            Content::Memory(data) => Ok(data),
            Content::Disk(path) => tokio::fs::read(path).await,
            Content::Discarded => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("content of {} was not kept", self.name),
            )),
        }
    }
}
