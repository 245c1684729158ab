//! File-backed pixel sources
//!
//! Image files are read and decoded lazily, when the orchestrator asks for
//! pixels, so one unreadable file only fails its own result.

use async_trait::async_trait;
use spamlens_core::{Error, PixelGrid, PixelSource, Result};
use spamlens_engine::ImageSubmission;
use std::path::{Path, PathBuf};

/// An image file decoded with the `image` crate
#[derive(Debug, Clone)]
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PixelSource for ImageFile {
    async fn decode(&self) -> Result<PixelGrid> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::decode(format!("{}: {}", self.path.display(), e)))?;

        tokio::task::spawn_blocking(move || decode_bytes(&bytes))
            .await
            .map_err(|e| Error::decode(e.to_string()))?
    }
}

/// Decode an encoded image into RGBA pixels
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelGrid> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| Error::decode(e.to_string()))?
        .to_rgba8();

    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    PixelGrid::from_rgba_bytes(width, height, rgba.as_raw())
}

/// One submission per file, identified by its position on the command line
pub fn submissions(paths: &[PathBuf]) -> Vec<ImageSubmission> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ImageSubmission::new(format!("image-{}", i + 1), name, ImageFile::new(path))
        })
        .collect()
}
