//! # Image Export
//!
//! Saves a desk note as a PNG.
//!
//! ```text
//! Note → straighten (rotate = 0) → Rasterizer (scale 3×, transparent) → PNG bytes
//!                                                                     → mood-memo-2026-10-18-7.png
//! ```
//!
//! The rasterizer is a seam: the toy ships [`NoteRasterizer`](crate::render::NoteRasterizer),
//! but a host can plug in its own capture utility. While no rasterizer is
//! installed, exports fail with [`ExportError::Unavailable`], which the
//! caller shows as a "try again" notice.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::note::{Note, NoteId};

/// Errors that can occur while exporting a note.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No capture utility installed yet
    #[error("image saver not loaded")]
    Unavailable,

    #[error("note {0} not found")]
    NoteNotFound(NoteId),

    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl ExportError {
    /// Text shown to the user when the saver is not ready.
    pub const TRY_AGAIN: &'static str = "Image saver loading... please try again in a second.";

    /// The user-facing notice for this error, if it has one. Other failures
    /// are only logged.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ExportError::Unavailable => Some(Self::TRY_AGAIN),
            _ => None,
        }
    }
}

/// Draws a note into an RGBA image.
pub trait Rasterizer {
    /// Render `note` at `scale` pixels per layout unit. Pixels outside the
    /// paper must stay fully transparent.
    fn rasterize(&self, note: &Note, scale: u32) -> Result<RgbaImage, ExportError>;
}

/// A finished download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ExportedImage {
    /// Write the PNG into `dir` under its download name.
    pub fn save(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png)?;
        Ok(path)
    }
}

/// Download name for a note: `mood-memo-<date with dashes>-<id>.png`.
pub fn file_name(note: &Note) -> String {
    format!(
        "mood-memo-{}-{}.png",
        note.timestamp.replace('.', "-"),
        note.id
    )
}

pub struct ImageExporter {
    rasterizer: Option<Box<dyn Rasterizer>>,
    scale: u32,
}

impl ImageExporter {
    pub fn new(rasterizer: Box<dyn Rasterizer>, scale: u32) -> Self {
        Self {
            rasterizer: Some(rasterizer),
            scale,
        }
    }

    /// An exporter whose capture utility has not loaded yet.
    pub fn unavailable(scale: u32) -> Self {
        Self {
            rasterizer: None,
            scale,
        }
    }

    pub fn is_available(&self) -> bool {
        self.rasterizer.is_some()
    }

    pub fn install(&mut self, rasterizer: Box<dyn Rasterizer>) {
        self.rasterizer = Some(rasterizer);
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Render `note` upright and encode it as PNG.
    pub fn export(&self, note: &Note) -> Result<ExportedImage, ExportError> {
        let rasterizer = self.rasterizer.as_deref().ok_or(ExportError::Unavailable)?;

        let upright = Note {
            rotate: 0.0,
            ..note.clone()
        };
        let image = rasterizer.rasterize(&upright, self.scale)?;
        let png = encode_png(&image)?;

        Ok(ExportedImage {
            file_name: file_name(note),
            width: image.width(),
            height: image.height(),
            png,
        })
    }
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    use image::ImageEncoder;

    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e: image::ImageError| ExportError::Encode(e.to_string()))?;

    Ok(png_bytes)
}
