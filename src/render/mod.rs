//! # Note Renderer
//!
//! Draws a desk note the way it looks on the desk: a strip of thermal paper
//! with sawtooth tear edges, the mood in dark thermal ink, and the print
//! date in small grey type at the bottom-right corner.
//!
//! ## Layout (layout units, multiplied by the scale)
//!
//! ```text
//! /\/\/\/\/\/\/\/\/\/\/\/\   ← torn edge, 2% of height
//! │                      │
//! │      body text,      │   ← 12x24 cells, 24 px padding, centred
//! │   wrapped and centred│
//! │                      │
//! │          2026.10.18  │   ← 6x12 cells, 12 px from right, 8 px from bottom
//! \/\/\/\/\/\/\/\/\/\/\/\/
//! ```
//!
//! Everything outside the paper stays transparent.

mod font;

pub use font::{Face, FontMetrics, generate_glyph};

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use crate::export::{ExportError, Rasterizer};
use crate::geometry::{TextMetrics, wrap_text};
use crate::note::{Color, Note};

/// Thermal ink for the body text.
pub const INK: Color = Color::from_hex(0x18181b);

/// Faded grey for the date stamp.
pub const STAMP_INK: Color = Color::from_hex(0xa1a1aa);

/// Tooth width and depth of the torn edge, as fractions of the note size.
const TOOTH: f32 = 0.02;

const STAMP_RIGHT: f32 = 12.0;
const STAMP_BOTTOM: f32 = 8.0;

/// Triangle wave over the note width: 1.0 at even tooth boundaries, 0.0 at
/// odd ones.
fn tooth_wave(u: f32) -> f32 {
    let phase = (u / TOOTH).rem_euclid(2.0);
    (phase - 1.0).abs()
}

/// Whether normalised point `(u, v)` lies on the paper.
pub fn on_paper(u: f32, v: f32) -> bool {
    let wave = tooth_wave(u);
    let top = TOOTH * wave;
    let bottom = 1.0 - TOOTH * wave;
    v >= top && v <= bottom
}

/// The built-in rasterizer.
#[derive(Debug, Clone, Copy)]
pub struct NoteRasterizer {
    pub metrics: TextMetrics,
}

impl Default for NoteRasterizer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::NOTE,
        }
    }
}

impl NoteRasterizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rasterizer for NoteRasterizer {
    fn rasterize(&self, note: &Note, scale: u32) -> Result<RgbaImage, ExportError> {
        let width = (note.width * scale as f32).round();
        let height = (note.height * scale as f32).round();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(ExportError::Rasterize(format!(
                "note {} has no area ({}x{})",
                note.id, note.width, note.height
            )));
        }

        let mut canvas = Canvas {
            image: RgbaImage::new(width as u32, height as u32),
            scale: scale as usize,
            glyphs: HashMap::new(),
        };
        canvas.paper(note.color);

        // Body text, centred both ways
        let lines = wrap_text(&note.content, self.metrics.columns(note.width));
        let block_height = lines.len() as f32 * self.metrics.line_height;
        let mut y = ((note.height - block_height) / 2.0).max(self.metrics.padding);
        for line in &lines {
            let line_width = line.chars().count() as f32 * self.metrics.char_width;
            let x = ((note.width - line_width) / 2.0).max(self.metrics.padding);
            canvas.text(Face::Body, line, x, y, INK);
            y += self.metrics.line_height;
        }

        // Date stamp
        let stamp = FontMetrics::STAMP;
        let stamp_width = (note.timestamp.chars().count() * stamp.char_width) as f32;
        let x = note.width - STAMP_RIGHT - stamp_width;
        let y = note.height - STAMP_BOTTOM - stamp.char_height as f32;
        canvas.text(Face::Stamp, &note.timestamp, x.max(0.0), y.max(0.0), STAMP_INK);

        Ok(canvas.image)
    }
}

/// Scaled drawing surface for one note.
struct Canvas {
    image: RgbaImage,
    scale: usize,
    glyphs: HashMap<(Face, char), Vec<u8>>,
}

impl Canvas {
    fn paper(&mut self, color: Color) {
        let (w, h) = self.image.dimensions();
        let fill = Rgba(color.to_rgba(255));
        for y in 0..h {
            let v = (y as f32 + 0.5) / h as f32;
            for x in 0..w {
                let u = (x as f32 + 0.5) / w as f32;
                if on_paper(u, v) {
                    self.image.put_pixel(x, y, fill);
                }
            }
        }
    }

    /// Draw a single line of text with its top-left at layout `(x, y)`.
    fn text(&mut self, face: Face, text: &str, x: f32, y: f32, color: Color) {
        let metrics = FontMetrics::for_face(face);
        let origin_y = (y * self.scale as f32).round() as usize;
        let mut origin_x = (x * self.scale as f32).round() as usize;

        for ch in text.chars() {
            self.glyph(face, ch, origin_x, origin_y, color);
            origin_x += metrics.char_width * self.scale;
        }
    }

    fn glyph(&mut self, face: Face, ch: char, base_x: usize, base_y: usize, color: Color) {
        let metrics = FontMetrics::for_face(face);
        let scale = self.scale;
        let glyph = self
            .glyphs
            .entry((face, ch))
            .or_insert_with(|| generate_glyph(face, ch));
        let (w, h) = (self.image.width() as usize, self.image.height() as usize);
        let ink = Rgba(color.to_rgba(255));

        for gy in 0..metrics.char_height {
            for gx in 0..metrics.char_width {
                if glyph.get(gy * metrics.char_width + gx).copied().unwrap_or(0) == 0 {
                    continue;
                }
                // Draw scaled pixel
                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = base_x + gx * scale + sx;
                        let py = base_y + gy * scale + sy;
                        if px < w && py < h {
                            self.image.put_pixel(px as u32, py as u32, ink);
                        }
                    }
                }
            }
        }
    }
}
