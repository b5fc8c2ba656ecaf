//! Bitmap glyphs for note rendering.
//!
//! Uses the Spleen bitmap font family: 12x24 for the note body, 6x12 for the
//! date stamp.

use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};

/// Which face a glyph is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Handwriting-sized body text
    Body,
    /// Small print for the date stamp
    Stamp,
}

/// Glyph cell dimensions for each face.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub char_width: usize,
    pub char_height: usize,
}

impl FontMetrics {
    pub const BODY: FontMetrics = FontMetrics {
        char_width: 12,
        char_height: 24,
    };

    pub const STAMP: FontMetrics = FontMetrics {
        char_width: 6,
        char_height: 12,
    };

    pub fn for_face(face: Face) -> FontMetrics {
        match face {
            Face::Body => Self::BODY,
            Face::Stamp => Self::STAMP,
        }
    }
}

/// Generate a glyph bitmap for a character.
/// Returns a Vec<u8> where each byte is 0 (paper) or 1 (ink).
pub fn generate_glyph(face: Face, ch: char) -> Vec<u8> {
    let metrics = FontMetrics::for_face(face);
    let mut glyph = vec![0u8; metrics.char_width * metrics.char_height];

    if ch == ' ' {
        return glyph;
    }

    let data = match face {
        Face::Body => FONT_12X24,
        Face::Stamp => FONT_6X12,
    };

    let found = match PSF2Font::new(data) {
        Ok(mut spleen) => {
            let utf8_bytes = ch.to_string();
            match spleen.glyph_for_utf8(utf8_bytes.as_bytes()) {
                Some(spleen_glyph) => {
                    for (row_y, row) in spleen_glyph.enumerate() {
                        for (col_x, on) in row.enumerate() {
                            if row_y < metrics.char_height && col_x < metrics.char_width {
                                glyph[row_y * metrics.char_width + col_x] = u8::from(on);
                            }
                        }
                    }
                    true
                }
                None => false,
            }
        }
        Err(_) => false,
    };

    if !found {
        // Unknown chars print as a hollow box
        draw_box(&mut glyph, metrics.char_width, metrics.char_height);
    }

    glyph
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_metrics() {
        assert_eq!(FontMetrics::BODY.char_width, 12);
        assert_eq!(FontMetrics::BODY.char_height, 24);
        assert_eq!(FontMetrics::STAMP.char_width, 6);
    }

    #[test]
    fn test_generate_glyph() {
        let glyph = generate_glyph(Face::Body, 'A');
        assert_eq!(glyph.len(), 12 * 24);
        assert!(glyph.iter().any(|&p| p != 0));

        let digit = generate_glyph(Face::Stamp, '7');
        assert_eq!(digit.len(), 6 * 12);
        assert!(digit.iter().any(|&p| p != 0));
    }

    #[test]
    fn test_space_is_blank() {
        assert!(generate_glyph(Face::Body, ' ').iter().all(|&p| p == 0));
    }

    #[test]
    fn test_missing_glyph_is_box() {
        let glyph = generate_glyph(Face::Stamp, '\u{10FFFD}');
        let mut expected = vec![0u8; 6 * 12];
        draw_box(&mut expected, 6, 12);
        assert_eq!(glyph, expected);
    }
}
