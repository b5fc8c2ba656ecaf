//! # Notes
//!
//! The two shapes a printed memo takes:
//!
//! - [`InFlightNote`]: hanging out of the exit slot, waiting to be taken
//! - [`Note`]: placed on the desk, with a position and a slight tilt
//!
//! Everything except the desk position is frozen at print time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Unique note identity. Later prints get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source.
#[derive(Debug, Clone, Default)]
pub struct NoteIdGen {
    last: u64,
}

impl NoteIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NoteId {
        self.last += 1;
        NoteId(self.last)
    }
}

/// An sRGB paper color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_rgba(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Receipt paper colors a print can come out in.
pub const PALETTE: [Color; 9] = [
    Color::from_hex(0xffffff), // white
    Color::from_hex(0xdbeafe), // blue
    Color::from_hex(0xdcfce7), // green
    Color::from_hex(0xfef9c3), // yellow
    Color::from_hex(0xfae8ff), // fuchsia
    Color::from_hex(0xffe4e6), // rose
    Color::from_hex(0xffedd5), // orange
    Color::from_hex(0xe0f2fe), // sky
    Color::from_hex(0xf3f4f6), // gray
];

/// A printed note waiting at the exit slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InFlightNote {
    pub id: NoteId,
    pub content: String,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Print date as `YYYY.MM.DD`
    pub timestamp: String,
}

/// A note lying on the desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub x: f32,
    pub y: f32,
    /// Tilt in degrees
    pub rotate: f32,
    pub timestamp: String,
}

impl Note {
    /// Place an in-flight note at `position` with a fixed tilt.
    pub fn place(note: InFlightNote, position: Point, rotate: f32) -> Self {
        Self {
            id: note.id,
            content: note.content,
            width: note.width,
            height: note.height,
            color: note.color,
            x: position.x,
            y: position.y,
            rotate,
            timestamp: note.timestamp,
        }
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn move_to(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }
}
