//! # Geometry
//!
//! Points, rectangles and the [`GeometryProvider`] seam through which the
//! host layout engine reports where the paper-exit slot sits and how tall a
//! piece of wrapped text renders.
//!
//! [`StaticLayout`] is a self-contained provider: a fixed slot rectangle and
//! a monospace text measurer that agrees with the built-in note rasterizer.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned bounding box in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x < self.left + self.width
            && p.y >= self.top
            && p.y < self.top + self.height
    }
}

/// Layout information supplied by whatever draws the toy.
///
/// Both queries may come back empty while the relevant element is not
/// mounted yet; callers fall back to configured defaults.
pub trait GeometryProvider {
    /// Bounding box of the paper-exit slot.
    fn exit_slot(&self) -> Option<Rect>;

    /// Rendered height of `text` wrapped at `width`.
    fn measure_text(&self, text: &str, width: f32) -> Option<f32>;
}

/// Monospace metrics for note text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub char_width: f32,
    pub line_height: f32,
    /// Padding on every side of the text block
    pub padding: f32,
}

impl TextMetrics {
    /// Note body text (Spleen 12x24 cells with 24 px padding).
    pub const NOTE: TextMetrics = TextMetrics {
        char_width: 12.0,
        line_height: 24.0,
        padding: 24.0,
    };

    /// Number of whole characters that fit on one line of a note `width` wide.
    pub fn columns(&self, width: f32) -> usize {
        let inner = (width - 2.0 * self.padding).max(0.0);
        ((inner / self.char_width).floor() as usize).max(1)
    }

    /// Height of the padded text block for `text` wrapped at `width`.
    pub fn measure(&self, text: &str, width: f32) -> f32 {
        let lines = wrap_text(text, self.columns(width)).len();
        lines as f32 * self.line_height + 2.0 * self.padding
    }
}

/// Word-wrap `text` into lines of at most `columns` characters.
///
/// Explicit newlines always break. Words longer than a line are split.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();

            if line_len > 0 && line_len + 1 + chars.len() > columns {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }

            while chars.len() > columns {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = chars.split_off(columns);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }

            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line_len += chars.len();
            line.extend(chars);
        }

        lines.push(line);
    }

    lines
}

/// A fixed layout: the slot never moves and text is measured with
/// [`TextMetrics::NOTE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLayout {
    pub slot: Option<Rect>,
    pub metrics: TextMetrics,
}

impl StaticLayout {
    /// The printer centred in a 1280x800 viewport: a 288 px slot whose
    /// notes come out 265 px wide.
    pub const DESKTOP: StaticLayout = StaticLayout {
        slot: Some(Rect::new(496.0, 420.0, 288.0, 6.0)),
        metrics: TextMetrics::NOTE,
    };

    /// Nothing mounted yet.
    pub const UNMOUNTED: StaticLayout = StaticLayout {
        slot: None,
        metrics: TextMetrics::NOTE,
    };

    pub fn with_slot(slot: Rect) -> Self {
        Self {
            slot: Some(slot),
            metrics: TextMetrics::NOTE,
        }
    }
}

impl Default for StaticLayout {
    fn default() -> Self {
        Self::DESKTOP
    }
}

impl GeometryProvider for StaticLayout {
    fn exit_slot(&self) -> Option<Rect> {
        self.slot
    }

    fn measure_text(&self, text: &str, width: f32) -> Option<f32> {
        Some(self.metrics.measure(text, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(150.0, 130.0) - Point::new(10.0, 10.0);
        assert_eq!(p, Point::new(140.0, 120.0));
        assert_eq!(p + Point::new(10.0, 10.0), Point::new(150.0, 130.0));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(29.9, 14.9)));
        assert!(!r.contains(Point::new(30.0, 12.0)));
        assert!(!r.contains(Point::new(15.0, 9.0)));
    }

    #[test]
    fn test_wrap_words() {
        let lines = wrap_text("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_long_word() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_newlines() {
        let lines = wrap_text("a\n\nb", 10);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_columns() {
        // 180 - 48 = 132 px of text → 11 columns
        assert_eq!(TextMetrics::NOTE.columns(180.0), 11);
        assert_eq!(TextMetrics::NOTE.columns(10.0), 1);
    }

    #[test]
    fn test_measure() {
        let m = TextMetrics::NOTE;
        assert_eq!(m.measure("hello", 180.0), 24.0 + 48.0);
        assert_eq!(m.measure("hello there world", 180.0), 2.0 * 24.0 + 48.0);
    }

    #[test]
    fn test_static_layout() {
        let layout = StaticLayout::DESKTOP;
        assert!(layout.exit_slot().is_some());
        assert!(StaticLayout::UNMOUNTED.exit_slot().is_none());
        assert!(layout.measure_text("hi", 200.0).is_some());
    }
}
