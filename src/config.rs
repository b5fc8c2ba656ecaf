//! # Memo Configuration
//!
//! Tunable constants for the desk toy: timer lengths, note geometry and the
//! export resolution.
//!
//! ## Defaults
//!
//! | Setting | Value |
//! |---------|-------|
//! | Print animation | 3000 ms |
//! | Clear confirmation window | 3000 ms |
//! | Startup clear-button hint | 3000 ms |
//! | Input cap | 150 chars |
//! | Note width | 92% of the exit slot (180 px without a slot) |
//! | Note height | measured text + 100 px, at least 160 px |
//! | Rotation | uniform in ±1.5° |
//! | Export scale | 3× |
//!
//! ## Usage
//!
//! ```
//! use mood_memo::config::MemoConfig;
//!
//! let config = MemoConfig::DEFAULT;
//! assert_eq!(config.print_duration().as_millis(), 3000);
//!
//! let custom = MemoConfig::from_json(r#"{ "print_duration_ms": 500 }"#).unwrap();
//! assert_eq!(custom.print_duration().as_millis(), 500);
//! assert_eq!(custom.max_chars, 150);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::MemoError;

/// # Memo Configuration
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
///
/// ## Note Size
///
/// ```text
/// width  = exit_slot.width * slot_width_ratio    (fallback_width without a slot)
/// height = max(text_height + height_padding, min_height)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemoConfig {
    /// Length of the print animation in milliseconds
    pub print_duration_ms: u64,

    /// Window in which a second clear click confirms, in milliseconds
    pub confirm_clear_ms: u64,

    /// How long the clear button stays visible after startup, in milliseconds
    pub init_hint_ms: u64,

    /// Maximum number of characters accepted by the input
    pub max_chars: usize,

    /// Note width used when the exit slot is not mounted
    pub fallback_width: f32,

    /// Note width as a fraction of the exit slot width
    pub slot_width_ratio: f32,

    /// Minimum note height
    pub min_height: f32,

    /// Extra height added to the measured text height
    pub height_padding: f32,

    /// How far a picked-up note overlaps into the slot
    pub slot_overlap: f32,

    /// Maximum tilt applied when a note is dropped, in degrees
    pub max_rotation: f32,

    /// Supersampling factor for exported images
    pub export_scale: u32,
}

impl MemoConfig {
    /// The reference experience.
    pub const DEFAULT: Self = Self {
        print_duration_ms: 3000,
        confirm_clear_ms: 3000,
        init_hint_ms: 3000,
        max_chars: 150,
        fallback_width: 180.0,
        slot_width_ratio: 0.92,
        min_height: 160.0,
        height_padding: 100.0,
        slot_overlap: 6.0,
        max_rotation: 1.5,
        export_scale: 3,
    };

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, MemoError> {
        serde_json::from_str(json).map_err(|e| MemoError::Config(e.to_string()))
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, MemoError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[inline]
    pub fn print_duration(&self) -> Duration {
        Duration::from_millis(self.print_duration_ms)
    }

    #[inline]
    pub fn confirm_clear_window(&self) -> Duration {
        Duration::from_millis(self.confirm_clear_ms)
    }

    #[inline]
    pub fn init_hint(&self) -> Duration {
        Duration::from_millis(self.init_hint_ms)
    }

    /// Note width for a given exit slot width.
    pub fn note_width(&self, slot_width: Option<f32>) -> f32 {
        match slot_width {
            Some(w) => w * self.slot_width_ratio,
            None => self.fallback_width,
        }
    }

    /// Note height for a measured text height.
    pub fn note_height(&self, text_height: Option<f32>) -> f32 {
        match text_height {
            Some(h) => (h + self.height_padding).max(self.min_height),
            None => self.min_height,
        }
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
