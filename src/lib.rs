//! # Mood Memo - Desk-Toy Receipt Printer
//!
//! A simulated thermal-receipt printer on a desk. Type a mood, pull the
//! lever (or press the button), wait for the paper to come out, then grab
//! the note from the exit slot and drop it anywhere on the desk. Notes can be
//! dragged again, deleted, or saved as PNG images.
//!
//! The crate is the interaction logic only: the host draws everything and
//! reports geometry through [`geometry::GeometryProvider`]. All state lives
//! in memory for the lifetime of one [`MoodMemo`].
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Duration;
//! use mood_memo::{
//!     app::Event,
//!     geometry::{Point, StaticLayout},
//!     router::{Button, PointerEvent, Target},
//!     random, MemoConfig, MoodMemo,
//! };
//!
//! let mut memo = MoodMemo::new(MemoConfig::DEFAULT, StaticLayout::DESKTOP, random::seeded(1));
//!
//! memo.handle(Event::Type { text: "feeling great".into() }, Duration::ZERO);
//! memo.handle(Event::PullLever, Duration::ZERO);
//! assert_eq!(memo.lcd().text(), "CHANGING PAPER...");
//!
//! // Paper is out after the print delay
//! memo.handle(Event::Tick, Duration::from_secs(3));
//! assert_eq!(memo.lcd().text(), "Take Memo");
//!
//! // Grab it and drop it on the desk
//! let grab = Point::new(640.0, 350.0);
//! memo.handle(
//!     Event::Pointer(PointerEvent::Down { at: grab, button: Button::Primary, target: Target::Exit }),
//!     Duration::from_secs(4),
//! );
//! memo.handle(Event::Pointer(PointerEvent::Up { at: grab }), Duration::from_secs(4));
//! assert_eq!(memo.notes().len(), 1);
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`app`] | The toy behind one event loop |
//! | [`sequencer`] | Idle → printing → ready state machine |
//! | [`desk`] | Placed notes, dragging, two-step clear |
//! | [`router`] | Pointer events to intents, context menu |
//! | [`export`] | PNG export of a note |
//! | [`render`] | Built-in note rasterizer |
//! | [`note`] | Note records and the paper palette |
//! | [`geometry`] | Points, rectangles, text measurement |
//! | [`config`] | Tunable constants |
//! | [`script`] | Replayable JSON sessions |

pub mod app;
pub mod clock;
pub mod config;
pub mod desk;
pub mod error;
pub mod export;
pub mod geometry;
pub mod note;
pub mod random;
pub mod render;
pub mod router;
pub mod script;
pub mod sequencer;

// Re-exports for convenience
pub use app::MoodMemo;
pub use config::MemoConfig;
pub use error::MemoError;
