//! # Print Sequencer
//!
//! The idle → printing → ready cycle of the printer.
//!
//! ```text
//!            request_print (text non-blank)          tick (deadline passed)
//!   ┌──────┐ ─────────────────────────────▶ ┌──────────┐ ─────────────────▶ ┌───────┐
//!   │ Idle │                                │ Printing │                    │ Ready │
//!   └──────┘ ◀───────────────────────────────────────────────────────────── └───────┘
//!                         take (picked up) / discard (desk cleared)
//! ```
//!
//! A print request made while printing or while a note waits at the exit is
//! ignored, so the first valid request always wins. Printing cannot be
//! cancelled; the job completes on the first tick at or after its deadline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Calendar, date_stamp};
use crate::config::MemoConfig;
use crate::geometry::GeometryProvider;
use crate::note::{Color, InFlightNote, NoteId, NoteIdGen};
use crate::random::RandomSource;

/// What started a print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintSource {
    /// The side lever
    Lever,
    /// The round print button
    Button,
}

/// A print in progress. Color and date are fixed when it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintJob {
    pub source: PrintSource,
    pub color: Color,
    pub timestamp: String,
    pub started: Duration,
    pub deadline: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrinterState {
    Idle,
    Printing(PrintJob),
    Ready(InFlightNote),
}

/// What the LCD shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lcd<'a> {
    /// Empty input, dimmed prompt
    Placeholder,
    /// Live echo of the input
    Echo(&'a str),
    /// Lever print running
    ChangingPaper,
    /// Button print running
    PrintingMood,
    /// A note waits at the exit
    TakeMemo,
}

impl Lcd<'_> {
    pub const PLACEHOLDER: &'static str = "Say Something...";

    pub fn text(&self) -> &str {
        match self {
            Lcd::Placeholder => Self::PLACEHOLDER,
            Lcd::Echo(text) => text,
            Lcd::ChangingPaper => "CHANGING PAPER...",
            Lcd::PrintingMood => "Printing Mood...",
            Lcd::TakeMemo => "Take Memo",
        }
    }
}

/// The paper currently sliding out of the printer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintPreview<'a> {
    pub color: Color,
    pub content: &'a str,
    pub timestamp: &'a str,
    /// Fraction of the paper out of the slot, 0.0 to 1.0
    pub progress: f32,
}

/// Status LED next to the print button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    Ready,
    Busy,
}

#[derive(Debug, Clone)]
pub struct PrintSequencer {
    config: MemoConfig,
    state: PrinterState,
    text: String,
}

impl PrintSequencer {
    pub fn new(config: MemoConfig) -> Self {
        Self {
            config,
            state: PrinterState::Idle,
            text: String::new(),
        }
    }

    pub fn state(&self) -> &PrinterState {
        &self.state
    }

    /// Current input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the input text, capped at `max_chars` characters.
    ///
    /// Ignored (returns false) while the input is disabled.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.input_disabled() {
            return false;
        }
        self.text = text.chars().take(self.config.max_chars).collect();
        true
    }

    pub fn is_printing(&self) -> bool {
        matches!(self.state, PrinterState::Printing(_))
    }

    pub fn in_flight(&self) -> Option<&InFlightNote> {
        match &self.state {
            PrinterState::Ready(note) => Some(note),
            _ => None,
        }
    }

    pub fn input_disabled(&self) -> bool {
        !matches!(self.state, PrinterState::Idle)
    }

    /// Whether a print request would be accepted right now.
    pub fn can_print(&self) -> bool {
        matches!(self.state, PrinterState::Idle) && !self.text.trim().is_empty()
    }

    /// Whether the print button is clickable (ignores the text).
    pub fn print_enabled(&self) -> bool {
        matches!(self.state, PrinterState::Idle)
    }

    pub fn led(&self) -> Led {
        if self.is_printing() { Led::Busy } else { Led::Ready }
    }

    /// Start printing the current text.
    ///
    /// Returns false and changes nothing when the text is blank, a print is
    /// running, or a note is waiting at the exit.
    pub fn request_print<R, C>(
        &mut self,
        source: PrintSource,
        now: Duration,
        rng: &mut R,
        calendar: &C,
    ) -> bool
    where
        R: RandomSource + ?Sized,
        C: Calendar + ?Sized,
    {
        if !self.can_print() {
            debug!(?source, state = ?self.state, "print request ignored");
            return false;
        }

        let job = PrintJob {
            source,
            color: rng.pick_color(),
            timestamp: date_stamp(calendar.today()),
            started: now,
            deadline: now + self.config.print_duration(),
        };
        debug!(?source, color = %job.color, "printing started");
        self.state = PrinterState::Printing(job);
        true
    }

    /// Advance timers. Finishes a print whose deadline has passed and
    /// returns the id of the note now waiting at the exit.
    pub fn tick<G>(&mut self, now: Duration, geometry: &G, ids: &mut NoteIdGen) -> Option<NoteId>
    where
        G: GeometryProvider + ?Sized,
    {
        let job = match &self.state {
            PrinterState::Printing(job) if now >= job.deadline => job.clone(),
            _ => return None,
        };

        let slot = geometry.exit_slot();
        if slot.is_none() {
            warn!(
                fallback = self.config.fallback_width,
                "exit slot not mounted, using fallback note width"
            );
        }
        let width = self.config.note_width(slot.map(|s| s.width));
        let height = self
            .config
            .note_height(geometry.measure_text(&self.text, width));

        let note = InFlightNote {
            id: ids.next_id(),
            content: std::mem::take(&mut self.text),
            width,
            height,
            color: job.color,
            timestamp: job.timestamp,
        };
        let id = note.id;
        debug!(%id, width, height, "printing finished, note at exit");
        self.state = PrinterState::Ready(note);
        Some(id)
    }

    /// Hand over the waiting note (Ready → Idle).
    pub fn take(&mut self) -> Option<InFlightNote> {
        match std::mem::replace(&mut self.state, PrinterState::Idle) {
            PrinterState::Ready(note) => Some(note),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Throw away the waiting note, if any.
    pub fn discard(&mut self) -> bool {
        match self.take() {
            Some(note) => {
                debug!(id = %note.id, "discarded note at exit");
                true
            }
            None => false,
        }
    }

    pub fn lcd(&self) -> Lcd<'_> {
        match &self.state {
            PrinterState::Printing(job) => match job.source {
                PrintSource::Lever => Lcd::ChangingPaper,
                PrintSource::Button => Lcd::PrintingMood,
            },
            PrinterState::Ready(_) => Lcd::TakeMemo,
            PrinterState::Idle if self.text.is_empty() => Lcd::Placeholder,
            PrinterState::Idle => Lcd::Echo(&self.text),
        }
    }

    /// The paper being printed, if a print is running.
    pub fn preview(&self, now: Duration) -> Option<PrintPreview<'_>> {
        let PrinterState::Printing(job) = &self.state else {
            return None;
        };
        let total = job.deadline.saturating_sub(job.started).as_secs_f32();
        let elapsed = now.saturating_sub(job.started).as_secs_f32();
        let progress = if total > 0.0 {
            (elapsed / total).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Some(PrintPreview {
            color: job.color,
            content: &self.text,
            timestamp: &job.timestamp,
            progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedCalendar;
    use crate::geometry::{Rect, StaticLayout};
    use crate::note::PALETTE;
    use crate::random::seeded;
    use chrono::NaiveDate;

    fn calendar() -> FixedCalendar {
        FixedCalendar(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn typed(text: &str) -> PrintSequencer {
        let mut seq = PrintSequencer::new(MemoConfig::DEFAULT);
        assert!(seq.set_text(text));
        seq
    }

    #[test]
    fn test_blank_text_stays_idle() {
        for text in ["", "   ", "\n\t "] {
            let mut seq = typed(text);
            let mut rng = seeded(1);
            assert!(!seq.request_print(PrintSource::Button, ms(0), &mut rng, &calendar()));
            assert_eq!(seq.state(), &PrinterState::Idle);
            assert!(seq.in_flight().is_none());
        }
    }

    #[test]
    fn test_full_cycle() {
        let mut seq = typed("hello");
        let mut rng = seeded(1);
        let mut ids = NoteIdGen::new();
        let layout = StaticLayout::DESKTOP;

        assert!(seq.request_print(PrintSource::Button, ms(0), &mut rng, &calendar()));
        assert!(seq.is_printing());
        assert!(seq.input_disabled());

        assert_eq!(seq.tick(ms(2999), &layout, &mut ids), None);
        assert!(seq.is_printing());

        let id = seq.tick(ms(3000), &layout, &mut ids);
        assert!(id.is_some());
        let note = seq.in_flight().unwrap();
        assert_eq!(note.content, "hello");
        assert_eq!(note.timestamp, "2026.10.18");
        assert!(PALETTE.contains(&note.color));
        assert_eq!(seq.text(), "");
        assert_eq!(seq.lcd(), Lcd::TakeMemo);

        let taken = seq.take().unwrap();
        assert_eq!(Some(taken.id), id);
        assert_eq!(seq.state(), &PrinterState::Idle);
    }

    #[test]
    fn test_busy_requests_are_ignored() {
        let mut seq = typed("first");
        let mut rng = seeded(1);
        let mut ids = NoteIdGen::new();
        let layout = StaticLayout::DESKTOP;

        assert!(seq.request_print(PrintSource::Lever, ms(0), &mut rng, &calendar()));
        let before = seq.state().clone();
        assert!(!seq.request_print(PrintSource::Button, ms(10), &mut rng, &calendar()));
        assert_eq!(seq.state(), &before);
        assert_eq!(seq.lcd(), Lcd::ChangingPaper);

        seq.tick(ms(3000), &layout, &mut ids);
        let ready = seq.state().clone();
        assert!(!seq.set_text("second"));
        assert!(!seq.request_print(PrintSource::Button, ms(3001), &mut rng, &calendar()));
        assert_eq!(seq.state(), &ready);
    }

    #[test]
    fn test_text_is_capped() {
        let long: String = "é".repeat(200);
        let seq = typed(&long);
        assert_eq!(seq.text().chars().count(), 150);
    }

    #[test]
    fn test_lcd_states() {
        let mut seq = PrintSequencer::new(MemoConfig::DEFAULT);
        assert_eq!(seq.lcd(), Lcd::Placeholder);
        assert_eq!(seq.lcd().text(), "Say Something...");
        seq.set_text("hi");
        assert_eq!(seq.lcd(), Lcd::Echo("hi"));

        let mut rng = seeded(5);
        seq.request_print(PrintSource::Button, ms(0), &mut rng, &calendar());
        assert_eq!(seq.lcd().text(), "Printing Mood...");
        assert_eq!(seq.led(), Led::Busy);
    }

    #[test]
    fn test_preview_progress() {
        let mut seq = typed("hi");
        let mut rng = seeded(5);
        seq.request_print(PrintSource::Button, ms(1000), &mut rng, &calendar());
        let preview = seq.preview(ms(2500)).unwrap();
        assert!((preview.progress - 0.5).abs() < 0.001);
        assert_eq!(preview.content, "hi");
        assert_eq!(seq.preview(ms(9000)).unwrap().progress, 1.0);
    }

    #[test]
    fn test_fallback_width_without_slot() {
        let mut seq = typed("hi");
        let mut rng = seeded(5);
        let mut ids = NoteIdGen::new();
        seq.request_print(PrintSource::Button, ms(0), &mut rng, &calendar());
        seq.tick(ms(3000), &StaticLayout::UNMOUNTED, &mut ids);
        let note = seq.in_flight().unwrap();
        assert_eq!(note.width, 180.0);
        assert_eq!(note.height, 160.0);
    }

    #[test]
    fn test_size_from_slot_and_text() {
        let layout = StaticLayout::with_slot(Rect::new(0.0, 0.0, 200.0, 6.0));
        let text = "a ".repeat(60);
        let mut seq = typed(&text);
        let mut rng = seeded(5);
        let mut ids = NoteIdGen::new();
        seq.request_print(PrintSource::Button, ms(0), &mut rng, &calendar());
        seq.tick(ms(3000), &layout, &mut ids);
        let note = seq.in_flight().unwrap();
        assert!((note.width - 184.0).abs() < 0.001);
        let expected = layout.metrics.measure(&text, note.width) + 100.0;
        assert!((note.height - expected).abs() < 0.001);
        assert!(note.height > 160.0);
    }

    #[test]
    fn test_discard() {
        let mut seq = typed("bye");
        let mut rng = seeded(5);
        let mut ids = NoteIdGen::new();
        assert!(!seq.discard());
        seq.request_print(PrintSource::Button, ms(0), &mut rng, &calendar());
        assert!(!seq.discard());
        seq.tick(ms(3000), &StaticLayout::DESKTOP, &mut ids);
        assert!(seq.discard());
        assert_eq!(seq.state(), &PrinterState::Idle);
    }
}
