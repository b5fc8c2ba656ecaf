//! # Mood Memo
//!
//! The whole desk toy behind one event loop.
//!
//! ```text
//! Event ──▶ MoodMemo::handle(event, now)
//!              │ tick timers (print finishes, clear confirmation expires)
//!              ├─ Type / PullLever / PressPrint ──▶ PrintSequencer
//!              ├─ Pointer ──▶ InteractionRouter ──▶ Intent ──▶ Desk
//!              ├─ Menu ──▶ save image (ImageExporter) / delete
//!              └─ ClearDesk ──▶ Desk::clear_all (+ discard the note at the exit)
//!           ◀── Vec<Effect> (downloads, notices, suppress native menu)
//! ```
//!
//! `now` is the time since the toy was mounted. The host calls
//! [`MoodMemo::handle`] with [`Event::Tick`] from its frame or timer loop so
//! that prints finish even when the user does nothing.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use mood_memo::app::{Event, MoodMemo};
//! use mood_memo::config::MemoConfig;
//! use mood_memo::geometry::StaticLayout;
//! use mood_memo::random;
//!
//! let mut memo = MoodMemo::new(MemoConfig::DEFAULT, StaticLayout::DESKTOP, random::seeded(7));
//! memo.handle(Event::Type { text: "hello".into() }, Duration::ZERO);
//! memo.handle(Event::PressPrint, Duration::ZERO);
//! memo.handle(Event::Tick, Duration::from_secs(3));
//! assert_eq!(memo.in_flight().unwrap().content, "hello");
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::clock::{Calendar, LocalCalendar};
use crate::config::MemoConfig;
use crate::desk::{ClearOutcome, Desk, DragSession};
use crate::export::{ExportError, ExportedImage, ImageExporter};
use crate::geometry::{GeometryProvider, Point};
use crate::note::{InFlightNote, Note, NoteId, NoteIdGen};
use crate::random::RandomSource;
use crate::render::NoteRasterizer;
use crate::router::{ContextMenu, Intent, InteractionRouter, MenuAction, PointerEvent};
use crate::sequencer::{Lcd, Led, PrintPreview, PrintSequencer, PrintSource};

/// Input to the toy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The input box now holds `text`
    Type { text: String },
    PullLever,
    PressPrint,
    Pointer(PointerEvent),
    /// An entry of the open context menu was chosen
    Menu { action: MenuAction },
    ClearDesk,
    /// Only advance timers
    Tick,
}

/// Output for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Offer this file as a download
    Download(ExportedImage),
    /// Show a transient message
    Notice(&'static str),
    /// Swallow the native context menu
    SuppressDefault,
}

/// The clear-desk button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearButton {
    Hidden,
    ClearDesk,
    Confirm,
}

impl ClearButton {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ClearButton::Hidden => None,
            ClearButton::ClearDesk => Some("CLEAR DESK"),
            ClearButton::Confirm => Some("CONFIRM?"),
        }
    }
}

pub struct MoodMemo<G, R> {
    config: MemoConfig,
    geometry: G,
    rng: R,
    calendar: Box<dyn Calendar>,
    ids: NoteIdGen,
    sequencer: PrintSequencer,
    desk: Desk,
    router: InteractionRouter,
    exporter: ImageExporter,
}

impl<G, R> MoodMemo<G, R>
where
    G: GeometryProvider,
    R: RandomSource,
{
    /// A toy with the local calendar and the built-in note rasterizer.
    pub fn new(config: MemoConfig, geometry: G, rng: R) -> Self {
        Self {
            config,
            geometry,
            rng,
            calendar: Box::new(LocalCalendar),
            ids: NoteIdGen::new(),
            sequencer: PrintSequencer::new(config),
            desk: Desk::new(config),
            router: InteractionRouter::new(),
            exporter: ImageExporter::new(Box::new(NoteRasterizer::new()), config.export_scale),
        }
    }

    pub fn with_calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.calendar = Box::new(calendar);
        self
    }

    pub fn with_exporter(mut self, exporter: ImageExporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn config(&self) -> &MemoConfig {
        &self.config
    }

    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    pub fn exporter_mut(&mut self) -> &mut ImageExporter {
        &mut self.exporter
    }

    /// Apply one event at time `now`.
    pub fn handle(&mut self, event: Event, now: Duration) -> Vec<Effect> {
        self.tick(now);

        let mut effects = Vec::new();
        match event {
            Event::Type { text } => {
                self.sequencer.set_text(&text);
            }
            Event::PullLever => {
                self.print(PrintSource::Lever, now);
            }
            Event::PressPrint => {
                self.print(PrintSource::Button, now);
            }
            Event::Pointer(pointer) => {
                if self.pointer(pointer).suppresses_default() {
                    effects.push(Effect::SuppressDefault);
                }
            }
            Event::Menu { action } => {
                if let Some(effect) = self.menu(action) {
                    effects.push(effect);
                }
            }
            Event::ClearDesk => {
                self.clear(now);
            }
            Event::Tick => {}
        }
        effects
    }

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Duration) {
        self.sequencer.tick(now, &self.geometry, &mut self.ids);
        self.desk.tick(now);
    }

    /// Start a print. False when the request is ignored.
    pub fn print(&mut self, source: PrintSource, now: Duration) -> bool {
        self.sequencer
            .request_print(source, now, &mut self.rng, self.calendar.as_ref())
    }

    /// Route a pointer event and carry out its intent.
    pub fn pointer(&mut self, event: PointerEvent) -> Intent {
        let intent = self.router.route(event);
        match intent {
            Intent::PickUp { pointer } => {
                self.pick_up(pointer);
            }
            Intent::Grab { id, pointer } => {
                self.desk.begin_drag(id, pointer);
            }
            Intent::DragTo(pointer) => {
                self.desk.drag_to(pointer);
            }
            Intent::Drop => {
                self.desk.end_drag();
            }
            Intent::Delete(id) => {
                self.delete(id);
            }
            Intent::None | Intent::MenuOpened(_) | Intent::MenuClosed => {}
        }
        intent
    }

    /// Take the note at the exit onto the desk and start dragging it.
    pub fn pick_up(&mut self, pointer: Point) -> Option<NoteId> {
        self.sequencer.in_flight()?;
        let Some(slot) = self.geometry.exit_slot() else {
            warn!("exit slot not mounted, note stays at the exit");
            return None;
        };
        let note = self.sequencer.take()?;
        let rotate = self.rng.rotation(self.config.max_rotation);
        Some(self.desk.pick_up_from_exit(note, slot, pointer, rotate))
    }

    pub fn delete(&mut self, id: NoteId) -> bool {
        self.router.forget(id);
        self.desk.delete(id)
    }

    /// Press the clear-desk button. Ignored while the button is hidden.
    pub fn clear(&mut self, now: Duration) -> Option<ClearOutcome> {
        self.tick(now);
        if self.clear_button(now) == ClearButton::Hidden {
            return None;
        }
        let outcome = self.desk.clear_all(now);
        if outcome == ClearOutcome::Cleared {
            self.sequencer.discard();
            self.router.close_menu();
        }
        Some(outcome)
    }

    fn menu(&mut self, action: MenuAction) -> Option<Effect> {
        let (action, id) = self.router.select(action)?;
        match action {
            MenuAction::Delete => {
                self.delete(id);
                None
            }
            MenuAction::SaveImage => match self.export(id) {
                Ok(image) => Some(Effect::Download(image)),
                Err(e) => match e.notice() {
                    Some(notice) => Some(Effect::Notice(notice)),
                    None => {
                        error!(%id, error = %e, "save failed");
                        None
                    }
                },
            },
        }
    }

    /// Render a desk note to PNG.
    pub fn export(&self, id: NoteId) -> Result<ExportedImage, ExportError> {
        let note = self.desk.get(id).ok_or(ExportError::NoteNotFound(id))?;
        let image = self.exporter.export(note)?;
        debug!(%id, file = %image.file_name, "exported note");
        Ok(image)
    }

    pub fn text(&self) -> &str {
        self.sequencer.text()
    }

    pub fn lcd(&self) -> Lcd<'_> {
        self.sequencer.lcd()
    }

    pub fn led(&self) -> Led {
        self.sequencer.led()
    }

    pub fn is_printing(&self) -> bool {
        self.sequencer.is_printing()
    }

    pub fn input_disabled(&self) -> bool {
        self.sequencer.input_disabled()
    }

    pub fn print_enabled(&self) -> bool {
        self.sequencer.print_enabled()
    }

    pub fn preview(&self, now: Duration) -> Option<PrintPreview<'_>> {
        self.sequencer.preview(now)
    }

    pub fn in_flight(&self) -> Option<&InFlightNote> {
        self.sequencer.in_flight()
    }

    pub fn notes(&self) -> &[Note] {
        self.desk.notes()
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.desk.get(id)
    }

    pub fn dragging(&self) -> Option<DragSession> {
        self.desk.drag()
    }

    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.router.menu()
    }

    pub fn is_confirming_clear(&self) -> bool {
        self.desk.is_confirming_clear()
    }

    pub fn clear_button(&self, now: Duration) -> ClearButton {
        let visible = !self.desk.is_empty()
            || self.sequencer.in_flight().is_some()
            || now < self.config.init_hint();
        if !visible {
            ClearButton::Hidden
        } else if self.desk.is_confirming_clear() {
            ClearButton::Confirm
        } else {
            ClearButton::ClearDesk
        }
    }
}
