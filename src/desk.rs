//! # Desk Manager
//!
//! Owns the notes lying on the desk, the single drag slot and the two-step
//! "clear desk" confirmation.
//!
//! ## Drag
//!
//! A drag stores the vector from the pointer to the note's top-left corner.
//! Every move puts the note at `pointer - offset`, so the note stays glued
//! to the point where it was grabbed.
//!
//! ## Clear
//!
//! ```text
//! clear_all ──▶ armed (deadline = now + window) ──clear_all before deadline──▶ cleared
//!                   │
//!                   └── deadline passes ──▶ disarmed
//! ```

use std::time::Duration;

use tracing::debug;

use crate::config::MemoConfig;
use crate::geometry::{Point, Rect};
use crate::note::{InFlightNote, Note, NoteId};

/// The note currently following the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub id: NoteId,
    /// Pointer position minus the note's top-left corner
    pub offset: Point,
}

/// Result of a clear request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// First click: waiting for confirmation
    Armed,
    /// Second click inside the window: desk emptied
    Cleared,
}

#[derive(Debug, Clone)]
pub struct Desk {
    config: MemoConfig,
    notes: Vec<Note>,
    drag: Option<DragSession>,
    confirm_deadline: Option<Duration>,
}

impl Desk {
    pub fn new(config: MemoConfig) -> Self {
        Self {
            config,
            notes: Vec::new(),
            drag: None,
            confirm_deadline: None,
        }
    }

    /// Notes in print order; the last one is on top.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn drag(&self) -> Option<DragSession> {
        self.drag
    }

    pub fn is_dragging(&self, id: NoteId) -> bool {
        self.drag.is_some_and(|d| d.id == id)
    }

    /// Where a note of `width` x `height` hangs when it comes out of `slot`.
    pub fn exit_position(&self, slot: Rect, width: f32, height: f32) -> Point {
        Point::new(
            slot.left + (slot.width - width) / 2.0,
            slot.top - height + self.config.slot_overlap,
        )
    }

    /// Take the note waiting at the exit: it lands on the desk right where it
    /// hangs, gets its tilt, and starts following `pointer`.
    pub fn pick_up_from_exit(
        &mut self,
        note: InFlightNote,
        slot: Rect,
        pointer: Point,
        rotate: f32,
    ) -> NoteId {
        let position = self.exit_position(slot, note.width, note.height);
        let id = note.id;

        // ids stay unique
        self.notes.retain(|n| n.id != id);
        self.notes.push(Note::place(note, position, rotate));
        self.drag = Some(DragSession {
            id,
            offset: pointer - position,
        });
        debug!(%id, x = position.x, y = position.y, rotate, "picked up note from exit");
        id
    }

    /// Grab a desk note at `pointer`. False if there is no such note.
    pub fn begin_drag(&mut self, id: NoteId, pointer: Point) -> bool {
        let Some(note) = self.get(id) else {
            return false;
        };
        let offset = pointer - note.position();
        self.drag = Some(DragSession { id, offset });
        debug!(%id, "drag started");
        true
    }

    /// Move the dragged note under `pointer`. Returns the dragged id.
    pub fn drag_to(&mut self, pointer: Point) -> Option<NoteId> {
        let session = self.drag?;
        let note = self.notes.iter_mut().find(|n| n.id == session.id)?;
        note.move_to(pointer - session.offset);
        Some(session.id)
    }

    /// Drop whatever is being dragged where it is.
    pub fn end_drag(&mut self) -> Option<NoteId> {
        let session = self.drag.take()?;
        debug!(id = %session.id, "drag ended");
        Some(session.id)
    }

    /// Remove a note. Removing an absent id does nothing.
    pub fn delete(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = self.notes.len() != before;
        if removed {
            if self.is_dragging(id) {
                self.drag = None;
            }
            debug!(%id, "deleted note");
        }
        removed
    }

    pub fn is_confirming_clear(&self) -> bool {
        self.confirm_deadline.is_some()
    }

    /// Two-step clear. The caller discards any note waiting at the exit when
    /// this returns [`ClearOutcome::Cleared`].
    pub fn clear_all(&mut self, now: Duration) -> ClearOutcome {
        self.tick(now);
        if self.confirm_deadline.take().is_some() {
            let count = self.notes.len();
            self.notes.clear();
            self.drag = None;
            debug!(count, "desk cleared");
            ClearOutcome::Cleared
        } else {
            self.confirm_deadline = Some(now + self.config.confirm_clear_window());
            debug!("clear armed");
            ClearOutcome::Armed
        }
    }

    /// Advance timers: disarms an expired clear confirmation.
    pub fn tick(&mut self, now: Duration) {
        if self.confirm_deadline.is_some_and(|deadline| now >= deadline) {
            self.confirm_deadline = None;
            debug!("clear confirmation expired");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::PALETTE;

    fn in_flight(id: u64) -> InFlightNote {
        InFlightNote {
            id: NoteId(id),
            content: format!("note {}", id),
            width: 180.0,
            height: 160.0,
            color: PALETTE[0],
            timestamp: "2026.10.18".to_string(),
        }
    }

    fn slot() -> Rect {
        Rect::new(100.0, 400.0, 200.0, 6.0)
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn desk_with(ids: &[u64]) -> Desk {
        let mut desk = Desk::new(MemoConfig::DEFAULT);
        for &id in ids {
            desk.pick_up_from_exit(in_flight(id), slot(), Point::new(200.0, 300.0), 0.0);
            desk.end_drag();
        }
        desk
    }

    #[test]
    fn test_pick_up_position() {
        let mut desk = Desk::new(MemoConfig::DEFAULT);
        let pointer = Point::new(210.0, 260.0);
        let id = desk.pick_up_from_exit(in_flight(1), slot(), pointer, 1.2);

        let note = desk.get(id).unwrap();
        // centred: 100 + (200 - 180) / 2, above the slot: 400 - 160 + 6
        assert_eq!(note.position(), Point::new(110.0, 246.0));
        assert_eq!(note.rotate, 1.2);
        assert_eq!(
            desk.drag(),
            Some(DragSession {
                id,
                offset: Point::new(100.0, 14.0)
            })
        );
    }

    #[test]
    fn test_drag_keeps_grab_point() {
        let mut desk = desk_with(&[1, 2]);
        let other_before = desk.get(NoteId(2)).unwrap().position();
        let start = desk.get(NoteId(1)).unwrap().position();

        assert!(desk.begin_drag(NoteId(1), start + Point::new(10.0, 10.0)));
        assert_eq!(desk.drag_to(Point::new(150.0, 130.0)), Some(NoteId(1)));
        assert_eq!(desk.get(NoteId(1)).unwrap().position(), Point::new(140.0, 120.0));
        assert_eq!(desk.get(NoteId(2)).unwrap().position(), other_before);

        assert_eq!(desk.end_drag(), Some(NoteId(1)));
        assert_eq!(desk.drag_to(Point::new(0.0, 0.0)), None);
        assert_eq!(desk.get(NoteId(1)).unwrap().position(), Point::new(140.0, 120.0));
    }

    #[test]
    fn test_begin_drag_unknown_note() {
        let mut desk = desk_with(&[1]);
        assert!(!desk.begin_drag(NoteId(9), Point::ORIGIN));
        assert!(desk.drag().is_none());
    }

    #[test]
    fn test_delete_exact_note() {
        let mut desk = desk_with(&[1, 2, 3]);
        assert!(desk.delete(NoteId(2)));
        let ids: Vec<_> = desk.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![NoteId(1), NoteId(3)]);
        assert!(!desk.delete(NoteId(2)));
        assert!(!desk.delete(NoteId(42)));
        assert_eq!(desk.len(), 2);
    }

    #[test]
    fn test_delete_dragged_note_ends_drag() {
        let mut desk = desk_with(&[1]);
        desk.begin_drag(NoteId(1), Point::ORIGIN);
        desk.delete(NoteId(1));
        assert!(desk.drag().is_none());
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut desk = desk_with(&[1, 2]);
        assert_eq!(desk.clear_all(ms(0)), ClearOutcome::Armed);
        assert!(desk.is_confirming_clear());
        assert_eq!(desk.len(), 2);

        assert_eq!(desk.clear_all(ms(900)), ClearOutcome::Cleared);
        assert!(desk.is_empty());
        assert!(!desk.is_confirming_clear());
    }

    #[test]
    fn test_clear_confirmation_expires() {
        let mut desk = desk_with(&[1]);
        desk.clear_all(ms(0));
        desk.tick(ms(3000));
        assert!(!desk.is_confirming_clear());

        assert_eq!(desk.clear_all(ms(3500)), ClearOutcome::Armed);
        assert_eq!(desk.len(), 1);
    }

    #[test]
    fn test_late_second_click_rearms_without_tick() {
        let mut desk = desk_with(&[1]);
        desk.clear_all(ms(0));
        assert_eq!(desk.clear_all(ms(3001)), ClearOutcome::Armed);
        assert_eq!(desk.len(), 1);
    }

    #[test]
    fn test_no_duplicate_ids() {
        let mut desk = desk_with(&[1]);
        desk.pick_up_from_exit(in_flight(1), slot(), Point::ORIGIN, 0.0);
        assert_eq!(desk.len(), 1);
    }
}
