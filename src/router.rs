//! # Interaction Router
//!
//! Turns raw pointer events into intents for the desk, and owns the one
//! context menu that may be open.
//!
//! | Event | Target | Intent |
//! |-------|--------|--------|
//! | primary down | exit slot | pick up the waiting note |
//! | primary down | desk note | grab it |
//! | move | anywhere | move the dragged note |
//! | up / leave | anywhere | drop |
//! | context menu | desk note | open the menu there |
//! | click | outside the menu | close the menu |
//! | click | delete button | delete that note |
//!
//! Secondary-button presses never start a drag; that button belongs to the
//! context menu.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::note::NoteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Primary,
    Secondary,
    Auxiliary,
}

/// What lies under the pointer, as reported by the host's hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Bare desk or printer body
    Background,
    /// The note hanging out of the exit slot
    Exit,
    /// A desk note
    Note(NoteId),
    /// The hover trash button of a desk note
    DeleteButton(NoteId),
    /// Inside the open context menu
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        at: Point,
        button: Button,
        target: Target,
    },
    Move {
        at: Point,
    },
    Up {
        at: Point,
    },
    /// Pointer left the desk surface
    Leave,
    /// Right click or long press
    ContextMenu {
        at: Point,
        target: Target,
    },
    Click {
        at: Point,
        target: Target,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    SaveImage,
    Delete,
}

/// An open context menu, anchored where it was requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub anchor: Point,
    pub note: NoteId,
}

/// What the desk should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    None,
    PickUp { pointer: Point },
    Grab { id: NoteId, pointer: Point },
    DragTo(Point),
    Drop,
    Delete(NoteId),
    MenuOpened(ContextMenu),
    MenuClosed,
}

impl Intent {
    /// Whether the host should suppress its own handling of the event
    /// (the native context menu).
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Intent::MenuOpened(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionRouter {
    menu: Option<ContextMenu>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu(&self) -> Option<ContextMenu> {
        self.menu
    }

    pub fn route(&mut self, event: PointerEvent) -> Intent {
        match event {
            PointerEvent::Down {
                at,
                button: Button::Primary,
                target,
            } => match target {
                Target::Exit => Intent::PickUp { pointer: at },
                Target::Note(id) | Target::DeleteButton(id) => Intent::Grab { id, pointer: at },
                Target::Background | Target::Menu => Intent::None,
            },
            PointerEvent::Down { .. } => Intent::None,
            PointerEvent::Move { at } => Intent::DragTo(at),
            PointerEvent::Up { .. } | PointerEvent::Leave => Intent::Drop,
            PointerEvent::ContextMenu {
                at,
                target: Target::Note(id),
            } => {
                let menu = ContextMenu {
                    anchor: at,
                    note: id,
                };
                self.menu = Some(menu);
                Intent::MenuOpened(menu)
            }
            PointerEvent::ContextMenu { .. } => Intent::None,
            PointerEvent::Click {
                target: Target::Menu,
                ..
            } => Intent::None,
            PointerEvent::Click {
                target: Target::DeleteButton(id),
                ..
            } => Intent::Delete(id),
            PointerEvent::Click { .. } => {
                if self.close_menu() {
                    Intent::MenuClosed
                } else {
                    Intent::None
                }
            }
        }
    }

    /// Pick an entry from the open menu. The menu closes either way.
    pub fn select(&mut self, action: MenuAction) -> Option<(MenuAction, NoteId)> {
        self.menu.take().map(|menu| (action, menu.note))
    }

    pub fn close_menu(&mut self) -> bool {
        self.menu.take().is_some()
    }

    /// Drop the menu if it belongs to a note that no longer exists.
    pub fn forget(&mut self, id: NoteId) {
        if self.menu.is_some_and(|m| m.note == id) {
            self.menu = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(button: Button, target: Target) -> PointerEvent {
        PointerEvent::Down {
            at: Point::new(5.0, 6.0),
            button,
            target,
        }
    }

    #[test]
    fn test_primary_down_starts_drag() {
        let mut router = InteractionRouter::new();
        assert_eq!(
            router.route(down(Button::Primary, Target::Exit)),
            Intent::PickUp {
                pointer: Point::new(5.0, 6.0)
            }
        );
        assert_eq!(
            router.route(down(Button::Primary, Target::Note(NoteId(3)))),
            Intent::Grab {
                id: NoteId(3),
                pointer: Point::new(5.0, 6.0)
            }
        );
    }

    #[test]
    fn test_secondary_down_never_drags() {
        let mut router = InteractionRouter::new();
        assert_eq!(router.route(down(Button::Secondary, Target::Exit)), Intent::None);
        assert_eq!(
            router.route(down(Button::Secondary, Target::Note(NoteId(1)))),
            Intent::None
        );
    }

    #[test]
    fn test_up_and_leave_drop() {
        let mut router = InteractionRouter::new();
        assert_eq!(router.route(PointerEvent::Leave), Intent::Drop);
        assert_eq!(
            router.route(PointerEvent::Up { at: Point::ORIGIN }),
            Intent::Drop
        );
    }

    #[test]
    fn test_context_menu_lifecycle() {
        let mut router = InteractionRouter::new();
        let at = Point::new(40.0, 50.0);
        let intent = router.route(PointerEvent::ContextMenu {
            at,
            target: Target::Note(NoteId(2)),
        });
        assert!(intent.suppresses_default());
        assert_eq!(
            router.menu(),
            Some(ContextMenu {
                anchor: at,
                note: NoteId(2)
            })
        );

        // clicks inside the menu keep it open
        let inside = PointerEvent::Click {
            at,
            target: Target::Menu,
        };
        assert_eq!(router.route(inside), Intent::None);
        assert!(router.menu().is_some());

        // any click elsewhere closes it
        let outside = PointerEvent::Click {
            at: Point::ORIGIN,
            target: Target::Background,
        };
        assert_eq!(router.route(outside), Intent::MenuClosed);
        assert!(router.menu().is_none());
        assert_eq!(router.route(outside), Intent::None);
    }

    #[test]
    fn test_only_one_menu() {
        let mut router = InteractionRouter::new();
        for id in [1, 2] {
            router.route(PointerEvent::ContextMenu {
                at: Point::ORIGIN,
                target: Target::Note(NoteId(id)),
            });
        }
        assert_eq!(router.menu().map(|m| m.note), Some(NoteId(2)));
    }

    #[test]
    fn test_context_menu_off_note_is_native() {
        let mut router = InteractionRouter::new();
        let intent = router.route(PointerEvent::ContextMenu {
            at: Point::ORIGIN,
            target: Target::Background,
        });
        assert!(!intent.suppresses_default());
        assert!(router.menu().is_none());
    }

    #[test]
    fn test_select_closes_menu() {
        let mut router = InteractionRouter::new();
        assert_eq!(router.select(MenuAction::Delete), None);
        router.route(PointerEvent::ContextMenu {
            at: Point::ORIGIN,
            target: Target::Note(NoteId(4)),
        });
        assert_eq!(
            router.select(MenuAction::SaveImage),
            Some((MenuAction::SaveImage, NoteId(4)))
        );
        assert!(router.menu().is_none());
    }

    #[test]
    fn test_delete_button_click() {
        let mut router = InteractionRouter::new();
        let intent = router.route(PointerEvent::Click {
            at: Point::ORIGIN,
            target: Target::DeleteButton(NoteId(8)),
        });
        assert_eq!(intent, Intent::Delete(NoteId(8)));
    }

    #[test]
    fn test_forget() {
        let mut router = InteractionRouter::new();
        router.route(PointerEvent::ContextMenu {
            at: Point::ORIGIN,
            target: Target::Note(NoteId(4)),
        });
        router.forget(NoteId(5));
        assert!(router.menu().is_some());
        router.forget(NoteId(4));
        assert!(router.menu().is_none());
    }
}
