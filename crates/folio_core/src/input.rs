//! Input events and the source they are registered against.
//!
//! Each behavior registers plain handler closures for the elements it
//! cares about. The browser adapter turns DOM listeners into [`UiEvent`]s;
//! tests call the handlers directly through a fake source.

use crate::geometry::Rect;
use crate::surface::ElementId;

/// Keyboard key, as far as the page cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        if matches!(key, "Escape" | "Esc") {
            Self::Escape
        } else {
            Self::Other
        }
    }
}

/// Kind of event a handler is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary activation (click, tap, keyboard activation).
    Click,
    /// Pointer moved over the element.
    PointerMove,
    /// Pointer left the element.
    PointerLeave,
    /// Key pressed while the element (or a descendant) has focus.
    KeyDown,
}

/// A delivered input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// The element was activated.
    Click {
        /// Element the handler was registered on.
        target: ElementId,
    },
    /// Pointer moved inside the element.
    PointerMove {
        /// Element the handler was registered on.
        target: ElementId,
        /// Pointer X in viewport coordinates.
        client_x: f32,
        /// Pointer Y in viewport coordinates.
        client_y: f32,
        /// Element bounding box at the time of the event.
        bounds: Rect,
    },
    /// Pointer left the element.
    PointerLeave {
        /// Element the handler was registered on.
        target: ElementId,
    },
    /// A key was pressed.
    KeyDown {
        /// Element the handler was registered on.
        target: ElementId,
        /// The key.
        key: Key,
    },
}

impl UiEvent {
    /// Returns the element the handler was registered on.
    #[must_use]
    pub const fn target(&self) -> ElementId {
        match *self {
            Self::Click { target }
            | Self::PointerMove { target, .. }
            | Self::PointerLeave { target }
            | Self::KeyDown { target, .. } => target,
        }
    }

    /// Returns the kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerLeave { .. } => EventKind::PointerLeave,
            Self::KeyDown { .. } => EventKind::KeyDown,
        }
    }
}

/// Handler invoked for every matching event.
pub type Handler = Box<dyn FnMut(&UiEvent)>;

/// Something handlers can be registered against.
///
/// Registrations last for the lifetime of the page.
pub trait EventSource {
    /// Registers `handler` for `kind` events on `target`.
    fn on(&mut self, target: ElementId, kind: EventKind, handler: Handler);
}
