//! DOM listeners as an [`EventSource`].

use std::rc::Rc;

use folio_core::{ElementId, EventKind, EventSource, Handler, Key, Rect, UiEvent};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, MouseEvent};

use crate::dom::DomSurface;

/// DOM event name for each [`EventKind`].
#[must_use]
pub const fn dom_event_name(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Click => "click",
        EventKind::PointerMove => "pointermove",
        EventKind::PointerLeave => "pointerleave",
        EventKind::KeyDown => "keydown",
    }
}

/// Registers handlers as DOM listeners on registered elements.
pub struct DomEventSource {
    surface: Rc<DomSurface>,
    listeners: Vec<EventListener>,
}

impl DomEventSource {
    /// Creates a source resolving ids through `surface`.
    #[must_use]
    pub fn new(surface: Rc<DomSurface>) -> Self {
        Self {
            surface,
            listeners: Vec::new(),
        }
    }

    /// Returns the number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Leaves every listener attached for the rest of the page's life.
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}

impl EventSource for DomEventSource {
    fn on(&mut self, target: ElementId, kind: EventKind, mut handler: Handler) {
        let Some(element) = self.surface.element(target) else {
            tracing::warn!(element = %target, ?kind, "listener for unknown element dropped");
            return;
        };

        let node = element.clone();
        let listener = EventListener::new(&element, dom_event_name(kind), move |event| {
            if let Some(ui_event) = translate(kind, target, &node, event) {
                handler(&ui_event);
            }
        });
        self.listeners.push(listener);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn translate(kind: EventKind, target: ElementId, node: &Element, event: &Event) -> Option<UiEvent> {
    match kind {
        EventKind::Click => Some(UiEvent::Click { target }),
        EventKind::PointerMove => {
            let pointer = event.dyn_ref::<MouseEvent>()?;
            let rect = node.get_bounding_client_rect();
            Some(UiEvent::PointerMove {
                target,
                client_x: pointer.client_x() as f32,
                client_y: pointer.client_y() as f32,
                bounds: Rect::new(
                    rect.left() as f32,
                    rect.top() as f32,
                    rect.width() as f32,
                    rect.height() as f32,
                ),
            })
        }
        EventKind::PointerLeave => Some(UiEvent::PointerLeave { target }),
        EventKind::KeyDown => {
            let key = event.dyn_ref::<KeyboardEvent>()?;
            Some(UiEvent::KeyDown {
                target,
                key: Key::from_dom_key(&key.key()),
            })
        }
    }
}
