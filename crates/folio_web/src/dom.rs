//! DOM-backed [`Surface`].
//!
//! Elements are registered once, at discovery, and addressed by index from
//! then on. Registering the same node twice returns the same id, so a card
//! that is both a reveal target and a tilt target is one element.
//!
//! The index is stamped on the node as [`ID_ATTRIBUTE`], so mapping a node
//! back to its id is a lookup, not a scan.

use std::cell::RefCell;

use folio_core::{ElementId, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

/// Attribute carrying the registry index of a node.
pub const ID_ATTRIBUTE: &str = "data-folio-id";

/// Registry of page elements.
#[derive(Debug, Default)]
pub struct DomSurface {
    elements: RefCell<Vec<Element>>,
}

impl DomSurface {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `element` and returns its id.
    pub fn register(&self, element: Element) -> ElementId {
        if let Some(id) = self.id_of(&element) {
            return id;
        }
        let mut elements = self.elements.borrow_mut();
        let id = ElementId(index_to_id(elements.len()));
        report("id stamp", id, element.set_attribute(ID_ATTRIBUTE, &id.0.to_string()));
        elements.push(element);
        id
    }

    /// Returns the node behind `id`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(id.0 as usize).cloned()
    }

    /// Returns the id of a registered node.
    ///
    /// A stamp copied onto a foreign node (e.g. by `cloneNode`) is rejected
    /// because the registered node at that index differs.
    #[must_use]
    pub fn id_of(&self, element: &Element) -> Option<ElementId> {
        let index = parse_stamp(&element.get_attribute(ID_ATTRIBUTE)?)?;
        let elements = self.elements.borrow();
        let known: &JsValue = elements.get(index)?.as_ref();
        let needle: &JsValue = element.as_ref();
        (known == needle).then(|| ElementId(index_to_id(index)))
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }
}

fn index_to_id(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

/// Parses an [`ID_ATTRIBUTE`] value into a registry index.
fn parse_stamp(value: &str) -> Option<usize> {
    value.parse().ok()
}

fn report(operation: &str, element: ElementId, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::debug!(%element, "{operation} failed: {err:?}");
    }
}

impl Surface for DomSurface {
    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|node| node.class_list().contains(class))
    }

    fn set_class(&self, element: ElementId, class: &str, present: bool) {
        let Some(node) = self.element(element) else {
            return;
        };
        let result = node.class_list().toggle_with_force(class, present).map(|_| ());
        report("class update", element, result);
    }

    fn set_text(&self, element: ElementId, text: &str) {
        if let Some(node) = self.element(element) {
            node.set_text_content(Some(text));
        }
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        let Some(node) = self.element(element) else {
            return;
        };
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            tracing::debug!(%element, "not an HTML element, style {property} skipped");
            return;
        };
        report("style update", element, html.style().set_property(property, value));
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.element(element) {
            report("attribute update", element, node.set_attribute(name, value));
        }
    }
}
