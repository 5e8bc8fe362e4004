//! The page surface: everything the behaviors are allowed to change.
//!
//! Controllers never hold DOM nodes. They hold [`ElementId`]s and write
//! through a [`Surface`], which the browser adapter backs with real elements
//! and tests back with a recording fake.

use std::fmt;

/// Opaque handle to one element on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Write access to the page.
///
/// All methods take `&self`: the page is a shared, interior-mutable
/// resource on a single-threaded event loop. Calls on an unknown element are
/// ignored.
pub trait Surface {
    /// Returns true if the element carries the class.
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Adds (`present == true`) or removes the class.
    fn set_class(&self, element: ElementId, class: &str, present: bool);

    /// Replaces the element's text content.
    fn set_text(&self, element: ElementId, text: &str);

    /// Sets one inline style property.
    fn set_style(&self, element: ElementId, property: &str, value: &str);

    /// Sets an attribute.
    fn set_attribute(&self, element: ElementId, name: &str, value: &str);

    /// Flips the class and returns whether it is now present.
    fn toggle_class(&self, element: ElementId, class: &str) -> bool {
        let present = !self.has_class(element, class);
        self.set_class(element, class, present);
        present
    }
}
