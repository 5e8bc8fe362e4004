//! Mobile navigation drawer.
//!
//! A single boolean, mirrored as a class on the drawer and the hamburger and
//! as `aria-expanded` on the hamburger. Styling does the rest.

use crate::config::NavConfig;
use crate::surface::{ElementId, Surface};

/// Opens and closes the navigation drawer.
#[derive(Debug, Clone)]
pub struct NavController {
    menu: ElementId,
    hamburger: ElementId,
    config: NavConfig,
}

impl NavController {
    /// Creates a controller for the given drawer and button.
    #[must_use]
    pub fn new(menu: ElementId, hamburger: ElementId, config: NavConfig) -> Self {
        Self {
            menu,
            hamburger,
            config,
        }
    }

    /// Returns true if the drawer is open.
    #[must_use]
    pub fn is_open(&self, surface: &dyn Surface) -> bool {
        surface.has_class(self.menu, &self.config.open_class)
    }

    /// Flips the drawer and returns whether it is now open.
    pub fn toggle_menu(&self, surface: &dyn Surface) -> bool {
        let open = !self.is_open(surface);
        self.set_open(surface, open);
        open
    }

    /// Closes the drawer if it is open. Returns true if anything changed.
    pub fn close(&self, surface: &dyn Surface) -> bool {
        if !self.is_open(surface) {
            return false;
        }
        self.set_open(surface, false);
        true
    }

    /// Writes the current state to the page, so the hamburger exposes
    /// `aria-expanded` before the first click.
    pub fn sync(&self, surface: &dyn Surface) {
        self.set_open(surface, self.is_open(surface));
    }

    /// Whether `Escape` should close the drawer.
    #[must_use]
    pub fn closes_on_escape(&self) -> bool {
        self.config.close_on_escape
    }

    fn set_open(&self, surface: &dyn Surface, open: bool) {
        surface.set_class(self.menu, &self.config.open_class, open);
        surface.set_class(self.hamburger, &self.config.open_class, open);
        surface.set_attribute(self.hamburger, "aria-expanded", if open { "true" } else { "false" });
        tracing::debug!(open, "navigation drawer");
    }
}
