//! # Reveal Controller
//!
//! One-shot "reveal on scroll". Every registered element starts Pending
//! (hidden by external styling keyed to the pending class) and becomes
//! Active the first time enough of it is visible. Once Active, the element
//! is no longer observed, so it can never transition again.

use std::collections::BTreeMap;

use crate::config::RevealConfig;
use crate::surface::{ElementId, Surface};

/// Reported ratios can land just below the configured threshold when the
/// crossing is reported.
const RATIO_TOLERANCE: f64 = 1e-3;

/// Reveal state of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Registered, not yet seen.
    Pending,
    /// Seen, transition triggered.
    Active,
}

/// One entry of a visibility callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    /// The observed element.
    pub target: ElementId,
    /// Whether the element intersects the viewport.
    pub is_intersecting: bool,
    /// Visible fraction of the element (0-1).
    pub ratio: f64,
}

/// Observation settings handed to the visibility primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction at which callbacks fire.
    pub threshold: f64,
    /// Margin around the viewport (CSS margin syntax).
    pub root_margin: String,
}

/// Visibility observation primitive (an `IntersectionObserver` in browsers).
pub trait VisibilityObserver {
    /// Starts reporting visibility changes for `target`.
    fn observe(&self, target: ElementId);

    /// Stops reporting visibility changes for `target`.
    fn unobserve(&self, target: ElementId);
}

/// Callback for a batch of visibility changes, with the observer that
/// reported them.
pub type VisibilityCallback = Box<dyn FnMut(&[Visibility], &dyn VisibilityObserver)>;

/// Creates visibility observers.
pub trait ObserverFactory {
    /// Creates an observer that reports to `callback`.
    ///
    /// Returns `None` when the platform has no observation primitive.
    fn create(
        &self,
        options: &ObserverOptions,
        callback: VisibilityCallback,
    ) -> Option<Box<dyn VisibilityObserver>>;
}

/// Tracks which elements have been revealed.
#[derive(Debug)]
pub struct RevealController {
    targets: BTreeMap<ElementId, RevealState>,
    config: RevealConfig,
    active: usize,
}

impl RevealController {
    /// Creates a controller with no targets.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self {
            targets: BTreeMap::new(),
            config,
            active: 0,
        }
    }

    /// Options the observer must be created with.
    #[must_use]
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.config.threshold,
            root_margin: self.config.root_margin.clone(),
        }
    }

    /// Marks `target` Pending and starts observing it.
    ///
    /// Registering an element twice keeps its current state.
    pub fn register(
        &mut self,
        target: ElementId,
        surface: &dyn Surface,
        observer: &dyn VisibilityObserver,
    ) {
        if self.targets.contains_key(&target) {
            return;
        }
        self.targets.insert(target, RevealState::Pending);
        surface.set_class(target, &self.config.pending_class, true);
        observer.observe(target);
    }

    /// Handles one visibility callback.
    ///
    /// Returns the elements that became Active, in callback order.
    pub fn on_visibility(
        &mut self,
        entries: &[Visibility],
        surface: &dyn Surface,
        observer: &dyn VisibilityObserver,
    ) -> Vec<ElementId> {
        let mut revealed = Vec::new();

        for entry in entries {
            if !self.crossed_threshold(entry) {
                continue;
            }
            let Some(state) = self.targets.get_mut(&entry.target) else {
                continue;
            };
            if *state == RevealState::Active {
                continue;
            }

            *state = RevealState::Active;
            self.active += 1;
            surface.set_class(entry.target, &self.config.active_class, true);
            observer.unobserve(entry.target);
            tracing::debug!(element = %entry.target, ratio = entry.ratio, "revealed");
            revealed.push(entry.target);
        }

        if !revealed.is_empty() && self.pending_count() == 0 {
            tracing::debug!(total = self.active, "all reveal targets shown");
        }
        revealed
    }

    /// Returns the state of `target`, `None` if it was never registered.
    #[must_use]
    pub fn state(&self, target: ElementId) -> Option<RevealState> {
        self.targets.get(&target).copied()
    }

    /// Returns how many targets are still hidden.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.targets.len() - self.active
    }

    /// Returns how many targets have been revealed.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active
    }

    fn crossed_threshold(&self, entry: &Visibility) -> bool {
        entry.is_intersecting && entry.ratio + RATIO_TOLERANCE >= self.config.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct Recorder {
        classes: RefCell<BTreeSet<(ElementId, String)>>,
        observed: RefCell<BTreeSet<ElementId>>,
    }

    impl Surface for Recorder {
        fn has_class(&self, element: ElementId, class: &str) -> bool {
            self.classes.borrow().contains(&(element, class.to_owned()))
        }
        fn set_class(&self, element: ElementId, class: &str, present: bool) {
            let key = (element, class.to_owned());
            if present {
                self.classes.borrow_mut().insert(key);
            } else {
                self.classes.borrow_mut().remove(&key);
            }
        }
        fn set_text(&self, _: ElementId, _: &str) {}
        fn set_style(&self, _: ElementId, _: &str, _: &str) {}
        fn set_attribute(&self, _: ElementId, _: &str, _: &str) {}
    }

    impl VisibilityObserver for Recorder {
        fn observe(&self, target: ElementId) {
            self.observed.borrow_mut().insert(target);
        }
        fn unobserve(&self, target: ElementId) {
            self.observed.borrow_mut().remove(&target);
        }
    }

    fn seen(id: u32, ratio: f64) -> Visibility {
        Visibility {
            target: ElementId(id),
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }

    #[test]
    fn test_register_marks_pending_and_observes() {
        let page = Recorder::default();
        let mut reveal = RevealController::new(RevealConfig::default());
        reveal.register(ElementId(1), &page, &page);

        assert_eq!(reveal.state(ElementId(1)), Some(RevealState::Pending));
        assert!(page.has_class(ElementId(1), "reveal"));
        assert!(page.observed.borrow().contains(&ElementId(1)));
    }

    #[test]
    fn test_below_threshold_stays_pending() {
        let page = Recorder::default();
        let mut reveal = RevealController::new(RevealConfig::default());
        reveal.register(ElementId(1), &page, &page);

        assert!(reveal.on_visibility(&[seen(1, 0.05)], &page, &page).is_empty());
        assert_eq!(reveal.state(ElementId(1)), Some(RevealState::Pending));
        assert!(!page.has_class(ElementId(1), "active"));
    }

    #[test]
    fn test_crossing_activates_once_and_unobserves() {
        let page = Recorder::default();
        let mut reveal = RevealController::new(RevealConfig::default());
        reveal.register(ElementId(1), &page, &page);
        reveal.register(ElementId(2), &page, &page);

        let revealed = reveal.on_visibility(&[seen(1, 0.2), seen(2, 0.0)], &page, &page);
        assert_eq!(revealed, vec![ElementId(1)]);
        assert!(page.has_class(ElementId(1), "active"));
        assert!(!page.observed.borrow().contains(&ElementId(1)));
        assert_eq!(reveal.active_count(), 1);
        assert_eq!(reveal.pending_count(), 1);

        // A stale callback for an already revealed element changes nothing.
        assert!(reveal.on_visibility(&[seen(1, 0.9)], &page, &page).is_empty());
        assert_eq!(reveal.active_count(), 1);
    }

    #[test]
    fn test_ratio_just_under_threshold_counts() {
        let page = Recorder::default();
        let mut reveal = RevealController::new(RevealConfig::default());
        reveal.register(ElementId(3), &page, &page);

        assert_eq!(
            reveal.on_visibility(&[seen(3, 0.1499)], &page, &page),
            vec![ElementId(3)]
        );
    }

    #[test]
    fn test_register_again_keeps_active_state() {
        let page = Recorder::default();
        let mut reveal = RevealController::new(RevealConfig::default());
        reveal.register(ElementId(4), &page, &page);
        reveal.on_visibility(&[seen(4, 0.5)], &page, &page);

        reveal.register(ElementId(4), &page, &page);
        assert_eq!(reveal.state(ElementId(4)), Some(RevealState::Active));
        assert!(!page.observed.borrow().contains(&ElementId(4)));
        assert_eq!((reveal.pending_count(), reveal.active_count()), (0, 1));
    }

    #[test]
    fn test_unregistered_entries_ignored() {
        let page = Recorder::default();
        let mut reveal = RevealController::new(RevealConfig::default());
        assert!(reveal.on_visibility(&[seen(9, 1.0)], &page, &page).is_empty());
        assert_eq!(reveal.state(ElementId(9)), None);
    }
}
