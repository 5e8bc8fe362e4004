//! Fake page used by the integration tests.
//!
//! Every platform seam of `folio_core` has an in-memory double here:
//! a recording surface, a handler-table event source, a manual clock
//! scheduler, an observer that delivers only what is observed, and stores.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

use folio_core::{
    ElementId, EventKind, EventSource, FolioConfig, FolioError, FolioResult, Handler,
    MemoryStore, ObserverFactory, ObserverOptions, PageLayout, PreferenceStore, Scheduler,
    Services, Site, Surface, Task, UiEvent, Visibility, VisibilityCallback, VisibilityObserver,
};

// ============================================================================
// SURFACE
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct ElementState {
    pub classes: BTreeSet<String>,
    pub text: String,
    pub styles: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    elements: RefCell<BTreeMap<ElementId, ElementState>>,
    text_writes: Cell<usize>,
}

impl FakeSurface {
    pub fn element(&self, id: ElementId) -> ElementState {
        self.elements.borrow().get(&id).cloned().unwrap_or_default()
    }

    pub fn text(&self, id: ElementId) -> String {
        self.element(id).text
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<String> {
        self.element(id).styles.get(property).cloned()
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        self.element(id).attributes.get(name).cloned()
    }

    pub fn text_writes(&self) -> usize {
        self.text_writes.get()
    }

    fn with<R>(&self, id: ElementId, f: impl FnOnce(&mut ElementState) -> R) -> R {
        f(self.elements.borrow_mut().entry(id).or_default())
    }
}

impl Surface for FakeSurface {
    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.elements
            .borrow()
            .get(&element)
            .is_some_and(|state| state.classes.contains(class))
    }

    fn set_class(&self, element: ElementId, class: &str, present: bool) {
        self.with(element, |state| {
            if present {
                state.classes.insert(class.to_owned());
            } else {
                state.classes.remove(class);
            }
        });
    }

    fn set_text(&self, element: ElementId, text: &str) {
        self.text_writes.set(self.text_writes.get() + 1);
        self.with(element, |state| state.text = text.to_owned());
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        self.with(element, |state| {
            state.styles.insert(property.to_owned(), value.to_owned());
        });
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        self.with(element, |state| {
            state.attributes.insert(name.to_owned(), value.to_owned());
        });
    }
}

// ============================================================================
// EVENT SOURCE
// ============================================================================

#[derive(Default)]
pub struct FakeEvents {
    handlers: HashMap<(ElementId, EventKind), Vec<Handler>>,
}

impl FakeEvents {
    /// Delivers `event` to every handler registered for its target and kind.
    pub fn emit(&mut self, event: UiEvent) -> usize {
        let Some(handlers) = self.handlers.get_mut(&(event.target(), event.kind())) else {
            return 0;
        };
        for handler in handlers.iter_mut() {
            handler(&event);
        }
        handlers.len()
    }

    pub fn click(&mut self, target: ElementId) -> usize {
        self.emit(UiEvent::Click { target })
    }

    pub fn handler_count(&self, target: ElementId, kind: EventKind) -> usize {
        self.handlers.get(&(target, kind)).map_or(0, Vec::len)
    }
}

impl EventSource for FakeEvents {
    fn on(&mut self, target: ElementId, kind: EventKind, handler: Handler) {
        self.handlers.entry((target, kind)).or_default().push(handler);
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Manual clock. Tasks run only when the test advances time.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    queue: RefCell<Vec<(Duration, u64, Task)>>,
}

impl ManualScheduler {
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Delay of the next queued task, relative to now.
    pub fn next_delay(&self) -> Option<Duration> {
        self.queue
            .borrow()
            .iter()
            .map(|(due, _, _)| *due)
            .min()
            .map(|due| due - self.now.get())
    }

    /// Runs the earliest task, moving the clock to its due time.
    pub fn run_next(&self) -> bool {
        let task = {
            let mut queue = self.queue.borrow_mut();
            let Some(position) = queue
                .iter()
                .enumerate()
                .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                .map(|(position, _)| position)
            else {
                return false;
            };
            let (due, _, task) = queue.remove(position);
            self.now.set(due);
            task
        };
        task();
        true
    }

    /// Runs every task due within `by`, then sets the clock to `now + by`.
    pub fn advance(&self, by: Duration) {
        let until = self.now.get() + by;
        while self.next_delay().is_some_and(|delay| self.now.get() + delay <= until) {
            self.run_next();
        }
        self.now.set(until);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue
            .borrow_mut()
            .push((self.now.get() + delay, seq, task));
    }
}

// ============================================================================
// VISIBILITY OBSERVER
// ============================================================================

#[derive(Default)]
struct ObserverState {
    options: RefCell<Option<ObserverOptions>>,
    callback: RefCell<Option<VisibilityCallback>>,
    observed: RefCell<BTreeSet<ElementId>>,
}

struct FakeObserver {
    state: Rc<ObserverState>,
}

impl VisibilityObserver for FakeObserver {
    fn observe(&self, target: ElementId) {
        self.state.observed.borrow_mut().insert(target);
    }

    fn unobserve(&self, target: ElementId) {
        self.state.observed.borrow_mut().remove(&target);
    }
}

/// Observer factory that behaves like a browser: only observed targets are
/// reported.
pub struct FakeObservers {
    available: bool,
    state: Rc<ObserverState>,
}

impl FakeObservers {
    pub fn new() -> Self {
        Self {
            available: true,
            state: Rc::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            state: Rc::default(),
        }
    }

    pub fn options(&self) -> Option<ObserverOptions> {
        self.state.options.borrow().clone()
    }

    pub fn is_observed(&self, target: ElementId) -> bool {
        self.state.observed.borrow().contains(&target)
    }

    /// Delivers one callback with the entries for observed targets.
    /// Returns how many entries were delivered.
    pub fn report(&self, entries: &[Visibility]) -> usize {
        let delivered: Vec<Visibility> = entries
            .iter()
            .filter(|entry| self.is_observed(entry.target))
            .copied()
            .collect();
        if delivered.is_empty() {
            return 0;
        }

        let observer = FakeObserver {
            state: Rc::clone(&self.state),
        };
        let observer: &dyn VisibilityObserver = &observer;
        let mut callback = self.state.callback.borrow_mut();
        if let Some(callback) = callback.as_mut() {
            callback(delivered.as_slice(), observer);
        }
        delivered.len()
    }
}

impl ObserverFactory for FakeObservers {
    fn create(
        &self,
        options: &ObserverOptions,
        callback: VisibilityCallback,
    ) -> Option<Box<dyn VisibilityObserver>> {
        if !self.available {
            return None;
        }
        *self.state.options.borrow_mut() = Some(options.clone());
        *self.state.callback.borrow_mut() = Some(callback);
        Some(Box::new(FakeObserver {
            state: Rc::clone(&self.state),
        }))
    }
}

pub fn visible(id: ElementId, ratio: f64) -> Visibility {
    Visibility {
        target: id,
        is_intersecting: ratio > 0.0,
        ratio,
    }
}

// ============================================================================
// STORES
// ============================================================================

/// Store that refuses every operation, like a browser with storage disabled.
#[derive(Default)]
pub struct FailingStore;

impl PreferenceStore for FailingStore {
    fn get(&self, _key: &str) -> FolioResult<Option<String>> {
        Err(FolioError::Storage("storage disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> FolioResult<()> {
        Err(FolioError::Storage("storage disabled".into()))
    }
}

// ============================================================================
// PAGE
// ============================================================================

pub const ROOT: ElementId = ElementId(0);
pub const THEME_TOGGLE: ElementId = ElementId(1);
pub const HAMBURGER: ElementId = ElementId(2);
pub const NAV_MENU: ElementId = ElementId(3);
pub const NAV_LINKS: [ElementId; 3] = [ElementId(10), ElementId(11), ElementId(12)];
pub const TYPING_TEXT: ElementId = ElementId(20);
pub const SECTIONS: [ElementId; 3] = [ElementId(30), ElementId(31), ElementId(32)];
pub const CARDS: [ElementId; 2] = [ElementId(40), ElementId(41)];

/// Layout with every element present.
pub fn full_layout() -> PageLayout {
    PageLayout {
        root: ROOT,
        theme_toggle: Some(THEME_TOGGLE),
        hamburger: Some(HAMBURGER),
        nav_menu: Some(NAV_MENU),
        nav_links: NAV_LINKS.to_vec(),
        typing_text: Some(TYPING_TEXT),
        reveal_targets: SECTIONS.to_vec(),
        tilt_targets: CARDS.to_vec(),
    }
}

pub struct TestPage {
    pub surface: Rc<FakeSurface>,
    pub scheduler: Rc<ManualScheduler>,
    pub store: Rc<dyn PreferenceStore>,
    pub events: FakeEvents,
    pub observers: FakeObservers,
    pub layout: PageLayout,
}

impl TestPage {
    pub fn new() -> Self {
        Self::with_store(Rc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Rc<dyn PreferenceStore>) -> Self {
        Self {
            surface: Rc::default(),
            scheduler: Rc::default(),
            store,
            events: FakeEvents::default(),
            observers: FakeObservers::new(),
            layout: full_layout(),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            surface: Rc::clone(&self.surface) as Rc<dyn Surface>,
            scheduler: Rc::clone(&self.scheduler) as Rc<dyn Scheduler>,
            store: Rc::clone(&self.store),
        }
    }

    pub fn mount(&mut self, config: &FolioConfig) -> Site {
        let services = self.services();
        Site::mount(&self.layout, config, &services, &mut self.events, &self.observers)
    }

    /// Simulates a reload: same store, fresh DOM and handlers.
    pub fn reload(&self) -> Self {
        Self::with_store(Rc::clone(&self.store))
    }
}

pub fn config_with_roles(roles: &[&str]) -> FolioConfig {
    let mut config = FolioConfig::default();
    config.typing.roles = roles.iter().map(|role| (*role).to_owned()).collect();
    config
}
