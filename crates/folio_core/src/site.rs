//! # Site
//!
//! Composition root. Creates one controller per behavior, registers its
//! handlers against the event source and keeps everything alive for the
//! lifetime of the page.
//!
//! Behaviors are independent: a missing element disables only the behavior
//! that needs it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::FolioConfig;
use crate::input::{EventKind, EventSource, Key, UiEvent};
use crate::nav::NavController;
use crate::reveal::{
    ObserverFactory, RevealController, RevealState, VisibilityCallback, VisibilityObserver,
};
use crate::schedule::Scheduler;
use crate::surface::{ElementId, Surface};
use crate::theme::{PreferenceStore, ThemeController, ThemePreference};
use crate::tilt::TiltController;
use crate::typing::{AnimatorState, TypingAnimator, TypingLoop, TypingTimings};

/// Elements found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// Document root, carries the theme marker and receives key events.
    pub root: ElementId,
    /// Theme toggle button.
    pub theme_toggle: Option<ElementId>,
    /// Hamburger button.
    pub hamburger: Option<ElementId>,
    /// Navigation drawer.
    pub nav_menu: Option<ElementId>,
    /// Links inside the drawer.
    pub nav_links: Vec<ElementId>,
    /// Typing output element.
    pub typing_text: Option<ElementId>,
    /// Elements revealed on scroll.
    pub reveal_targets: Vec<ElementId>,
    /// Elements that tilt on hover.
    pub tilt_targets: Vec<ElementId>,
}

/// Platform services shared by the behaviors.
#[derive(Clone)]
pub struct Services {
    /// The page.
    pub surface: Rc<dyn Surface>,
    /// Timer primitive.
    pub scheduler: Rc<dyn Scheduler>,
    /// Theme persistence.
    pub store: Rc<dyn PreferenceStore>,
}

/// All behaviors of a mounted page.
pub struct Site {
    surface: Rc<dyn Surface>,
    theme: Rc<ThemeController>,
    nav: Option<Rc<NavController>>,
    typing: Option<Rc<TypingLoop>>,
    reveal: Rc<RefCell<RevealController>>,
    /// Kept alive so observation continues.
    observer: Option<Box<dyn VisibilityObserver>>,
    tilt_targets: usize,
}

impl Site {
    /// Wires every behavior the layout supports.
    pub fn mount(
        layout: &PageLayout,
        config: &FolioConfig,
        services: &Services,
        events: &mut dyn EventSource,
        observers: &dyn ObserverFactory,
    ) -> Self {
        let surface = Rc::clone(&services.surface);

        let theme = Rc::new(ThemeController::new(
            layout.root,
            layout.theme_toggle,
            config.theme.clone(),
        ));
        mount_theme(&theme, layout, services, events);

        let nav = mount_nav(layout, config, &surface, events);
        let typing = mount_typing(layout, config, services);

        let reveal = Rc::new(RefCell::new(RevealController::new(config.reveal.clone())));
        let observer = mount_reveal(&reveal, layout, &surface, observers);

        let tilt = Rc::new(TiltController::new(config.tilt));
        for &card in &layout.tilt_targets {
            let (on_move, move_surface) = (Rc::clone(&tilt), Rc::clone(&surface));
            events.on(
                card,
                EventKind::PointerMove,
                Box::new(move |event| {
                    if let UiEvent::PointerMove {
                        target,
                        client_x,
                        client_y,
                        bounds,
                    } = *event
                    {
                        on_move.on_pointer_move(&*move_surface, target, bounds, client_x, client_y);
                    }
                }),
            );

            let (on_leave, leave_surface) = (Rc::clone(&tilt), Rc::clone(&surface));
            events.on(
                card,
                EventKind::PointerLeave,
                Box::new(move |event| {
                    on_leave.on_pointer_leave(&*leave_surface, event.target());
                }),
            );
        }

        tracing::info!(
            nav = nav.is_some(),
            typing = typing.is_some(),
            reveal = reveal.borrow().pending_count(),
            tilt = layout.tilt_targets.len(),
            "site mounted"
        );

        Self {
            surface,
            theme,
            nav,
            typing,
            reveal,
            observer,
            tilt_targets: layout.tilt_targets.len(),
        }
    }

    /// Returns the theme the page currently shows.
    #[must_use]
    pub fn current_theme(&self) -> ThemePreference {
        self.theme.current(&*self.surface)
    }

    /// Returns true if the navigation drawer is open. `None` without a drawer.
    #[must_use]
    pub fn menu_open(&self) -> Option<bool> {
        self.nav.as_ref().map(|nav| nav.is_open(&*self.surface))
    }

    /// Returns the typing animator state. `None` if the animator never started.
    #[must_use]
    pub fn typing_state(&self) -> Option<AnimatorState> {
        self.typing.as_ref().map(|typing| typing.state())
    }

    /// Returns the reveal state of `target`.
    #[must_use]
    pub fn reveal_state(&self, target: ElementId) -> Option<RevealState> {
        self.reveal.borrow().state(target)
    }

    /// Returns `(pending, active)` reveal counts.
    #[must_use]
    pub fn reveal_counts(&self) -> (usize, usize) {
        let reveal = self.reveal.borrow();
        (reveal.pending_count(), reveal.active_count())
    }

    /// Returns true if a visibility observer is running.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Returns the number of cards with tilt handlers.
    #[must_use]
    pub fn tilt_target_count(&self) -> usize {
        self.tilt_targets
    }
}

fn mount_theme(
    theme: &Rc<ThemeController>,
    layout: &PageLayout,
    services: &Services,
    events: &mut dyn EventSource,
) {
    let surface = &*services.surface;
    if theme.init(surface, &*services.store).is_none() {
        // Nothing restored: still publish the default mode on the toggle.
        theme.apply(surface, theme.current(surface));
    }

    let Some(toggle) = layout.theme_toggle else {
        tracing::debug!("no theme toggle, theme is fixed for this page");
        return;
    };
    let theme = Rc::clone(theme);
    let surface = Rc::clone(&services.surface);
    let store = Rc::clone(&services.store);
    events.on(
        toggle,
        EventKind::Click,
        Box::new(move |_| {
            theme.toggle(&*surface, &*store);
        }),
    );
}

fn mount_nav(
    layout: &PageLayout,
    config: &FolioConfig,
    surface: &Rc<dyn Surface>,
    events: &mut dyn EventSource,
) -> Option<Rc<NavController>> {
    let (Some(menu), Some(hamburger)) = (layout.nav_menu, layout.hamburger) else {
        tracing::debug!("navigation drawer disabled: hamburger or menu missing");
        return None;
    };
    let nav = Rc::new(NavController::new(menu, hamburger, config.nav.clone()));
    nav.sync(&**surface);

    {
        let (nav, surface) = (Rc::clone(&nav), Rc::clone(surface));
        events.on(
            hamburger,
            EventKind::Click,
            Box::new(move |_| {
                nav.toggle_menu(&*surface);
            }),
        );
    }

    for &link in &layout.nav_links {
        let (nav, surface) = (Rc::clone(&nav), Rc::clone(surface));
        events.on(
            link,
            EventKind::Click,
            Box::new(move |_| {
                nav.close(&*surface);
            }),
        );
    }

    if nav.closes_on_escape() {
        let (nav, surface) = (Rc::clone(&nav), Rc::clone(surface));
        events.on(
            layout.root,
            EventKind::KeyDown,
            Box::new(move |event| {
                if let UiEvent::KeyDown { key: Key::Escape, .. } = event {
                    nav.close(&*surface);
                }
            }),
        );
    }

    Some(nav)
}

fn mount_typing(
    layout: &PageLayout,
    config: &FolioConfig,
    services: &Services,
) -> Option<Rc<TypingLoop>> {
    let Some(target) = layout.typing_text else {
        tracing::debug!("typing animator disabled: no target element");
        return None;
    };
    let Some(animator) = TypingAnimator::new(
        config.typing.roles.iter().cloned(),
        TypingTimings::from(&config.typing),
    ) else {
        tracing::debug!("typing animator disabled: no roles");
        return None;
    };

    Some(TypingLoop::start(
        animator,
        target,
        Rc::clone(&services.surface),
        Rc::clone(&services.scheduler),
    ))
}

fn mount_reveal(
    reveal: &Rc<RefCell<RevealController>>,
    layout: &PageLayout,
    surface: &Rc<dyn Surface>,
    observers: &dyn ObserverFactory,
) -> Option<Box<dyn VisibilityObserver>> {
    if layout.reveal_targets.is_empty() {
        return None;
    }

    let options = reveal.borrow().observer_options();
    let callback: VisibilityCallback = {
        let (reveal, surface) = (Rc::clone(reveal), Rc::clone(surface));
        Box::new(move |entries, observer| {
            reveal.borrow_mut().on_visibility(entries, &*surface, observer);
        })
    };

    // Without an observer the targets are never hidden, so content stays visible.
    let Some(observer) = observers.create(&options, callback) else {
        tracing::warn!("visibility observation unavailable, reveal disabled");
        return None;
    };

    let mut controller = reveal.borrow_mut();
    for &target in &layout.reveal_targets {
        controller.register(target, &**surface, &*observer);
    }
    drop(controller);
    Some(observer)
}
