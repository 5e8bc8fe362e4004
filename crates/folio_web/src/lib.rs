//! # FOLIO Web
//!
//! Browser adapter for `folio_core`. Each module implements one seam over
//! the DOM:
//!
//! | Seam               | Module       | Browser API              |
//! |--------------------|--------------|--------------------------|
//! | `Surface`          | [`dom`]      | `classList`, `style`     |
//! | `EventSource`      | [`events`]   | `addEventListener`       |
//! | `Scheduler`        | [`timer`]    | `setTimeout`             |
//! | `ObserverFactory`  | [`observer`] | `IntersectionObserver`   |
//! | `PreferenceStore`  | [`storage`]  | `localStorage`           |
//!
//! [`start`] runs when the module is instantiated. It waits for the DOM if
//! needed, discovers the page and mounts the [`Site`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dom;
pub mod events;
pub mod logging;
pub mod observer;
pub mod page;
pub mod storage;
pub mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{FolioConfig, FolioResult, Services, Site, Surface};
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::dom::DomSurface;
use crate::events::DomEventSource;
use crate::observer::DomObservers;
use crate::timer::TimeoutScheduler;

thread_local! {
    /// The mounted page. Lives until the page unloads.
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Module entry point.
///
/// # Errors
///
/// Returns an error string if the page has no document or no body.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("folio: no document"))?;

    if document.ready_state() == "loading" {
        let ready = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| {
            if let Err(err) = boot(&ready) {
                tracing::error!("{err}");
            }
        })
        .forget();
        return Ok(());
    }

    boot(&document).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn boot(document: &Document) -> FolioResult<()> {
    let (mut config, rejected) = match page::parse_config(page::config_text(document).as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (FolioConfig::default(), Some(err)),
    };
    logging::init(config.log_level);
    if let Some(err) = rejected {
        tracing::warn!("{err}, using defaults");
    }

    let surface = Rc::new(DomSurface::new());
    let layout = page::discover(document, &surface, &config.selectors)?;
    page::apply_role_attribute(&mut config, &surface, &layout);

    let dyn_surface: Rc<dyn Surface> = surface.clone();
    let services = Services {
        surface: dyn_surface,
        scheduler: Rc::new(TimeoutScheduler),
        store: storage::preference_store(),
    };
    let mut events = DomEventSource::new(Rc::clone(&surface));
    let observers = DomObservers::new(Rc::clone(&surface));

    let site = Site::mount(&layout, &config, &services, &mut events, &observers);
    tracing::debug!(listeners = events.listener_count(), "listeners attached");
    events.forget();

    SITE.with(|slot| *slot.borrow_mut() = Some(site));
    Ok(())
}
