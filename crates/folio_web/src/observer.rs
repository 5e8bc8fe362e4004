//! `IntersectionObserver` as an [`ObserverFactory`].

use std::rc::Rc;

use folio_core::{
    ObserverFactory, ObserverOptions, Visibility, VisibilityCallback, VisibilityObserver,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::DomSurface;

/// Creates observers whose entries are resolved through the surface.
pub struct DomObservers {
    surface: Rc<DomSurface>,
}

impl DomObservers {
    /// Creates a factory.
    #[must_use]
    pub fn new(surface: Rc<DomSurface>) -> Self {
        Self { surface }
    }
}

struct DomObserver {
    observer: IntersectionObserver,
    surface: Rc<DomSurface>,
}

impl VisibilityObserver for DomObserver {
    fn observe(&self, target: folio_core::ElementId) {
        if let Some(element) = self.surface.element(target) {
            self.observer.observe(&element);
        }
    }

    fn unobserve(&self, target: folio_core::ElementId) {
        if let Some(element) = self.surface.element(target) {
            self.observer.unobserve(&element);
        }
    }
}

impl ObserverFactory for DomObservers {
    fn create(
        &self,
        options: &ObserverOptions,
        mut callback: VisibilityCallback,
    ) -> Option<Box<dyn VisibilityObserver>> {
        let surface = Rc::clone(&self.surface);
        let on_change = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let visibility: Vec<Visibility> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        Some(Visibility {
                            target: surface.id_of(&entry.target())?,
                            is_intersecting: entry.is_intersecting(),
                            ratio: entry.intersection_ratio(),
                        })
                    })
                    .collect();

                let handle = DomObserver {
                    observer,
                    surface: Rc::clone(&surface),
                };
                let handle: &dyn VisibilityObserver = &handle;
                callback(visibility.as_slice(), handle);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer =
            match IntersectionObserver::new_with_options(on_change.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(err) => {
                    tracing::warn!("IntersectionObserver unavailable: {err:?}");
                    return None;
                }
            };
        // The callback must outlive this call; the observer lives as long as the page.
        on_change.forget();

        Some(Box::new(DomObserver {
            observer,
            surface: Rc::clone(&self.surface),
        }))
    }
}
