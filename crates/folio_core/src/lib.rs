//! # FOLIO Core
//!
//! Behavior layer for a single-page portfolio:
//! - Light/dark theme with a persisted preference
//! - A rotating "role" line that types and deletes itself
//! - One-shot reveal of sections as they scroll into view
//! - Pointer-driven 3D tilt on cards
//! - A mobile navigation drawer
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PAGE BEHAVIOR                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  EventSource ──► handlers ──► controllers ──► Surface        │
//! │  Scheduler   ──► TypingLoop ─────────────────► Surface       │
//! │  Observer    ──► RevealController ───────────► Surface       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate touches the browser. The `folio_web` crate
//! implements [`Surface`], [`EventSource`], [`Scheduler`],
//! [`ObserverFactory`] and [`PreferenceStore`] over the DOM; tests implement
//! them with fakes.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod nav;
pub mod reveal;
pub mod schedule;
pub mod site;
pub mod surface;
pub mod theme;
pub mod tilt;
pub mod typing;

pub use config::{FolioConfig, LogLevel};
pub use error::{FolioError, FolioResult};
pub use geometry::Rect;
pub use input::{EventKind, EventSource, Handler, Key, UiEvent};
pub use nav::NavController;
pub use reveal::{
    ObserverFactory, ObserverOptions, RevealController, RevealState, Visibility,
    VisibilityCallback, VisibilityObserver,
};
pub use schedule::{Scheduler, Task};
pub use site::{PageLayout, Services, Site};
pub use surface::{ElementId, Surface};
pub use theme::{MemoryStore, PreferenceStore, ThemeController, ThemePreference};
pub use tilt::{TiltController, TiltTransform};
pub use typing::{AnimatorState, Phase, TypingAnimator, TypingLoop, TypingTimings};
