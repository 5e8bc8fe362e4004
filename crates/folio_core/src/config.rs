//! # Page Configuration
//!
//! Every tuning constant of the page lives here: timings, thresholds,
//! angles, class names, the storage key and the element selectors.
//!
//! Documents are TOML. Every field has a default, so a document only has to
//! name what it overrides:
//!
//! ```toml
//! log_level = "debug"
//!
//! [typing]
//! roles = ["Rust Engineer", "Systems Tinkerer"]
//!
//! [tilt]
//! max_angle_deg = 6.0
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::{FolioError, FolioResult};

/// Complete configuration for the page.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    /// Log level directive for the browser console (`error` .. `trace`).
    pub log_level: LogLevel,
    /// Theme toggle and persistence.
    pub theme: ThemeConfig,
    /// Rotating role text.
    pub typing: TypingConfig,
    /// Scroll reveal.
    pub reveal: RevealConfig,
    /// Hover tilt cards.
    pub tilt: TiltConfig,
    /// Mobile navigation drawer.
    pub nav: NavConfig,
    /// CSS selectors used to find page elements.
    pub selectors: SelectorConfig,
}

impl FolioConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::ConfigParse`] for malformed documents and
    /// [`FolioError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(document: &str) -> FolioResult<Self> {
        let config: Self = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> FolioResult<()> {
        self.theme.validate()?;
        self.typing.validate()?;
        self.reveal.validate()?;
        self.tilt.validate()?;
        self.nav.validate()?;
        Ok(())
    }
}

/// Console log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Swallowed failures.
    Warn,
    /// Mounting and lifecycle.
    #[default]
    Info,
    /// State transitions.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Returns the filter directive understood by `tracing-subscriber`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Theme persistence and marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Storage key holding `"light"` or `"dark"`.
    pub storage_key: String,
    /// Class set on the document root while the light theme is active.
    pub light_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "portfolio-theme".to_owned(),
            light_class: "light-mode".to_owned(),
        }
    }
}

impl ThemeConfig {
    fn validate(&self) -> FolioResult<()> {
        non_empty("theme.storage_key", &self.storage_key)?;
        non_empty("theme.light_class", &self.light_class)
    }
}

/// Typing animator timings and role text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Strings cycled through, in order.
    pub roles: Vec<String>,
    /// Delay after revealing one character (ms).
    pub type_ms: u64,
    /// Delay after hiding one character (ms).
    pub delete_ms: u64,
    /// Pause once a word is fully typed (ms).
    pub word_pause_ms: u64,
    /// Pause once a word is fully deleted (ms).
    pub next_word_pause_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            roles: vec![
                "Software Engineer".to_owned(),
                "Rust Developer".to_owned(),
                "Open Source Contributor".to_owned(),
            ],
            type_ms: 100,
            delete_ms: 50,
            word_pause_ms: 2000,
            next_word_pause_ms: 500,
        }
    }
}

impl TypingConfig {
    /// Delay after revealing one character.
    #[must_use]
    pub const fn type_delay(&self) -> Duration {
        Duration::from_millis(self.type_ms)
    }

    /// Delay after hiding one character.
    #[must_use]
    pub const fn delete_delay(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }

    /// Pause after a word is complete.
    #[must_use]
    pub const fn word_pause(&self) -> Duration {
        Duration::from_millis(self.word_pause_ms)
    }

    /// Pause after a word is fully deleted.
    #[must_use]
    pub const fn next_word_pause(&self) -> Duration {
        Duration::from_millis(self.next_word_pause_ms)
    }

    fn validate(&self) -> FolioResult<()> {
        for (name, value) in [
            ("typing.type_ms", self.type_ms),
            ("typing.delete_ms", self.delete_ms),
            ("typing.word_pause_ms", self.word_pause_ms),
            ("typing.next_word_pause_ms", self.next_word_pause_ms),
        ] {
            if value == 0 {
                return Err(FolioError::InvalidConfig(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }
}

/// Scroll reveal parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible (0-1).
    pub threshold: f64,
    /// Root margin passed to the observer (CSS margin syntax).
    pub root_margin: String,
    /// Class applied at registration, hides the element until revealed.
    pub pending_class: String,
    /// Class applied once the element has been seen.
    pub active_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin: "0px".to_owned(),
            pending_class: "reveal".to_owned(),
            active_class: "active".to_owned(),
        }
    }
}

impl RevealConfig {
    fn validate(&self) -> FolioResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FolioError::InvalidConfig(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        non_empty("reveal.pending_class", &self.pending_class)?;
        non_empty("reveal.active_class", &self.active_class)
    }
}

/// Hover tilt parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Rotation at the element edge (degrees).
    pub max_angle_deg: f32,
    /// Scale applied while hovered.
    pub hover_scale: f32,
    /// Perspective distance (CSS pixels).
    pub perspective_px: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_angle_deg: 10.0,
            hover_scale: 1.05,
            perspective_px: 1000.0,
        }
    }
}

impl TiltConfig {
    fn validate(&self) -> FolioResult<()> {
        if !self.max_angle_deg.is_finite() || self.max_angle_deg < 0.0 {
            return Err(FolioError::InvalidConfig(format!(
                "tilt.max_angle_deg must be a non-negative number, got {}",
                self.max_angle_deg
            )));
        }
        if !self.hover_scale.is_finite() || self.hover_scale <= 0.0 {
            return Err(FolioError::InvalidConfig(format!(
                "tilt.hover_scale must be positive, got {}",
                self.hover_scale
            )));
        }
        if !self.perspective_px.is_finite() || self.perspective_px <= 0.0 {
            return Err(FolioError::InvalidConfig(format!(
                "tilt.perspective_px must be positive, got {}",
                self.perspective_px
            )));
        }
        Ok(())
    }
}

/// Navigation drawer classes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Class set on the nav container and hamburger while open.
    pub open_class: String,
    /// Close the drawer on `Escape`.
    pub close_on_escape: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            open_class: "active".to_owned(),
            close_on_escape: true,
        }
    }
}

impl NavConfig {
    fn validate(&self) -> FolioResult<()> {
        non_empty("nav.open_class", &self.open_class)
    }
}

/// CSS selectors for the page elements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Theme toggle button.
    pub theme_toggle: String,
    /// Hamburger button.
    pub hamburger: String,
    /// Navigation container.
    pub nav_menu: String,
    /// Links inside the navigation.
    pub nav_links: String,
    /// Typing output element.
    pub typing_text: String,
    /// Elements revealed on scroll.
    pub reveal_targets: String,
    /// Elements that tilt on hover.
    pub tilt_targets: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            theme_toggle: "#theme-toggle".to_owned(),
            hamburger: ".hamburger".to_owned(),
            nav_menu: ".nav-menu".to_owned(),
            nav_links: ".nav-link".to_owned(),
            typing_text: ".typing-text".to_owned(),
            reveal_targets: ".section, .project-card, .skill-category".to_owned(),
            tilt_targets: ".project-card".to_owned(),
        }
    }
}

fn non_empty(name: &str, value: &str) -> FolioResult<()> {
    if value.trim().is_empty() {
        return Err(FolioError::InvalidConfig(format!("{name} must not be empty")));
    }
    Ok(())
}
