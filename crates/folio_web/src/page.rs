//! Page discovery.
//!
//! Finds the elements named by [`SelectorConfig`], registers them with the
//! [`DomSurface`] and reads the optional inline configuration.

use folio_core::{ElementId, FolioConfig, FolioError, FolioResult, PageLayout};
use folio_core::config::SelectorConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::dom::DomSurface;

/// Id of the inline TOML configuration script.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Attribute on the typing element that overrides the role list.
pub const ROLES_ATTRIBUTE: &str = "data-roles";

/// Registers every element the behaviors use.
///
/// # Errors
///
/// Returns [`FolioError::MissingElement`] if the document has no body.
pub fn discover(
    document: &Document,
    surface: &DomSurface,
    selectors: &SelectorConfig,
) -> FolioResult<PageLayout> {
    let body: Element = document
        .body()
        .ok_or_else(|| FolioError::MissingElement("body".to_owned()))?
        .into();

    let one = |selector: &str| {
        query_one(document, selector).map(|element| surface.register(element))
    };
    let all = |selector: &str| -> Vec<ElementId> {
        query_all(document, selector)
            .into_iter()
            .map(|element| surface.register(element))
            .collect()
    };

    let layout = PageLayout {
        root: surface.register(body),
        theme_toggle: one(&selectors.theme_toggle),
        hamburger: one(&selectors.hamburger),
        nav_menu: one(&selectors.nav_menu),
        nav_links: all(&selectors.nav_links),
        typing_text: one(&selectors.typing_text),
        reveal_targets: all(&selectors.reveal_targets),
        tilt_targets: all(&selectors.tilt_targets),
    };

    tracing::debug!(elements = surface.len(), "page discovered");
    Ok(layout)
}

/// Returns the text of the inline configuration script, if present.
#[must_use]
pub fn config_text(document: &Document) -> Option<String> {
    document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|script| script.text_content())
}

/// Parses an optional configuration document. No document means defaults.
///
/// # Errors
///
/// Returns the parse or validation error of a present but bad document.
pub fn parse_config(text: Option<&str>) -> FolioResult<FolioConfig> {
    text.map_or_else(|| Ok(FolioConfig::default()), FolioConfig::from_toml_str)
}

/// Replaces the configured roles with the typing element's attribute, if set.
pub fn apply_role_attribute(config: &mut FolioConfig, surface: &DomSurface, layout: &PageLayout) {
    let attribute = layout
        .typing_text
        .and_then(|id| surface.element(id))
        .and_then(|element| element.get_attribute(ROLES_ATTRIBUTE));
    if let Some(attribute) = attribute {
        let roles = roles_from_attribute(&attribute);
        if !roles.is_empty() {
            config.typing.roles = roles;
        }
    }
}

/// Splits a comma-separated role list, dropping blank entries.
#[must_use]
pub fn roles_from_attribute(attribute: &str) -> Vec<String> {
    attribute
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_owned)
        .collect()
}

fn query_one(document: &Document, selector: &str) -> Option<Element> {
    match document.query_selector(selector) {
        Ok(element) => element,
        Err(err) => {
            tracing::warn!(selector, "invalid selector: {err:?}");
            None
        }
    }
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let nodes = match document.query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(err) => {
            tracing::warn!(selector, "invalid selector: {err:?}");
            return Vec::new();
        }
    };
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
