use folio_core::site::{THEME_ATTRIBUTE, THEME_STORAGE_KEY};
use folio_core::{resolve_theme, Theme};
use gloo::events::EventListener;
use web_sys::{Element, Event, Storage};

use crate::dom;
use crate::error::InitError;

pub(crate) const TOGGLE_ID: &str = "theme-toggle";

fn storage() -> Option<Storage> {
    dom::window()?.local_storage().ok()?
}

fn read_stored_theme() -> Option<String> {
    storage()?.get_item(THEME_STORAGE_KEY).ok()?
}

fn store_theme(theme: Theme) {
    let Some(storage) = storage() else {
        gloo::console::warn!("theme not saved: storage unavailable");
        return;
    };
    if storage.set_item(THEME_STORAGE_KEY, theme.as_str()).is_err() {
        gloo::console::warn!("theme not saved: storage set failed");
    }
}

pub(crate) fn current_theme(root: &Element) -> Theme {
    match root.get_attribute(THEME_ATTRIBUTE).as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

pub(crate) fn apply_theme(
    root: &Element,
    toggle: Option<&Element>,
    theme: Theme,
) -> Result<(), InitError> {
    root.set_attribute(THEME_ATTRIBUTE, theme.as_str())?;
    if let Some(toggle) = toggle {
        toggle.set_attribute("aria-pressed", if theme.is_dark() { "true" } else { "false" })?;
        toggle.set_text_content(Some(theme.toggle_glyph()));
    }
    Ok(())
}

pub(crate) fn install() -> Result<(), InitError> {
    let root = dom::document()
        .and_then(|document| document.document_element())
        .ok_or(InitError::MissingElement("html"))?;
    let toggle = dom::by_id(TOGGLE_ID);
    let stored = read_stored_theme();
    let initial = resolve_theme(stored.as_deref(), dom::prefers_dark_mode());
    apply_theme(&root, toggle.as_ref(), initial)?;

    let Some(toggle) = toggle else {
        return Ok(());
    };
    let button = toggle.clone();
    let listener = EventListener::new(&toggle, "click", move |_event: &Event| {
        let next = current_theme(&root).toggled();
        if let Err(err) = apply_theme(&root, Some(&button), next) {
            gloo::console::warn!("theme toggle failed:", err.to_string());
            return;
        }
        store_theme(next);
    });
    dom::retain_listener(listener);
    Ok(())
}
