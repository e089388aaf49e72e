use folio_core::site::{anchor_target, back_to_top_visible};
use gloo::events::{EventListener, EventListenerOptions};
use web_sys::{
    Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions,
};

use crate::dom;
use crate::error::InitError;

pub(crate) const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub(crate) const BACK_TO_TOP_ID: &str = "back-to-top";
pub(crate) const BACK_TO_TOP_VISIBLE_CLASS: &str = "show";

fn behavior(reduced_motion: bool) -> ScrollBehavior {
    if reduced_motion {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    }
}

fn resolve_anchor(anchor: &Element) -> Option<Element> {
    let href = anchor.get_attribute("href")?;
    let selector = anchor_target(&href)?;
    dom::document()?.query_selector(selector).ok()?
}

pub(crate) fn install_anchor_scrolling(reduced_motion: bool) -> Result<(), InitError> {
    for anchor in dom::query_all(ANCHOR_SELECTOR) {
        let link = anchor.clone();
        let listener = EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(target) = resolve_anchor(&link) else {
                    return;
                };
                event.prevent_default();
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(behavior(reduced_motion));
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            },
        );
        dom::retain_listener(listener);
    }
    Ok(())
}

pub(crate) fn install_back_to_top() -> Result<(), InitError> {
    let button = dom::by_id(BACK_TO_TOP_ID).ok_or(InitError::MissingElement("#back-to-top"))?;
    let window = dom::window().ok_or(InitError::Unsupported("window"))?;

    let watched = button.clone();
    let scroll_window = window.clone();
    dom::retain_listener(EventListener::new(&window, "scroll", move |_event: &Event| {
        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
        let _ = watched
            .class_list()
            .toggle_with_force(BACK_TO_TOP_VISIBLE_CLASS, back_to_top_visible(scroll_y));
    }));

    dom::retain_listener(EventListener::new(&button, "click", move |_event: &Event| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }));
    Ok(())
}
