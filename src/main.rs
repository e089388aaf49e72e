mod config;
mod dom;
mod error;
mod init;
mod nav;
mod particle_view;
mod scroll_reveal;
mod skill_bars;
mod splash;
mod theme;

use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::Event;

fn boot() {
    let config = Rc::new(config::load_site_config());
    let after = Rc::clone(&config);
    splash::install(
        &config,
        Rc::new(move |reason: folio_core::TriggerReason| {
            init::after_reveal(reason, &after)
        }),
    );
}

fn main() {
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_event: &Event| boot()).forget();
    } else {
        boot();
    }
}
