use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use folio_core::{
    RevealState, SiteConfig, SplashEffect, SplashEvent, SplashOptions, SplashSequencer,
    TimerKind, TriggerReason,
};
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use web_sys::{Element, Event, HtmlElement};

use crate::dom;

pub(crate) const SPLASH_ID: &str = "splash";
pub(crate) const SPLASH_MESSAGE_ID: &str = "splash-msg";
pub(crate) const SITE_ID: &str = "site";

thread_local! {
    static SPLASH: RefCell<Option<Rc<SplashView>>> = RefCell::new(None);
}

pub(crate) struct SplashView {
    sequencer: RefCell<SplashSequencer>,
    splash: Option<HtmlElement>,
    message: Option<Element>,
    site: Option<Element>,
    timers: RefCell<HashMap<TimerKind, Timeout>>,
    rotation: RefCell<Option<Interval>>,
    listeners: RefCell<Vec<EventListener>>,
    on_revealed: Rc<dyn Fn(TriggerReason)>,
}

impl SplashView {
    fn new(config: &SiteConfig, on_revealed: Rc<dyn Fn(TriggerReason)>) -> Self {
        let splash = dom::html_by_id(SPLASH_ID);
        let options = SplashOptions {
            reduced_motion: dom::prefers_reduced_motion(),
            has_splash: splash.is_some(),
        };
        Self {
            sequencer: RefCell::new(SplashSequencer::new(
                config.reveal,
                config.splash_messages.clone(),
                options,
            )),
            splash,
            message: dom::by_id(SPLASH_MESSAGE_ID),
            site: dom::by_id(SITE_ID),
            timers: RefCell::new(HashMap::new()),
            rotation: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            on_revealed,
        }
    }

    fn start(self: &Rc<Self>) {
        let effects = self.sequencer.borrow_mut().start();
        self.apply(effects);
        self.watch_page_load();
    }

    fn watch_page_load(self: &Rc<Self>) {
        if self.sequencer.borrow().state() != RevealState::NotRevealed {
            return;
        }
        let loaded = dom::document()
            .map(|document| document.ready_state() == "complete")
            .unwrap_or(false);
        if loaded {
            self.dispatch(SplashEvent::PageLoaded);
            return;
        }
        let Some(window) = dom::window() else {
            return;
        };
        let view = Rc::clone(self);
        let listener = EventListener::once(&window, "load", move |_event: &Event| {
            view.dispatch(SplashEvent::PageLoaded);
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn dispatch(self: &Rc<Self>, event: SplashEvent) {
        let effects = self.sequencer.borrow_mut().handle(event);
        self.apply(effects);
    }

    fn apply(self: &Rc<Self>, effects: Vec<SplashEffect>) {
        for effect in effects {
            match effect {
                SplashEffect::ShowMessage(text) => {
                    if let Some(message) = self.message.as_ref() {
                        message.set_text_content(Some(&text));
                    }
                }
                SplashEffect::Schedule { timer, delay_ms } => self.schedule(timer, delay_ms),
                SplashEffect::StartRotation { interval_ms } => {
                    let view = Rc::clone(self);
                    let interval = Interval::new(interval_ms, move || {
                        view.dispatch(SplashEvent::TimerFired(TimerKind::Rotation));
                    });
                    *self.rotation.borrow_mut() = Some(interval);
                }
                SplashEffect::Cancel(TimerKind::Rotation) => {
                    self.rotation.borrow_mut().take();
                }
                SplashEffect::Cancel(timer) => {
                    self.timers.borrow_mut().remove(&timer);
                }
                SplashEffect::FadeOut { duration_ms } => self.fade_out(duration_ms),
                SplashEffect::RemoveSplash => {
                    if let Some(splash) = self.splash.as_ref() {
                        splash.remove();
                    }
                }
                SplashEffect::ShowSite => {
                    if let Some(site) = self.site.as_ref() {
                        if let Err(err) = site.remove_attribute("hidden") {
                            gloo::console::error!("site stayed hidden:", err);
                        }
                    }
                }
                SplashEffect::Revealed(reason) => {
                    self.listeners.borrow_mut().clear();
                    gloo::console::info!("site revealed:", reason.as_str());
                    (self.on_revealed)(reason);
                }
            }
        }
    }

    fn schedule(self: &Rc<Self>, timer: TimerKind, delay_ms: u32) {
        let view = Rc::clone(self);
        let timeout = Timeout::new(delay_ms, move || {
            view.timers.borrow_mut().remove(&timer);
            view.dispatch(SplashEvent::TimerFired(timer));
        });
        self.timers.borrow_mut().insert(timer, timeout);
    }

    fn fade_out(&self, duration_ms: u32) {
        let Some(splash) = self.splash.as_ref() else {
            return;
        };
        let style = splash.style();
        let _ = style.set_property("transition", &format!("opacity {duration_ms}ms ease"));
        let _ = style.set_property("opacity", "0");
    }
}

pub(crate) fn install(config: &SiteConfig, on_revealed: Rc<dyn Fn(TriggerReason)>) {
    let view = Rc::new(SplashView::new(config, on_revealed));
    SPLASH.with(|slot| {
        *slot.borrow_mut() = Some(Rc::clone(&view));
    });
    view.start();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(html: &str) -> Element {
        let document = dom::document().expect("document");
        let body = document.body().expect("body");
        let root = document.create_element("div").expect("div");
        root.set_inner_html(html);
        body.append_child(&root).expect("append");
        root
    }

    #[wasm_bindgen_test]
    fn load_completed_page_reveals_without_waiting_for_timeout() {
        let root = mount(
            r#"<div id="splash"><span id="splash-msg"></span></div><main id="site" hidden></main>"#,
        );
        let mut config = SiteConfig::default();
        config.reveal.fade_ms = 0;
        let calls = Rc::new(Cell::new(0u32));
        let reason = Rc::new(Cell::new(None));
        let hook: Rc<dyn Fn(TriggerReason)> = {
            let calls = calls.clone();
            let reason = reason.clone();
            Rc::new(move |why| {
                calls.set(calls.get() + 1);
                reason.set(Some(why));
            })
        };
        let view = Rc::new(SplashView::new(&config, hook));
        view.start();
        view.dispatch(SplashEvent::PageLoaded);
        view.dispatch(SplashEvent::TimerFired(TimerKind::Timeout));
        view.dispatch(SplashEvent::TimerFired(TimerKind::FadeOut));

        assert_eq!(calls.get(), 1);
        assert!(dom::by_id(SPLASH_ID).is_none());
        let site = dom::by_id(SITE_ID).expect("site");
        assert!(!site.has_attribute("hidden"));
        assert!(view.timers.borrow().is_empty());
        assert!(view.rotation.borrow().is_none());
        assert!(reason.get().is_some());
        root.remove();
    }

    #[wasm_bindgen_test]
    fn revealed_splash_does_not_watch_for_load() {
        let root = mount(r#"<main id="site" hidden></main>"#);
        let mut config = SiteConfig::default();
        config.reveal.fade_ms = 0;
        let view = Rc::new(SplashView::new(&config, Rc::new(|_why: TriggerReason| {})));
        view.dispatch(SplashEvent::PageLoaded);
        assert_eq!(view.sequencer.borrow().state(), RevealState::Revealed);

        view.watch_page_load();
        assert!(view.listeners.borrow().is_empty());
        assert_eq!(Rc::strong_count(&view), 1);
        assert!(!dom::by_id(SITE_ID).expect("site").has_attribute("hidden"));
        root.remove();
    }
}
