use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use folio_core::particles::backing_size;
use folio_core::site::accent_or;
use folio_core::{FrameLoop, FrameScheduler, ParticleField, ParticleSettings};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, Event, HtmlCanvasElement};

use crate::dom;
use crate::error::InitError;

pub(crate) const CANVAS_ID: &str = "hero-canvas";
const ACCENT_PROPERTY: &str = "--accent";
const WASH_START: &str = "rgba(0,229,255,0.03)";
const WASH_END: &str = "rgba(255,64,129,0.02)";
const WASH_END_OFFSET: f32 = 0.6;
const LINK_COLOR: &str = "white";

thread_local! {
    static PARTICLES: RefCell<Option<Rc<ParticleView>>> = RefCell::new(None);
}

struct RafScheduler {
    view: Weak<ParticleView>,
}

impl FrameScheduler for RafScheduler {
    type Handle = AnimationFrame;

    fn request_frame(&mut self) -> AnimationFrame {
        let view = self.view.clone();
        request_animation_frame(move |_timestamp| {
            if let Some(view) = view.upgrade() {
                view.on_frame();
            }
        })
    }

    fn cancel_frame(&mut self, handle: AnimationFrame) {
        drop(handle);
    }
}

pub(crate) struct ParticleView {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    root: Option<Element>,
    field: RefCell<ParticleField>,
    frames: RefCell<FrameLoop<RafScheduler>>,
    rng: RefCell<SmallRng>,
    draw_failed: Cell<bool>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ParticleView {
    fn new(canvas: HtmlCanvasElement, settings: ParticleSettings) -> Result<Rc<Self>, InitError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(InitError::Unsupported("canvas 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| InitError::Unsupported("canvas 2d context"))?;
        let root = dom::document().and_then(|document| document.document_element());
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
        Ok(Rc::new_cyclic(|weak| Self {
            canvas,
            ctx,
            root,
            field: RefCell::new(ParticleField::new(settings)),
            frames: RefCell::new(FrameLoop::new(RafScheduler { view: weak.clone() })),
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
            draw_failed: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> folio_core::LoopState {
        self.frames.borrow().state()
    }

    #[cfg(test)]
    pub(crate) fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }

    fn start(self: &Rc<Self>) {
        self.resize();
        self.install_listeners();
        if self.frames.borrow_mut().start() {
            self.draw_and_continue();
        }
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        if let Some(window) = dom::window() {
            let view = Rc::clone(self);
            listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
                view.resize();
            }));
        }
        if let Some(document) = dom::document() {
            let view = Rc::clone(self);
            listeners.push(EventListener::new(
                &document,
                "visibilitychange",
                move |_event: &Event| {
                    let hidden = dom::document()
                        .map(|document| document.hidden())
                        .unwrap_or(false);
                    view.set_hidden(hidden);
                },
            ));
        }
        *self.listeners.borrow_mut() = listeners;
    }

    pub(crate) fn set_hidden(self: &Rc<Self>, hidden: bool) {
        if hidden {
            self.frames.borrow_mut().suspend();
            return;
        }
        let resumed = self.frames.borrow_mut().resume();
        if resumed {
            self.draw_and_continue();
        }
    }

    pub(crate) fn resize(&self) {
        let width = self.canvas.client_width().max(0) as f64;
        let height = self.canvas.client_height().max(0) as f64;
        let ratio = dom::window()
            .map(|window| window.device_pixel_ratio())
            .unwrap_or(1.0);
        let (pixel_w, pixel_h, dpr) = backing_size(width, height, ratio);
        self.canvas.set_width(pixel_w);
        self.canvas.set_height(pixel_h);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        let mut rng = self.rng.borrow_mut();
        self.field.borrow_mut().resize(width, height, &mut *rng);
    }

    fn on_frame(self: &Rc<Self>) {
        if !self.frames.borrow_mut().begin_frame() {
            return;
        }
        self.draw_and_continue();
    }

    fn draw_and_continue(self: &Rc<Self>) {
        if let Err(err) = self.draw() {
            if !self.draw_failed.replace(true) {
                gloo::console::error!("particle frame failed:", err);
            }
        }
        self.frames.borrow_mut().end_frame();
    }

    fn accent(&self, fallback: &str) -> String {
        let value = self
            .root
            .as_ref()
            .map(|root| dom::computed_property(root, ACCENT_PROPERTY))
            .unwrap_or_default();
        accent_or(&value, fallback).to_string()
    }

    fn draw(&self) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let mut field = self.field.borrow_mut();
        let (width, height) = (field.width(), field.height());
        ctx.clear_rect(0.0, 0.0, width, height);

        let wash = ctx.create_linear_gradient(0.0, 0.0, width, height);
        wash.add_color_stop(0.0, WASH_START)?;
        wash.add_color_stop(WASH_END_OFFSET, WASH_END)?;
        ctx.set_fill_style_canvas_gradient(&wash);
        ctx.fill_rect(0.0, 0.0, width, height);

        let accent = self.accent(&field.settings().accent_fallback);
        ctx.set_fill_style_str(&accent);
        for particle in field.particles() {
            ctx.set_global_alpha(particle.alpha);
            ctx.begin_path();
            ctx.arc(particle.x, particle.y, particle.radius, 0.0, TAU)?;
            ctx.fill();
        }
        field.step();

        let settings = field.settings();
        ctx.set_global_alpha(settings.link_alpha);
        ctx.set_stroke_style_str(LINK_COLOR);
        ctx.set_line_width(settings.link_width);
        let particles = field.particles();
        for link in field.links() {
            let (from, to) = (&particles[link.a], &particles[link.b]);
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}

pub(crate) fn start(settings: &ParticleSettings) -> Result<(), InitError> {
    if PARTICLES.with(|slot| slot.borrow().is_some()) {
        return Ok(());
    }
    let canvas = dom::by_id(CANVAS_ID)
        .ok_or(InitError::MissingElement("#hero-canvas"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| InitError::MissingElement("#hero-canvas"))?;
    let view = ParticleView::new(canvas, settings.clone())?;
    view.start();
    PARTICLES.with(|slot| {
        *slot.borrow_mut() = Some(view);
    });
    Ok(())
}
