#![cfg(target_arch = "wasm32")]
#![deny(unsafe_code)]
//! Browser bindings for particle-backdrop.
//!
//! [`mount`] is the one-call setup for a page: it adds a full-window canvas
//! behind the content, drives it from `requestAnimationFrame`, and follows
//! window resizes. [`ParticleBackground`] is the lower-level object for hosts
//! that already own a canvas and a frame clock.

mod surface;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use backdrop_core::{Animator, BackdropConfig};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

pub use surface::CanvasSurface;

const CANVAS_ID: &str = "particle-canvas";
const CANVAS_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
];

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Current `(innerWidth, innerHeight)` in CSS pixels.
fn window_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

/// Reads a config from a JS object; `undefined`/`null` means all defaults.
fn config_from_js(config: JsValue) -> Result<BackdropConfig, JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        BackdropConfig::default()
    } else {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(config)?;
        BackdropConfig::from_json(&value)
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// An animator bound to one canvas. The host calls [`ParticleBackground::frame`]
/// from its own frame clock.
#[wasm_bindgen]
pub struct ParticleBackground {
    animator: Animator,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Binds to `canvas`, sized to its current client size.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue) -> Result<ParticleBackground, JsValue> {
        console_error_panic_hook::set_once();
        let config = config_from_js(config)?;
        let width = f64::from(canvas.client_width());
        let height = f64::from(canvas.client_height());
        let mut surface = CanvasSurface::new(canvas)?;
        let animator = Animator::new(width, height, config, random_seed());
        backdrop_core::DrawSurface::resize(&mut surface, animator.viewport());
        Ok(Self { animator, surface })
    }

    /// Clears the canvas, advances every particle, and draws the frame.
    pub fn frame(&mut self) {
        self.animator.frame(&mut self.surface);
    }

    /// Resizes the canvas to `width × height` CSS pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.animator.resize(width, height, &mut self.surface);
    }

    /// Rebuilds the field with exactly `count` particles.
    pub fn reconfigure(&mut self, width: f64, height: f64, count: usize) {
        self.animator.reconfigure(width, height, count);
        backdrop_core::DrawSurface::resize(&mut self.surface, self.animator.viewport());
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.animator.field().len()
    }

    /// Frames drawn so far (as a JS number).
    pub fn frames(&self) -> f64 {
        self.animator.frames() as f64
    }
}

/// State shared between the handle and the browser callbacks.
struct Running {
    background: RefCell<ParticleBackground>,
    window: Window,
    raf_id: Cell<Option<i32>>,
    on_frame: RefCell<Option<Closure<dyn FnMut()>>>,
    on_resize: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Running {
    fn schedule(&self) {
        let on_frame = self.on_frame.borrow();
        let Some(cb) = on_frame.as_ref() else {
            return;
        };
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(err) => web_sys::console::error_2(&"requestAnimationFrame failed".into(), &err),
        }
    }

    fn tick(&self) {
        self.raf_id.set(None);
        self.background.borrow_mut().frame();
        self.schedule();
    }

    fn on_resize(&self) {
        let (width, height) = window_size(&self.window);
        self.background.borrow_mut().resize(width, height);
    }

    /// Cancels the pending frame and removes the resize listener.
    fn detach(&self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some(cb) = self.on_resize.borrow_mut().take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }
        self.on_frame.borrow_mut().take();
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        self.detach();
    }
}

/// A running background started by [`mount`].
#[wasm_bindgen]
pub struct BackdropHandle {
    running: Rc<Running>,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Stops the animation loop, detaches the resize listener, and removes
    /// the canvas from the page.
    pub fn stop(&self) {
        self.running.detach();
        self.running.background.borrow().surface.canvas().remove();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.running.on_frame.borrow().is_some()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.running.background.borrow().particle_count()
    }

    pub fn frames(&self) -> f64 {
        self.running.background.borrow().frames()
    }
}

/// Adds a full-window particle canvas behind the page and starts animating it.
///
/// `config` is an optional object with any subset of the config keys,
/// e.g. `{ particle_count: 80, link_color: "#ffffff" }`.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<BackdropHandle, JsValue> {
    console_error_panic_hook::set_once();
    let config = config_from_js(config)?;
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_id(CANVAS_ID);
    let style = canvas.style();
    for (name, value) in CANVAS_STYLE {
        style.set_property(name, value)?;
    }
    body.append_child(&canvas)?;

    let (width, height) = window_size(&window);
    let mut surface = CanvasSurface::new(canvas)?;
    let animator = Animator::new(width, height, config, random_seed());
    backdrop_core::DrawSurface::resize(&mut surface, animator.viewport());
    web_sys::console::log_1(
        &format!(
            "particle background: {} particles, {width}x{height}",
            animator.field().len()
        )
        .into(),
    );

    let running = Rc::new(Running {
        background: RefCell::new(ParticleBackground { animator, surface }),
        window: window.clone(),
        raf_id: Cell::new(None),
        on_frame: RefCell::new(None),
        on_resize: RefCell::new(None),
    });

    let weak: Weak<Running> = Rc::downgrade(&running);
    *running.on_frame.borrow_mut() = Some(Closure::new(move || {
        if let Some(running) = weak.upgrade() {
            running.tick();
        }
    }));

    let weak: Weak<Running> = Rc::downgrade(&running);
    let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
        if let Some(running) = weak.upgrade() {
            running.on_resize();
        }
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    *running.on_resize.borrow_mut() = Some(on_resize);

    running.schedule();
    Ok(BackdropHandle { running })
}
