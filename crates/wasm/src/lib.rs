#![cfg(target_arch = "wasm32")]
//! Browser bridge for duck-dodge.
//!
//! Binds a `<canvas>` to the core renderer, forwards pointer and keyboard
//! input, and drives the scene and game through `requestAnimationFrame`.
//! The page wires its buttons and sliders to the [`Sketchpad`] methods.

mod anim;
mod app;
mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use duck_dodge_core::input::{Channel, PointerKind};
use duck_dodge_core::render::{Renderer, SetupError};
use duck_dodge_core::{Control, GameConfig, ShapeKind, View};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, WebGl2RenderingContext};

use app::App;
use dom::to_js;

#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed, which is fine to keep.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Handle returned to the page. Dropping it leaves the listeners and the
/// scene loop running for the lifetime of the page.
#[wasm_bindgen]
pub struct Sketchpad {
    app: Rc<RefCell<App>>,
}

#[wasm_bindgen]
impl Sketchpad {
    /// Attaches to the canvas with id `canvas_id`. `params` is an optional
    /// JSON object of game tunables; unknown or missing keys use defaults.
    ///
    /// Throws only when the element is missing or the params are not JSON.
    /// A canvas without WebGL2 is logged and left blank.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, params: Option<String>) -> Result<Sketchpad, JsValue> {
        let config = match params {
            Some(json) => {
                let value: serde_json::Value = serde_json::from_str(&json).map_err(to_js)?;
                GameConfig::from_json(&value)
            }
            None => GameConfig::default(),
        };

        let canvas: HtmlCanvasElement = dom::document()?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
            .dyn_into()?;
        let renderer =
            Renderer::attach(webgl2_context(&canvas).map(glow::Context::from_webgl2_context));
        let app = Rc::new(RefCell::new(App::new(renderer, canvas.clone(), config)));

        install_pointer_listener(&canvas, &app, "mousedown", PointerKind::Down)?;
        install_pointer_listener(&canvas, &app, "mousemove", PointerKind::Move)?;
        install_key_listener(&app)?;

        let scene = app.clone();
        anim::run_while(move |now| {
            scene.borrow_mut().scene_tick(now);
            true
        })?;

        log::info!("sketchpad attached to #{canvas_id}");
        Ok(Sketchpad { app })
    }

    /// Selects the click shape: `point`, `triangle`, or `circle`.
    pub fn select_shape(&self, name: &str) -> Result<(), JsValue> {
        let kind: ShapeKind = name.parse().map_err(to_js)?;
        self.apply(Control::SelectShape(kind));
        Ok(())
    }

    /// Selects the scene: `sketch`, `rig`, or `portrait`.
    pub fn select_view(&self, name: &str) -> Result<(), JsValue> {
        let view: View = name.parse().map_err(to_js)?;
        self.apply(Control::SelectView(view));
        Ok(())
    }

    /// Shows the duck picture.
    pub fn show_duck(&self) {
        self.apply(Control::SelectView(View::Portrait));
    }

    /// Color sliders take values in [0, 100].
    pub fn set_red(&self, percent: f32) {
        self.apply(Control::Color(Channel::Red, percent));
    }

    pub fn set_green(&self, percent: f32) {
        self.apply(Control::Color(Channel::Green, percent));
    }

    pub fn set_blue(&self, percent: f32) {
        self.apply(Control::Color(Channel::Blue, percent));
    }

    pub fn set_size(&self, size: f32) {
        self.apply(Control::Size(size));
    }

    pub fn set_segments(&self, segments: u32) {
        self.apply(Control::Segments(segments));
    }

    pub fn set_global_angle(&self, degrees: f32) {
        self.apply(Control::GlobalAngle(degrees));
    }

    pub fn set_yellow_angle(&self, degrees: f32) {
        self.apply(Control::YellowAngle(degrees));
    }

    pub fn set_magenta_angle(&self, degrees: f32) {
        self.apply(Control::MagentaAngle(degrees));
    }

    pub fn animate_yellow(&self, on: bool) {
        self.apply(Control::AnimateYellow(on));
    }

    pub fn animate_magenta(&self, on: bool) {
        self.apply(Control::AnimateMagenta(on));
    }

    /// Removes every painted shape.
    pub fn clear(&self) {
        self.app.borrow_mut().clear();
    }

    /// Starts (or restarts) the obstacle game.
    pub fn start_game(&self) -> Result<(), JsValue> {
        let spawn_loop = self.app.borrow_mut().start_game(dom::now_ms());
        if spawn_loop {
            let app = self.app.clone();
            anim::run_while(move |now| app.borrow_mut().game_tick(now))?;
        }
        Ok(())
    }
}

impl Sketchpad {
    fn apply(&self, control: Control) {
        self.app.borrow_mut().control(control);
    }
}

fn webgl2_context(canvas: &HtmlCanvasElement) -> Result<WebGl2RenderingContext, SetupError> {
    let unavailable = |detail: &str| SetupError::ContextUnavailable(detail.to_string());
    canvas
        .get_context("webgl2")
        .map_err(|e| unavailable(&format!("{e:?}")))?
        .ok_or_else(|| unavailable("browser returned no webgl2 context"))?
        .dyn_into::<WebGl2RenderingContext>()
        .map_err(|_| unavailable("context is not WebGl2RenderingContext"))
}

fn install_pointer_listener(
    canvas: &HtmlCanvasElement,
    app: &Rc<RefCell<App>>,
    event: &str,
    kind: PointerKind,
) -> Result<(), JsValue> {
    let app = app.clone();
    let listener = Closure::wrap(Box::new(move |ev: MouseEvent| {
        app.borrow_mut()
            .pointer(kind, ev.client_x() as f32, ev.client_y() as f32, ev.buttons());
    }) as Box<dyn FnMut(MouseEvent)>);
    canvas.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

fn install_key_listener(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let app = app.clone();
    let listener = Closure::wrap(Box::new(move |ev: KeyboardEvent| {
        if app.borrow_mut().key(&ev.code()) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    dom::document()?.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}
