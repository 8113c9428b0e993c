pub mod animation;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Float32Array, Function};
use kepler_engine::{ExplorerConfig, FilterState, InputEvent, ViewMode};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub use animation::AnimationLoop;
pub use runner::{ExplorerRunner, PendingCall};

fn to_js(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The explorer as seen from the page.
///
/// Owns the runner and, while started, the animation loop. Callbacks
/// registered here are invoked after each frame with plain JSON snapshots.
#[wasm_bindgen]
pub struct ExplorerHandle {
    runner: Rc<RefCell<ExplorerRunner>>,
    animation: Option<AnimationLoop>,
}

#[wasm_bindgen]
impl ExplorerHandle {
    /// Create an explorer drawing into `canvas`. `config_json` may be a
    /// partial config object or omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<ExplorerHandle, JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => ExplorerConfig::from_json(json).map_err(to_js)?,
            _ => ExplorerConfig::default(),
        };
        log::info!("kepler-explorer: initialized");
        Ok(ExplorerHandle {
            runner: Rc::new(RefCell::new(ExplorerRunner::new(canvas, config))),
            animation: None,
        })
    }

    /// Start the render loop. Calling it while running is a no-op.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.animation.as_ref().is_some_and(AnimationLoop::is_running) {
            return Ok(());
        }
        let runner = self.runner.clone();
        self.animation = Some(AnimationLoop::start(move |timestamp| {
            let calls = runner.borrow_mut().tick(timestamp);
            for call in calls {
                call.invoke();
            }
        })?);
        Ok(())
    }

    /// Stop the loop and release the canvas. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.stop();
            log::info!("kepler-explorer: stopped");
        }
        if let Ok(mut runner) = self.runner.try_borrow_mut() {
            runner.detach();
        }
    }

    /// Attach a (new) canvas, e.g. before restarting after `stop`.
    pub fn attach(&mut self, canvas: HtmlCanvasElement) {
        self.runner.borrow_mut().attach(canvas);
    }

    pub fn is_running(&self) -> bool {
        self.animation.as_ref().is_some_and(AnimationLoop::is_running)
    }

    // ---- Catalog ----

    /// Load a JSON array of archive rows.
    pub fn load_catalog(&mut self, json: &str) -> Result<(), JsValue> {
        self.runner
            .borrow_mut()
            .explorer_mut()
            .load_json(json)
            .map_err(to_js)
    }

    /// Load the built-in sample used when the live catalog is unavailable.
    pub fn load_fallback(&mut self) {
        self.runner.borrow_mut().explorer_mut().load_fallback();
    }

    pub fn summary_json(&self) -> Result<String, JsValue> {
        let summary = self.runner.borrow_mut().explorer_mut().summary();
        serde_json::to_string(&summary).map_err(to_js)
    }

    // ---- Filter and view ----

    /// Set one filter field, e.g. `("maxPeriod", 200)` or `("size", "earth")`.
    pub fn set_filter_field(&mut self, field: &str, value_json: &str) -> Result<(), JsValue> {
        let value: serde_json::Value = serde_json::from_str(value_json).map_err(to_js)?;
        self.runner
            .borrow_mut()
            .explorer_mut()
            .set_filter_field(field, value)
            .map_err(to_js)
    }

    /// Replace the whole filter, e.g. one saved earlier from `filter_json`.
    /// Missing fields take their defaults.
    pub fn set_filter_json(&mut self, json: &str) -> Result<(), JsValue> {
        let filter = FilterState::from_json(json).map_err(to_js)?;
        self.runner.borrow_mut().explorer_mut().set_filter(filter);
        Ok(())
    }

    pub fn filter_json(&self) -> Result<String, JsValue> {
        self.runner.borrow().explorer().filter().to_json().map_err(to_js)
    }

    pub fn set_view_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = ViewMode::parse(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown view mode {mode:?}")))?;
        self.runner.borrow_mut().explorer_mut().set_view_mode(mode);
        Ok(())
    }

    pub fn view_mode(&self) -> String {
        self.runner.borrow().explorer().view_mode().name().to_string()
    }

    // ---- Pointer input (client coordinates) ----

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.runner.borrow_mut().push_input(InputEvent::PointerMove { x, y });
    }

    pub fn pointer_leave(&mut self) {
        self.runner.borrow_mut().push_input(InputEvent::PointerLeave);
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.runner.borrow_mut().push_input(InputEvent::Click { x, y });
    }

    // ---- Callbacks ----

    /// `f(vertices: Float32Array, labelsJson: string)` after every frame.
    /// Vertices are x, y, r, g, b, a triangles in canvas pixels.
    pub fn on_frame(&mut self, f: Option<Function>) {
        self.runner.borrow_mut().set_on_frame(f);
    }

    /// `f(starJson | null, x, y)` on every pointer move and on leave.
    pub fn on_hover(&mut self, f: Option<Function>) {
        self.runner.borrow_mut().set_on_hover(f);
    }

    /// `f(starJson | null)` when the selection changes.
    pub fn on_select(&mut self, f: Option<Function>) {
        self.runner.borrow_mut().set_on_select(f);
    }

    /// Selected star as JSON, or `null`.
    pub fn selection_json(&self) -> JsValue {
        let runner = self.runner.borrow();
        runner.star_json(runner.explorer().selection())
    }

    // ---- Orbital diagram ----

    /// Triangles for the selected star's orbital diagram at `width` x
    /// `height`, or `undefined` with no selection.
    pub fn render_diagram(&mut self, width: u32, height: u32) -> Option<Float32Array> {
        let mut runner = self.runner.borrow_mut();
        let frame = runner.explorer_mut().orbital_diagram(width, height)?;
        Some(Float32Array::from(frame.vectors.vertices()))
    }

    /// Labels for the last diagram as a JSON array.
    pub fn diagram_labels_json(&mut self, width: u32, height: u32) -> Result<String, JsValue> {
        let mut runner = self.runner.borrow_mut();
        match runner.explorer_mut().orbital_diagram(width, height) {
            Some(frame) => frame.labels_json().map_err(to_js),
            None => Ok("[]".to_string()),
        }
    }
}

impl Drop for ExplorerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
