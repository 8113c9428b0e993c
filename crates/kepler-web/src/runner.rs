use js_sys::{Float32Array, Function};
use kepler_engine::{Explorer, ExplorerConfig, ExplorerEvent, InputEvent, StarId, Viewport};
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

/// A JS callback plus the arguments it should receive once the runner is no
/// longer borrowed.
pub struct PendingCall {
    callback: Function,
    args: Vec<JsValue>,
}

impl PendingCall {
    pub fn invoke(self) {
        let args: js_sys::Array = self.args.into_iter().collect();
        if let Err(err) = self.callback.apply(&JsValue::NULL, &args) {
            log::warn!("callback threw: {:?}", err);
        }
    }
}

/// Wires the explorer to one canvas and the page's callbacks.
pub struct ExplorerRunner {
    explorer: Explorer,
    canvas: Option<HtmlCanvasElement>,
    on_frame: Option<Function>,
    on_hover: Option<Function>,
    on_select: Option<Function>,
}

impl ExplorerRunner {
    pub fn new(canvas: HtmlCanvasElement, config: ExplorerConfig) -> Self {
        Self {
            explorer: Explorer::new(config),
            canvas: Some(canvas),
            on_frame: None,
            on_hover: None,
            on_select: None,
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn explorer_mut(&mut self) -> &mut Explorer {
        &mut self.explorer
    }

    pub fn set_on_frame(&mut self, f: Option<Function>) {
        self.on_frame = f;
    }

    pub fn set_on_hover(&mut self, f: Option<Function>) {
        self.on_hover = f;
    }

    pub fn set_on_select(&mut self, f: Option<Function>) {
        self.on_select = f;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.explorer.push_input(event);
    }

    /// Re-attach a canvas after `detach`.
    pub fn attach(&mut self, canvas: HtmlCanvasElement) {
        self.canvas = Some(canvas);
    }

    /// Release the canvas; ticks are no-ops until a canvas is attached.
    pub fn detach(&mut self) {
        self.canvas = None;
    }

    /// Read the canvas bounds, matching its backing store to its CSS size.
    fn read_viewport(canvas: &HtmlCanvasElement) -> Viewport {
        let width = canvas.client_width().max(0) as u32;
        let height = canvas.client_height().max(0) as u32;
        if canvas.width() != width {
            canvas.set_width(width);
        }
        if canvas.height() != height {
            canvas.set_height(height);
        }
        let rect = canvas.get_bounding_client_rect();
        Viewport::at(rect.left() as f32, rect.top() as f32, width as f32, height as f32)
    }

    /// Run one frame. Returns the callbacks to invoke afterwards.
    pub fn tick(&mut self, timestamp_ms: f64) -> Vec<PendingCall> {
        let Some(canvas) = self.canvas.as_ref() else {
            return Vec::new();
        };
        let viewport = Self::read_viewport(canvas);
        let frame = self.explorer.frame(viewport, timestamp_ms);

        let mut calls = Vec::new();
        if let Some(callback) = &self.on_frame {
            let vertices = Float32Array::from(frame.vectors.vertices());
            let labels = frame.labels_json().unwrap_or_else(|_| "[]".to_string());
            calls.push(PendingCall {
                callback: callback.clone(),
                args: vec![vertices.into(), JsValue::from_str(&labels)],
            });
        }

        for event in self.explorer.drain_events() {
            match event {
                ExplorerEvent::HoverChanged { star, pointer } => {
                    if let Some(callback) = &self.on_hover {
                        calls.push(PendingCall {
                            callback: callback.clone(),
                            args: vec![
                                self.star_json(star),
                                JsValue::from_f64(pointer.x as f64),
                                JsValue::from_f64(pointer.y as f64),
                            ],
                        });
                    }
                }
                ExplorerEvent::SelectionChanged { star } => {
                    if let Some(callback) = &self.on_select {
                        calls.push(PendingCall {
                            callback: callback.clone(),
                            args: vec![self.star_json(star)],
                        });
                    }
                }
            }
        }
        calls
    }

    /// JSON snapshot of a star for the chrome, or `null`.
    pub fn star_json(&self, star: Option<StarId>) -> JsValue {
        let snapshot = star.and_then(|id| {
            let system = self.explorer.star(id)?;
            let mut value = serde_json::to_value(system).ok()?;
            if let serde_json::Value::Object(map) = &mut value {
                map.insert("id".to_string(), serde_json::Value::from(id.0));
                map.insert("color".to_string(), serde_json::Value::from(system.color.to_hex()));
                if let Some(serde_json::Value::Array(planets)) = map.get_mut("planets") {
                    for (planet, source) in planets.iter_mut().zip(&system.planets) {
                        if let serde_json::Value::Object(fields) = planet {
                            fields.insert("sizeLabel".to_string(), serde_json::Value::from(source.category.label()));
                        }
                    }
                }
            }
            serde_json::to_string(&value).ok()
        });
        match snapshot {
            Some(json) => JsValue::from_str(&json),
            None => JsValue::NULL,
        }
    }
}
