use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kepler_engine::CancelToken;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A `requestAnimationFrame` loop that keeps rescheduling itself until
/// stopped. Dropping the loop stops it.
pub struct AnimationLoop {
    window: web_sys::Window,
    token: CancelToken,
    pending: Rc<Cell<Option<i32>>>,
    // Only strong reference to the frame closure; the closure holds a Weak
    // so stopping frees it.
    callback: Option<Rc<RefCell<Option<FrameCallback>>>>,
}

impl AnimationLoop {
    /// Start calling `tick(timestamp_ms)` once per display refresh.
    pub fn start(mut tick: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let token = CancelToken::new();
        let pending = Rc::new(Cell::new(None));
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(&slot);
        let (w, t, p) = (window.clone(), token.clone(), pending.clone());
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            p.set(None);
            if t.is_cancelled() {
                return;
            }
            tick(timestamp);
            if t.is_cancelled() {
                return;
            }
            let Some(slot) = weak.upgrade() else {
                return;
            };
            let slot = slot.borrow();
            if let Some(cb) = slot.as_ref() {
                match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => p.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        pending.set(Some(id));
        *slot.borrow_mut() = Some(closure);

        Ok(Self {
            window,
            token,
            pending,
            callback: Some(slot),
        })
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Cancel the pending frame and release the closure. Idempotent.
    pub fn stop(&mut self) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        self.callback = None;
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
