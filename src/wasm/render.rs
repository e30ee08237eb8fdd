use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::error::{Error, Result};
use crate::scheduler::{FrameHandle, FrameScheduler};

/// Slot for the animation-frame closure. It lives in an `Option` so the
/// closure can be created first and then looked up from within itself when
/// it re-arms.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn frame_callback() -> FrameCallback {
    Rc::new(RefCell::new(None))
}

/// `requestAnimationFrame`-backed scheduler for a single callback.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle> {
        let slot = self.callback.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| Error::Js("frame callback not installed".into()))?;
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        Ok(FrameHandle(id))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, e);
        }
    }
}
