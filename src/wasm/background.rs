use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use super::canvas::CanvasSurface;
use super::render::{frame_callback, FrameCallback, RafScheduler};
use crate::animator::Animator;
use crate::config::{SceneConfig, Viewport};
use crate::scene::Scene;

struct Mounted {
    animator: Animator<RafScheduler>,
    surface: CanvasSurface,
}

/// A running background animation. Dropping it (or calling `unmount`)
/// cancels the frame loop and removes every listener it registered.
#[wasm_bindgen]
pub struct Background {
    state: Option<Rc<RefCell<Mounted>>>,
    callback: FrameCallback,
    listeners: Vec<EventListener>,
}

/// Size `canvas` to the window and start the animation on it.
///
/// `config` is an optional JSON object overriding the rain defaults. Returns
/// `undefined` when the canvas has no 2d context.
#[wasm_bindgen(js_name = mountBackground)]
pub fn mount_background(
    canvas: HtmlCanvasElement,
    config: Option<String>,
) -> Result<Option<Background>, JsValue> {
    let config = match config {
        Some(json) => SceneConfig::from_json(&json)?,
        None => SceneConfig::default(),
    };
    let window = web_sys::window().ok_or("no window")?;
    let Some(surface) = CanvasSurface::new(canvas.clone())? else {
        log::debug!("canvas has no 2d context; background disabled");
        return Ok(None);
    };

    let viewport = fit_to_window(&window, &canvas)?;
    let callback = frame_callback();
    let scheduler = RafScheduler::new(window.clone(), callback.clone());
    let scene = Scene::new(config, viewport, super::random_seed());
    let state = Rc::new(RefCell::new(Mounted {
        animator: Animator::new(scene, scheduler),
        surface,
    }));

    *callback.borrow_mut() = Some({
        let weak = Rc::downgrade(&state);
        Closure::wrap(Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut mounted = state.borrow_mut();
            let Mounted { animator, surface } = &mut *mounted;
            if let Err(e) = animator.on_frame(surface) {
                log::error!("background frame: {e}");
            }
        }) as Box<dyn FnMut()>)
    });

    let target: &EventTarget = window.as_ref();
    let listeners = vec![
        EventListener::new(target, "mousemove", {
            let weak = Rc::downgrade(&state);
            move |ev: &Event| {
                if let (Some(state), Some(ev)) = (weak.upgrade(), ev.dyn_ref::<MouseEvent>()) {
                    let mut mounted = state.borrow_mut();
                    let cursor = mounted.animator.scene_mut().cursor_mut();
                    cursor.set(ev.client_x() as f64, ev.client_y() as f64);
                }
            }
        }),
        EventListener::new(target, "mouseout", {
            let weak = Rc::downgrade(&state);
            move |ev: &Event| {
                // Only a pointer leaving the window has no related target.
                let left = ev
                    .dyn_ref::<MouseEvent>()
                    .map_or(true, |m| m.related_target().is_none());
                if let (true, Some(state)) = (left, weak.upgrade()) {
                    state.borrow_mut().animator.scene_mut().cursor_mut().clear();
                }
            }
        }),
        EventListener::new(target, "resize", {
            let weak = Rc::downgrade(&state);
            let window = window.clone();
            move |_: &Event| on_resize(&weak, &window, &canvas)
        }),
    ];

    state.borrow_mut().animator.start()?;
    log::info!(
        "background mounted at {}x{}",
        viewport.width,
        viewport.height
    );

    Ok(Some(Background {
        state: Some(state),
        callback,
        listeners,
    }))
}

fn on_resize(state: &Weak<RefCell<Mounted>>, window: &Window, canvas: &HtmlCanvasElement) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let viewport = match fit_to_window(window, canvas) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("resize: {:?}", e);
            return;
        }
    };
    if let Err(e) = state.borrow_mut().animator.resize(viewport) {
        log::error!("resize: {e}");
    }
}

fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> Result<Viewport, JsValue> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    Ok(Viewport::new(w.floor(), h.floor()))
}

#[wasm_bindgen]
impl Background {
    pub fn unmount(&mut self) {
        self.listeners.clear();
        if let Some(state) = self.state.take() {
            state.borrow_mut().animator.stop();
            log::info!("background unmounted");
        }
        self.callback.borrow_mut().take();
    }

    /// Size the canvas explicitly, for hosts that lay it out themselves.
    /// Reseeds and restarts the loop when the size changed.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, JsValue> {
        let Some(state) = &self.state else {
            return Ok(false);
        };
        let mut mounted = state.borrow_mut();
        mounted.surface.set_size(width, height);
        Ok(mounted
            .animator
            .resize(Viewport::new(width as f64, height as f64))?)
    }

    /// Last pointer position as `[x, y]`, `undefined` when outside the window.
    pub fn cursor(&self) -> Option<Box<[f64]>> {
        let state = self.state.as_ref()?;
        let (x, y) = state.borrow().animator.scene().cursor().position?;
        Some(Box::new([x, y]))
    }

    /// Number of times particles and stars have been seeded.
    pub fn epoch(&self) -> f64 {
        self.state
            .as_ref()
            .map_or(0.0, |s| s.borrow().animator.scene().epoch() as f64)
    }

    #[wasm_bindgen(js_name = activeFrames)]
    pub fn active_frames(&self) -> usize {
        self.state
            .as_ref()
            .map_or(0, |s| s.borrow().animator.active_frames())
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        self.unmount();
    }
}
