use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{
    AnalyserNode, AudioContext, Event, EventTarget, HtmlCanvasElement, HtmlMediaElement,
    MediaElementAudioSourceNode,
};

use super::canvas::CanvasSurface;
use super::render::{frame_callback, FrameCallback, RafScheduler};
use crate::error::{Error, Result};
use crate::timeline;
use crate::visualizer::{Playback, SampleSource, VisualizerLoop, FFT_SIZE};

/// `media -> analyser -> speakers`. A media element can only be captured
/// once, so this is built on first play and kept until detach.
pub struct AudioGraph {
    ctx: AudioContext,
    analyser: AnalyserNode,
    _source: MediaElementAudioSourceNode,
}

impl AudioGraph {
    fn build(media: &HtmlMediaElement) -> Result<Self> {
        let fail = |e: JsValue| Error::AudioGraph(format!("{e:?}"));
        let ctx = AudioContext::new().map_err(fail)?;
        let source = ctx.create_media_element_source(media).map_err(fail)?;
        let analyser = ctx.create_analyser().map_err(fail)?;
        analyser.set_fft_size(FFT_SIZE);
        source.connect_with_audio_node(&analyser).map_err(fail)?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(fail)?;
        Ok(Self {
            ctx,
            analyser,
            _source: source,
        })
    }

    fn close(self) {
        if let Err(e) = self.ctx.close() {
            log::warn!("AudioContext close failed: {:?}", e);
        }
    }
}

impl SampleSource for AudioGraph {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn fill_time_domain(&mut self, buf: &mut [u8]) {
        self.analyser.get_byte_time_domain_data(buf);
    }
}

fn playback_of(media: &HtmlMediaElement) -> Playback {
    Playback {
        paused: media.paused(),
        ended: media.ended(),
        duration: media.duration(),
    }
}

struct PlayerState {
    vis: VisualizerLoop<AudioGraph, RafScheduler>,
    surface: CanvasSurface,
    media: HtmlMediaElement,
}

impl PlayerState {
    fn started(&mut self) {
        let media = self.media.clone();
        if let Err(e) = self.vis.on_play(|| AudioGraph::build(&media)) {
            log::error!("waveform: {e}");
        }
    }
}

/// Live waveform bound to one media element and one canvas.
#[wasm_bindgen]
pub struct WaveformPlayer {
    state: Option<Rc<RefCell<PlayerState>>>,
    callback: FrameCallback,
    listeners: Vec<EventListener>,
}

/// Draw `media`'s waveform on `canvas` whenever it plays. Returns
/// `undefined` when the canvas has no 2d context.
#[wasm_bindgen(js_name = attachVisualizer)]
pub fn attach_visualizer(
    media: HtmlMediaElement,
    canvas: HtmlCanvasElement,
) -> std::result::Result<Option<WaveformPlayer>, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let Some(surface) = CanvasSurface::new(canvas)? else {
        log::debug!("waveform canvas has no 2d context; visualizer disabled");
        return Ok(None);
    };

    let callback = frame_callback();
    let state = Rc::new(RefCell::new(PlayerState {
        vis: VisualizerLoop::new(RafScheduler::new(window, callback.clone())),
        surface,
        media: media.clone(),
    }));

    *callback.borrow_mut() = Some({
        let weak = Rc::downgrade(&state);
        Closure::wrap(Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut player = state.borrow_mut();
            let PlayerState { vis, surface, media } = &mut *player;
            let (w, h) = (surface.width(), surface.height());
            if let Err(e) = vis.on_frame(playback_of(media), w, h, surface) {
                log::error!("waveform frame: {e}");
            }
        }) as Box<dyn FnMut()>)
    });

    let target: &EventTarget = media.as_ref();
    // `playing` also fires when playback resumes after buffering.
    let mut listeners = Vec::new();
    for kind in ["play", "playing"] {
        let weak = Rc::downgrade(&state);
        listeners.push(EventListener::new(target, kind, move |_: &Event| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().started();
            }
        }));
    }
    for kind in ["pause", "ended"] {
        let weak = Rc::downgrade(&state);
        listeners.push(EventListener::new(target, kind, move |_: &Event| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().vis.on_pause();
            }
        }));
    }

    Ok(Some(WaveformPlayer {
        state: Some(state),
        callback,
        listeners,
    }))
}

#[wasm_bindgen]
impl WaveformPlayer {
    /// Play or pause. Must run inside a user gesture the first time so the
    /// browser lets the audio graph start.
    pub fn toggle(&self) -> std::result::Result<(), JsValue> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        let media = state.borrow().media.clone();
        if media.paused() {
            let _ = media.play()?;
            state.borrow_mut().started();
        } else {
            media.pause()?;
        }
        Ok(())
    }

    /// Seek to where a progress bar `bar_width` pixels wide was clicked.
    /// Returns the new position in seconds.
    #[wasm_bindgen(js_name = seekToClick)]
    pub fn seek_to_click(&self, click_x: f64, bar_width: f64) -> Option<f64> {
        let state = self.state.as_ref()?.borrow();
        let t = timeline::seek_time(click_x, bar_width, state.media.duration())?;
        state.media.set_current_time(t);
        Some(t)
    }

    pub fn progress(&self) -> f64 {
        self.state.as_ref().map_or(0.0, |s| {
            let state = s.borrow();
            timeline::progress(state.media.current_time(), state.media.duration())
        })
    }

    #[wasm_bindgen(js_name = currentLabel)]
    pub fn current_label(&self) -> String {
        self.state.as_ref().map_or_else(
            || timeline::format_time(0.0),
            |s| timeline::format_time(s.borrow().media.current_time()),
        )
    }

    #[wasm_bindgen(js_name = durationLabel)]
    pub fn duration_label(&self) -> String {
        self.state.as_ref().map_or_else(
            || timeline::format_time(0.0),
            |s| timeline::format_time(s.borrow().media.duration()),
        )
    }

    #[wasm_bindgen(js_name = activeFrames)]
    pub fn active_frames(&self) -> usize {
        self.state
            .as_ref()
            .map_or(0, |s| s.borrow().vis.active_frames())
    }

    /// Stop drawing, remove listeners, and close the audio context.
    pub fn detach(&mut self) {
        self.listeners.clear();
        if let Some(state) = self.state.take() {
            if let Some(graph) = state.borrow_mut().vis.teardown() {
                graph.close();
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for WaveformPlayer {
    fn drop(&mut self) {
        self.detach();
    }
}
