//! Live waveform for a playing media element.
//!
//! The audio graph is abstracted behind [`SampleSource`] and built lazily on
//! first play; [`VisualizerLoop`] keeps one frame request alive only while
//! the element is playing.

use crate::config::Rgba;
use crate::error::Result;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;

pub const FFT_SIZE: u32 = 2048;
pub const LINE_WIDTH: f64 = 2.0;
pub const GRADIENT_START: Rgba = Rgba::rgb(0xa8, 0x55, 0xf7);
pub const GRADIENT_END: Rgba = Rgba::rgb(0x3b, 0x82, 0xf6);

/// Byte time-domain samples centered on 128.
pub trait SampleSource {
    /// Samples delivered per read.
    fn bin_count(&self) -> usize;
    fn fill_time_domain(&mut self, buf: &mut [u8]);
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Playback {
    pub paused: bool,
    pub ended: bool,
    /// Seconds; NaN until metadata loads.
    pub duration: f64,
}

impl Playback {
    /// Playing, whether or not metadata has arrived yet.
    pub fn is_playing(&self) -> bool {
        !self.paused && !self.ended
    }

    /// Playing with a known, non-zero duration: the analyser has data.
    pub fn is_live(&self) -> bool {
        self.is_playing() && self.duration > 0.0
    }
}

/// Map samples to canvas points: evenly spaced across the width, offset
/// from the vertical midline by `(s - 128) / 128` of the half height. The
/// path closes on the right edge at the midline.
pub fn waveform_points(samples: &[u8], width: f64, height: f64) -> Vec<(f64, f64)> {
    let mid = height / 2.0;
    let step = if samples.is_empty() {
        0.0
    } else {
        width / samples.len() as f64
    };
    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64 * step, mid + (s as f64 - 128.0) / 128.0 * mid))
        .chain(std::iter::once((width, mid)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Waveform {
    buffer: Vec<u8>,
}

impl Waveform {
    pub fn new(bin_count: usize) -> Self {
        Self {
            buffer: vec![128; bin_count],
        }
    }

    pub fn samples(&self) -> &[u8] {
        &self.buffer
    }

    /// Draw one frame. Returns `false` without touching the surface when
    /// playback is not live.
    pub fn draw(
        &mut self,
        source: &mut dyn SampleSource,
        playback: Playback,
        width: f64,
        height: f64,
        surface: &mut dyn Surface,
    ) -> bool {
        if !playback.is_live() {
            return false;
        }
        if self.buffer.len() != source.bin_count() {
            self.buffer.resize(source.bin_count(), 128);
        }
        source.fill_time_domain(&mut self.buffer);
        let points = waveform_points(&self.buffer, width, height);
        surface.clear();
        surface.polyline(&points, GRADIENT_START, GRADIENT_END, LINE_WIDTH);
        true
    }
}

pub struct VisualizerLoop<G: SampleSource, S: FrameScheduler> {
    graph: Option<G>,
    waveform: Waveform,
    scheduler: S,
    pending: Option<FrameHandle>,
}

impl<G: SampleSource, S: FrameScheduler> VisualizerLoop<G, S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            graph: None,
            waveform: Waveform::new((FFT_SIZE / 2) as usize),
            scheduler,
            pending: None,
        }
    }

    /// Playback started. Builds the audio graph if this is the first play,
    /// then arms the draw loop.
    pub fn on_play<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce() -> Result<G>,
    {
        if self.graph.is_none() {
            let graph = build()?;
            log::debug!("audio graph built with {} bins", graph.bin_count());
            self.waveform = Waveform::new(graph.bin_count());
            self.graph = Some(graph);
        }
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame()?);
        }
        Ok(())
    }

    /// Playback paused or ended. The last frame stays on screen.
    pub fn on_pause(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Body of the scheduled callback. Draws only while playback is live but
    /// stays armed for as long as the element is playing, so a play issued
    /// before metadata loads starts drawing once the duration is known.
    pub fn on_frame(
        &mut self,
        playback: Playback,
        width: f64,
        height: f64,
        surface: &mut dyn Surface,
    ) -> Result<bool> {
        self.pending = None;
        let Some(graph) = self.graph.as_mut() else {
            return Ok(false);
        };
        if !playback.is_playing() {
            return Ok(false);
        }
        let drawn = self.waveform.draw(graph, playback, width, height, surface);
        self.pending = Some(self.scheduler.request_frame()?);
        Ok(drawn)
    }

    pub fn graph(&self) -> Option<&G> {
        self.graph.as_ref()
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    pub fn active_frames(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Stop drawing and hand back the graph so the caller can close it.
    pub fn teardown(&mut self) -> Option<G> {
        self.on_pause();
        self.graph.take()
    }
}

impl<G: SampleSource, S: FrameScheduler> Drop for VisualizerLoop<G, S> {
    fn drop(&mut self) {
        self.on_pause();
    }
}
