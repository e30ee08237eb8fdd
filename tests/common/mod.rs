#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use nightsky::config::Rgba;
use nightsky::visualizer::SampleSource;
use nightsky::{FrameHandle, FrameScheduler, Result, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Background(Rgba),
    Clear,
    Circle { x: f64, y: f64, radius: f64, color: Rgba, glow: f64 },
    Line { from: (f64, f64), to: (f64, f64), color: Rgba },
    Polyline { points: Vec<(f64, f64)>, start: Rgba, end: Rgba, width: f64 },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn circles(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Circle { .. })).collect()
    }

    pub fn lines(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Line { .. })).count()
    }
}

impl Surface for RecordingSurface {
    fn fill_background(&mut self, color: Rgba) {
        self.calls.push(Call::Background(color));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, glow: f64) {
        self.calls.push(Call::Circle { x, y, radius, color, glow });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, _width: f64) {
        self.calls.push(Call::Line { from, to, color });
    }

    fn polyline(&mut self, points: &[(f64, f64)], start: Rgba, end: Rgba, width: f64) {
        self.calls.push(Call::Polyline {
            points: points.to_vec(),
            start,
            end,
            width,
        });
    }
}

/// Hands out sequential ids and tracks which are still outstanding. Clones
/// share one ledger, so a test can keep a handle after moving the scheduler
/// into the loop it drives.
#[derive(Debug, Default, Clone)]
pub struct CountingScheduler(Rc<RefCell<Ledger>>);

#[derive(Debug, Default)]
struct Ledger {
    next: i32,
    outstanding: HashSet<i32>,
    requested: usize,
    cancelled: usize,
}

impl CountingScheduler {
    pub fn outstanding(&self) -> usize {
        self.0.borrow().outstanding.len()
    }

    pub fn requested(&self) -> usize {
        self.0.borrow().requested
    }

    pub fn cancelled(&self) -> usize {
        self.0.borrow().cancelled
    }

    /// Deliver the oldest pending frame. The caller then runs the loop's
    /// frame body, as the browser would.
    pub fn fire(&self) -> bool {
        let mut ledger = self.0.borrow_mut();
        let Some(id) = ledger.outstanding.iter().min().copied() else {
            return false;
        };
        ledger.outstanding.remove(&id)
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle> {
        let mut ledger = self.0.borrow_mut();
        ledger.next += 1;
        ledger.requested += 1;
        let id = ledger.next;
        ledger.outstanding.insert(id);
        Ok(FrameHandle(id))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut ledger = self.0.borrow_mut();
        if ledger.outstanding.remove(&handle.0) {
            ledger.cancelled += 1;
        }
    }
}

/// Sample source replaying a fixed buffer.
pub struct FixedSource {
    pub samples: Vec<u8>,
    pub reads: usize,
}

impl FixedSource {
    pub fn new(samples: Vec<u8>) -> Self {
        Self { samples, reads: 0 }
    }
}

impl SampleSource for FixedSource {
    fn bin_count(&self) -> usize {
        self.samples.len()
    }

    fn fill_time_domain(&mut self, buf: &mut [u8]) {
        self.reads += 1;
        buf.copy_from_slice(&self.samples);
    }
}
