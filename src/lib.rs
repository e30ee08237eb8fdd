//! Night-sky particle background and live audio waveform for the browser.
//!
//! The simulation, scene compositing and frame-loop bookkeeping are plain
//! Rust and run anywhere; the `wasm` module binds them to a canvas,
//! `requestAnimationFrame` and Web Audio.

pub mod animator;
pub mod backdrop;
pub mod config;
pub mod error;
pub mod field;
pub mod scene;
pub mod scheduler;
pub mod surface;
pub mod timeline;
pub mod visualizer;

pub use animator::Animator;
pub use config::{Breakpoint, Rgba, SceneConfig, Variant, Viewport};
pub use error::{Error, Result};
pub use scene::Scene;
pub use scheduler::{FrameHandle, FrameScheduler};
pub use surface::Surface;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
