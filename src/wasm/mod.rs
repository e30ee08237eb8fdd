//! Browser bindings: canvas drawing, `requestAnimationFrame` scheduling, DOM
//! listeners, and the Web Audio graph behind the waveform player.

use wasm_bindgen::prelude::*;

mod audio;
mod background;
mod canvas;
mod render;

pub use audio::{attach_visualizer, WaveformPlayer};
pub use background::{mount_background, Background};

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("nightsky loaded");
    Ok(())
}

/// `m:ss` label for a playback position in seconds.
#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(seconds: f64) -> String {
    crate::timeline::format_time(seconds)
}

/// Generator seed for a freshly mounted scene.
pub(crate) fn random_seed() -> u64 {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (noise << 32) ^ js_sys::Date::now() as u64
}
