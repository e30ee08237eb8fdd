use crate::config::Rgba;

/// The handful of 2D drawing calls the scene and the waveform need.
///
/// The browser implementation wraps `CanvasRenderingContext2d`; anything else
/// (tests, offscreen targets) can record or rasterize the calls itself.
pub trait Surface {
    /// Paint the whole surface with an opaque color.
    fn fill_background(&mut self, color: Rgba);

    /// Reset the whole surface to transparent.
    fn clear(&mut self);

    /// Filled disc. `glow` is a shadow blur radius in pixels, 0 for none.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, glow: f64);

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64);

    /// Connected path through `points`, stroked with a left-to-right gradient
    /// running from `start` to `end` over the surface width.
    fn polyline(&mut self, points: &[(f64, f64)], start: Rgba, end: Rgba, width: f64);
}
