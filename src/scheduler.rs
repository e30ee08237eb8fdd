use crate::error::Result;

/// Opaque id of a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Next-frame scheduling primitive (`requestAnimationFrame` in the browser).
///
/// A scheduler drives exactly one callback; `request_frame` arms it for the
/// next frame and `cancel_frame` disarms a pending request.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}
