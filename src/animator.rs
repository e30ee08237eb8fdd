use crate::config::Viewport;
use crate::error::Result;
use crate::scene::Scene;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;

/// Owns a scene and keeps at most one frame request outstanding for it.
///
/// Every exit path (stop, resize, drop) cancels the pending request, so a
/// loop can never outlive its canvas or run twice.
pub struct Animator<S: FrameScheduler> {
    scene: Scene,
    scheduler: S,
    pending: Option<FrameHandle>,
    running: bool,
}

impl<S: FrameScheduler> Animator<S> {
    pub fn new(scene: Scene, scheduler: S) -> Self {
        Self {
            scene,
            scheduler,
            pending: None,
            running: false,
        }
    }

    /// Arm the loop. Calling it while already armed does nothing.
    pub fn start(&mut self) -> Result<()> {
        self.running = true;
        if self.pending.is_none() {
            let handle = self.scheduler.request_frame()?;
            log::trace!("frame {:?} requested", handle);
            self.pending = Some(handle);
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            log::trace!("frame {:?} cancelled", handle);
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Body of the scheduled callback: repaint, then re-arm while running.
    pub fn on_frame(&mut self, surface: &mut dyn Surface) -> Result<()> {
        self.pending = None;
        if !self.running {
            return Ok(());
        }
        self.scene.render(surface);
        self.pending = Some(self.scheduler.request_frame()?);
        Ok(())
    }

    /// Cancel the old loop, reseed for the new size, start a fresh loop.
    /// A resize to the current size is ignored.
    pub fn resize(&mut self, viewport: Viewport) -> Result<bool> {
        if viewport == self.scene.viewport() {
            return Ok(false);
        }
        let was_running = self.running;
        self.stop();
        self.scene.reseed(viewport);
        if was_running {
            self.start()?;
        }
        Ok(true)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Outstanding frame requests owned by this animator: 0 or 1.
    pub fn active_frames(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: FrameScheduler> Drop for Animator<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
