use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::backdrop::Backdrop;
use crate::config::{SceneConfig, Viewport};
use crate::field::{Cursor, ParticleField};
use crate::surface::Surface;

/// All per-canvas animation state: the particle field, the static layer,
/// the cursor, and the generator they are seeded from.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    viewport: Viewport,
    field: ParticleField,
    backdrop: Backdrop,
    cursor: Cursor,
    rng: Pcg32,
    epoch: u64,
}

impl Scene {
    pub fn new(config: SceneConfig, viewport: Viewport, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = ParticleField::seed(&config, viewport, &mut rng);
        let backdrop = Backdrop::seed(&config, viewport, &mut rng);
        log::debug!(
            "scene seeded at {}x{}: {} particles, {} stars",
            viewport.width,
            viewport.height,
            field.particles().len(),
            backdrop.stars().len()
        );
        Self {
            config,
            viewport,
            field,
            backdrop,
            cursor: Cursor::default(),
            rng,
            epoch: 1,
        }
    }

    /// Replace every particle and star for a new viewport size. Returns
    /// `false` and keeps the current state when the size did not change.
    pub fn reseed(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.field = ParticleField::seed(&self.config, viewport, &mut self.rng);
        self.backdrop = Backdrop::seed(&self.config, viewport, &mut self.rng);
        self.epoch += 1;
        log::debug!(
            "scene reseeded (epoch {}) at {}x{}: {} particles, {} stars",
            self.epoch,
            viewport.width,
            viewport.height,
            self.field.particles().len(),
            self.backdrop.stars().len()
        );
        true
    }

    /// Advance the particle field one frame without drawing.
    pub fn step(&mut self) {
        self.field.update(&self.cursor, &mut self.rng);
    }

    /// Full repaint: background, static layer, then the advanced particles.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        surface.fill_background(self.config.background);
        self.backdrop.draw(surface);
        self.step();
        self.field.draw(surface);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of seedings so far, starting at 1.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
