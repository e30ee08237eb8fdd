//! Static starfield and crescent moon, seeded once per viewport size.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::{Breakpoint, Rgba, SceneConfig, Viewport};
use crate::surface::Surface;

const STAR_MAX_SIZE: f64 = 1.2;
const MOON_GLOW: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moon {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Moon {
    pub fn place(viewport: Viewport) -> Self {
        let (radius, fx, fy) = match viewport.breakpoint() {
            Breakpoint::Mobile => (20.0, 0.20, 0.10),
            Breakpoint::Desktop => (30.0, 0.15, 0.15),
        };
        Self {
            x: viewport.width * fx,
            y: viewport.height * fy,
            radius,
        }
    }

    /// Center of the background-colored disc that carves the crescent.
    pub fn cutout(&self) -> (f64, f64) {
        (self.x - self.radius / 3.0, self.y - self.radius / 6.0)
    }
}

#[derive(Debug, Clone)]
pub struct Backdrop {
    stars: Vec<Star>,
    moon: Option<Moon>,
    star_color: Rgba,
    background: Rgba,
}

impl Backdrop {
    pub fn seed(cfg: &SceneConfig, viewport: Viewport, rng: &mut Pcg32) -> Self {
        let stars = if cfg.starfield && viewport.width > 0.0 && viewport.height > 0.0 {
            let count = cfg.stars.for_breakpoint(viewport.breakpoint());
            (0..count)
                .map(|_| Star {
                    x: rng.gen_range(0.0..viewport.width),
                    y: rng.gen_range(0.0..viewport.height),
                    size: rng.gen_range(0.0..STAR_MAX_SIZE),
                    alpha: rng.gen_range(0.2..0.7),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            stars,
            moon: cfg.moon.then(|| Moon::place(viewport)),
            star_color: cfg.star_color,
            background: cfg.background,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn moon(&self) -> Option<Moon> {
        self.moon
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            surface.fill_circle(star.x, star.y, star.size, self.star_color.with_alpha(star.alpha), 0.0);
        }
        if let Some(moon) = self.moon {
            surface.fill_circle(moon.x, moon.y, moon.radius, self.star_color, MOON_GLOW);
            // The cutout must be the exact background color or the crescent shows a seam.
            let (cx, cy) = moon.cutout();
            surface.fill_circle(cx, cy, moon.radius, self.background, 0.0);
        }
    }
}
