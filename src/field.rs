//! The animated particle field behind the page.
//!
//! Two update rules share one particle type: falling rain that respawns on the
//! top/right edges, and a drifting net whose particles spring back to a moving
//! origin and are joined by proximity lines.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::{Rgba, SceneConfig, Variant, Viewport};
use crate::surface::Surface;

/// Fraction of the residual offset a net particle recovers per frame.
pub const SPRING_BACK: f64 = 1.0 / 20.0;

/// Net links use `(W / LINK_DIVISOR) * (H / LINK_DIVISOR)` as the squared
/// distance threshold.
pub const LINK_DIVISOR: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub speed: f64,
    /// Rest position. Only moves in the net variant.
    pub ox: f64,
    pub oy: f64,
}

impl Particle {
    pub fn offset(&self) -> f64 {
        (self.x - self.ox).hypot(self.y - self.oy)
    }
}

/// Pointer position in canvas pixels, `None` once the pointer leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursor {
    pub position: Option<(f64, f64)>,
}

impl Cursor {
    pub fn set(&mut self, x: f64, y: f64) {
        self.position = (x.is_finite() && y.is_finite()).then_some((x, y));
    }

    pub fn clear(&mut self) {
        self.position = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub opacity: f64,
}

/// Squared distance below which two net particles are linked.
pub fn link_threshold(viewport: Viewport) -> f64 {
    (viewport.width / LINK_DIVISOR) * (viewport.height / LINK_DIVISOR)
}

/// Linear falloff: 1 for coincident particles, 0 at the threshold.
pub fn link_opacity(dist_sq: f64, threshold: f64) -> f64 {
    if !(threshold > 0.0) {
        return 0.0;
    }
    (1.0 - dist_sq / threshold).clamp(0.0, 1.0)
}

/// Displacement pushing `(x, y)` away from the cursor, scaled by
/// `(radius - distance) / radius`. `None` outside the radius and when the
/// cursor sits exactly on the point.
pub fn repel(x: f64, y: f64, cursor: (f64, f64), radius: f64, strength: f64) -> Option<(f64, f64)> {
    let dx = x - cursor.0;
    let dy = y - cursor.1;
    let dist = dx.hypot(dy);
    if dist >= radius || dist <= f64::EPSILON {
        return None;
    }
    let force = (radius - dist) / radius;
    Some((dx / dist * force * strength, dy / dist * force * strength))
}

fn uniform(rng: &mut Pcg32, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    variant: Variant,
    viewport: Viewport,
    particles: Vec<Particle>,
    color: Rgba,
    glow: f64,
    size_range: [f64; 2],
    speed_factor: f64,
    radius: f64,
    push_strength: f64,
}

impl ParticleField {
    /// Scatter the breakpoint's particle count uniformly over the viewport.
    pub fn seed(cfg: &SceneConfig, viewport: Viewport, rng: &mut Pcg32) -> Self {
        let count = cfg.particles.for_breakpoint(viewport.breakpoint());
        let [lo, hi] = cfg.size_range;
        let particles = (0..count)
            .map(|_| {
                let x = uniform(rng, 0.0, viewport.width);
                let y = uniform(rng, 0.0, viewport.height);
                let size = uniform(rng, lo, hi);
                let (vx, vy) = match cfg.variant {
                    Variant::Rain => (0.0, 0.0),
                    Variant::Net => (
                        uniform(rng, -cfg.drift, cfg.drift),
                        uniform(rng, -cfg.drift, cfg.drift),
                    ),
                };
                Particle {
                    x,
                    y,
                    vx,
                    vy,
                    size,
                    speed: size * cfg.speed_factor,
                    ox: x,
                    oy: y,
                }
            })
            .collect();

        Self {
            variant: cfg.variant,
            viewport,
            particles,
            color: cfg.particle_color,
            glow: cfg.particle_glow,
            size_range: cfg.size_range,
            speed_factor: cfg.speed_factor,
            radius: cfg.mouse_radius,
            push_strength: cfg.push_strength,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn update(&mut self, cursor: &Cursor, rng: &mut Pcg32) {
        match self.variant {
            Variant::Rain => self.update_rain(cursor, rng),
            Variant::Net => self.update_net(cursor),
        }
    }

    fn update_rain(&mut self, cursor: &Cursor, rng: &mut Pcg32) {
        let Viewport { height, .. } = self.viewport;
        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.x -= p.speed;
            p.y += p.speed;

            if let Some(c) = cursor.position {
                if let Some((px, py)) = repel(p.x, p.y, c, self.radius, self.push_strength) {
                    p.x += px;
                    p.y += py;
                }
            }

            if p.y > height + p.size || p.x < -p.size {
                let fresh = self.respawn(rng);
                self.particles[i] = fresh;
            }
        }
    }

    /// A new raindrop on the top or right edge. The edge point is picked
    /// uniformly along the combined `W + H` perimeter, so wide screens favour
    /// the top.
    fn respawn(&self, rng: &mut Pcg32) -> Particle {
        let Viewport { width, height } = self.viewport;
        let [lo, hi] = self.size_range;
        let size = uniform(rng, lo, hi);
        let along = uniform(rng, 0.0, width + height);
        let (x, y) = if along <= width {
            (along, 0.0)
        } else {
            (width, (along - width).min(height))
        };
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size,
            speed: size * self.speed_factor,
            ox: x,
            oy: y,
        }
    }

    fn update_net(&mut self, cursor: &Cursor) {
        let Viewport { width, height } = self.viewport;
        for p in &mut self.particles {
            p.ox += p.vx;
            p.oy += p.vy;
            p.x += p.vx;
            p.y += p.vy;

            if (p.ox < 0.0 && p.vx < 0.0) || (p.ox > width && p.vx > 0.0) {
                p.vx = -p.vx;
            }
            if (p.oy < 0.0 && p.vy < 0.0) || (p.oy > height && p.vy > 0.0) {
                p.vy = -p.vy;
            }

            let push = cursor
                .position
                .and_then(|c| repel(p.x, p.y, c, self.radius, self.push_strength));
            match push {
                Some((px, py)) => {
                    p.x += px;
                    p.y += py;
                }
                None => {
                    p.x += (p.ox - p.x) * SPRING_BACK;
                    p.y += (p.oy - p.y) * SPRING_BACK;
                }
            }
        }
    }

    /// Proximity lines between every unordered pair of net particles. Always
    /// empty for rain.
    pub fn links(&self) -> Vec<Link> {
        if self.variant != Variant::Net {
            return Vec::new();
        }
        let threshold = link_threshold(self.viewport);
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq < threshold {
                    links.push(Link {
                        from: (a.x, a.y),
                        to: (b.x, b.y),
                        opacity: link_opacity(dist_sq, threshold),
                    });
                }
            }
        }
        links
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            surface.fill_circle(p.x, p.y, p.size, self.color, self.glow);
        }
        for link in self.links() {
            surface.line(link.from, link.to, self.color.with_alpha(link.opacity), 1.0);
        }
    }
}
