//! Scene configuration: colors, per-breakpoint counts, and which particle
//! variant drives the field.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Viewports at or below this width use the mobile counts.
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

impl Breakpoint {
    pub fn for_width(width: f64) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Breakpoint::Mobile
        } else {
            Breakpoint::Desktop
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::for_width(self.width)
    }
}

/// Straight-alpha color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string suitable for `fillStyle` / `strokeStyle`.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::Color(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Rgba::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f64 / 255.0)),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Diagonal falling particles that respawn along the top/right edges.
    Rain,
    /// Drifting particles bouncing off the walls, linked by proximity lines.
    Net,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Counts {
    pub desktop: usize,
    pub mobile: usize,
}

impl Counts {
    pub fn for_breakpoint(&self, bp: Breakpoint) -> usize {
        match bp {
            Breakpoint::Mobile => self.mobile,
            Breakpoint::Desktop => self.desktop,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub variant: Variant,
    pub background: Rgba,
    pub particle_color: Rgba,
    pub star_color: Rgba,
    pub particles: Counts,
    pub stars: Counts,
    /// Cursor interaction radius in canvas pixels.
    pub mouse_radius: f64,
    /// `[min, max)` particle radius.
    pub size_range: [f64; 2],
    /// Rain speed per unit of particle size.
    pub speed_factor: f64,
    pub push_strength: f64,
    /// Max per-axis velocity of a net particle.
    pub drift: f64,
    pub particle_glow: f64,
    pub starfield: bool,
    pub moon: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::rain()
    }
}

impl SceneConfig {
    pub fn rain() -> Self {
        Self {
            variant: Variant::Rain,
            background: Rgba::rgb(0x02, 0x02, 0x0a),
            particle_color: Rgba::rgb(0x64, 0xff, 0xda),
            star_color: Rgba::rgb(0xff, 0xff, 0xff),
            particles: Counts {
                desktop: 40,
                mobile: 20,
            },
            stars: Counts {
                desktop: 50,
                mobile: 30,
            },
            mouse_radius: 150.0,
            size_range: [0.5, 2.0],
            speed_factor: 0.3,
            push_strength: 2.0,
            drift: 0.0,
            particle_glow: 5.0,
            starfield: true,
            moon: true,
        }
    }

    pub fn net() -> Self {
        Self {
            variant: Variant::Net,
            particles: Counts {
                desktop: 80,
                mobile: 40,
            },
            size_range: [1.0, 3.0],
            push_strength: 3.0,
            drift: 0.4,
            particle_glow: 0.0,
            starfield: false,
            moon: false,
            ..Self::rain()
        }
    }

    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Rain => Self::rain(),
            Variant::Net => Self::net(),
        }
    }

    /// Parse a JSON object of overrides on top of the preset for its
    /// `variant` (rain when absent) and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: SceneOverrides = serde_json::from_str(json)?;
        let variant = overrides.variant.unwrap_or(Variant::Rain);
        let cfg = overrides.apply(Self::preset(variant));
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.mouse_radius.is_finite() && self.mouse_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "mouse_radius must be positive, got {}",
                self.mouse_radius
            )));
        }
        let [lo, hi] = self.size_range;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi) {
            return Err(Error::InvalidConfig(format!(
                "size_range must be 0 < min < max, got [{lo}, {hi}]"
            )));
        }
        if self.particles.desktop == 0 || self.particles.mobile == 0 {
            return Err(Error::InvalidConfig("particle counts must be non-zero".into()));
        }
        for (name, v) in [
            ("speed_factor", self.speed_factor),
            ("push_strength", self.push_strength),
            ("drift", self.drift),
            ("particle_glow", self.particle_glow),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Error::InvalidConfig(format!("{name} must be >= 0, got {v}")));
            }
        }
        Ok(())
    }
}

/// Partial [`SceneConfig`] as accepted from JSON. Unknown keys are errors.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneOverrides {
    pub variant: Option<Variant>,
    pub background: Option<Rgba>,
    pub particle_color: Option<Rgba>,
    pub star_color: Option<Rgba>,
    pub particles: Option<Counts>,
    pub stars: Option<Counts>,
    pub mouse_radius: Option<f64>,
    pub size_range: Option<[f64; 2]>,
    pub speed_factor: Option<f64>,
    pub push_strength: Option<f64>,
    pub drift: Option<f64>,
    pub particle_glow: Option<f64>,
    pub starfield: Option<bool>,
    pub moon: Option<bool>,
}

impl SceneOverrides {
    pub fn apply(self, base: SceneConfig) -> SceneConfig {
        SceneConfig {
            variant: self.variant.unwrap_or(base.variant),
            background: self.background.unwrap_or(base.background),
            particle_color: self.particle_color.unwrap_or(base.particle_color),
            star_color: self.star_color.unwrap_or(base.star_color),
            particles: self.particles.unwrap_or(base.particles),
            stars: self.stars.unwrap_or(base.stars),
            mouse_radius: self.mouse_radius.unwrap_or(base.mouse_radius),
            size_range: self.size_range.unwrap_or(base.size_range),
            speed_factor: self.speed_factor.unwrap_or(base.speed_factor),
            push_strength: self.push_strength.unwrap_or(base.push_strength),
            drift: self.drift.unwrap_or(base.drift),
            particle_glow: self.particle_glow.unwrap_or(base.particle_glow),
            starfield: self.starfield.unwrap_or(base.starfield),
            moon: self.moon.unwrap_or(base.moon),
        }
    }
}
