//! Persisted render settings.
//!
//! `RenderSettings` is what a session saves and restores. It is independent
//! of the image size; the kernel configurations are derived from it once the
//! size is known.

use crate::{Color, ConfigError, FractalConfig, PaletteConfig, Region, TrapShape};
use serde::{Deserialize, Serialize};

/// Identifier of the only supported iteration formula.
pub const MANDELBROT_ID: &str = "mandelbrot";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub fractal_id: String,
    /// Signed so that invalid saved values surface as a configuration error.
    pub iter_max: i64,
    pub bail_out: f64,
    pub julia_mode: bool,
    pub julia_x: f64,
    pub julia_y: f64,
    pub region: Region,

    pub decorated: bool,
    pub trap_shape: TrapShape,
    pub orbit_dilation: f64,
    pub orbit_translate_x: f64,
    pub orbit_translate_y: f64,
    pub orbit_turbulence: bool,
    pub orbit_turbulence_intensity: f64,
    pub orbit_turbulence_scale: f64,

    pub color_gain: f64,
    pub color_offset: f64,
    pub color_repeat: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fractal_id: MANDELBROT_ID.to_string(),
            iter_max: 100,
            bail_out: 100.0,
            julia_mode: false,
            julia_x: 0.0,
            julia_y: 0.0,
            region: Region::default(),
            decorated: false,
            trap_shape: TrapShape::Stings,
            orbit_dilation: 1.0,
            orbit_translate_x: 0.0,
            orbit_translate_y: 0.0,
            orbit_turbulence: false,
            orbit_turbulence_intensity: 0.0,
            orbit_turbulence_scale: 0.0,
            color_gain: 0.05,
            color_offset: 0.0,
            color_repeat: true,
        }
    }
}

impl RenderSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated escape-time configuration for a `width` x `height` image.
    pub fn fractal_config(&self, width: u32, height: u32) -> Result<FractalConfig, ConfigError> {
        if self.fractal_id != MANDELBROT_ID {
            return Err(ConfigError::UnknownFractal(self.fractal_id.clone()));
        }
        let iter_max =
            u32::try_from(self.iter_max).map_err(|_| ConfigError::InvalidIterMax(self.iter_max))?;

        let config = FractalConfig {
            iter_max,
            bail_out: self.bail_out,
            julia_mode: self.julia_mode,
            julia_x: self.julia_x,
            julia_y: self.julia_y,
            decorated: self.decorated,
            trap_shape: self.trap_shape,
            orbit_dilation: self.orbit_dilation,
            orbit_translate_x: self.orbit_translate_x,
            orbit_translate_y: self.orbit_translate_y,
            orbit_turbulence: self.orbit_turbulence,
            orbit_turbulence_intensity: self.orbit_turbulence_intensity,
            orbit_turbulence_scale: self.orbit_turbulence_scale,
            ..FractalConfig::for_region(&self.region, width, height)
        };
        config.validate()?;
        Ok(config)
    }

    /// Validated palette configuration using these settings' color mapping.
    pub fn palette_config(&self, colors: Vec<Color>) -> Result<PaletteConfig, ConfigError> {
        PaletteConfig::new(colors, self.color_gain, self.color_offset, self.color_repeat)
    }
}
