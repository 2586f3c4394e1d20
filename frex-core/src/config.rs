//! Render-pass configuration for the escape-time and palette kernels.
//!
//! Both configurations are plain data, built once before a render pass and
//! shared read-only by every pixel evaluation.

use crate::{ConfigError, Region, TrapShape};
use serde::{Deserialize, Serialize};

/// Packed color value as stored in a palette (opaque to the kernels).
pub type Color = u32;

/// Color returned for values that carry no color (negative, NaN or infinite).
pub const NO_COLOR: Color = 0;

/// Parameters of the quadratic escape-time iteration for one image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FractalConfig {
    /// Image row length in pixels, used to split a linear pixel index.
    pub width: u32,
    /// Fractal-space distance between neighbouring pixels.
    pub pixel_step: f64,
    /// Fractal-space coordinates of the upper-left pixel.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Iteration limit; also the capacity of the orbit buffer.
    pub iter_max: u32,
    /// Squared-magnitude escape threshold (strictly greater escapes).
    pub bail_out: f64,
    pub julia_mode: bool,
    pub julia_x: f64,
    pub julia_y: f64,
    /// Use orbit-trap scoring instead of the raw iteration count.
    pub decorated: bool,
    #[serde(default)]
    pub trap_shape: TrapShape,
    pub orbit_dilation: f64,
    pub orbit_translate_x: f64,
    pub orbit_translate_y: f64,
    /// Carried for settings compatibility; the trap score ignores these.
    #[serde(default)]
    pub orbit_turbulence: bool,
    #[serde(default)]
    pub orbit_turbulence_intensity: f64,
    #[serde(default)]
    pub orbit_turbulence_scale: f64,
}

impl FractalConfig {
    /// Configuration whose pixel grid covers `region` on a `width` x `height` image.
    pub fn for_region(region: &Region, width: u32, height: u32) -> Self {
        let pixel_step = region.pixel_size(width, height);
        Self {
            width,
            pixel_step,
            origin_x: region.upper_left_x(width, pixel_step),
            origin_y: region.upper_left_y(height, pixel_step),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if !self.pixel_step.is_finite() || self.pixel_step == 0.0 {
            return Err(ConfigError::InvalidPixelStep(self.pixel_step));
        }
        // Written as a negated comparison so NaN is rejected too.
        if !(self.bail_out > 0.0) {
            return Err(ConfigError::InvalidBailOut(self.bail_out));
        }
        if self.decorated && (!self.orbit_dilation.is_finite() || self.orbit_dilation == 0.0) {
            return Err(ConfigError::ZeroOrbitDilation(self.orbit_dilation));
        }
        Ok(())
    }

    /// Fractal-space coordinates of the pixel at `pixel_index`.
    ///
    /// Row index grows downward while fractal y grows upward.
    ///
    /// Expects a configuration that passed [`FractalConfig::validate`]; a
    /// zero `width` panics on the division.
    #[inline]
    pub fn pixel_to_fractal(&self, pixel_index: u64) -> (f64, f64) {
        let width = self.width as u64;
        let col = pixel_index % width;
        let row = pixel_index / width;
        (
            self.origin_x + col as f64 * self.pixel_step,
            self.origin_y - row as f64 * self.pixel_step,
        )
    }
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            width: 1,
            pixel_step: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
            iter_max: 100,
            bail_out: 100.0,
            julia_mode: false,
            julia_x: 0.0,
            julia_y: 0.0,
            decorated: false,
            trap_shape: TrapShape::Stings,
            orbit_dilation: 1.0,
            orbit_translate_x: 0.0,
            orbit_translate_y: 0.0,
            orbit_turbulence: false,
            orbit_turbulence_intensity: 0.0,
            orbit_turbulence_scale: 0.0,
        }
    }
}

/// Palette and the affine mapping from pixel value to palette index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub colors: Vec<Color>,
    pub color_gain: f64,
    pub color_offset: f64,
    /// Fold indices back and forth through the palette instead of clamping.
    pub repeat_colors: bool,
}

impl PaletteConfig {
    pub fn new(
        colors: Vec<Color>,
        color_gain: f64,
        color_offset: f64,
        repeat_colors: bool,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            colors,
            color_gain,
            color_offset,
            repeat_colors,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    pub fn num_colors(&self) -> usize {
        self.colors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(FractalConfig::default().validate().is_ok());
    }

    #[test]
    fn for_region_derives_geometry() {
        let region = Region::new(0.0, 0.0, 1.0);
        let config = FractalConfig::for_region(&region, 200, 100);
        assert_eq!(config.width, 200);
        assert_eq!(config.pixel_step, 0.02);
        assert!((config.origin_x + 2.0).abs() < 1e-12);
        assert!((config.origin_y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pixel_to_fractal_flips_y() {
        let config = FractalConfig {
            width: 4,
            pixel_step: 0.5,
            origin_x: -1.0,
            origin_y: 1.0,
            ..FractalConfig::default()
        };
        assert_eq!(config.pixel_to_fractal(0), (-1.0, 1.0));
        assert_eq!(config.pixel_to_fractal(3), (0.5, 1.0));
        assert_eq!(config.pixel_to_fractal(4), (-1.0, 0.5));
        assert_eq!(config.pixel_to_fractal(9), (-0.5, 0.0));
    }

    #[test]
    fn pixel_index_splits_into_row_and_column() {
        let width = 7u64;
        for idx in 0..100u64 {
            let col = idx % width;
            let row = idx / width;
            assert_eq!(row * width + col, idx);
        }
    }

    #[test]
    fn out_of_range_index_still_maps() {
        let config = FractalConfig {
            width: 2,
            ..FractalConfig::default()
        };
        // Row 50 of a 2-pixel-wide image, no bounds check applies.
        assert_eq!(config.pixel_to_fractal(101), (1.0, -50.0));
    }

    #[test]
    fn rejects_zero_width() {
        let config = FractalConfig {
            width: 0,
            ..FractalConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWidth)));
    }

    #[test]
    fn rejects_bad_pixel_step() {
        for step in [0.0, f64::NAN, f64::INFINITY] {
            let config = FractalConfig {
                pixel_step: step,
                ..FractalConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidPixelStep(_))),
                "pixel step {} should be rejected",
                step
            );
        }
    }

    #[test]
    fn rejects_non_positive_bail_out() {
        for bail_out in [0.0, -4.0, f64::NAN] {
            let config = FractalConfig {
                bail_out,
                ..FractalConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidBailOut(_))),
                "bail-out {} should be rejected",
                bail_out
            );
        }
    }

    #[test]
    fn zero_dilation_rejected_only_when_decorated() {
        let plain = FractalConfig {
            orbit_dilation: 0.0,
            ..FractalConfig::default()
        };
        assert!(plain.validate().is_ok());

        let decorated = FractalConfig {
            decorated: true,
            ..plain
        };
        assert!(matches!(
            decorated.validate(),
            Err(ConfigError::ZeroOrbitDilation(_))
        ));
    }

    #[test]
    fn empty_palette_rejected() {
        let result = PaletteConfig::new(Vec::new(), 1.0, 0.0, false);
        assert!(matches!(result, Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn palette_reports_color_count() {
        let palette = PaletteConfig::new(vec![1, 2, 3], 1.0, 0.0, true).unwrap();
        assert_eq!(palette.num_colors(), 3);
    }
}
