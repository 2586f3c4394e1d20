//! Mapping from pixel values to palette colors.

use frex_core::{Color, ConfigError, PaletteConfig, NO_COLOR};

/// Looks up palette colors for pixel values under one [`PaletteConfig`].
#[derive(Clone, Copy, Debug)]
pub struct PaletteMapper<'a> {
    config: &'a PaletteConfig,
}

impl<'a> PaletteMapper<'a> {
    pub fn new(config: &'a PaletteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Raw, unfolded index `floor(n * gain * value + offset)`.
    #[inline]
    pub fn raw_index(&self, value: f32) -> i64 {
        let num_colors = self.config.num_colors() as f64;
        // Saturating cast: infinities clamp, NaN becomes 0.
        (num_colors * self.config.color_gain * value as f64 + self.config.color_offset).floor()
            as i64
    }

    /// Fold a raw index into `0..num_colors`.
    ///
    /// Repeating palettes run forward then backward, so the color sequence
    /// has period `2 * num_colors` and never jumps. Non-repeating palettes
    /// clamp at both ends.
    #[inline]
    pub fn fold_index(&self, raw_index: i64) -> usize {
        let num_colors = self.config.num_colors() as i64;
        let index = if self.config.repeat_colors {
            let period = 2 * num_colors;
            let index = raw_index.rem_euclid(period);
            if index >= num_colors {
                period - index - 1
            } else {
                index
            }
        } else {
            raw_index.clamp(0, num_colors - 1)
        };
        index as usize
    }

    /// Palette index for `value`, or `None` for values without a color
    /// (negative, NaN or infinite).
    #[inline]
    pub fn color_index(&self, value: f32) -> Option<usize> {
        // Negated so that NaN takes the no-color path, as does +inf.
        if !(value >= 0.0) || !value.is_finite() {
            return None;
        }
        Some(self.fold_index(self.raw_index(value)))
    }

    #[inline]
    pub fn map(&self, value: f32) -> Color {
        match self.color_index(value) {
            Some(index) => self.config.colors[index],
            None => NO_COLOR,
        }
    }
}

/// One-off color lookup for a single value.
pub fn map_color(config: &PaletteConfig, value: f32) -> Result<Color, ConfigError> {
    Ok(PaletteMapper::new(config)?.map(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Palette whose colors equal their index plus 100, to tell them from 0.
    fn palette(num_colors: u32, gain: f64, offset: f64, repeat: bool) -> PaletteConfig {
        PaletteConfig::new((0..num_colors).map(|i| 100 + i).collect(), gain, offset, repeat)
            .unwrap()
    }

    #[test]
    fn clamped_index_maps_to_itself_in_range() {
        let config = palette(10, 1.0, 0.0, false);
        let mapper = PaletteMapper::new(&config).unwrap();
        for raw in 0..10 {
            assert_eq!(mapper.fold_index(raw), raw as usize);
        }
    }

    #[test]
    fn clamped_index_saturates_at_last_color() {
        let config = palette(10, 1.0, 0.0, false);
        let mapper = PaletteMapper::new(&config).unwrap();
        for raw in [10, 11, 19, 1000, i64::MAX] {
            assert_eq!(mapper.fold_index(raw), 9);
        }
    }

    #[test]
    fn clamped_negative_index_maps_to_first_color() {
        let config = palette(10, 1.0, 0.0, false);
        let mapper = PaletteMapper::new(&config).unwrap();
        assert_eq!(mapper.fold_index(-1), 0);
        assert_eq!(mapper.fold_index(i64::MIN), 0);
    }

    #[test]
    fn repeated_index_mirrors() {
        let config = palette(10, 1.0, 0.0, true);
        let mapper = PaletteMapper::new(&config).unwrap();
        for raw in 0..10 {
            assert_eq!(mapper.fold_index(raw), raw as usize);
        }
        assert_eq!(mapper.fold_index(10), 9);
        assert_eq!(mapper.fold_index(19), 0);
        assert_eq!(mapper.fold_index(20), 0);
        assert_eq!(mapper.fold_index(35), 4);
    }

    #[test]
    fn repeated_negative_index_stays_in_range() {
        let config = palette(10, 1.0, 0.0, true);
        let mapper = PaletteMapper::new(&config).unwrap();
        // -1 is one step before 0 in the period, i.e. position 19.
        assert_eq!(mapper.fold_index(-1), 0);
        assert_eq!(mapper.fold_index(-10), 9);
        assert_eq!(mapper.fold_index(-11), 9);
        for raw in -100..0 {
            assert!(mapper.fold_index(raw) < 10);
        }
        assert!(mapper.fold_index(i64::MIN) < 10);
    }

    #[test]
    fn negative_value_has_no_color() {
        for repeat in [false, true] {
            let config = palette(4, 3.0, 7.0, repeat);
            assert_eq!(map_color(&config, -1.0).unwrap(), NO_COLOR);
            assert_eq!(map_color(&config, f32::NEG_INFINITY).unwrap(), NO_COLOR);
        }
    }

    #[test]
    fn nan_value_has_no_color() {
        let config = palette(4, 1.0, 0.0, true);
        let mapper = PaletteMapper::new(&config).unwrap();
        assert_eq!(mapper.color_index(f32::NAN), None);
        assert_eq!(mapper.map(f32::NAN), NO_COLOR);
    }

    #[test]
    fn infinite_value_has_no_color() {
        for repeat in [false, true] {
            let config = palette(4, 1.0, 0.0, repeat);
            let mapper = PaletteMapper::new(&config).unwrap();
            assert_eq!(mapper.color_index(f32::INFINITY), None);
            assert_eq!(mapper.map(f32::INFINITY), NO_COLOR);
            assert_eq!(map_color(&config, f32::INFINITY).unwrap(), NO_COLOR);
        }
    }

    #[test]
    fn gain_and_offset_scale_value() {
        // raw = floor(8 * 0.25 * value + 1) = floor(2 * value + 1)
        let config = palette(8, 0.25, 1.0, false);
        let mapper = PaletteMapper::new(&config).unwrap();
        assert_eq!(mapper.raw_index(0.0), 1);
        assert_eq!(mapper.raw_index(1.4), 3);
        assert_eq!(mapper.map(1.4), 103);
        assert_eq!(mapper.map(100.0), 107);
    }

    #[test]
    fn raw_index_floors_toward_negative_infinity() {
        let config = palette(10, 0.1, -2.5, false);
        let mapper = PaletteMapper::new(&config).unwrap();
        // 10 * 0.1 * 1.0 - 2.5 = -1.5 -> -2
        assert_eq!(mapper.raw_index(1.0), -2);
        assert_eq!(mapper.map(1.0), 100);
    }

    #[test]
    fn zero_value_maps_through_offset() {
        let config = palette(10, 1.0, 0.0, true);
        assert_eq!(map_color(&config, 0.0).unwrap(), 100);
    }

    #[test]
    fn single_color_palette_always_hits_it() {
        for repeat in [false, true] {
            let config = palette(1, 1.0, 0.0, repeat);
            let mapper = PaletteMapper::new(&config).unwrap();
            for value in [0.0, 0.5, 1.0, 7.0, 1e9] {
                assert_eq!(mapper.map(value), 100);
            }
        }
    }

    #[test]
    fn empty_palette_fails_fast() {
        let config = PaletteConfig {
            colors: Vec::new(),
            color_gain: 1.0,
            color_offset: 0.0,
            repeat_colors: false,
        };
        assert!(matches!(
            PaletteMapper::new(&config),
            Err(ConfigError::EmptyPalette)
        ));
        assert!(matches!(
            map_color(&config, 1.0),
            Err(ConfigError::EmptyPalette)
        ));
    }
}
