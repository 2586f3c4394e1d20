use serde::{Deserialize, Serialize};

/// Square-pixel region in fractal space.
///
/// The region is described by its center and a radius: the shorter image
/// side always spans `2 * radius`, the longer side extends proportionally.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Region {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Distance in fractal space covered by one pixel.
    pub fn pixel_size(&self, width: u32, height: u32) -> f64 {
        2.0 * self.radius / width.min(height) as f64
    }

    /// Fractal-space x coordinate of the leftmost pixel column.
    pub fn upper_left_x(&self, width: u32, pixel_size: f64) -> f64 {
        self.center_x - 0.5 * pixel_size * width as f64
    }

    /// Fractal-space y coordinate of the topmost pixel row (y grows upward).
    pub fn upper_left_y(&self, height: u32, pixel_size: f64) -> f64 {
        self.center_y + 0.5 * pixel_size * height as f64
    }
}

impl Default for Region {
    /// The classic full view of the Mandelbrot set.
    fn default() -> Self {
        Self::new(-0.5, 0.0, 1.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_uses_shorter_side() {
        let region = Region::new(0.0, 0.0, 2.0);
        assert_eq!(region.pixel_size(400, 200), 0.02);
        assert_eq!(region.pixel_size(200, 400), 0.02);
    }

    #[test]
    fn upper_left_is_centered() {
        let region = Region::new(1.0, -1.0, 1.0);
        let ps = region.pixel_size(100, 100);
        assert!((region.upper_left_x(100, ps) - 0.0).abs() < 1e-12);
        assert!((region.upper_left_y(100, ps) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn default_region_is_mandelbrot_overview() {
        let region = Region::default();
        assert_eq!(region.center_x, -0.5);
        assert_eq!(region.center_y, 0.0);
        assert_eq!(region.radius, 1.2);
    }

    #[test]
    fn region_serialization_roundtrip() {
        let original = Region::new(-0.75, 0.1, 0.01);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }
}
