use frex_core::{Color, NO_COLOR};

/// Value stored for pixels that have not been evaluated yet.
pub const UNCOMPUTED: f32 = -1.0;

/// Value and color planes of a rendered image, in row-major order.
///
/// Any negative value marks a pixel as pending; a render pass only
/// evaluates pending pixels, which lets a caller keep values across passes
/// and only recolor them.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalImage {
    width: u32,
    height: u32,
    values: Vec<f32>,
    colors: Vec<Color>,
}

impl FractalImage {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            values: vec![UNCOMPUTED; len],
            colors: vec![NO_COLOR; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn value(&self, x: u32, y: u32) -> f32 {
        self.values[self.index(x, y)]
    }

    pub fn color(&self, x: u32, y: u32) -> Color {
        self.colors[self.index(x, y)]
    }

    /// Mark every pixel as pending. Colors are kept until recomputed.
    pub fn invalidate(&mut self) {
        self.values.fill(UNCOMPUTED);
    }

    /// Reallocate for a new size; all pixels become pending.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn pending_count(&self) -> usize {
        self.values.iter().filter(|v| **v < 0.0).count()
    }

    /// Both planes, mutably, for the render pass.
    pub(crate) fn planes_mut(&mut self) -> (&mut [f32], &mut [Color]) {
        (&mut self.values, &mut self.colors)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}
