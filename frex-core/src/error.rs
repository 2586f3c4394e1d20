//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("image width must be greater than zero")]
    ZeroWidth,

    #[error("pixel step must be finite and non-zero, got {0}")]
    InvalidPixelStep(f64),

    #[error("bail-out must be a positive number, got {0}")]
    InvalidBailOut(f64),

    #[error("maximum iteration count must be in 0..=4294967295, got {0}")]
    InvalidIterMax(i64),

    #[error("orbit dilation must be finite and non-zero when decoration is enabled, got {0}")]
    ZeroOrbitDilation(f64),

    #[error("color palette must contain at least one color")]
    EmptyPalette,

    #[error("unknown fractal: {0}")]
    UnknownFractal(String),

    #[error("image is {actual} pixels wide but the configuration expects {expected}")]
    SizeMismatch { expected: u32, actual: u32 },

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
