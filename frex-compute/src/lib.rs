pub mod cancellation;
pub mod generator;
pub mod image;
pub mod orbit;
pub mod palette;
pub mod progress;

pub use cancellation::CancelToken;
pub use generator::{Generator, RenderOutcome};
pub use image::{FractalImage, UNCOMPUTED};
pub use orbit::{
    compute_orbit, evaluate_orbit, process_orbit, OrbitBuffer, OrbitEvaluator, OrbitTrap,
};
pub use palette::{map_color, PaletteMapper};
pub use progress::{NoProgress, ProgressListener};

// Re-export core types for convenience
pub use frex_core::*;
