pub mod config;
pub mod error;
pub mod region;
pub mod settings;
pub mod trap;

pub use config::{Color, FractalConfig, PaletteConfig, NO_COLOR};
pub use error::ConfigError;
pub use region::Region;
pub use settings::{RenderSettings, MANDELBROT_ID};
pub use trap::TrapShape;
