//! CPU render pass over a whole image.
//!
//! The image is cut into horizontal bands, one task per band, and the bands
//! are rendered in parallel. Each task owns a single [`OrbitBuffer`] sized to
//! the iteration limit and reuses it for every pixel in its band.

use crate::{
    CancelToken, FractalImage, OrbitBuffer, OrbitEvaluator, PaletteMapper, ProgressListener,
};
use frex_core::{Color, ConfigError, FractalConfig, PaletteConfig, RenderSettings};
use rayon::prelude::*;

/// Rows a task renders between two progress reports, counted from the
/// first row of its band rather than from the top of the image.
const PROGRESS_INTERVAL_ROWS: u32 = 16;

/// Summary of one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    /// At least one task stopped early because of cancellation.
    pub cancelled: bool,
    /// Pending pixels that were evaluated during the pass.
    pub pixels_computed: usize,
}

impl RenderOutcome {
    fn merge(self, other: Self) -> Self {
        Self {
            cancelled: self.cancelled || other.cancelled,
            pixels_computed: self.pixels_computed + other.pixels_computed,
        }
    }
}

pub struct Generator {
    fractal: FractalConfig,
    palette: PaletteConfig,
    num_tasks: usize,
}

impl Generator {
    /// Generator with one task per rayon worker thread.
    pub fn new(fractal: FractalConfig, palette: PaletteConfig) -> Result<Self, ConfigError> {
        fractal.validate()?;
        palette.validate()?;
        Ok(Self {
            fractal,
            palette,
            num_tasks: rayon::current_num_threads(),
        })
    }

    pub fn from_settings(
        settings: &RenderSettings,
        width: u32,
        height: u32,
        colors: Vec<Color>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            settings.fractal_config(width, height)?,
            settings.palette_config(colors)?,
        )
    }

    /// Split images into `num_tasks` bands (at least one).
    pub fn with_num_tasks(mut self, num_tasks: usize) -> Self {
        self.num_tasks = num_tasks.max(1);
        self
    }

    pub fn fractal(&self) -> &FractalConfig {
        &self.fractal
    }

    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    /// Render every pending pixel of `image` and color it.
    ///
    /// With `colors_only`, pixels that already hold a value are recolored
    /// from that value; otherwise they are left untouched.
    pub fn render(
        &self,
        image: &mut FractalImage,
        colors_only: bool,
        cancel: &CancelToken,
        listener: &dyn ProgressListener,
    ) -> Result<RenderOutcome, ConfigError> {
        if image.width() != self.fractal.width {
            return Err(ConfigError::SizeMismatch {
                expected: self.fractal.width,
                actual: image.width(),
            });
        }

        let evaluator = OrbitEvaluator::new(&self.fractal)?;
        let mapper = PaletteMapper::new(&self.palette)?;

        if self.fractal.orbit_turbulence {
            log::warn!("orbit turbulence is enabled but has no effect on the trap score");
        }

        let width = image.width() as usize;
        let height = image.height() as usize;
        let rows_per_task = height.div_ceil(self.num_tasks).max(1);
        let num_tasks = height.div_ceil(rows_per_task);
        let band_len = rows_per_task * width;

        log::debug!(
            "render started: {}x{} pixels, {} tasks, colors_only={}",
            width,
            height,
            num_tasks,
            colors_only
        );
        listener.on_started(num_tasks);

        let pass = Pass {
            evaluator,
            mapper,
            colors_only,
            cancel,
            listener,
        };

        let (values, colors) = image.planes_mut();
        let outcome = values
            .par_chunks_mut(band_len)
            .zip(colors.par_chunks_mut(band_len))
            .enumerate()
            .map_init(
                || OrbitBuffer::for_config(&self.fractal),
                |orbit, (task, (band_values, band_colors))| {
                    let band = Band {
                        task,
                        first_row: (task * rows_per_task) as u32,
                        width,
                    };
                    band.render(&pass, band_values, band_colors, orbit)
                },
            )
            .reduce(RenderOutcome::default, RenderOutcome::merge);

        log::debug!(
            "render stopped: {} pixels computed, cancelled={}",
            outcome.pixels_computed,
            outcome.cancelled
        );
        listener.on_stopped(outcome.cancelled);

        Ok(outcome)
    }
}

/// Read-only state shared by every task of a pass.
struct Pass<'a> {
    evaluator: OrbitEvaluator<'a>,
    mapper: PaletteMapper<'a>,
    colors_only: bool,
    cancel: &'a CancelToken,
    listener: &'a dyn ProgressListener,
}

/// Rows `first_row..` of the image, owned by one task.
struct Band {
    task: usize,
    first_row: u32,
    width: usize,
}

impl Band {
    fn render(
        &self,
        pass: &Pass<'_>,
        values: &mut [f32],
        colors: &mut [Color],
        orbit: &mut OrbitBuffer,
    ) -> RenderOutcome {
        let mut outcome = RenderOutcome::default();
        let mut report_from = self.first_row;

        let num_rows = values.len() / self.width;
        let rows = values
            .chunks_mut(self.width)
            .zip(colors.chunks_mut(self.width));

        for (local_row, (row_values, row_colors)) in rows.enumerate() {
            if pass.cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }

            let y = self.first_row + local_row as u32;
            let row_start = y as u64 * self.width as u64;

            let pixels = row_values.iter_mut().zip(row_colors.iter_mut());
            for (x, (value, color)) in pixels.enumerate() {
                if *value < 0.0 {
                    *value = pass.evaluator.evaluate(row_start + x as u64, orbit);
                    *color = pass.mapper.map(*value);
                    outcome.pixels_computed += 1;
                } else if pass.colors_only {
                    *color = pass.mapper.map(*value);
                }
            }

            let done = local_row as u32 + 1;
            if done % PROGRESS_INTERVAL_ROWS == 0 || local_row + 1 == num_rows {
                pass.listener.on_lines_computed(self.task, report_from, y);
                report_from = y + 1;
            }
        }

        outcome
    }
}
