//! Escape-time evaluation of the quadratic map `z -> z^2 + c`.
//!
//! Orbit state is iterated in f64; the recorded trajectory is narrowed to
//! f32 after every step, and the orbit-trap score is accumulated in f32.

use frex_core::{ConfigError, FractalConfig, TrapShape};

/// Trajectory of one orbit, reused across pixels by a single worker.
///
/// Capacity is fixed at construction to the iteration limit, so recording
/// never reallocates inside the pixel loop.
#[derive(Clone, Debug)]
pub struct OrbitBuffer {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl OrbitBuffer {
    pub fn new(iter_max: u32) -> Self {
        Self {
            xs: Vec::with_capacity(iter_max as usize),
            ys: Vec::with_capacity(iter_max as usize),
        }
    }

    pub fn for_config(config: &FractalConfig) -> Self {
        Self::new(config.iter_max)
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.xs.capacity()
    }

    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }

    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    #[inline]
    fn push(&mut self, x: f64, y: f64) {
        self.xs.push(x as f32);
        self.ys.push(y as f32);
    }
}

/// Iterate `z -> z^2 + c` from `init` with constant `constant`.
///
/// Returns the iteration at which `|z|^2` first exceeded `bail_out`
/// (tested before the update), or `iter_max` if it never did. `orbit` is
/// cleared and then holds exactly that many points, one per completed
/// step. The seed is not recorded, and no step is taken once the escape
/// test fires.
pub fn compute_orbit(
    init: (f64, f64),
    constant: (f64, f64),
    iter_max: u32,
    bail_out: f64,
    orbit: &mut OrbitBuffer,
) -> u32 {
    orbit.clear();

    let (mut zx, mut zy) = init;
    let (cx, cy) = constant;

    for iter in 0..iter_max {
        let zxx = zx * zx;
        let zyy = zy * zy;
        if zxx + zyy > bail_out {
            return iter;
        }
        zy = 2.0 * zx * zy + cy;
        zx = zxx - zyy + cx;
        orbit.push(zx, zy);
    }

    iter_max
}

/// Orbit-trap parameters, narrowed to the precision the score is summed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitTrap {
    pub shape: TrapShape,
    pub dilation: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl OrbitTrap {
    pub fn from_config(config: &FractalConfig) -> Self {
        Self {
            shape: config.trap_shape,
            dilation: config.orbit_dilation as f32,
            translate_x: config.orbit_translate_x as f32,
            translate_y: config.orbit_translate_y as f32,
        }
    }
}

/// Sum of `1 / (1 + d^2)` over the orbit, `d` being the scaled distance of
/// each point to the trap. An empty orbit scores exactly zero.
pub fn process_orbit(orbit: &OrbitBuffer, trap: &OrbitTrap) -> f32 {
    if orbit.is_empty() {
        return 0.0;
    }

    let mut vicinity_sum = 0.0f32;
    for (x, y) in orbit.points() {
        let distance = trap
            .shape
            .distance(x - trap.translate_x, y - trap.translate_y)
            / trap.dilation;
        vicinity_sum += 1.0 / (1.0 + distance * distance);
    }
    vicinity_sum
}

/// Per-pixel evaluator over a validated, shared configuration.
#[derive(Clone, Copy, Debug)]
pub struct OrbitEvaluator<'a> {
    config: &'a FractalConfig,
    trap: OrbitTrap,
}

impl<'a> OrbitEvaluator<'a> {
    pub fn new(config: &'a FractalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            trap: OrbitTrap::from_config(config),
        })
    }

    pub fn config(&self) -> &FractalConfig {
        self.config
    }

    /// Value of the pixel at `pixel_index`, using `orbit` as scratch space.
    ///
    /// Undecorated, this is the escape iteration, or `0.0` for points that
    /// never escaped. Decorated, it is the orbit-trap score.
    pub fn evaluate(&self, pixel_index: u64, orbit: &mut OrbitBuffer) -> f32 {
        let config = self.config;
        let (zx, zy) = config.pixel_to_fractal(pixel_index);

        let iter = if config.julia_mode {
            compute_orbit(
                (zx, zy),
                (config.julia_x, config.julia_y),
                config.iter_max,
                config.bail_out,
                orbit,
            )
        } else {
            compute_orbit((0.0, 0.0), (zx, zy), config.iter_max, config.bail_out, orbit)
        };

        if config.decorated {
            process_orbit(orbit, &self.trap)
        } else if iter < config.iter_max {
            iter as f32
        } else {
            0.0
        }
    }
}

/// One-off evaluation of a single pixel.
///
/// Allocates a fresh orbit buffer; render loops should hold an
/// [`OrbitEvaluator`] and one [`OrbitBuffer`] per worker instead.
pub fn evaluate_orbit(config: &FractalConfig, pixel_index: u64) -> Result<f32, ConfigError> {
    let evaluator = OrbitEvaluator::new(config)?;
    let mut orbit = OrbitBuffer::for_config(config);
    Ok(evaluator.evaluate(pixel_index, &mut orbit))
}
