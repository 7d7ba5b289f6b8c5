//! Render parameters.  The defaults reproduce the reference render: a
//! 4096-pixel grid, twelve workers, a hundred million samples each.

use colormap::Palette;
use error::{Error, Result};

/// Everything a render needs to know.
#[derive(Clone, Debug)]
pub struct Config {
    /// Side of the square output grid, in pixels.
    pub size: usize,
    /// Iteration cap for the occupancy mask used to find the boundary.
    pub mask_iterations: usize,
    /// How many times the mask is dilated to widen the boundary band.
    pub dilations: usize,
    /// Iteration cap for each sampled orbit.
    pub iterations: usize,
    /// Number of sampling workers.
    pub threads: usize,
    /// Samples drawn by each worker.
    pub points: u64,
    /// Probability that a sample ignores the good points and is drawn
    /// from the whole window.
    pub p_uniform: f64,
    /// Half-width of the square sampled around a good point.  `None`
    /// means half a pixel.
    pub point_radius: Option<f64>,
    /// Palette for the final image.
    pub palette: Palette,
    /// Fixed seed for every random stream, for reproducible renders.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: 4096,
            mask_iterations: 1000,
            dilations: 2,
            iterations: 20,
            threads: 12,
            points: 100_000_000,
            p_uniform: 1.0,
            point_radius: None,
            palette: Palette::Mako,
            seed: None,
        }
    }
}

fn invalid<T>(reason: String) -> Result<T> {
    Err(Error::InvalidConfig(reason))
}

impl Config {
    /// The sampling radius actually used.
    pub fn point_radius(&self) -> f64 {
        self.point_radius
            .unwrap_or_else(|| 2.0 / (self.size as f64))
    }

    /// Checks every parameter before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return invalid("the grid size must be at least 1".to_string());
        }
        if self.threads == 0 {
            return invalid("at least one worker thread is needed".to_string());
        }
        if self.iterations == 0 || self.mask_iterations == 0 {
            return invalid("iteration caps must be at least 1".to_string());
        }
        if !(self.p_uniform >= 0.0 && self.p_uniform <= 1.0) {
            return invalid(format!(
                "uniform sampling probability {} is not in [0, 1]",
                self.p_uniform
            ));
        }
        let radius = self.point_radius();
        if !(radius > 0.0 && radius.is_finite()) {
            return invalid(format!("point radius {} must be positive", radius));
        }
        Ok(())
    }
}
