//! The Monte Carlo half of the renderer.  Each worker draws starting
//! points `c`, either uniformly over the whole window or from a small
//! square around a randomly chosen good point, follows the orbit of
//! `z = z * z + c`, and, if the orbit escapes, drops every point of it
//! that stays in the window into its own block of counters.
//!
//! The set is symmetric about the real axis, so every hit is also
//! recorded at its mirror image.  That doubles the yield of each
//! escaping orbit.

use error::{Error, Result};
use num::Complex;
use planes::PlaneMapper;
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Orbits stop being followed once they pass this modulus squared.
pub const RELAXED_BAILOUT: f64 = 8.0;

/// An orbit counts as escaped only if its last point is at least this
/// far out (modulus squared).
pub const ESCAPE_THRESHOLD: f64 = 4.0;

/// How many samples go by between progress updates.
pub const PROGRESS_STRIDE: u64 = 1000;

/// The parameters every sampling worker shares.  Once built this
/// object is read-only, and is borrowed by all workers at once.
#[derive(Debug)]
pub struct Sampler<'a> {
    plane: &'a PlaneMapper,
    max_iterations: usize,
    use_uniform: Bernoulli,
    good_points: &'a [Complex<f64>],
    point_radius: f64,
}

impl<'a> Sampler<'a> {
    /// `p_uniform` is the probability of ignoring the good points and
    /// drawing from the whole window; `point_radius` is the half-width
    /// of the square drawn from around a good point.
    pub fn new(
        plane: &'a PlaneMapper,
        max_iterations: usize,
        p_uniform: f64,
        good_points: &'a [Complex<f64>],
        point_radius: f64,
    ) -> Result<Self> {
        let use_uniform = Bernoulli::new(p_uniform).map_err(|_| {
            Error::InvalidConfig(format!(
                "uniform sampling probability {} is not in [0, 1]",
                p_uniform
            ))
        })?;
        if !(point_radius > 0.0 && point_radius.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "point radius {} must be positive",
                point_radius
            )));
        }
        Ok(Sampler {
            plane,
            max_iterations,
            use_uniform,
            good_points,
            point_radius,
        })
    }

    /// Draws one starting point.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Complex<f64> {
        let (ll, ru) = (self.plane.complex_plane.0, self.plane.complex_plane.1);
        if self.good_points.is_empty() || self.use_uniform.sample(rng) {
            return Complex::new(rng.gen_range(ll.re..ru.re), rng.gen_range(ll.im..ru.im));
        }
        let mid = self.good_points[rng.gen_range(0..self.good_points.len())];
        let r = self.point_radius;
        // Offsets, not absolute ranges: `mid ± r` collapses when `r` is
        // below the float spacing of `mid`.
        Complex::new(mid.re + rng.gen_range(-r..r), mid.im + rng.gen_range(-r..r))
    }

    /// Follows the orbit of `c` into `trajectory`, which is cleared
    /// first.  Returns true if the orbit escaped and should be
    /// plotted.
    pub fn trace(&self, c: Complex<f64>, trajectory: &mut Vec<Complex<f64>>) -> bool {
        trajectory.clear();
        let mut z = Complex::new(0.0_f64, 0.0_f64);
        for _ in 0..self.max_iterations {
            if z.norm_sqr() >= RELAXED_BAILOUT {
                break;
            }
            z = z * z + c;
            trajectory.push(z);
        }
        z.norm_sqr() >= ESCAPE_THRESHOLD
    }

    /// Adds every in-window point of a trajectory, and its mirror
    /// image, to `counts`.
    pub fn plot(&self, trajectory: &[Complex<f64>], counts: &mut [u64]) {
        for z in trajectory {
            if !self.plane.contains(z) {
                continue;
            }
            let pixel = self.plane.point_to_pixel(z);
            counts[self.plane.offset(&pixel)] += 1;
            counts[self.plane.offset(&self.plane.mirror(&pixel))] += 1;
        }
    }

    /// Runs `n_points` samples into `counts`, which must hold one full
    /// grid.  `progress` is bumped every `PROGRESS_STRIDE` samples and
    /// set to `n_points` at the end; it is written with relaxed
    /// ordering because nothing but the progress display reads it.
    pub fn sample<R: Rng>(
        &self,
        n_points: u64,
        rng: &mut R,
        counts: &mut [u64],
        progress: &AtomicU64,
    ) {
        assert_eq!(counts.len(), self.plane.len(), "counter block is not one grid");
        let mut trajectory = Vec::with_capacity(self.max_iterations);
        for k in 0..n_points {
            if k % PROGRESS_STRIDE == 0 {
                progress.store(k + 1, Ordering::Relaxed);
            }
            let c = self.draw(rng);
            if self.trace(c, &mut trajectory) {
                self.plot(&trajectory, counts);
            }
        }
        progress.store(n_points, Ordering::Relaxed);
    }
}
