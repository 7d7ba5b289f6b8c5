//! A coarse black-and-white Mandelbrot: one jittered escape test per
//! pixel.  Its only job is to say roughly where the boundary runs, so
//! a single noisy sample per pixel is enough.

use grid::Grid;
use num::Complex;
use planes::PlaneMapper;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Runs the classic escape-time loop from `z = 0` and reports whether
/// the orbit is still bounded (modulus squared below 4) after
/// `max_iterations` steps.
#[inline]
pub fn is_bounded(c: Complex<f64>, max_iterations: usize) -> bool {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    for _ in 0..max_iterations {
        if z.norm_sqr() >= 4.0 {
            return false;
        }
        z = z * z + c;
    }
    z.norm_sqr() < 4.0
}

/// Builds the occupancy grid: a cell is set when the point at its
/// corner, nudged by up to a quarter pixel on each axis, does not
/// escape.  Each cell draws its own jitter.
pub fn binary_mandelbrot<R: Rng>(
    plane: &PlaneMapper,
    max_iterations: usize,
    rng: &mut R,
) -> Grid<bool> {
    let quarter = 0.25 * plane.pixel_width();
    let jitter = Uniform::new_inclusive(-quarter, quarter);
    Grid::from_fn(plane.size, |pixel| {
        let corner = plane.pixel_to_point(&pixel);
        let c = Complex::new(
            corner.re + jitter.sample(rng),
            corner.im + jitter.sample(rng),
        );
        is_bounded(c, max_iterations)
    })
}
