//! Finds "good points": places on the complex plane close enough to
//! the boundary of the Mandelbrot set that samples drawn near them
//! are likely to produce long, escaping orbits.
//!
//! The boundary is taken from both sides of the occupancy mask, and
//! the outside edge is then pushed outward a few times by dilating
//! the mask, which picks up the filaments a single edge pass misses.

use grid::Grid;
use mask::binary_mandelbrot;
use num::Complex;
use planes::PlaneMapper;
use rand::Rng;

/// Thickens the boundary of `mask` into a band: the inside edge, the
/// outside edge, and the outside edge of each of `dilations`
/// successively dilated copies of the mask.
pub fn boundary_band(mask: &Grid<bool>, dilations: usize) -> Grid<bool> {
    let mut band = mask.edge().union(&mask.invert().edge());
    let mut grown = mask.clone();
    for _ in 0..dilations {
        grown = grown.dilate();
        band = band.union(&grown.invert().edge());
    }
    band
}

/// Converts every set cell of `band` into the complex point at its
/// corner, in row-major order.
pub fn collect_points(band: &Grid<bool>, plane: &PlaneMapper) -> Vec<Complex<f64>> {
    band.pixels()
        .filter(|&(_, set)| *set)
        .map(|(pixel, _)| plane.pixel_to_point(&pixel))
        .collect()
}

/// Renders the occupancy mask and reduces it to the list of good
/// points that the biased sampler draws around.
pub fn find_good_points<R: Rng>(
    plane: &PlaneMapper,
    max_iterations: usize,
    dilations: usize,
    rng: &mut R,
) -> Vec<Complex<f64>> {
    info!("Rendering binary mandelbrot ({0}x{0})", plane.size);
    let mask = binary_mandelbrot(plane, max_iterations, rng);
    debug!("{} of {} cells are inside the set", mask.count(), mask.len());

    info!("Collecting edge points");
    let points = collect_points(&boundary_band(&mask, dilations), plane);
    info!("Found {} good points", points.len());
    points
}
