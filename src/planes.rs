//! Contains the PlaneMapper struct, which describes a relationship
//! between a square on the integral plane with an origin at 0,0, and
//! a rectangle on the complex plane with an arbitrary pair of corners
//! defining the leftlower and rightupper corners of the complex
//! plane.
//!
//! The two directions are not inverses of each other.
//! Going from pixels to points spreads `size` pixels over the whole
//! width of the window, so pixel `size` would land on the right edge.
//! Going from points to pixels squeezes the closed window onto
//! `[0, size - 1]` and clamps, so an orbit point can never address
//! memory outside the grid.
use error::{Error, Result};
use num::Complex;

/// Describes the x, y of a pixel in a grid.  Names are important.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Maps pixels of a square grid to points in a window of the complex
/// plane and back.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// Side length of the square integral grid.
    pub size: usize,
    /// The two coordinates defining the complex cartesian plane,
    /// left-lower and right-upper
    pub complex_plane: ComplexPlane,
    // Width and height of the complex window.
    extent: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the side of the integral grid and two
    /// points describing the complex plane.
    pub fn new(size: usize, leftlower: Complex<f64>, rightupper: Complex<f64>) -> Result<Self> {
        if size == 0 {
            return Err(Error::BadPlane("the pixel grid is empty".to_string()));
        }

        if !(rightupper.re > leftlower.re) {
            return Err(Error::BadPlane(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if !(rightupper.im > leftlower.im) {
            return Err(Error::BadPlane(
                "The left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        Ok(PlaneMapper {
            size,
            complex_plane: ComplexPlane(leftlower, rightupper),
            extent: (rightupper.re - leftlower.re, rightupper.im - leftlower.im),
        })
    }

    /// The window every Buddhabrot orbit of interest lives in:
    /// `[-2, 2]` on both axes.
    pub fn buddhabrot(size: usize) -> Result<Self> {
        PlaneMapper::new(size, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0))
    }

    /// The total number of cells in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.size * self.size
    }

    /// Never true for a constructed mapper, present for symmetry
    /// with `len`.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Width of one pixel on the complex plane.
    pub fn pixel_width(&self) -> f64 {
        self.extent.0 / (self.size as f64)
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// complex number at its lower-left corner.  Not clamped.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let n = self.size as f64;
        Complex::new(
            self.complex_plane.0.re + self.extent.0 * (pixel.0 as f64) / n,
            self.complex_plane.0.im + self.extent.1 * (pixel.1 as f64) / n,
        )
    }

    /// True if the point lies inside the closed complex window.
    #[inline]
    pub fn contains(&self, point: &Complex<f64>) -> bool {
        point.re >= self.complex_plane.0.re
            && point.re <= self.complex_plane.1.re
            && point.im >= self.complex_plane.0.im
            && point.im <= self.complex_plane.1.im
    }

    /// Given a complex number, map it onto the nearest lower pixel,
    /// clamped to the grid.
    #[inline]
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Pixel {
        Pixel(
            remap(point.re, self.complex_plane.0.re, self.extent.0, self.size),
            remap(point.im, self.complex_plane.0.im, self.extent.1, self.size),
        )
    }

    /// Linear offset of a pixel from the root of a row-major buffer.
    #[inline]
    pub fn offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.size + pixel.0
    }

    /// The pixel reflected about the horizontal centre line of the
    /// grid.  The Mandelbrot set is symmetric about the real axis, so
    /// this is where the conjugate orbit lands.
    #[inline]
    pub fn mirror(&self, pixel: &Pixel) -> Pixel {
        Pixel(pixel.0, self.size - 1 - pixel.1)
    }
}

// Clamped linear map of `v` from `[origin, origin + extent]` onto
// `[0, size - 1]`.  NaN lands on zero.
#[inline]
fn remap(v: f64, origin: f64, extent: f64, size: usize) -> usize {
    let t = (v - origin) / extent;
    let t = if t > 1.0 {
        1.0
    } else if t >= 0.0 {
        t
    } else {
        0.0
    };
    (t * ((size - 1) as f64)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_empty_grid() {
        assert!(PlaneMapper::buddhabrot(0).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_ok());
    }

    #[test]
    fn pixel_to_point_on_mixed_planes() {
        let pm = PlaneMapper::buddhabrot(4).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
        // Not clamped: one past the grid is the far edge.
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(2.0, 2.0));
    }

    #[test]
    fn point_to_pixel_clamps_to_grid() {
        let pm = PlaneMapper::buddhabrot(5).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.0, -2.0)), Pixel(0, 0));
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 2.0)), Pixel(4, 4));
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Pixel(2, 2));
        assert_eq!(pm.point_to_pixel(&Complex::new(-9.0, 9.0)), Pixel(0, 4));
        assert_eq!(pm.point_to_pixel(&Complex::new(1.0e300, -1.0e300)), Pixel(4, 0));
    }

    #[test]
    fn point_to_pixel_maps_on_large_planes() {
        let pm = PlaneMapper::buddhabrot(641).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Pixel(320, 320));
        assert_eq!(pm.point_to_pixel(&Complex::new(1.0, 2.0)), Pixel(480, 640));
    }

    #[test]
    fn mirror_reflects_rows() {
        let pm = PlaneMapper::buddhabrot(8).unwrap();
        assert_eq!(pm.mirror(&Pixel(3, 0)), Pixel(3, 7));
        assert_eq!(pm.mirror(&Pixel(3, 7)), Pixel(3, 0));
        assert_eq!(pm.offset(&Pixel(3, 2)), 19);
    }

    #[test]
    fn contains_is_closed() {
        let pm = PlaneMapper::buddhabrot(8).unwrap();
        assert!(pm.contains(&Complex::new(2.0, -2.0)));
        assert!(!pm.contains(&Complex::new(2.0001, 0.0)));
    }
}
