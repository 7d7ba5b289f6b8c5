//! Errors raised at the edges of the renderer.  The sampling core
//! itself cannot fail; everything here is either a configuration
//! problem caught before any work starts, or a failure to write the
//! finished image.

use failure::Fail;
use image::ImageError;
use std::io;

/// Everything that can go wrong while setting up a render or writing
/// its output.
#[derive(Debug, Fail)]
pub enum Error {
    /// The palette name is not one of the built-in lookup tables.
    #[fail(display = "unknown palette: {}", _0)]
    UnknownPalette(String),

    /// A render parameter is out of range.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The complex plane window is empty or inverted.
    #[fail(display = "bad plane: {}", _0)]
    BadPlane(String),

    /// Writing the output or the progress display failed.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),

    /// The image encoder rejected the pixel buffer.
    #[fail(display = "image encoding failed: {}", _0)]
    Image(#[cause] ImageError),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Error {
        Error::Image(err)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = ::std::result::Result<T, Error>;
