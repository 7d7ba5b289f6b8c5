//! Turns a finished histogram into a picture: log-scale the counts,
//! stretch the palette over the range actually present, and write the
//! result as a plain-text PPM.

use colormap::{to_byte, Colormap, Palette};
use error::Result;
use histogram::{min_max, Histogram};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Maps a histogram to packed 8-bit RGB, row by row.  The log of the
/// counts is what gets coloured, over its own minimum and maximum.
pub fn colorize(histogram: &Histogram, palette: Palette) -> Vec<u8> {
    let field = histogram.log_scaled();
    let (vmin, vmax) = min_max(&field).unwrap_or((0.0, 0.0));
    debug!("colouring log counts in [{}, {}] with {}", vmin, vmax, palette);
    let cmap = Colormap::new(palette).with_range(vmin, vmax);
    let mut pixels = Vec::with_capacity(field.len() * 3);
    for &v in &field {
        pixels.extend(cmap.map(v).iter().map(|&c| to_byte(c)));
    }
    pixels
}

/// Writes a square RGB buffer as an ASCII pixmap (`P3`).
pub fn encode_ppm<W: Write>(writer: W, size: usize, pixels: &[u8]) -> Result<()> {
    let mut encoder =
        PnmEncoder::new(writer).with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii));
    encoder.encode(pixels, size as u32, size as u32, ColorType::Rgb8)?;
    Ok(())
}

/// Colours a histogram and writes it to `path`.
pub fn write_image(path: &Path, histogram: &Histogram, palette: Palette) -> Result<()> {
    info!("Writing image to {}", path.display());
    let pixels = colorize(histogram, palette);
    let mut output = BufWriter::new(File::create(path)?);
    encode_ppm(&mut output, histogram.size(), &pixels)?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(bytes: &[u8]) -> Vec<String> {
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .split_whitespace()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn empty_histogram_is_one_colour() {
        let h = Histogram::new(3);
        let pixels = colorize(&h, Palette::Viridis);
        assert_eq!(pixels.len(), 27);
        let first = &pixels[0..3];
        for px in pixels.chunks(3) {
            assert_eq!(px, first);
        }
        assert_eq!(first, &[68, 1, 84]);
    }

    #[test]
    fn extremes_get_the_ends_of_the_palette() {
        let h = Histogram::from_counts(2, vec![0, 1, 100, 1000]);
        let pixels = colorize(&h, Palette::Inferno);
        // Zero and one both log to the minimum.
        assert_eq!(&pixels[0..3], &pixels[3..6]);
        assert_eq!(&pixels[0..3], &[0, 0, 3]);
        assert_eq!(&pixels[9..12], &[253, 255, 165]);
    }

    #[test]
    fn ppm_is_plain_text() {
        let pixels: Vec<u8> = (0..12).map(|i| i * 20).collect();
        let mut out = Vec::new();
        encode_ppm(&mut out, 2, &pixels).unwrap();
        let t = tokens(&out);
        assert_eq!(&t[0..4], &["P3", "2", "2", "255"]);
        let values: Vec<u8> = t[4..].iter().map(|s| s.parse().unwrap()).collect();
        assert_eq!(values, pixels);
    }
}
