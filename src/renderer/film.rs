use crate::error::OutputError;
use crate::rgb_to_u32;

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageResult, RgbImage};
use rayon::prelude::*;
use tracing::info;

/// Color packed as `0x00RRGGBB`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb(rgb_to_u32(r, g, b))
    }
    pub fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }
    pub fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }
    pub fn blue(&self) -> u8 {
        self.0 as u8
    }
}

/// Row-major framebuffer that render workers write through a shared reference.
///
/// Cells are plain relaxed atomics: workers own disjoint sets of pixels, so no two threads ever
/// store to the same cell, and nothing reads the film until every worker has been joined.
pub struct Film {
    pub width: usize,
    pub height: usize,
    buffer: Vec<AtomicU32>,
}

impl Film {
    pub fn new(width: usize, height: usize, fill: Rgb) -> Film {
        Film {
            width,
            height,
            buffer: (0..width * height).map(|_| AtomicU32::new(fill.0)).collect(),
        }
    }

    pub fn set(&self, row: usize, col: usize, color: Rgb) {
        self.buffer[row * self.width + col].store(color.0, Ordering::Relaxed);
    }

    pub fn get(&self, row: usize, col: usize) -> Rgb {
        Rgb(self.buffer[row * self.width + col].load(Ordering::Relaxed))
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.buffer.iter().map(|e| Rgb(e.load(Ordering::Relaxed)))
    }

    pub fn to_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width as u32, self.height as u32);
        img.par_chunks_mut(3)
            .zip(self.buffer.par_iter())
            .for_each(|(pixel, cell)| {
                let color = Rgb(cell.load(Ordering::Relaxed));
                pixel.copy_from_slice(&[color.red(), color.green(), color.blue()]);
            });
        img
    }

    /// Plain-text `P3` dump: header with width, height and max value 255, then one RGB triple
    /// per pixel in row-major order.
    pub fn write_ppm<W: Write>(&self, writer: W) -> ImageResult<()> {
        let img = self.to_image();
        PnmEncoder::new(writer)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii))
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                ExtendedColorType::Rgb8,
            )
    }

    /// Encodes the whole image in memory before touching `path`, so a failed encode never leaves a
    /// partial file. `.ppm` (or no extension) gives the plain-text format, anything else is
    /// handed to `image` by extension.
    pub fn save(&self, path: &Path) -> Result<(), OutputError> {
        let encode_error = |source| OutputError::Encode {
            path: path.to_path_buf(),
            source,
        };

        let is_ppm = match path.extension().and_then(|e| e.to_str()) {
            None => true,
            Some(ext) => ext.eq_ignore_ascii_case("ppm"),
        };

        let mut bytes = Vec::new();
        if is_ppm {
            self.write_ppm(&mut bytes).map_err(encode_error)?;
        } else {
            let format = ImageFormat::from_path(path).map_err(encode_error)?;
            self.to_image()
                .write_to(&mut Cursor::new(&mut bytes), format)
                .map_err(encode_error)?;
        }

        info!("Saving result to: \"{}\"", path.display());
        std::fs::write(path, bytes).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
