//! Raw 8-bit PNG decoding and encoding without color conversion
//!
//! Samples are palette indices (or gray levels) exactly as stored in the
//! file. The palette and transparency table are carried alongside so output
//! tilesets can be written with the same color mapping as their source.

use crate::io::error::{LevelError, Result, WithPath, invalid_geometry};
use crate::spatial::slicer::PixelBuffer;
use png::{BitDepth, ColorType, Transformations};
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// How samples of an 8-bit single-channel image are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleKind {
    /// Samples index into a palette
    #[default]
    Indexed,
    /// Samples are gray levels
    Grayscale,
}

/// Color metadata needed to re-encode samples faithfully
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleFormat {
    /// Interpretation of sample values
    pub kind: SampleKind,
    /// RGB palette entries, three bytes each
    pub palette: Option<Vec<u8>>,
    /// Transparency table (`tRNS` chunk)
    pub transparency: Option<Vec<u8>>,
}

/// Decoded source image with untouched samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    /// Samples indexed by `(row, col)`
    pub pixels: PixelBuffer,
    /// Color metadata from the source file
    pub format: SampleFormat,
}

impl IndexedImage {
    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Collapse samples to 0 (clear) or 1 (solid)
    pub fn binarize(&mut self) {
        self.pixels.mapv_inplace(|sample| u8::from(sample != 0));
    }
}

fn unsupported(reason: String) -> LevelError {
    LevelError::UnsupportedFormat {
        path: PathBuf::from("<unknown>"),
        reason,
    }
}

/// Decode an 8-bit indexed or grayscale PNG from a reader
///
/// # Errors
///
/// Returns `ImageDecode` if the stream is not a valid PNG and
/// `UnsupportedFormat` if it is not 8-bit with one sample per pixel.
pub fn decode_indexed_png<R: Read>(source: R) -> Result<IndexedImage> {
    let mut decoder = png::Decoder::new(source);
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let mut buffer = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buffer)?;
    if frame.bit_depth != BitDepth::Eight {
        return Err(unsupported(format!(
            "bit depth {:?} is not supported, expected 8 bits per sample",
            frame.bit_depth
        )));
    }
    let kind = match frame.color_type {
        ColorType::Indexed => SampleKind::Indexed,
        ColorType::Grayscale => SampleKind::Grayscale,
        other => {
            return Err(unsupported(format!(
                "color type {other:?} is not supported, expected indexed or grayscale"
            )));
        }
    };
    buffer.truncate(frame.buffer_size());

    let (width, height) = (frame.width as usize, frame.height as usize);
    let pixels = PixelBuffer::from_shape_vec((height, width), buffer)
        .map_err(|e| unsupported(format!("unexpected sample layout: {e}")))?;

    let info = reader.info();
    let format = SampleFormat {
        kind,
        palette: info.palette.as_ref().map(|palette| palette.to_vec()),
        transparency: info.trns.as_ref().map(|trns| trns.to_vec()),
    };

    Ok(IndexedImage { pixels, format })
}

/// Read and decode a PNG file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be opened, otherwise the errors of
/// [`decode_indexed_png`], all tagged with `path`.
pub fn read_indexed_png(path: &Path) -> Result<IndexedImage> {
    let file = File::open(path).with_path(path, "open")?;
    decode_indexed_png(BufReader::new(file)).with_path(path, "decode")
}

/// Encode samples as an 8-bit PNG using the given color metadata
///
/// # Errors
///
/// Returns `InvalidGeometry` if the image is too large for PNG and
/// `ImageEncode` if the encoder or sink fails.
pub fn encode_indexed_png<W: Write>(
    sink: W,
    pixels: &PixelBuffer,
    format: &SampleFormat,
) -> Result<()> {
    let (height, width) = pixels.dim();
    let too_large = |e: std::num::TryFromIntError| {
        invalid_geometry(&format!("{width}x{height} pixels cannot be encoded: {e}"))
    };
    let png_width = u32::try_from(width).map_err(too_large)?;
    let png_height = u32::try_from(height).map_err(too_large)?;

    let mut encoder = png::Encoder::new(sink, png_width, png_height);
    encoder.set_color(match format.kind {
        SampleKind::Indexed => ColorType::Indexed,
        SampleKind::Grayscale => ColorType::Grayscale,
    });
    encoder.set_depth(BitDepth::Eight);
    if let Some(palette) = &format.palette {
        encoder.set_palette(palette.clone());
    }
    if let Some(transparency) = &format.transparency {
        encoder.set_trns(transparency.clone());
    }

    let samples: Vec<u8> = pixels.iter().copied().collect();
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&samples)?;
    writer.finish()?;
    Ok(())
}

/// Encode samples and write them to a PNG file
///
/// The image is fully encoded in memory first, so an encoder failure never
/// leaves a partial file behind.
///
/// # Errors
///
/// Returns the errors of [`encode_indexed_png`] and `FileSystem` if the
/// file cannot be written, all tagged with `path`.
pub fn write_indexed_png(path: &Path, pixels: &PixelBuffer, format: &SampleFormat) -> Result<()> {
    let mut encoded = Vec::new();
    encode_indexed_png(&mut encoded, pixels, format).with_path(path, "encode")?;
    fs::write(path, encoded).with_path(path, "write")
}
