//! Zero-copy partitioning of pixel buffers into square tiles

use crate::io::error::{Result, invalid_geometry};
use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2, s};

/// Raw 8-bit samples indexed by `(row, col)`
pub type PixelBuffer = Array2<u8>;

/// Non-owning view of one square tile inside a pixel buffer
pub type TileView<'a> = ArrayView2<'a, u8>;

/// Row-major grid of tile views covering a whole image
#[derive(Debug, Clone)]
pub struct TileGrid<'a> {
    tiles: Vec<TileView<'a>>,
    rows: usize,
    cols: usize,
    tile_size: usize,
}

impl<'a> TileGrid<'a> {
    /// Number of tile rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tile columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Grid dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Edge length of every tile in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Tile at grid cell `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&TileView<'a>> {
        if col >= self.cols {
            return None;
        }
        self.tiles.get(row * self.cols + col)
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> &[TileView<'a>] {
        &self.tiles
    }

    /// Number of tiles in the grid
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the source image had no pixels
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Split an image into `tile_size` square views without copying samples
///
/// # Errors
///
/// Returns `InvalidGeometry` if `tile_size` is zero or either image
/// dimension is not a multiple of it.
pub fn slice_tiles<S>(buffer: &ArrayBase<S, Ix2>, tile_size: usize) -> Result<TileGrid<'_>>
where
    S: Data<Elem = u8>,
{
    if tile_size == 0 {
        return Err(invalid_geometry(&"tile size must be positive"));
    }

    let (height, width) = buffer.dim();
    if width % tile_size != 0 || height % tile_size != 0 {
        return Err(invalid_geometry(&format!(
            "{width}x{height} pixels is not a multiple of the {tile_size}-pixel tile size"
        )));
    }

    let (rows, cols) = (height / tile_size, width / tile_size);
    let mut tiles = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let top = row * tile_size;
        for col in 0..cols {
            let left = col * tile_size;
            tiles.push(buffer.slice(s![top..top + tile_size, left..left + tile_size]));
        }
    }

    Ok(TileGrid {
        tiles,
        rows,
        cols,
        tile_size,
    })
}
