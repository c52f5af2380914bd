//! Tileset image reconstruction from the composite tile dictionary

use crate::algorithm::deduplication::{CompositeTile, TileDictionary};
use crate::spatial::slicer::PixelBuffer;
use ndarray::s;

/// Placement of dictionary entries inside the output tileset images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilesetLayout {
    /// Edge length of a tile in pixels
    pub tile_size: usize,
    /// Number of tiles per tileset row
    pub row_width: usize,
}

impl TilesetLayout {
    /// Number of tile rows needed for `tile_count` entries
    pub const fn rows_for(&self, tile_count: usize) -> usize {
        tile_count.div_ceil(self.row_width)
    }

    /// Tile cell `(row, col)` that holds dictionary entry `index`
    pub const fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.row_width, index % self.row_width)
    }

    /// Pixel dimensions `(height, width)` of a tileset holding `tile_count` entries
    pub const fn image_dimensions(&self, tile_count: usize) -> (usize, usize) {
        (
            self.rows_for(tile_count) * self.tile_size,
            self.row_width * self.tile_size,
        )
    }
}

/// Lay out every dictionary entry into one tileset image per source
///
/// Entry `i` lands at tile cell `layout.cell_of(i)`; cells past the last
/// entry keep their zero fill.
///
/// # Panics
///
/// Panics if a member tile is not `layout.tile_size` pixels square.
pub fn compose_tilesets(dictionary: &TileDictionary, layout: TilesetLayout) -> Vec<PixelBuffer> {
    let source_count = dictionary.get(0).map_or(0, CompositeTile::source_count);
    let dimensions = layout.image_dimensions(dictionary.len());
    let mut tilesets = vec![PixelBuffer::zeros(dimensions); source_count];

    let size = layout.tile_size;
    for (index, tile) in dictionary.iter().enumerate() {
        let (row, col) = layout.cell_of(index);
        let (top, left) = (row * size, col * size);
        for (tileset, member) in tilesets.iter_mut().zip(tile.members()) {
            tileset
                .slice_mut(s![top..top + size, left..left + size])
                .assign(member);
        }
    }

    tilesets
}
