//! Composite tile deduplication across parallel source images
//!
//! Every grid cell contributes one composite tile: the tuple of the tiles at
//! that cell in each source, in source order. Cells are visited row by row
//! and each new composite is given the next free index, so the dictionary
//! order is fully determined by the input images.

use crate::algorithm::dictionary::{Dictionary, KeyProbe};
use crate::algorithm::hash::DeepHash;
use crate::io::error::{LevelError, Result, invalid_geometry};
use crate::spatial::slicer::{PixelBuffer, TileGrid, TileView};
use ndarray::Array2;

/// Grid of tile dictionary indices, one per cell
pub type Layer = Array2<usize>;

/// Dictionary of unique composite tiles
pub type TileDictionary = Dictionary<CompositeTile>;

/// Owned copy of the tiles found at one grid cell, one per source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeTile {
    members: Vec<PixelBuffer>,
}

impl CompositeTile {
    /// Composite of `source_count` tiles filled with zero samples
    pub fn empty(source_count: usize, tile_size: usize) -> Self {
        Self {
            members: vec![PixelBuffer::zeros((tile_size, tile_size)); source_count],
        }
    }

    /// Build a composite from owned member tiles
    pub const fn from_members(members: Vec<PixelBuffer>) -> Self {
        Self { members }
    }

    /// Member tiles in source order
    pub fn members(&self) -> &[PixelBuffer] {
        &self.members
    }

    /// Tile contributed by source image `source`
    pub fn member(&self, source: usize) -> Option<&PixelBuffer> {
        self.members.get(source)
    }

    /// Number of source images the composite spans
    pub fn source_count(&self) -> usize {
        self.members.len()
    }

    /// Whether every sample of every member is zero
    pub fn is_empty(&self) -> bool {
        self.members
            .iter()
            .all(|member| member.iter().all(|&sample| sample == 0))
    }
}

impl DeepHash for CompositeTile {
    fn deep_hash(&self) -> u64 {
        self.members.deep_hash()
    }
}

impl KeyProbe<CompositeTile> for [TileView<'_>] {
    fn matches(&self, key: &CompositeTile) -> bool {
        self.len() == key.members.len()
            && self
                .iter()
                .zip(&key.members)
                .all(|(view, member)| view == member)
    }

    fn to_key(&self) -> CompositeTile {
        CompositeTile {
            members: self.iter().map(|view| view.to_owned()).collect(),
        }
    }
}

/// Unique composite tiles and the layer referencing them
#[derive(Debug, Clone)]
pub struct TileDeduplication {
    /// Unique composite tiles; index 0 is the empty composite
    pub dictionary: TileDictionary,
    /// Dictionary index of every grid cell
    pub layer: Layer,
}

impl TileDeduplication {
    /// Number of unique composite tiles, including the reserved empty one
    pub fn tile_count(&self) -> usize {
        self.dictionary.len()
    }
}

/// Deduplicate the composite tiles of parallel grids
///
/// The dictionary starts with the empty composite at index 0 whether or not
/// any cell is empty. The tile ceiling is checked once, after every cell has
/// been visited.
///
/// # Errors
///
/// Returns `InvalidGeometry` if no grids are given or their dimensions or tile
/// sizes differ, and `CapacityExceeded` if more than `max_tiles` unique
/// composites are found.
pub fn deduplicate_tiles(grids: &[TileGrid<'_>], max_tiles: usize) -> Result<TileDeduplication> {
    let Some(primary) = grids.first() else {
        return Err(invalid_geometry(&"at least one tile grid is required"));
    };

    for (source, grid) in grids.iter().enumerate().skip(1) {
        if grid.dimensions() != primary.dimensions() || grid.tile_size() != primary.tile_size() {
            return Err(invalid_geometry(&format!(
                "source {source} has a {}x{} grid of {}-pixel tiles, expected {}x{} of {}-pixel tiles",
                grid.cols(),
                grid.rows(),
                grid.tile_size(),
                primary.cols(),
                primary.rows(),
                primary.tile_size()
            )));
        }
    }

    let mut dictionary =
        TileDictionary::with_reserved(CompositeTile::empty(grids.len(), primary.tile_size()));
    let mut layer = Layer::zeros(primary.dimensions());

    let mut probe: Vec<TileView<'_>> = Vec::with_capacity(grids.len());
    for ((row, col), cell) in layer.indexed_iter_mut() {
        probe.clear();
        probe.extend(grids.iter().filter_map(|grid| grid.get(row, col).cloned()));
        *cell = dictionary.intern(probe.as_slice());
    }

    let count = dictionary.len();
    if count > max_tiles {
        return Err(LevelError::CapacityExceeded {
            count,
            limit: max_tiles,
        });
    }

    Ok(TileDeduplication { dictionary, layer })
}
