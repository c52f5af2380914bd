//! Spatial operations on pixel buffers
//!
//! This module contains:
//! - Zero-copy slicing of images into tile grids
//! - Tileset image composition from the tile dictionary

/// Tileset composition
pub mod compositor;
/// Tile slicing
pub mod slicer;

pub use slicer::{PixelBuffer, TileGrid, TileView};
