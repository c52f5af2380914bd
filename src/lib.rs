//! Deduplicated tileset and dictionary-encoded level layer builder
//!
//! A visual image and a collision mask are cut into square tiles. The tiles
//! found at each grid cell form one composite tile; unique composites make up
//! the tileset and the layer records which composite sits at each cell. Layer
//! rows are then grouped into fixed-width words, deduplicated a second time,
//! and written as two headerless 16-bit little-endian streams.

#![deny(unsafe_code)]

/// Composite tile deduplication, word encoding and the end-to-end engine
pub mod algorithm;
/// Command-line handling, configuration, image codec, binary streams and errors
pub mod io;
/// Tile slicing and tileset composition over pixel buffers
pub mod spatial;

pub use algorithm::engine::{EngineConfig, LevelData, build_level};
pub use io::error::{LevelError, Result};
