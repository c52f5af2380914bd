//! Format constants and runtime configuration defaults

// Level format constants shared with the game's loader
/// Edge length of a square tile in pixels
pub const TILE_SIZE: usize = 32;

/// Number of consecutive layer indices grouped into one word
pub const WORD_SIZE: usize = 4;

/// Largest number of unique composite tiles a tileset may hold
pub const MAX_TILES: usize = 4090;

/// Width of the output tileset images, in tiles
pub const TILESET_WIDTH: usize = 10;

// Input layout
/// Number of source images: one visual image and one collision mask
pub const SOURCE_COUNT: usize = 2;

/// Position of the collision mask among the sources
pub const COLLISION_SOURCE: usize = 1;

// Output settings
/// Infix between the input stem and the 1-based source number
pub const OUTPUT_SUFFIX: &str = "-output-";
/// File name of the word dictionary stream
pub const WORD_DICTIONARY_STREAM: &str = "Stream3";
/// File name of the word index stream
pub const WORD_INDEX_STREAM: &str = "Stream4";

// Progress display settings
/// Width of the stage progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
