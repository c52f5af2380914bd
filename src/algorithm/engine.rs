//! End-to-end level building over fully decoded source images
//!
//! Runs slicing, composite deduplication, tileset composition and word
//! encoding in that order. Nothing is written here; the caller decides where
//! tilesets and streams go once every stage has succeeded.

use crate::algorithm::deduplication::{Layer, TileDeduplication, deduplicate_tiles};
use crate::algorithm::words::{WordEncoding, encode_words};
use crate::io::configuration::{MAX_TILES, TILE_SIZE, TILESET_WIDTH, WORD_SIZE};
use crate::io::error::{LevelError, Result, invalid_geometry, invalid_parameter};
use crate::spatial::compositor::{TilesetLayout, compose_tilesets};
use crate::spatial::slicer::{PixelBuffer, slice_tiles};

/// Number of distinct indices a 16-bit record can hold
pub const MAX_ADDRESSABLE_ENTRIES: usize = u16::MAX as usize + 1;

/// Largest word size accepted on input
pub const MAX_WORD_SIZE: usize = u16::MAX as usize;

/// Geometry and capacity parameters of the level format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Edge length of a square tile in pixels
    pub tile_size: usize,
    /// Tile indices per word
    pub word_size: usize,
    /// Largest allowed number of unique composite tiles
    pub max_tiles: usize,
    /// Output tileset width in tiles
    pub tileset_width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            word_size: WORD_SIZE,
            max_tiles: MAX_TILES,
            tileset_width: TILESET_WIDTH,
        }
    }
}

impl EngineConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero size or width, a word size above
    /// [`MAX_WORD_SIZE`], a tile ceiling beyond what 16-bit indices can address,
    /// or a tileset whose pixel dimensions would not fit a PNG header.
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be positive",
            ));
        }
        if self.word_size == 0 {
            return Err(invalid_parameter(
                "word_size",
                &self.word_size,
                &"must be positive",
            ));
        }
        if self.tileset_width == 0 {
            return Err(invalid_parameter(
                "tileset_width",
                &self.tileset_width,
                &"must be positive",
            ));
        }
        if self.word_size > MAX_WORD_SIZE {
            return Err(invalid_parameter(
                "word_size",
                &self.word_size,
                &format!("must be at most {MAX_WORD_SIZE}"),
            ));
        }
        if self.max_tiles == 0 || self.max_tiles > MAX_ADDRESSABLE_ENTRIES {
            return Err(invalid_parameter(
                "max_tiles",
                &self.max_tiles,
                &format!("must be between 1 and {MAX_ADDRESSABLE_ENTRIES}"),
            ));
        }

        // Tileset pixel sizes at the full ceiling must fit a PNG header
        let fits_png = |pixels: Option<usize>| pixels.is_some_and(|p| u32::try_from(p).is_ok());
        if !fits_png(self.tileset_width.checked_mul(self.tile_size)) {
            return Err(invalid_parameter(
                "tileset_width",
                &self.tileset_width,
                &format!(
                    "a tileset {} tiles of {} pixels wide exceeds the PNG width limit",
                    self.tileset_width, self.tile_size
                ),
            ));
        }
        let tileset_rows = self.max_tiles.div_ceil(self.tileset_width);
        if !fits_png(tileset_rows.checked_mul(self.tile_size)) {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!("{tileset_rows} tileset rows of this size exceed the PNG height limit"),
            ));
        }
        Ok(())
    }

    /// Tileset placement derived from this configuration
    pub const fn tileset_layout(&self) -> TilesetLayout {
        TilesetLayout {
            tile_size: self.tile_size,
            row_width: self.tileset_width,
        }
    }
}

/// Engine stages, reported in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Splitting sources into tile grids
    Slicing,
    /// Building the composite tile dictionary and layer
    Deduplicating,
    /// Drawing the tileset images
    Compositing,
    /// Building the word dictionary
    EncodingWords,
}

impl Stage {
    /// Every stage in execution order
    pub const ALL: [Self; 4] = [
        Self::Slicing,
        Self::Deduplicating,
        Self::Compositing,
        Self::EncodingWords,
    ];

    /// Short human-readable name
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slicing => "slicing tiles",
            Self::Deduplicating => "deduplicating tiles",
            Self::Compositing => "composing tilesets",
            Self::EncodingWords => "encoding words",
        }
    }
}

/// Everything the level format needs, built in memory
#[derive(Debug, Clone)]
pub struct LevelData {
    /// Composite tile dictionary and layer
    pub tiles: TileDeduplication,
    /// One tileset image per source, in source order
    pub tilesets: Vec<PixelBuffer>,
    /// Word dictionary and word index sequence
    pub words: WordEncoding,
}

impl LevelData {
    /// Number of unique composite tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.tile_count()
    }

    /// Number of unique words
    pub fn word_count(&self) -> usize {
        self.words.word_count()
    }

    /// Layer of tile indices before word padding
    pub const fn layer(&self) -> &Layer {
        &self.tiles.layer
    }
}

/// Check that sources exist, share dimensions and divide into whole tiles
///
/// # Errors
///
/// Returns `InvalidGeometry` describing the first offending source.
pub fn validate_sources(sources: &[PixelBuffer], tile_size: usize) -> Result<()> {
    let Some(primary) = sources.first() else {
        return Err(invalid_geometry(&"at least one source image is required"));
    };

    let (height, width) = primary.dim();
    for (source, buffer) in sources.iter().enumerate() {
        let (h, w) = buffer.dim();
        if (h, w) != (height, width) {
            return Err(invalid_geometry(&format!(
                "source {source} is {w}x{h} pixels, sizes of all images must be equal ({width}x{height})"
            )));
        }
    }

    if tile_size == 0 || width % tile_size != 0 || height % tile_size != 0 {
        return Err(invalid_geometry(&format!(
            "{width}x{height} pixels, width and height must be multiples of {tile_size}"
        )));
    }
    Ok(())
}

/// Build the level from decoded sources
///
/// # Errors
///
/// See [`build_level_with`].
pub fn build_level(sources: &[PixelBuffer], config: &EngineConfig) -> Result<LevelData> {
    build_level_with(sources, config, |_| {})
}

/// Build the level, calling `on_stage` as each stage begins
///
/// # Errors
///
/// Returns `InvalidParameter` for an unusable configuration,
/// `InvalidGeometry` if the sources cannot be tiled together,
/// `CapacityExceeded` if the tileset would hold more than `max_tiles` tiles,
/// and `WordCapacityExceeded` if word indices would not fit in 16 bits.
pub fn build_level_with<F>(
    sources: &[PixelBuffer],
    config: &EngineConfig,
    mut on_stage: F,
) -> Result<LevelData>
where
    F: FnMut(Stage),
{
    config.validate()?;
    validate_sources(sources, config.tile_size)?;

    on_stage(Stage::Slicing);
    let grids = sources
        .iter()
        .map(|source| slice_tiles(source, config.tile_size))
        .collect::<Result<Vec<_>>>()?;

    on_stage(Stage::Deduplicating);
    let tiles = deduplicate_tiles(&grids, config.max_tiles)?;

    on_stage(Stage::Compositing);
    let tilesets = compose_tilesets(&tiles.dictionary, config.tileset_layout());

    on_stage(Stage::EncodingWords);
    let words = encode_words(&tiles.layer, config.word_size);
    let word_count = words.word_count();
    if word_count > MAX_ADDRESSABLE_ENTRIES {
        return Err(LevelError::WordCapacityExceeded {
            count: word_count,
            limit: MAX_ADDRESSABLE_ENTRIES,
        });
    }

    Ok(LevelData {
        tiles,
        tilesets,
        words,
    })
}
