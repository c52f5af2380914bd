//! Command-line interface turning a visual image and a collision mask into a level

use crate::algorithm::engine::{EngineConfig, LevelData, Stage, build_level_with};
use crate::io::configuration::{
    COLLISION_SOURCE, MAX_TILES, OUTPUT_SUFFIX, SOURCE_COUNT, TILE_SIZE, TILESET_WIDTH,
    WORD_DICTIONARY_STREAM, WORD_INDEX_STREAM, WORD_SIZE,
};
use crate::io::error::{LevelError, Result, WithPath};
use crate::io::image::{IndexedImage, SampleFormat, read_indexed_png, write_indexed_png};
use crate::io::progress::ProgressReporter;
use crate::io::stream::{write_word_dictionary, write_word_indices};
use crate::spatial::slicer::PixelBuffer;
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Stages outside the engine: one read per source, tileset export, stream export
const IO_STAGES: usize = SOURCE_COUNT + 2;

#[derive(Parser, Debug)]
#[command(name = "tilelev")]
#[command(
    author,
    version,
    about = "Build a deduplicated tileset and dictionary-encoded level layer from a visual image and a collision mask"
)]
/// Command-line arguments for the level converter
pub struct Cli {
    /// Palette-indexed visual image
    #[arg(value_name = "VISUAL")]
    pub visual: PathBuf,

    /// Collision mask image; any non-zero sample is solid
    #[arg(value_name = "COLLISION")]
    pub collision: PathBuf,

    /// Directory for tilesets and level streams (default: tilesets next to
    /// their source, streams in the working directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Tile edge length in pixels
    #[arg(short, long, default_value_t = TILE_SIZE)]
    pub tile_size: usize,

    /// Tile indices per word
    #[arg(short, long, default_value_t = WORD_SIZE)]
    pub word_size: usize,

    /// Maximum number of unique tiles
    #[arg(short, long, default_value_t = MAX_TILES)]
    pub max_tiles: usize,

    /// Tileset image width in tiles
    #[arg(long, default_value_t = TILESET_WIDTH)]
    pub tileset_width: usize,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Engine parameters selected on the command line
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            tile_size: self.tile_size,
            word_size: self.word_size,
            max_tiles: self.max_tiles,
            tileset_width: self.tileset_width,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Source image paths in source order
    pub fn sources(&self) -> [&Path; SOURCE_COUNT] {
        [self.visual.as_path(), self.collision.as_path()]
    }
}

/// Files written and sizes found by a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Unique composite tiles, including the reserved empty tile
    pub tile_count: usize,
    /// Unique words, including the reserved empty word
    pub word_count: usize,
    /// Layer width in tiles after word padding
    pub layer_width: usize,
    /// Layer height in tiles
    pub layer_height: usize,
    /// Tileset image per source, in source order
    pub tileset_paths: Vec<PathBuf>,
    /// Word dictionary stream
    pub word_dictionary_path: PathBuf,
    /// Word index stream
    pub word_index_path: PathBuf,
}

/// Runs one conversion from decoded inputs to written outputs
pub struct LevelConverter {
    cli: Cli,
    progress: ProgressReporter,
}

impl LevelConverter {
    /// Create a converter for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let stage_count = IO_STAGES + Stage::ALL.len();
        let progress = if cli.should_show_progress() {
            ProgressReporter::new(stage_count)
        } else {
            ProgressReporter::hidden(stage_count)
        };

        Self { cli, progress }
    }

    /// Decode the inputs, build the level and write every output
    ///
    /// Nothing is written unless decoding and every engine stage succeed.
    /// The progress bar is cleared whether or not the conversion succeeds.
    ///
    /// # Errors
    ///
    /// Returns codec and file system errors tagged with the failing path,
    /// `InvalidGeometry` for inputs that cannot be tiled together,
    /// `InvalidParameter` for unusable engine options, `CapacityExceeded`
    /// when the tileset would be too large and `WordCapacityExceeded` when
    /// word indices would not fit their 16-bit records.
    pub fn process(&self) -> Result<ConversionSummary> {
        let outcome = self.convert();
        self.progress.finish();

        let summary = outcome?;
        self.report(&summary);
        Ok(summary)
    }

    /// Progress reporter driven by this converter
    pub const fn progress(&self) -> &ProgressReporter {
        &self.progress
    }

    fn convert(&self) -> Result<ConversionSummary> {
        let config = self.cli.engine_config();
        config.validate()?;

        let (pixels, formats): (Vec<PixelBuffer>, Vec<SampleFormat>) = self
            .load_sources()?
            .into_iter()
            .map(|image| (image.pixels, image.format))
            .unzip();

        let progress = &self.progress;
        let mut running = false;
        let level = build_level_with(&pixels, &config, |stage| {
            if running {
                progress.complete_stage();
            }
            running = true;
            progress.start_stage(stage.label());
        })?;
        progress.complete_stage();

        let tileset_paths = self.write_tilesets(&formats, &level)?;
        let (word_dictionary_path, word_index_path) = self.write_streams(&level)?;

        Ok(ConversionSummary {
            tile_count: level.tile_count(),
            word_count: level.word_count(),
            layer_width: level.words.padded_width(),
            layer_height: level.words.rows,
            tileset_paths,
            word_dictionary_path,
            word_index_path,
        })
    }

    /// Read every source, checking sizes in the order the files are given
    fn load_sources(&self) -> Result<Vec<IndexedImage>> {
        let tile_size = self.cli.tile_size;
        let mut images: Vec<IndexedImage> = Vec::with_capacity(SOURCE_COUNT);

        for (source, path) in self.cli.sources().into_iter().enumerate() {
            self.progress.start_stage(&format!("reading {}", path.display()));
            let mut image = read_indexed_png(path)?;

            if let Some(first) = images.first()
                && (image.width(), image.height()) != (first.width(), first.height())
            {
                return Err(LevelError::InvalidGeometry {
                    reason: format!(
                        "file {} is {}x{} pixels, sizes of all images must be equal ({}x{})",
                        path.display(),
                        image.width(),
                        image.height(),
                        first.width(),
                        first.height()
                    ),
                });
            }
            if image.width() % tile_size != 0 || image.height() % tile_size != 0 {
                return Err(LevelError::InvalidGeometry {
                    reason: format!(
                        "file {} is {}x{} pixels, width and height must be multiples of {tile_size}",
                        path.display(),
                        image.width(),
                        image.height()
                    ),
                });
            }

            if source == COLLISION_SOURCE {
                image.binarize();
            }
            images.push(image);
            self.progress.complete_stage();
        }

        Ok(images)
    }

    fn write_tilesets(
        &self,
        formats: &[SampleFormat],
        level: &LevelData,
    ) -> Result<Vec<PathBuf>> {
        self.progress.start_stage("writing tilesets");
        let mut paths = Vec::with_capacity(level.tilesets.len());

        for (position, ((path, format), tileset)) in self
            .cli
            .sources()
            .into_iter()
            .zip(formats)
            .zip(&level.tilesets)
            .enumerate()
        {
            let output_path = self.tileset_path(path, position);
            write_indexed_png(&output_path, tileset, format)?;
            paths.push(output_path);
        }

        self.progress.complete_stage();
        Ok(paths)
    }

    fn write_streams(&self, level: &LevelData) -> Result<(PathBuf, PathBuf)> {
        self.progress.start_stage("writing level streams");

        let dictionary_path = self.stream_path(WORD_DICTIONARY_STREAM);
        let file = File::create(&dictionary_path).with_path(&dictionary_path, "create")?;
        let mut sink = BufWriter::new(file);
        write_word_dictionary(&mut sink, &level.words.dictionary)
            .and_then(|_| sink.flush())
            .with_path(&dictionary_path, "write")?;

        let index_path = self.stream_path(WORD_INDEX_STREAM);
        let file = File::create(&index_path).with_path(&index_path, "create")?;
        let mut sink = BufWriter::new(file);
        write_word_indices(&mut sink, &level.words)
            .and_then(|_| sink.flush())
            .with_path(&index_path, "write")?;

        self.progress.complete_stage();
        Ok((dictionary_path, index_path))
    }

    /// Output tileset path for the source at `position` (0-based)
    ///
    /// `level/visual.png` becomes `level/visual-output-1.png`, or
    /// `<output_dir>/visual-output-1.png` when an output directory is set.
    pub fn tileset_path(&self, input_path: &Path, position: usize) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{OUTPUT_SUFFIX}{}.png",
            stem.to_string_lossy(),
            position + 1
        );

        match (&self.cli.output_dir, input_path.parent()) {
            (Some(dir), _) => dir.join(output_name),
            (None, Some(parent)) => parent.join(output_name),
            (None, None) => PathBuf::from(output_name),
        }
    }

    /// Path of the level stream called `name`
    pub fn stream_path(&self, name: &str) -> PathBuf {
        self.cli
            .output_dir
            .as_ref()
            .map_or_else(|| PathBuf::from(name), |dir| dir.join(name))
    }

    // Allow print for the end-of-run summary
    #[allow(clippy::print_stderr)]
    fn report(&self, summary: &ConversionSummary) {
        if self.cli.quiet {
            return;
        }
        eprintln!(
            "Tiles: {}/{}, words: {}, layer: {}x{} tiles",
            summary.tile_count,
            self.cli.max_tiles,
            summary.word_count,
            summary.layer_width,
            summary.layer_height
        );
    }
}
