//! Tests for configuration checks and the staged level build

#[cfg(test)]
mod tests {
    use ndarray::{Array2, s};
    use tilelev::LevelError;
    use tilelev::algorithm::engine::{
        EngineConfig, MAX_ADDRESSABLE_ENTRIES, MAX_WORD_SIZE, Stage, build_level, build_level_with,
        validate_sources,
    };
    use tilelev::spatial::slicer::PixelBuffer;

    /// One-row level of 1-pixel tiles whose first `words` two-tile words are all distinct
    fn distinct_word_sources(words: usize) -> [PixelBuffer; 2] {
        let mut visual = PixelBuffer::zeros((1, words * 2));
        let mut mask = PixelBuffer::zeros((1, words * 2));
        for word in 0..words {
            for (offset, code) in [word % 512, word / 512].into_iter().enumerate() {
                visual[(0, word * 2 + offset)] = (code & 0xff) as u8;
                mask[(0, word * 2 + offset)] = (code >> 8) as u8;
            }
        }
        [visual, mask]
    }

    fn small_config() -> EngineConfig {
        EngineConfig {
            tile_size: 2,
            word_size: 4,
            max_tiles: 4090,
            tileset_width: 10,
        }
    }

    // Tests the default configuration matches the level format
    // Verified by changing a format constant
    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.tile_size, 32);
        assert_eq!(config.word_size, 4);
        assert_eq!(config.max_tiles, 4090);
        assert_eq!(config.tileset_width, 10);
        assert!(config.validate().is_ok());
    }

    // Tests every zero parameter and an unaddressable ceiling are rejected
    // Verified by removing individual checks
    #[test]
    fn test_validate_rejects_bad_parameters() {
        let cases = [
            ("tile_size", EngineConfig { tile_size: 0, ..small_config() }),
            ("word_size", EngineConfig { word_size: 0, ..small_config() }),
            ("tileset_width", EngineConfig { tileset_width: 0, ..small_config() }),
            ("max_tiles", EngineConfig { max_tiles: 0, ..small_config() }),
            ("max_tiles", EngineConfig { max_tiles: 65_537, ..small_config() }),
            ("word_size", EngineConfig { word_size: usize::MAX, ..small_config() }),
            ("word_size", EngineConfig { word_size: MAX_WORD_SIZE + 1, ..small_config() }),
            ("tileset_width", EngineConfig { tileset_width: usize::MAX / 2, ..small_config() }),
            ("tileset_width", EngineConfig { tile_size: 1 << 31, ..small_config() }),
            (
                "tile_size",
                EngineConfig { tile_size: 1 << 28, tileset_width: 1, ..small_config() },
            ),
        ];

        for (name, config) in cases {
            match config.validate() {
                Err(LevelError::InvalidParameter { parameter, .. }) => assert_eq!(parameter, name),
                other => unreachable!("Expected InvalidParameter for {name}, got {other:?}"),
            }
        }

        let widest = EngineConfig { max_tiles: 65_536, ..small_config() };
        assert!(widest.validate().is_ok());
        let longest_words = EngineConfig { word_size: MAX_WORD_SIZE, ..small_config() };
        assert!(longest_words.validate().is_ok());
    }

    // Tests the two-cell scenario end to end in memory
    // Verified by skipping the reserved entries
    #[test]
    fn test_two_cell_level() {
        let visual = Array2::from_elem((32, 64), 3_u8);
        let mask = PixelBuffer::zeros((32, 64));

        let level = build_level(&[visual, mask], &EngineConfig::default()).unwrap();

        assert_eq!(level.tile_count(), 2);
        assert_eq!(level.layer().row(0).to_vec(), vec![1, 1]);
        assert_eq!(level.words.dictionary.entries(), &[vec![0_usize, 0, 0, 0], vec![1, 1, 0, 0]]);
        assert_eq!(level.words.indices, vec![1]);
        assert_eq!(level.word_count(), 2);

        assert_eq!(level.tilesets.len(), 2);
        assert_eq!(level.tilesets[0].dim(), (32, 320));
        assert!(level.tilesets[0].slice(s![.., ..32]).iter().all(|&sample| sample == 0));
        assert!(level.tilesets[0].slice(s![.., 32..64]).iter().all(|&sample| sample == 3));
        assert!(level.tilesets[0].slice(s![.., 64..]).iter().all(|&sample| sample == 0));
        assert!(level.tilesets[1].iter().all(|&sample| sample == 0));
    }

    // Tests sources of different sizes are rejected before slicing
    // Verified by comparing only widths
    #[test]
    fn test_rejects_mismatched_sources() {
        let sources = [PixelBuffer::zeros((4, 4)), PixelBuffer::zeros((2, 4))];
        let err = build_level(&sources, &small_config()).unwrap_err();
        assert!(matches!(err, LevelError::InvalidGeometry { .. }));
        assert!(err.to_string().contains("must be equal"));
    }

    // Tests a source that does not divide into whole tiles is rejected
    // Verified by truncating partial tiles
    #[test]
    fn test_rejects_partial_tiles() {
        let sources = [PixelBuffer::zeros((4, 5)), PixelBuffer::zeros((4, 5))];
        let err = validate_sources(&sources, 2).unwrap_err();
        assert!(err.to_string().contains("multiples of 2"));
        assert!(validate_sources(&[], 2).is_err());
    }

    // Tests the tile ceiling surfaces as a capacity error
    // Verified by checking the ceiling against unique data tiles only
    #[test]
    fn test_capacity_exceeded() {
        let visual = Array2::from_shape_fn((2, 8), |(_, col)| (col / 2 + 1) as u8);
        let mask = PixelBuffer::zeros((2, 8));
        let config = EngineConfig { max_tiles: 4, ..small_config() };

        match build_level(&[visual.clone(), mask.clone()], &config) {
            Err(LevelError::CapacityExceeded { count, limit }) => {
                assert_eq!((count, limit), (5, 4));
            }
            other => unreachable!("Expected CapacityExceeded, got {other:?}"),
        }

        let config = EngineConfig { max_tiles: 5, ..small_config() };
        assert_eq!(build_level(&[visual, mask], &config).unwrap().tile_count(), 5);
    }

    // Tests word indices past 16 bits fail the build instead of reaching the stream writer
    // Verified by removing the word count check
    #[test]
    fn test_word_capacity_exceeded() {
        let config = EngineConfig {
            tile_size: 1,
            word_size: 2,
            ..small_config()
        };

        let level = build_level(&distinct_word_sources(MAX_ADDRESSABLE_ENTRIES), &config).unwrap();
        assert_eq!(level.word_count(), MAX_ADDRESSABLE_ENTRIES);

        match build_level(&distinct_word_sources(MAX_ADDRESSABLE_ENTRIES + 1), &config) {
            Err(LevelError::WordCapacityExceeded { count, limit }) => {
                assert_eq!((count, limit), (MAX_ADDRESSABLE_ENTRIES + 1, MAX_ADDRESSABLE_ENTRIES));
            }
            other => unreachable!("Expected WordCapacityExceeded, got {other:?}"),
        }
    }

    // Tests identical inputs give identical outputs
    // Verified by iterating a hash map when assigning indices
    #[test]
    fn test_build_is_deterministic() {
        let visual = Array2::from_shape_fn((8, 12), |(row, col)| ((row / 2 * 7 + col / 2 * 3) % 5) as u8);
        let mask = Array2::from_shape_fn((8, 12), |(row, col)| u8::from((row + col) % 7 == 0));
        let sources = [visual, mask];

        let first = build_level(&sources, &small_config()).unwrap();
        let second = build_level(&sources, &small_config()).unwrap();

        assert_eq!(first.layer(), second.layer());
        assert_eq!(first.tilesets, second.tilesets);
        assert_eq!(first.words.dictionary.entries(), second.words.dictionary.entries());
        assert_eq!(first.words.indices, second.words.indices);
    }

    // Tests stages are reported once each, in execution order
    // Verified by reporting stages after they finish
    #[test]
    fn test_stage_callbacks_in_order() {
        let sources = [PixelBuffer::zeros((2, 2)), PixelBuffer::zeros((2, 2))];
        let mut seen = Vec::new();

        build_level_with(&sources, &small_config(), |stage| seen.push(stage)).unwrap();

        assert_eq!(seen, Stage::ALL.to_vec());
        assert!(Stage::ALL.iter().all(|stage| !stage.label().is_empty()));
    }

    // Tests no stage runs when validation fails
    // Verified by validating after slicing
    #[test]
    fn test_no_stage_on_invalid_input() {
        let sources = [PixelBuffer::zeros((3, 3)), PixelBuffer::zeros((3, 3))];
        let mut seen = Vec::new();

        let result = build_level_with(&sources, &small_config(), |stage| seen.push(stage));

        assert!(result.is_err());
        assert!(seen.is_empty());
    }

    // Tests the tileset layout follows the configured geometry
    // Verified by swapping tile size and row width
    #[test]
    fn test_tileset_layout_from_config() {
        let layout = small_config().tileset_layout();
        assert_eq!(layout.tile_size, 2);
        assert_eq!(layout.row_width, 10);
    }
}
