//! Second-level dictionary encoding of the layer into fixed-width words

use crate::algorithm::deduplication::Layer;
use crate::algorithm::dictionary::Dictionary;
use ndarray::s;

/// Consecutive tile indices from one layer row
pub type Word = Vec<usize>;

/// Dictionary of unique words
pub type WordDictionary = Dictionary<Word>;

/// Word dictionary plus the layer expressed as word indices
#[derive(Debug, Clone)]
pub struct WordEncoding {
    /// Unique words; index 0 is the all-zero word
    pub dictionary: WordDictionary,
    /// Word dictionary index of every word position, row-major
    pub indices: Vec<usize>,
    /// Words per layer row after padding
    pub words_per_row: usize,
    /// Number of layer rows
    pub rows: usize,
    /// Tile indices per word
    pub word_size: usize,
}

impl WordEncoding {
    /// Number of unique words, including the reserved one
    pub fn word_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Layer width in tiles after right padding
    pub const fn padded_width(&self) -> usize {
        self.words_per_row * self.word_size
    }

    /// Word index at word position `(row, word)`
    pub fn index_at(&self, row: usize, word: usize) -> Option<usize> {
        if word >= self.words_per_row {
            return None;
        }
        self.indices.get(row * self.words_per_row + word).copied()
    }
}

/// Pad every layer row with empty tile indices up to a multiple of `word_size`
///
/// # Panics
///
/// Panics if `word_size` is zero.
pub fn pad_layer(layer: &Layer, word_size: usize) -> Layer {
    let (rows, cols) = layer.dim();
    let padded_width = cols.div_ceil(word_size) * word_size;

    let mut padded = Layer::zeros((rows, padded_width));
    padded.slice_mut(s![.., ..cols]).assign(layer);
    padded
}

/// Group the layer into words and deduplicate them
///
/// Words are read left to right within a row and rows top to bottom. The
/// all-zero word is index 0 even if no row contains it.
///
/// # Panics
///
/// Panics if `word_size` is zero.
pub fn encode_words(layer: &Layer, word_size: usize) -> WordEncoding {
    let padded = pad_layer(layer, word_size);
    let (rows, padded_width) = padded.dim();
    let words_per_row = padded_width / word_size;

    let mut dictionary = WordDictionary::with_reserved(vec![0; word_size]);
    let samples: Vec<usize> = padded.iter().copied().collect();
    let indices = samples
        .chunks_exact(word_size)
        .map(|word| dictionary.intern(word))
        .collect();

    WordEncoding {
        dictionary,
        indices,
        words_per_row,
        rows,
        word_size,
    }
}
