//! Headerless 16-bit binary streams for the level format
//!
//! Neither stream carries a header or length prefix; readers recover the
//! structure from the word size and layer geometry.

use crate::algorithm::words::{WordDictionary, WordEncoding};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use num_traits::ToPrimitive;
use std::fmt::Display;
use std::io::{self, Write};

/// Narrow a dictionary index to 16 bits
///
/// # Panics
///
/// Panics if the value does not fit. Index domains are bounded by the
/// engine configuration, so this indicates a defect rather than bad input.
// Truncating silently would corrupt the level, so overflow aborts
#[allow(clippy::panic)]
pub fn narrow_to_u16<T>(value: T) -> u16
where
    T: ToPrimitive + Display,
{
    let Some(narrowed) = value.to_u16() else {
        panic!("value {value} does not fit in a 16-bit level record");
    };
    narrowed
}

/// Write each value as a 16-bit integer in byte order `B`
///
/// Returns the number of values written; the stream grows by two bytes per value.
///
/// # Errors
///
/// Returns any error reported by the sink.
///
/// # Panics
///
/// Panics if a value does not fit in 16 bits.
pub fn write_u16_stream<B, W, I>(sink: &mut W, values: I) -> io::Result<usize>
where
    B: ByteOrder,
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: ToPrimitive + Display,
{
    let mut count = 0;
    for value in values {
        sink.write_u16::<B>(narrow_to_u16(value))?;
        count += 1;
    }
    Ok(count)
}

/// Write every word's tile indices, in dictionary order, as little-endian u16
///
/// # Errors
///
/// Returns any error reported by the sink.
///
/// # Panics
///
/// Panics if a tile index does not fit in 16 bits.
pub fn write_word_dictionary<W>(sink: &mut W, dictionary: &WordDictionary) -> io::Result<usize>
where
    W: Write + ?Sized,
{
    write_u16_stream::<LittleEndian, _, _>(sink, dictionary.iter().flatten().copied())
}

/// Write the layer's word indices, row-major, as little-endian u16
///
/// # Errors
///
/// Returns any error reported by the sink.
///
/// # Panics
///
/// Panics if a word index does not fit in 16 bits.
pub fn write_word_indices<W>(sink: &mut W, encoding: &WordEncoding) -> io::Result<usize>
where
    W: Write + ?Sized,
{
    write_u16_stream::<LittleEndian, _, _>(sink, encoding.indices.iter().copied())
}
