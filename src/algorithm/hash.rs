//! Order-sensitive structural hashing for nested containers
//!
//! A container hashes by folding the hashes of its elements left to right,
//! so a tile hashes its rows, a row hashes its samples, and a composite tile
//! hashes its member tiles. Swapping two elements changes the result.

use ndarray::{ArrayBase, Data, Ix2};

/// Fractional part of the golden ratio scaled to 64 bits
pub const GOLDEN_RATIO: u64 = 0x9E37_79B9_7F4A_7C15;

/// Fold one element hash into a running seed
pub const fn mix(seed: u64, element: u64) -> u64 {
    seed ^ element
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// Scramble a scalar so that neighbouring small values land far apart
///
/// This is the `SplitMix64` finalizer. Without it, tiles made of a handful of
/// palette indices collide under `mix`.
pub const fn scramble(value: u64) -> u64 {
    let mut x = value.wrapping_add(GOLDEN_RATIO);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Hash a sequence by mixing element hashes from left to right, starting at zero
pub fn hash_sequence<I, F>(elements: I, element_hash: F) -> u64
where
    I: IntoIterator,
    F: FnMut(I::Item) -> u64,
{
    elements.into_iter().map(element_hash).fold(0, mix)
}

/// Content hash that recurses through nested containers
///
/// Implementations must agree with `PartialEq`: values that compare equal
/// hash equally, whichever container type holds them.
pub trait DeepHash {
    /// Hash every element, in order, down to the scalar samples
    fn deep_hash(&self) -> u64;
}

macro_rules! impl_scalar_deep_hash {
    ($($scalar:ty),*) => {
        $(
            impl DeepHash for $scalar {
                fn deep_hash(&self) -> u64 {
                    scramble(*self as u64)
                }
            }
        )*
    };
}

impl_scalar_deep_hash!(u8, u16, u32, u64, usize);

impl<T: DeepHash> DeepHash for [T] {
    fn deep_hash(&self) -> u64 {
        hash_sequence(self, T::deep_hash)
    }
}

impl<T: DeepHash> DeepHash for Vec<T> {
    fn deep_hash(&self) -> u64 {
        self.as_slice().deep_hash()
    }
}

// Owned arrays and views hash identically: rows first, then samples within a row
impl<S, A> DeepHash for ArrayBase<S, Ix2>
where
    S: Data<Elem = A>,
    A: DeepHash,
{
    fn deep_hash(&self) -> u64 {
        hash_sequence(self.rows(), |row| hash_sequence(row.iter(), A::deep_hash))
    }
}
