//! Insertion-ordered content dictionary with dense indices
//!
//! Keys are looked up through a borrowed probe, so a candidate built from
//! tile views can be tested without copying pixels. Only a miss stores an
//! owned copy of the key.

use crate::algorithm::hash::DeepHash;
use std::collections::HashMap;

/// Borrowed form of a dictionary key
///
/// `deep_hash` of a probe must equal `deep_hash` of the key it converts to.
pub trait KeyProbe<K>: DeepHash {
    /// Check whether the probe has the same content as a stored key
    fn matches(&self, key: &K) -> bool;

    /// Build an owned key with the probe's content
    fn to_key(&self) -> K;
}

impl KeyProbe<Vec<usize>> for [usize] {
    fn matches(&self, key: &Vec<usize>) -> bool {
        self == key.as_slice()
    }

    fn to_key(&self) -> Vec<usize> {
        self.to_vec()
    }
}

/// Bijection from key content to indices in `0..len()`, in insertion order
#[derive(Debug, Clone)]
pub struct Dictionary<K> {
    entries: Vec<K>,
    /// Deep hash to indices of all entries sharing it
    buckets: HashMap<u64, Vec<usize>>,
}

impl<K: DeepHash> Dictionary<K> {
    /// Create a dictionary whose index 0 is `reserved`
    pub fn with_reserved(reserved: K) -> Self {
        let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
        buckets.entry(reserved.deep_hash()).or_default().push(0);

        Self {
            entries: vec![reserved],
            buckets,
        }
    }

    /// Index of the entry with the probe's content, if present
    pub fn find<Q>(&self, probe: &Q) -> Option<usize>
    where
        Q: KeyProbe<K> + ?Sized,
    {
        self.find_hashed(probe, probe.deep_hash())
    }

    /// Index of the probe's content, inserting it at the end on a miss
    pub fn intern<Q>(&mut self, probe: &Q) -> usize
    where
        Q: KeyProbe<K> + ?Sized,
    {
        let hash = probe.deep_hash();
        if let Some(index) = self.find_hashed(probe, hash) {
            return index;
        }

        let index = self.entries.len();
        self.buckets.entry(hash).or_default().push(index);
        self.entries.push(probe.to_key());
        index
    }

    fn find_hashed<Q>(&self, probe: &Q, hash: u64) -> Option<usize>
    where
        Q: KeyProbe<K> + ?Sized,
    {
        self.buckets.get(&hash)?.iter().copied().find(|&index| {
            self.entries
                .get(index)
                .is_some_and(|entry| probe.matches(entry))
        })
    }
}

impl<K> Dictionary<K> {
    /// Number of entries, including the reserved one
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the reserved entry is present from construction
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry stored at `index`
    pub fn get(&self, index: usize) -> Option<&K> {
        self.entries.get(index)
    }

    /// All entries in index order
    pub fn entries(&self) -> &[K] {
        &self.entries
    }

    /// Iterate entries in index order
    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.entries.iter()
    }

    /// Consume the dictionary, keeping entries in index order
    pub fn into_entries(self) -> Vec<K> {
        self.entries
    }
}

impl<'a, K> IntoIterator for &'a Dictionary<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
