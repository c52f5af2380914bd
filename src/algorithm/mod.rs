/// Composite tile deduplication into a tile dictionary and layer
pub mod deduplication;
/// Insertion-ordered content dictionary
pub mod dictionary;
/// End-to-end level building and engine configuration
pub mod engine;
/// Order-sensitive structural hashing
pub mod hash;
/// Word grouping and word dictionary encoding
pub mod words;
