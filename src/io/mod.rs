/// Command-line arguments and conversion driver
pub mod cli;
/// Format constants and defaults
pub mod configuration;
/// Error types and path context
pub mod error;
/// Raw 8-bit PNG codec
pub mod image;
/// Stage progress display
pub mod progress;
/// Binary level stream writer
pub mod stream;
