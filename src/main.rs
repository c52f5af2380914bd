//! CLI entry point for the tileset and level stream builder

use clap::Parser;
use tilelev::io::cli::{Cli, LevelConverter};

fn main() -> tilelev::Result<()> {
    let cli = Cli::parse();
    let converter = LevelConverter::new(cli);
    converter.process().map(|_| ())
}
