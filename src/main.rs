//! CLI entry point for the tile collapse solver

use clap::Parser;
use sockettile::io::cli::{Cli, FileProcessor};
use sockettile::io::logging;

fn main() -> sockettile::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
