//! CLI entry point for the layered image collection builder

use clap::Parser;
use dropforge::io::cli::{Cli, CollectionBuilder};

fn main() -> dropforge::Result<()> {
    let cli = Cli::parse();
    CollectionBuilder::new(cli).run()
}
