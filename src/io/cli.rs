//! Command-line interface and collection build orchestration

use crate::collection::combination;
use crate::io::archive;
use crate::io::config::CollectionConfig;
use crate::io::configuration::{COLLECTION_ARCHIVE, COLLECTION_DIR, DEFAULT_POOL_SIZE};
use crate::io::error::{BuildError, Result};
use crate::io::progress::RenderProgress;
use crate::render::compositor::RenderOptions;
use crate::render::dispatcher;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dropforge")]
#[command(
    author,
    version,
    about = "Build a layered image collection from a trait configuration"
)]
/// Command-line arguments for the collection builder
pub struct Cli {
    /// Path to the collection configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub silent: bool,

    /// Number of parallel render workers
    #[arg(short, long, default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    /// Keep the raw collection directory after the archive is written
    #[arg(short, long)]
    pub keep_dir: bool,

    /// Seed for reproducible rarity draws
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.silent
    }
}

/// Orchestrates a full collection build from configuration to archive
pub struct CollectionBuilder {
    cli: Cli,
}

impl CollectionBuilder {
    /// Create a builder from parsed CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the full build: generate, render, archive
    ///
    /// Loads and validates the configuration, expands it into combinations,
    /// maps each combination onto the declared design, renders all jobs over
    /// the worker pool, archives the output directory, and removes the raw
    /// directory unless asked to keep it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unreadable or malformed, the
    /// worker pool cannot be built, archiving fails, or any render job
    /// failed once all jobs have been attempted.
    // Allow print for per-job failure feedback once dispatch has finished
    #[allow(clippy::print_stderr)]
    pub fn run(&self) -> Result<()> {
        let plan = CollectionConfig::load(&self.cli.config)?.into_plan()?;

        let mut rng = match self.cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let combinations = combination::generate(&plan.build, &mut rng);

        let jobs: Vec<_> = combinations
            .iter()
            .map(|combination| plan.design.apply(combination))
            .collect();

        let output_dir = PathBuf::from(COLLECTION_DIR);
        std::fs::create_dir_all(&output_dir).map_err(|e| BuildError::FileSystem {
            path: output_dir.clone(),
            operation: "create directory",
            source: e,
        })?;

        let options = RenderOptions {
            output_dir: output_dir.clone(),
            name_format: plan.name_format,
        };

        let progress = self
            .cli
            .should_show_progress()
            .then(|| RenderProgress::new(jobs.len()));
        let report = dispatcher::dispatch(jobs, &options, self.cli.pool_size, progress.as_ref())?;
        if let Some(progress) = &progress {
            progress.finish();
        }

        for failure in &report.failures {
            eprintln!("Job {} failed: {}", failure.unique_index, failure.error);
        }

        archive::archive_directory(&output_dir, Path::new(COLLECTION_ARCHIVE))?;
        if !self.cli.keep_dir {
            archive::remove_directory(&output_dir)?;
        }

        if report.is_clean() {
            Ok(())
        } else {
            Err(BuildError::JobsFailed {
                failed: report.failures.len(),
                total: report.total(),
            })
        }
    }
}
