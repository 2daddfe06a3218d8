//! Command-line interface for batch solving of tileset files

use crate::algorithm::retry::solve_with_retries_observed;
use crate::algorithm::selection::SelectionPolicy;
use crate::io::configuration::{DEFAULT_CELL_SIZE, DEFAULT_SEED, OUTPUT_SUFFIX};
use crate::io::error::{Result, TileError, file_system_error, invalid_parameter};
use crate::io::export::ResultGrid;
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::tileset::Tileset;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Built-in collapse policies selectable from the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Lowest registration index
    First,
    /// Equal probability
    Uniform,
    /// Probability proportional to weight
    #[default]
    Weighted,
}

impl From<PolicyArg> for SelectionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::First => Self::First,
            PolicyArg::Uniform => Self::Uniform,
            PolicyArg::Weighted => Self::Weighted,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sockettile")]
#[command(author, version, about = "Fill grids with socket-compatible tiles")]
/// Command-line arguments for the tile solver
pub struct Cli {
    /// Tileset JSON file or directory of tileset files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum solve attempts per tileset (defaults to the file's budget)
    #[arg(short, long)]
    pub attempts: Option<usize>,

    /// Collapse policy
    #[arg(short, long, value_enum, default_value_t = PolicyArg::Weighted)]
    pub policy: PolicyArg,

    /// Override grid width
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Override grid height
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Preview cell size in pixels
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Per-file summary returned by [`FileProcessor::process`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    /// Tileset that was processed
    pub input: PathBuf,
    /// Whether a complete tiling was found
    pub solved: bool,
    /// Attempts used
    pub attempts: usize,
}

/// Orchestrates batch processing of tileset files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Every file is attempted even if an earlier one fails to solve.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or any file's I/O fails, or
    /// [`TileError::Unsolvable`] if some tileset had no solution within its
    /// attempt budget
    pub fn process(&mut self) -> Result<Vec<FileReport>> {
        let files = self.collect_files()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut reports = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            reports.push(self.process_file(file, index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        if let Some(failed) = reports.iter().find(|report| !report.solved) {
            return Err(TileError::Unsolvable {
                attempts: failed.attempts,
            });
        }
        Ok(reports)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_tileset(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a .json tileset",
                ));
            }
            return Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            });
        }

        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a tileset file or directory",
            ));
        }

        let mut files = Vec::new();
        let entries = std::fs::read_dir(target)
            .map_err(|source| file_system_error(target, "read directory", source))?;
        for entry in entries {
            let path = entry?.path();
            if is_tileset(&path) && !is_output(&path) && self.should_process_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, "json");
        if output_path.exists() {
            tracing::info!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<FileReport> {
        let start_time = Instant::now();
        let mut tileset = Tileset::from_path(input_path)?;
        if let Some(width) = self.cli.width {
            tileset.width = width;
        }
        if let Some(height) = self.cli.height {
            tileset.height = height;
        }

        let plan = tileset.retry_plan(self.cli.attempts);
        let mut solver = tileset.build_solver(self.cli.seed)?;
        solver.set_policy(self.cli.policy.into());

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, plan.max_attempts);
        }

        let progress = &mut self.progress_manager;
        let outcome = solve_with_retries_observed(&mut solver, &plan, |attempt, _| {
            if let Some(pm) = progress.as_mut() {
                pm.record_attempt(index, attempt);
            }
        })?;

        if outcome.solved {
            tracing::info!(
                input = %input_path.display(),
                attempts = outcome.attempts,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "tileset solved"
            );
        } else {
            tracing::warn!(
                input = %input_path.display(),
                attempts = outcome.attempts,
                "no consistent tiling found"
            );
        }

        ResultGrid::capture(&solver).write(&Self::get_output_path(input_path, "json"))?;
        export_grid_as_png(
            &solver,
            &tileset.palette(),
            self.cli.cell_size,
            &Self::get_output_path(input_path, "png"),
        )?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, outcome.solved);
        }

        Ok(FileReport {
            input: input_path.to_path_buf(),
            solved: outcome.solved,
            attempts: outcome.attempts,
        })
    }

    /// Output path `<stem>_result.<extension>` next to the input
    pub fn get_output_path(input_path: &Path, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_tileset(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("json")
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
