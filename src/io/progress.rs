//! Multi-file progress tracking over solve attempts

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Display state of one tileset file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileState {
    /// File name shown next to the bar
    pub name: String,
    /// Attempts made so far
    pub attempt: usize,
    /// Attempt budget
    pub max_attempts: usize,
    /// Final outcome once known
    pub outcome: Option<bool>,
}

impl FileState {
    /// Label prefixed with the outcome marker
    pub fn label(&self) -> String {
        match self.outcome {
            Some(true) => format!("✓ {}", self.name),
            Some(false) => format!("✗ {}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Coordinates progress display for batch operations
///
/// Shows the most recent files as individual bars and, for large batches,
/// an extra bar counting finished files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:20} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Tilesets: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Create bars for a batch of `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(ATTEMPT_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
        self.file_states = vec![FileState::default(); file_count];
    }

    /// Begin tracking a file
    pub fn start_file(&mut self, index: usize, path: &Path, max_attempts: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                attempt: 0,
                max_attempts,
                outcome: None,
            };
        }
        self.update_bars();
    }

    /// Record a finished attempt
    pub fn record_attempt(&mut self, index: usize, attempt: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.attempt = attempt;
        }
        self.update_bars();
    }

    /// Mark a file as finished
    pub fn complete_file(&mut self, index: usize, solved: bool) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.file_states.get_mut(index) {
            state.outcome = Some(solved);
        }
        self.update_bars();
    }

    /// Tracked state of a file
    pub fn state(&self, index: usize) -> Option<&FileState> {
        self.file_states.get(index)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All tilesets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recently started files on the available bars
    fn update_bars(&self) {
        let active: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (slot, bar) in self.file_bars.iter().enumerate() {
            match visible.get(slot) {
                Some(state) => {
                    bar.set_length(state.max_attempts as u64);
                    bar.set_position(state.attempt as u64);
                    bar.set_message(format!("attempt {}/{}", state.attempt, state.max_attempts));
                    bar.set_prefix(state.label());
                }
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_message(String::new());
                    bar.set_prefix(String::new());
                }
            }
        }
    }
}
