//! Runner configuration

use std::path::PathBuf;

/// Subdirectory of the source root holding test data, handed to every selected backend.
pub const DEFAULT_DATA_SUBDIR: &str = "testdata";

/// Output format for progress and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable progress lines
    #[default]
    Text,
    /// A single JSON summary object once the run completes
    Json,
}

/// Settings for one dispatcher invocation.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// User backend filter; empty runs every backend
    pub backend_filter: String,
    /// Resolved source root
    pub srcdir: PathBuf,
    /// Data directory beneath `srcdir`
    pub data_subdir: PathBuf,
    /// Report format
    pub format: ReportFormat,
    /// Report skipped backends and per-backend results too
    pub verbose: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            backend_filter: String::new(),
            srcdir: PathBuf::from("."),
            data_subdir: PathBuf::from(DEFAULT_DATA_SUBDIR),
            format: ReportFormat::Text,
            verbose: false,
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend filter
    pub fn with_backend_filter(mut self, filter: impl Into<String>) -> Self {
        self.backend_filter = filter.into();
        self
    }

    /// Set the source root
    pub fn with_srcdir(mut self, srcdir: impl Into<PathBuf>) -> Self {
        self.srcdir = srcdir.into();
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Directory every selected backend is pointed at: `<srcdir>/testdata`.
    pub fn datadir(&self) -> PathBuf {
        self.srcdir.join(&self.data_subdir)
    }
}
