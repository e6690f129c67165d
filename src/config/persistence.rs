//! Progress persistence module
//!
//! Loading never fails: absent or unreadable progress falls back to the
//! zero state. Saving replaces the stored record wholesale.

use crate::models::Progress;
use crate::{QuizError, Result, APP_NAME, PROGRESS_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage for the player's progress
pub trait ProgressStore {
    /// Read the stored progress, or the default if there is none usable
    fn load(&self) -> Progress;

    /// Overwrite the stored progress
    fn save(&mut self, progress: &Progress) -> Result<()>;
}

/// Progress stored as a JSON file
#[derive(Debug)]
pub struct FileProgressStore {
    progress_path: PathBuf,
}

impl FileProgressStore {
    /// Create a store at the standard location
    pub fn new() -> Result<Self> {
        Ok(Self::at(Self::progress_file_path()?))
    }

    /// Create a store backed by a specific file
    pub fn at(progress_path: PathBuf) -> Self {
        Self { progress_path }
    }

    /// Get the standard progress file path
    /// Uses $DATA_HOME/quizboss/progress.json
    pub fn progress_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(PROGRESS_FILE))
    }

    /// Strict read: `Ok(None)` when no file exists, an error when it can't be used
    pub fn read_progress(&self) -> Result<Option<Progress>> {
        if !self.progress_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.progress_path).map_err(|e| {
            QuizError::MalformedPersistedState(format!(
                "Failed to read progress file {}: {}",
                self.progress_path.display(),
                e
            ))
        })?;

        let value: serde_json::Value = serde_json::from_str(&content)?;
        let (progress, problems) = Progress::from_json_lenient(&value)?;
        for problem in problems {
            log::warn!(
                "Ignoring bad field in {}: {}",
                self.progress_path.display(),
                problem
            );
        }

        Ok(Some(progress))
    }

    /// Get progress file path for external access
    pub fn path(&self) -> &Path {
        &self.progress_path
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> Progress {
        match self.read_progress() {
            Ok(Some(progress)) => progress,
            Ok(None) => Progress::default(),
            Err(err) => {
                log::warn!("{}; starting from empty progress", err);
                Progress::default()
            }
        }
    }

    fn save(&mut self, progress: &Progress) -> Result<()> {
        if let Some(parent) = self.progress_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::IoError(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create progress directory {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(progress)?;
        fs::write(&self.progress_path, content)?;
        log::debug!(
            "Saved progress to {}: {} points, {} cleared",
            self.progress_path.display(),
            progress.total_points(),
            progress.cleared_count()
        );

        Ok(())
    }
}

/// In-memory progress store, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    stored: Option<Progress>,
    save_count: usize,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with previously stored progress
    pub fn with_progress(progress: Progress) -> Self {
        Self {
            stored: Some(progress),
            save_count: 0,
        }
    }

    /// Last saved progress, if any
    pub fn stored(&self) -> Option<&Progress> {
        self.stored.as_ref()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Progress {
        self.stored.clone().unwrap_or_default()
    }

    fn save(&mut self, progress: &Progress) -> Result<()> {
        self.stored = Some(progress.clone());
        self.save_count += 1;
        Ok(())
    }
}
