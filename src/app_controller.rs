use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::Result;
use crate::file_utils::{FileManager, FileWarning};
use crate::validation::{OffsetValidator, RawOffset};

// @module: Application controller for subtitle shifting

/// One shift invocation: what to read, where to write, by how much
#[derive(Debug, Clone)]
pub struct ShiftRequest {
    pub input: PathBuf,
    /// Defaults to `input` (in-place edit)
    pub output: Option<PathBuf>,
    pub offset: RawOffset,
    pub backup: bool,
}

impl ShiftRequest {
    pub fn new(input: impl Into<PathBuf>, offset: impl Into<RawOffset>) -> Self {
        Self {
            input: input.into(),
            output: None,
            offset: offset.into(),
            backup: false,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Where the result will be written
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }

    pub fn is_in_place(&self) -> bool {
        self.output_path() == self.input
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct ShiftReport {
    pub subtitle_count: usize,
    pub output_path: PathBuf,
    pub backup_path: Option<PathBuf>,
    pub warnings: Vec<FileWarning>,
}

/// Main application controller for subtitle shifting
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate, optionally back up, read, shift and atomically write one file
    ///
    /// Input and output locations and the offset are all checked before the
    /// input is read; nothing is written unless parsing and shifting succeed.
    pub fn run(&self, request: &ShiftRequest) -> Result<ShiftReport> {
        let files = &self.config.files;
        let input = request.input.as_path();
        let output = request.output_path();

        FileManager::validate_input_file(input)?;
        let mut warnings = FileManager::check_file_warnings(input, files);
        FileManager::validate_output_location(output)?;

        let offset = OffsetValidator::validate(request.offset.clone())?;

        let backup_path = if request.backup {
            match FileManager::create_backup(input, &files.backup_suffix) {
                Ok(path) => {
                    info!("Created backup: {}", path.display());
                    Some(path)
                }
                Err(e) => {
                    let warning = FileWarning::BackupFailed {
                        reason: e.to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                    None
                }
            }
        } else {
            None
        };

        let collection = FileManager::read_subtitle_file(input)?;
        debug!("Parsed {} subtitles from {}", collection.len(), input.display());

        let shifted = collection.shift(offset)?;
        FileManager::write_subtitle_file(&shifted, output, &files.temp_file_suffix)?;

        let subtitle_count = shifted.len();
        info!("Successfully processed {} subtitles", subtitle_count);

        Ok(ShiftReport {
            subtitle_count,
            output_path: output.to_path_buf(),
            backup_path,
            warnings,
        })
    }
}
