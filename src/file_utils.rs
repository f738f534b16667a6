use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::{Builder, NamedTempFile};

use crate::app_config::FileConfig;
use crate::errors::{Result, SubtitleError};
use crate::subtitle_processor::SubtitleCollection;

// @module: File and directory utilities

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Non-fatal conditions noticed while processing a file
#[derive(Debug, Clone, PartialEq)]
pub enum FileWarning {
    /// Input does not carry one of the accepted subtitle extensions
    UnexpectedExtension { path: PathBuf },
    /// Input is larger than the configured threshold
    LargeFile { size_bytes: u64, threshold_bytes: u64 },
    /// The backup copy could not be made; processing went on without it
    BackupFailed { reason: String },
}

impl fmt::Display for FileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedExtension { path } => write!(
                f,
                "Input file does not have .srt extension: {}. Proceeding anyway.",
                path.display()
            ),
            Self::LargeFile { size_bytes, threshold_bytes } => write!(
                f,
                "Large file detected ({:.1}MB, threshold {:.1}MB). Processing may take time.",
                *size_bytes as f64 / BYTES_PER_MB,
                *threshold_bytes as f64 / BYTES_PER_MB
            ),
            Self::BackupFailed { reason } => write!(f, "Could not create backup file: {}", reason),
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Exists, is a regular file, can be opened for reading
    pub fn validate_input_file<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SubtitleError::file(format!("Input file does not exist: {}", path.display())));
        }
        if !path.is_file() {
            return Err(SubtitleError::file(format!("Input path is not a file: {}", path.display())));
        }
        File::open(path).map_err(|e| {
            SubtitleError::file(format!("Input file is not readable: {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    // @creates: Parent directory of the output if needed
    // @checks: That directory accepts new files
    pub fn validate_output_location<P: AsRef<Path>>(path: P) -> Result<()> {
        let parent = Self::parent_dir(path.as_ref());

        Self::ensure_dir(&parent)
            .map_err(|e| SubtitleError::file(format!("Cannot create output directory: {}", e)))?;

        // A throwaway temp file is the only portable writability probe
        Builder::new()
            .prefix(".srtshift-probe")
            .tempfile_in(&parent)
            .map_err(|e| {
                SubtitleError::file(format!(
                    "Output directory is not writable: {}: {}",
                    parent.display(),
                    e
                ))
            })?;

        Ok(())
    }

    /// Collect non-fatal warnings about the input file and log each one
    pub fn check_file_warnings<P: AsRef<Path>>(path: P, config: &FileConfig) -> Vec<FileWarning> {
        let path = path.as_ref();
        let mut warnings = Vec::new();

        let extension_ok = path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                config
                    .valid_extensions
                    .iter()
                    .any(|valid| valid.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false);
        if !extension_ok {
            warnings.push(FileWarning::UnexpectedExtension {
                path: path.to_path_buf(),
            });
        }

        match fs::metadata(path) {
            Ok(metadata) if metadata.len() > config.max_file_size_bytes => {
                warnings.push(FileWarning::LargeFile {
                    size_bytes: metadata.len(),
                    threshold_bytes: config.max_file_size_bytes,
                });
            }
            Ok(_) => {}
            Err(e) => debug!("Could not stat {} for size check: {}", path.display(), e),
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        warnings
    }

    /// Read a UTF-8 subtitle file and parse it
    pub fn read_subtitle_file<P: AsRef<Path>>(path: P) -> Result<SubtitleCollection> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| {
            SubtitleError::file(format!("Error reading input file {}: {}", path.display(), e))
        })?;
        let content = String::from_utf8(bytes)
            .map_err(|e| SubtitleError::format(format!("File is not valid UTF-8 text: {}", e)))?;

        SubtitleCollection::parse(&content)
    }

    /// Render a collection and write it atomically to `path`
    pub fn write_subtitle_file<P: AsRef<Path>>(
        collection: &SubtitleCollection,
        path: P,
        temp_suffix: &str,
    ) -> Result<()> {
        Self::write_atomic(path, &collection.render(), temp_suffix)
    }

    /// Write `content` to a temp file next to `path`, then rename it over `path`
    ///
    /// Readers of `path` see either the old file or the complete new one. On any
    /// failure the temp file is removed and the target is left as it was.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str, temp_suffix: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = Self::parent_dir(path);

        let write_err = |e: io::Error| {
            SubtitleError::file(format!("Error writing output file {}: {}", path.display(), e))
        };

        let mut temp = Builder::new()
            .prefix(".srtshift-")
            .suffix(temp_suffix)
            .tempfile_in(&parent)
            .map_err(write_err)?;
        debug!("Writing to temp file {}", temp.path().display());

        if let Err(e) = Self::fill_temp_file(&mut temp, content) {
            Self::discard_temp_file(temp);
            return Err(write_err(e));
        }

        // Keep the mode of a file being replaced in place
        if let Ok(metadata) = fs::metadata(path) {
            if metadata.is_file() {
                if let Err(e) = fs::set_permissions(temp.path(), metadata.permissions()) {
                    debug!("Could not copy permissions of {}: {}", path.display(), e);
                }
            }
        }

        temp.persist(path).map_err(|e| {
            Self::discard_temp_file(e.file);
            write_err(e.error)
        })?;

        Ok(())
    }

    /// Copy `path` to `<path><suffix>` and return the backup path
    ///
    /// The copy keeps the permission bits and the modification time of the source.
    pub fn create_backup<P: AsRef<Path>>(path: P, suffix: &str) -> io::Result<PathBuf> {
        let path = path.as_ref();
        let backup_path = Self::backup_path(path, suffix);
        fs::copy(path, &backup_path)?;

        let modified = fs::metadata(path)?.modified()?;
        File::options()
            .write(true)
            .open(&backup_path)?
            .set_modified(modified)?;

        Ok(backup_path)
    }

    /// `movie.srt` + `.backup` -> `movie.srt.backup`
    pub fn backup_path<P: AsRef<Path>>(path: P, suffix: &str) -> PathBuf {
        let mut name: OsString = path.as_ref().as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @returns: Directory holding `path`, "." for bare file names
    fn parent_dir(path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn fill_temp_file(temp: &mut NamedTempFile, content: &str) -> io::Result<()> {
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.as_file().sync_all()
    }

    fn discard_temp_file(temp: NamedTempFile) {
        let temp_path = temp.path().to_path_buf();
        if let Err(e) = temp.close() {
            debug!("Could not remove temp file {}: {}", temp_path.display(), e);
        }
    }
}
