/*!
 * # srtshift - shift SRT subtitle timings
 *
 * A Rust library and command-line tool that moves every timestamp of an SRT
 * subtitle file by a fixed number of milliseconds.
 *
 * ## Features
 *
 * - Strict `HH:MM:SS,mmm` timestamp parsing with range checks
 * - Tolerant document parsing: malformed blocks are skipped, not fatal
 * - Shifts clamp at `00:00:00,000` and never leave an entry ending before it starts
 * - Atomic output: temp file in the target directory, then rename
 * - Optional `.backup` copy of the input
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timestamp`: The `HH:MM:SS,mmm` value type
 * - `subtitle_processor`: Subtitle entries and whole documents
 * - `validation`: Offset validation
 * - `file_utils`: File checks, UTF-8 reading, atomic writing, backups
 * - `app_controller`: The end-to-end shift pipeline
 * - `app_config`: Configuration management
 * - `errors`: Error types and exit codes
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod timestamp;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ShiftReport, ShiftRequest};
pub use errors::{AppError, SubtitleError};
pub use file_utils::{FileManager, FileWarning};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use timestamp::Timestamp;
pub use validation::{Offset, OffsetValidator, RawOffset};
