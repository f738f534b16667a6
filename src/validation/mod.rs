/*!
 * Input validation that must succeed before any file is touched.
 *
 * - `offset`: bounds-checks and normalizes the requested shift
 */

pub mod offset;

// Re-export main types
pub use offset::{MAX_OFFSET_MS, Offset, OffsetValidator, RawOffset};
