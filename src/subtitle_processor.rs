use std::fmt;
use std::slice;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SubtitleError};
use crate::timestamp::Timestamp;
use crate::validation::Offset;

// @module: Subtitle parsing, shifting and serialization

// @const: SRT timing line, two timestamps joined by " --> "
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})\s*$")
        .expect("valid timing line regex")
});

/// Minimum number of lines in a block: number, timing line, one text line
pub const MIN_BLOCK_LINES: usize = 3;

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number, as written in the file
    seq_num: u64,

    // @field: Start time
    start: Timestamp,

    // @field: End time, never before start
    end: Timestamp,

    // @field: Text lines, right-trimmed
    text: Vec<String>,
}

impl SubtitleEntry {
    // @creates: Validated subtitle entry
    // @validates: Positive sequence number; end is pulled up to start if earlier
    pub fn new(seq_num: u64, start: Timestamp, end: Timestamp, text: Vec<String>) -> Result<Self> {
        if seq_num == 0 {
            return Err(SubtitleError::format("Subtitle number must be positive, got 0"));
        }

        let end = if end < start {
            debug!("Entry {}: end {} before start {}, clamping", seq_num, end, start);
            start
        } else {
            end
        };

        Ok(SubtitleEntry {
            seq_num,
            start,
            end,
            text,
        })
    }

    /// Build an entry from the non-blank lines of one SRT block
    ///
    /// Line 0 is the sequence number, line 1 the timing line, the rest is text.
    pub fn from_block<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        if lines.len() < MIN_BLOCK_LINES {
            return Err(SubtitleError::format(format!(
                "Subtitle must have at least {} lines (number, timing, text), got {}",
                MIN_BLOCK_LINES,
                lines.len()
            )));
        }

        let number_line = lines[0].as_ref();
        let seq_num: u64 = number_line
            .trim()
            .parse()
            .map_err(|_| SubtitleError::format(format!("Invalid subtitle number: {}", number_line)))?;

        let timing_line = lines[1].as_ref();
        let caps = TIMING_LINE_REGEX
            .captures(timing_line)
            .ok_or_else(|| SubtitleError::format(format!("Invalid timing format: {}", timing_line)))?;

        let parse_ts = |text: &str| {
            Timestamp::parse(text).map_err(|e| {
                SubtitleError::format(format!("Invalid timing line '{}': {}", timing_line, e))
            })
        };
        let start = parse_ts(&caps[1])?;
        let end = parse_ts(&caps[2])?;

        let text = lines[2..]
            .iter()
            .map(|line| line.as_ref().trim_end().to_string())
            .collect();

        Self::new(seq_num, start, end, text)
    }

    /// Lines of this entry as written to an SRT file, blank separator included
    pub fn to_block(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.text.len() + 3);
        lines.push(self.seq_num.to_string());
        lines.push(self.timing_line());
        lines.extend(self.text.iter().cloned());
        lines.push(String::new());
        lines
    }

    /// Shift both timestamps by `offset`; number and text are kept
    pub fn shift(&self, offset: Offset) -> Result<Self> {
        let start = self.start.shift(offset)?;
        let end = self.end.shift(offset)?;
        Self::new(self.seq_num, start, end, self.text.clone())
    }

    /// `start --> end`
    pub fn timing_line(&self) -> String {
        format!("{} --> {}", self.start, self.end)
    }

    pub fn seq_num(&self) -> u64 {
        self.seq_num
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn text(&self) -> &[String] {
        &self.text
    }

    /// Display duration of the entry
    pub fn duration_ms(&self) -> u64 {
        self.end.as_millis() - self.start.as_millis()
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{}", self.timing_line())?;
        for line in &self.text {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Ordered, non-empty list of subtitle entries in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCollection {
    entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Wrap already-built entries; an empty list is rejected
    pub fn from_entries(entries: Vec<SubtitleEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SubtitleError::format("SRT file must contain at least one subtitle"));
        }
        Ok(SubtitleCollection { entries })
    }

    /// Parse SRT text
    ///
    /// Blocks are runs of non-blank lines. A block with fewer than three lines,
    /// or one that fails to parse, is dropped on its own; parsing only fails
    /// when the content is blank or no block survives.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(SubtitleError::format("File is empty"));
        }

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        let mut block: Vec<&str> = Vec::new();
        let mut block_start_line = 0usize;

        let mut flush = |block: &mut Vec<&str>, first_line: usize| {
            if block.is_empty() {
                return;
            }
            if block.len() < MIN_BLOCK_LINES {
                debug!(
                    "Skipping block at line {}: only {} line(s)",
                    first_line,
                    block.len()
                );
                skipped += 1;
            } else {
                match SubtitleEntry::from_block(block.as_slice()) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => {
                        debug!("Skipping block at line {}: {}", first_line, e);
                        skipped += 1;
                    }
                }
            }
            block.clear();
        };

        for (idx, raw_line) in content.split('\n').enumerate() {
            let line = raw_line.trim_end();
            if line.is_empty() {
                flush(&mut block, block_start_line);
            } else {
                if block.is_empty() {
                    block_start_line = idx + 1;
                }
                block.push(line);
            }
        }
        flush(&mut block, block_start_line);

        if skipped > 0 {
            warn!("Skipped {} malformed subtitle block(s)", skipped);
        }

        if entries.is_empty() {
            return Err(SubtitleError::format("No valid SRT timestamp format found in file"));
        }

        Ok(SubtitleCollection { entries })
    }

    /// Serialize back to SRT text, entries in their original order
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .flat_map(SubtitleEntry::to_block)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Shift every entry, returning a new collection
    pub fn shift(&self, offset: Offset) -> Result<Self> {
        let entries = self
            .entries
            .iter()
            .map(|entry| entry.shift(offset))
            .collect::<Result<Vec<_>>>()?;
        Ok(SubtitleCollection { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed collection
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, SubtitleEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[SubtitleEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a SubtitleCollection {
    type Item = &'a SubtitleEntry;
    type IntoIter = slice::Iter<'a, SubtitleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}
