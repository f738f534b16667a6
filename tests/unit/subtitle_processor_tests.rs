/*!
 * Tests for subtitle entry and collection functionality
 */

use srtshift::errors::SubtitleError;
use srtshift::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use srtshift::timestamp::Timestamp;
use srtshift::validation::Offset;

use crate::common;

fn ts(text: &str) -> Timestamp {
    Timestamp::parse(text).unwrap()
}

fn offset(ms: i64) -> Offset {
    Offset::from_millis(ms).unwrap()
}

/// Test building an entry from a well-formed block
#[test]
fn test_fromBlock_withValidBlock_shouldParseAllFields() {
    let entry = SubtitleEntry::from_block(&[
        "7",
        "00:01:01,234 --> 00:01:05,432",
        "Hello   ",
        "World",
    ])
    .unwrap();

    assert_eq!(entry.seq_num(), 7);
    assert_eq!(entry.start(), ts("00:01:01,234"));
    assert_eq!(entry.end(), ts("00:01:05,432"));
    assert_eq!(entry.text(), &["Hello".to_string(), "World".to_string()]);
    assert_eq!(entry.duration_ms(), 4198);
}

#[test]
fn test_fromBlock_withTrailingWhitespaceOnTimingLine_shouldAccept() {
    let entry = SubtitleEntry::from_block(&["1", "00:00:01,000 --> 00:00:02,000  ", "Hi"]).unwrap();
    assert_eq!(entry.end(), ts("00:00:02,000"));
}

#[test]
fn test_fromBlock_withBadNumber_shouldFailNamingLine() {
    let err = SubtitleEntry::from_block(&["one", "00:00:01,000 --> 00:00:02,000", "Hi"]).unwrap_err();
    assert!(matches!(err, SubtitleError::Format(_)));
    assert!(err.to_string().contains("one"));
}

#[test]
fn test_fromBlock_withZeroNumber_shouldFail() {
    let err = SubtitleEntry::from_block(&["0", "00:00:01,000 --> 00:00:02,000", "Hi"]).unwrap_err();
    assert!(matches!(err, SubtitleError::Format(_)));
}

#[test]
fn test_fromBlock_withLargeNumber_shouldKeepItVerbatim() {
    let entry = SubtitleEntry::from_block(&[
        "18446744073709551615",
        "00:00:01,000 --> 00:00:02,000",
        "Hi",
    ])
    .unwrap();

    assert_eq!(entry.seq_num(), u64::MAX);
    assert_eq!(entry.to_block()[0], "18446744073709551615");
}

#[test]
fn test_fromBlock_withNumberPastU64_shouldFail() {
    let err = SubtitleEntry::from_block(&[
        "18446744073709551616",
        "00:00:01,000 --> 00:00:02,000",
        "Hi",
    ])
    .unwrap_err();
    assert!(matches!(err, SubtitleError::Format(_)));
}

#[test]
fn test_fromBlock_withNonAsciiDigits_shouldFail() {
    // Arabic-Indic digits in the number line and in the timing line
    let number = SubtitleEntry::from_block(&["١", "00:00:01,000 --> 00:00:02,000", "Hi"]);
    let timing = SubtitleEntry::from_block(&["1", "٠٠:00:01,000 --> 00:00:02,000", "Hi"]);

    assert!(matches!(number, Err(SubtitleError::Format(_))));
    assert!(matches!(timing, Err(SubtitleError::Format(_))));
}

#[test]
fn test_fromBlock_withBadArrow_shouldFailNamingLine() {
    let line = "00:00:01,000 -> 00:00:02,000";
    let err = SubtitleEntry::from_block(&["1", line, "Hi"]).unwrap_err();
    assert!(matches!(err, SubtitleError::Format(_)));
    assert!(err.to_string().contains(line));
}

#[test]
fn test_fromBlock_withPeriodTimestamp_shouldFail() {
    let err = SubtitleEntry::from_block(&["1", "00:00:01.000 --> 00:00:02,000", "Hi"]).unwrap_err();
    assert!(matches!(err, SubtitleError::Format(_)));
}

#[test]
fn test_fromBlock_withOutOfRangeTimestamp_shouldSurfaceAsFormatError() {
    let line = "00:61:00,000 --> 00:62:00,000";
    let err = SubtitleEntry::from_block(&["1", line, "Hi"]).unwrap_err();
    assert!(matches!(err, SubtitleError::Format(_)));
    assert!(err.to_string().contains(line));
}

#[test]
fn test_fromBlock_withTooFewLines_shouldFail() {
    let err = SubtitleEntry::from_block(&["1", "00:00:01,000 --> 00:00:02,000"]).unwrap_err();
    assert!(matches!(err, SubtitleError::Format(_)));
}

#[test]
fn test_new_withEndBeforeStart_shouldClampEndToStart() {
    let entry = SubtitleEntry::new(1, ts("00:00:05,000"), ts("00:00:03,000"), vec!["x".into()]).unwrap();
    assert_eq!(entry.start(), ts("00:00:05,000"));
    assert_eq!(entry.end(), ts("00:00:05,000"));
}

#[test]
fn test_toBlock_shouldEndWithBlankSeparator() {
    let entry = SubtitleEntry::from_block(&["3", "00:00:01,000 --> 00:00:02,500", "a", "b"]).unwrap();
    assert_eq!(
        entry.to_block(),
        vec!["3", "00:00:01,000 --> 00:00:02,500", "a", "b", ""]
    );
    assert_eq!(entry.to_string(), "3\n00:00:01,000 --> 00:00:02,500\na\nb\n\n");
}

#[test]
fn test_entryShift_shouldKeepNumberAndText() {
    let entry = SubtitleEntry::from_block(&["4", "00:00:01,000 --> 00:00:03,000", "Hello"]).unwrap();
    let shifted = entry.shift(offset(1000)).unwrap();

    assert_eq!(shifted.seq_num(), 4);
    assert_eq!(shifted.text(), entry.text());
    assert_eq!(shifted.timing_line(), "00:00:02,000 --> 00:00:04,000");
    // original untouched
    assert_eq!(entry.timing_line(), "00:00:01,000 --> 00:00:03,000");
}

#[test]
fn test_entryShift_withBothClamped_shouldCollapseToZero() {
    let entry = SubtitleEntry::from_block(&["1", "00:00:00,500 --> 00:00:01,000", "Hi"]).unwrap();
    let shifted = entry.shift(offset(-1000)).unwrap();
    assert_eq!(shifted.timing_line(), "00:00:00,000 --> 00:00:00,000");
}

#[test]
fn test_parse_withSampleFile_shouldKeepOrderAndNumbers() {
    let collection = SubtitleCollection::parse(common::SAMPLE_SRT).unwrap();
    assert_eq!(collection.len(), 3);
    assert!(!collection.is_empty());

    let numbers: Vec<u64> = collection.iter().map(|e| e.seq_num()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(collection.entries()[1].text(), &["It contains multiple entries.".to_string()]);
}

#[test]
fn test_parse_withEmptyContent_shouldFailAsEmpty() {
    for content in ["", "   ", "\n\n\t\n"] {
        let err = SubtitleCollection::parse(content).unwrap_err();
        assert_eq!(err, SubtitleError::Format("File is empty".to_string()));
    }
}

#[test]
fn test_parse_withOneMalformedBlock_shouldKeepTheOtherTwo() {
    common::init_test_logging();
    let content = "1
00:00:01,000 --> 00:00:02,000
First

2
00:00:03.000 --> 00:00:04,000
Broken timing

3
00:00:05,000 --> 00:00:06,000
Third
";
    let collection = SubtitleCollection::parse(content).unwrap();
    assert_eq!(collection.len(), 2);
    let numbers: Vec<u64> = collection.iter().map(|e| e.seq_num()).collect();
    assert_eq!(numbers, vec![1, 3]);
}

#[test]
fn test_parse_withShortBlock_shouldSkipIt() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nKept\n";
    let collection = SubtitleCollection::parse(content).unwrap();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.entries()[0].seq_num(), 2);
}

#[test]
fn test_parse_withNoValidBlocks_shouldFail() {
    let err = SubtitleCollection::parse("just some text\nnot subtitles\nat all\n").unwrap_err();
    assert!(matches!(err, SubtitleError::Format(_)));
}

#[test]
fn test_parse_withoutTrailingNewline_shouldFlushLastBlock() {
    let collection = SubtitleCollection::parse("1\n00:00:01,000 --> 00:00:02,000\nLast").unwrap();
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_parse_withCrlfLineEndings_shouldParse() {
    let content = "1\r\n00:00:01,000 --> 00:00:02,000\r\nHi\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nThere\r\n";
    let collection = SubtitleCollection::parse(content).unwrap();
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.entries()[1].text(), &["There".to_string()]);
}

#[test]
fn test_parse_shouldNotRenumberOrReorder() {
    let content = "10\n00:00:05,000 --> 00:00:06,000\nLater\n\n3\n00:00:01,000 --> 00:00:02,000\nEarlier\n";
    let collection = SubtitleCollection::parse(content).unwrap();
    let numbers: Vec<u64> = collection.iter().map(|e| e.seq_num()).collect();
    assert_eq!(numbers, vec![10, 3]);
}

#[test]
fn test_render_withZeroShift_shouldReproduceInput() {
    let collection = SubtitleCollection::parse(common::SAMPLE_SRT).unwrap();
    let shifted = collection.shift(Offset::ZERO).unwrap();
    assert_eq!(shifted.render(), common::SAMPLE_SRT);
}

#[test]
fn test_shift_shouldReturnNewCollectionAndLeaveOriginal() {
    let collection = SubtitleCollection::parse("1\n00:00:01,000 --> 00:00:03,000\nHello\n").unwrap();
    let shifted = collection.shift(offset(1000)).unwrap();

    let rendered = shifted.render();
    assert!(rendered.contains("00:00:02,000 --> 00:00:04,000"));
    assert!(rendered.contains("Hello"));
    assert!(collection.render().contains("00:00:01,000 --> 00:00:03,000"));
}

#[test]
fn test_fromEntries_withEmptyList_shouldFail() {
    assert!(matches!(
        SubtitleCollection::from_entries(Vec::new()),
        Err(SubtitleError::Format(_))
    ));
}

#[test]
fn test_collection_intoIterator_shouldVisitInOrder() {
    let collection = SubtitleCollection::parse(common::SAMPLE_SRT).unwrap();
    let mut seen = Vec::new();
    for entry in &collection {
        seen.push(entry.start());
    }
    assert_eq!(seen, vec![ts("00:00:01,000"), ts("00:00:05,000"), ts("00:00:10,000")]);
}
