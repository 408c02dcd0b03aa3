//! Submission with size fallback

use crate::common::init_logging;
use notemark_babel::{
    Block, BlockSink, ContentLengthSplitter, ConversionError, MarkdownConverter, SinkError,
    SubmitReport,
};

/// Accepts appends whose total plain text stays under `limit` characters.
struct MockSink {
    limit: usize,
    appended: Vec<Vec<Block>>,
    reject_everything: bool,
}

impl MockSink {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            appended: Vec::new(),
            reject_everything: false,
        }
    }
}

fn text_size(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|b| b.plain_text().chars().count() + text_size(b.children()))
        .sum()
}

impl BlockSink for MockSink {
    fn append(&mut self, blocks: &[Block]) -> Result<(), SinkError> {
        if self.reject_everything {
            return Err(SinkError::Rejected("unauthorized".to_string()));
        }
        let size = text_size(blocks);
        if size > self.limit {
            return Err(SinkError::PayloadTooLarge(format!("{size} > {}", self.limit)));
        }
        self.appended.push(blocks.to_vec());
        Ok(())
    }
}

fn submit(markdown: &str, sink: &mut MockSink) -> Result<SubmitReport, ConversionError> {
    init_logging();
    ContentLengthSplitter::default().submit_with_fallback(
        markdown,
        &MarkdownConverter::standard(),
        sink,
    )
}

#[test]
fn test_small_document_goes_in_one_append() {
    let mut sink = MockSink::new(1000);
    let report = submit("# Title\n\nBody text.", &mut sink).unwrap();
    assert_eq!(
        report,
        SubmitReport {
            processed: 1,
            total: 1,
            failed: 0
        }
    );
    assert!(report.is_complete());
    assert_eq!(sink.appended.len(), 1);
    assert_eq!(sink.appended[0].len(), 2);
}

#[test]
fn test_large_document_falls_back_to_chunks() {
    let chunk = "a".repeat(30);
    let md = format!("{chunk}\n\n{chunk}\n\n{chunk}");
    let mut sink = MockSink::new(40);
    let report = submit(&md, &mut sink).unwrap();
    assert_eq!(
        report,
        SubmitReport {
            processed: 3,
            total: 3,
            failed: 0
        }
    );
    assert_eq!(sink.appended.len(), 3);
}

#[test]
fn test_large_chunk_falls_back_to_sentences() {
    let sentence = format!("{}.", "b".repeat(29));
    let md = format!("{sentence} {sentence}");
    let mut sink = MockSink::new(40);
    let report = submit(&md, &mut sink).unwrap();
    assert_eq!(
        report,
        SubmitReport {
            processed: 1,
            total: 1,
            failed: 0
        }
    );
    assert_eq!(sink.appended.len(), 2);
    assert_eq!(sink.appended[0][0].plain_text(), sentence);
}

#[test]
fn test_oversized_sentence_is_counted_as_failed() {
    let md = format!("ok\n\n{}", "c".repeat(60));
    let mut sink = MockSink::new(40);
    let report = submit(&md, &mut sink).unwrap();
    assert_eq!(report.total, 2);
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 1);
    assert!(!report.is_complete());
}

#[test]
fn test_other_sink_errors_abort() {
    let mut sink = MockSink::new(1000);
    sink.reject_everything = true;
    let err = submit("text", &mut sink).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Sink(SinkError::Rejected(ref reason)) if reason == "unauthorized"
    ));
}
