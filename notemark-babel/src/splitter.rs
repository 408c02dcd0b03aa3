//! Content-length splitter
//!
//! The remote API rejects rich text longer than 2000 characters per run, and may
//! reject a whole submission as too large. This module keeps converted documents
//! under those limits.
//!
//! [`ContentLengthSplitter::split_blocks`] works on a block list: an oversized
//! paragraph becomes one paragraph per sentence, and any run still over the limit is
//! truncated.
//!
//! [`ContentLengthSplitter::submit_with_fallback`] talks to a [`BlockSink`] and
//! escalates when the sink reports the payload as too large:
//!
//! 1. the whole document in one append,
//! 2. one append per blank-line separated chunk,
//! 3. for a chunk that is still too large, one paragraph per sentence.
//!
//! Every chunk is accounted for in the returned [`SubmitReport`].

use crate::blocks::{Block, TextRun};
use crate::common::lines::normalize_line_endings;
use crate::converter::MarkdownConverter;
use crate::error::{ConversionError, SinkError};
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

/// Leaves headroom below the remote limit of 2000 characters.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1900;

static CHUNK_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid chunk break regex"));

/// Destination of converted blocks, e.g. a page on the remote side.
pub trait BlockSink {
    fn append(&mut self, blocks: &[Block]) -> Result<(), SinkError>;
}

/// Outcome of [`ContentLengthSplitter::submit_with_fallback`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitReport {
    /// Chunks that reached the sink
    pub processed: usize,
    /// Chunks attempted
    pub total: usize,
    /// Chunks the sink rejected even after sentence splitting
    pub failed: usize,
}

impl SubmitReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.processed == self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLengthSplitter {
    max_text_length: usize,
}

impl Default for ContentLengthSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEXT_LENGTH)
    }
}

impl ContentLengthSplitter {
    pub fn new(max_text_length: usize) -> Self {
        Self {
            max_text_length: max_text_length.max(1),
        }
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    /// Splits oversized paragraphs into sentences, then truncates whatever run is
    /// still too long.
    pub fn split_blocks(&self, blocks: Vec<Block>) -> Vec<Block> {
        let mut out = Vec::with_capacity(blocks.len());
        for block in blocks {
            match block {
                Block::Paragraph(ref p) if text_length(&p.rich_text) > self.max_text_length => {
                    let sentences = split_sentences(&serialize_inline(&p.rich_text));
                    log::debug!(
                        "splitting a paragraph of {} characters into {} sentences",
                        text_length(&p.rich_text),
                        sentences.len()
                    );
                    out.extend(
                        sentences
                            .into_iter()
                            .map(|sentence| Block::paragraph(parse_inline(&sentence))),
                    );
                }
                other => out.push(other),
            }
        }

        out.into_iter().map(|block| self.truncate(block)).collect()
    }

    fn truncate(&self, mut block: Block) -> Block {
        if let Some(children) = block.children_mut() {
            let truncated = std::mem::take(children)
                .into_iter()
                .map(|child| self.truncate(child))
                .collect();
            *children = truncated;
        }
        let limit = self.max_text_length;
        let kind = block.type_name();
        for runs in block.runs_mut() {
            for run in runs.iter_mut().filter(|run| run.len_chars() > limit) {
                log::warn!(
                    "truncating a {kind} text run of {} characters to {limit}",
                    run.len_chars()
                );
                run.content = run.content.chars().take(limit).collect();
            }
        }
        block
    }

    /// Converts `markdown` and appends it to `sink`, splitting further whenever the
    /// sink reports the payload as too large.
    pub fn submit_with_fallback(
        &self,
        markdown: &str,
        converter: &MarkdownConverter,
        sink: &mut dyn BlockSink,
    ) -> Result<SubmitReport, ConversionError> {
        let blocks = self.split_blocks(converter.convert(markdown));
        match sink.append(&blocks) {
            Ok(()) => {
                log::info!("processed 1/1 chunks");
                return Ok(SubmitReport {
                    processed: 1,
                    total: 1,
                    failed: 0,
                });
            }
            Err(SinkError::PayloadTooLarge(reason)) => {
                log::info!("document too large ({reason}), submitting it in chunks");
            }
            Err(err) => return Err(err.into()),
        }

        let text = normalize_line_endings(markdown);
        let chunks: Vec<&str> = CHUNK_BREAK
            .split(&text)
            .filter(|chunk| !chunk.trim().is_empty())
            .collect();
        let mut report = SubmitReport {
            total: chunks.len(),
            ..Default::default()
        };

        for (index, chunk) in chunks.iter().enumerate() {
            let blocks = self.split_blocks(converter.convert(chunk));
            match sink.append(&blocks) {
                Ok(()) => report.processed += 1,
                Err(SinkError::PayloadTooLarge(_)) => {
                    if self.submit_sentences(chunk, sink)? {
                        report.processed += 1;
                    } else {
                        log::warn!("chunk {} could not be submitted", index + 1);
                        report.failed += 1;
                    }
                }
                Err(err) => return Err(err.into()),
            }
            log::info!("processed {}/{} chunks", report.processed, report.total);
        }

        Ok(report)
    }

    /// Last resort: one plain paragraph per sentence. `false` if any was too large.
    fn submit_sentences(&self, chunk: &str, sink: &mut dyn BlockSink) -> Result<bool, ConversionError> {
        let mut complete = true;
        for sentence in split_sentences(chunk) {
            let paragraph = self.truncate(Block::paragraph(vec![TextRun::plain(sentence)]));
            match sink.append(std::slice::from_ref(&paragraph)) {
                Ok(()) => {}
                Err(SinkError::PayloadTooLarge(reason)) => {
                    log::warn!("sentence rejected as too large: {reason}");
                    complete = false;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(complete)
    }
}

fn text_length(runs: &[TextRun]) -> usize {
    runs.iter().map(TextRun::len_chars).sum()
}

/// Splits after `.`, `!` or `?` followed by whitespace; the whitespace is dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let ends_sentence = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|next| next.is_whitespace());
        if ends_sentence {
            while chars.next_if(|next| next.is_whitespace()).is_some() {}
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
    current.clear();
}
