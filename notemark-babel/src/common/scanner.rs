//! Line scanner
//!
//! Walks the lines that no multiline rule claimed and turns them into blocks with the
//! single-line rules. Runs of unrecognised lines accumulate into one paragraph.
//!
//! | Line                         | Effect                                          |
//! |------------------------------|-------------------------------------------------|
//! | inside a claimed span        | skipped                                         |
//! | `<!-- spacer -->`            | flush, emit an empty paragraph                  |
//! | blank                        | flush                                           |
//! | recognised by a rule         | flush, emit (list items also take their children) |
//! | anything else                | appended to the paragraph                       |
//!
//! Every returned [`Match`] uses the same offsets as the multiline claims, so the
//! assembler can merge both by position.

use super::lines::{join, split_lines, Line};
use super::nested::{self, Convention};
use crate::blocks::Block;
use crate::context::ParserContext;
use crate::element::{ElementRule, Match};
use crate::registry::RuleRegistry;

/// Marks an intentionally empty paragraph.
pub const SPACER_MARKER: &str = "<!-- spacer -->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    AccumulatingParagraph,
    InTodoSequence,
    SkippingClaimed,
}

pub struct LineScanner<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> LineScanner<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// Scans `text`, skipping the spans in `claimed` (sorted, non-overlapping).
    pub fn scan(&self, text: &str, claimed: &[Match], ctx: &ParserContext<'_>) -> Vec<Match> {
        let lines = split_lines(text);
        let mut scan = Scan {
            scanner: self,
            ctx,
            state: ScanState::Idle,
            paragraph: Vec::new(),
            out: Vec::new(),
        };
        let mut claims = claimed.iter().peekable();
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index];
            while claims.next_if(|m| m.end < line.start).is_some() {}

            if claims
                .peek()
                .is_some_and(|m| m.start <= line.start && line.start <= m.end)
            {
                scan.flush();
                scan.state = ScanState::SkippingClaimed;
                index += 1;
                continue;
            }

            index = scan.line(&lines, index);
        }

        scan.flush();
        scan.out
    }

    /// First non-fallback single-line rule that recognises the line and builds a
    /// block other than a paragraph.
    fn recognise(&self, line: &str, ctx: &ParserContext<'_>) -> Option<(&'r dyn ElementRule, Block)> {
        let fallback = self.registry.fallback().name();
        self.registry
            .single_line_rules()
            .iter()
            .filter(|rule| rule.name() != fallback && rule.matches_markdown(line))
            .find_map(|rule| {
                rule.markdown_to_block(line, ctx)
                    .filter(|block| !matches!(block, Block::Paragraph(_)))
                    .map(|block| (rule.as_ref(), block))
            })
    }
}

struct Scan<'s, 'r, 'c, 't> {
    scanner: &'s LineScanner<'r>,
    ctx: &'s ParserContext<'c>,
    state: ScanState,
    paragraph: Vec<Line<'t>>,
    out: Vec<Match>,
}

impl<'s, 'r, 'c, 't> Scan<'s, 'r, 'c, 't> {
    /// Handles `lines[index]` and returns the index of the next unhandled line.
    fn line(&mut self, lines: &[Line<'t>], index: usize) -> usize {
        let line = lines[index];

        if line.text.trim() == SPACER_MARKER {
            self.flush();
            self.out
                .push(Match::new(line.start, line.end, Block::empty_paragraph()));
            self.state = ScanState::Idle;
            return index + 1;
        }

        if line.is_blank() {
            self.flush();
            self.state = ScanState::Idle;
            return index + 1;
        }

        let Some((rule, mut block)) = self.scanner.recognise(line.text, self.ctx) else {
            self.paragraph.push(line);
            self.state = ScanState::AccumulatingParagraph;
            return index + 1;
        };

        self.flush();
        let mut end = line.end;
        let mut next = index + 1;
        if rule.absorbs_indented_children() {
            let (children, body) = nested::process(lines, next, Convention::Indent, self.ctx);
            if !body.is_empty() {
                if let Some(slot) = block.children_mut() {
                    slot.extend(children);
                }
                end = lines[body.next - 1].end;
                next = body.next;
            }
        }

        self.state = if matches!(block, Block::ToDo(_)) {
            ScanState::InTodoSequence
        } else {
            ScanState::Idle
        };
        self.out.push(Match::new(line.start, end, block));
        next
    }

    fn flush(&mut self) {
        if self.state != ScanState::AccumulatingParagraph || self.paragraph.is_empty() {
            self.paragraph.clear();
            return;
        }
        let start = self.paragraph[0].start;
        let end = self.paragraph[self.paragraph.len() - 1].end;
        let text = join(
            &self
                .paragraph
                .iter()
                .map(|line| line.text.trim())
                .collect::<Vec<_>>(),
        );
        self.paragraph.clear();
        self.state = ScanState::Idle;

        if let Some(block) = self
            .scanner
            .registry
            .fallback()
            .markdown_to_block(&text, self.ctx)
        {
            self.out.push(Match::new(start, end, block));
        }
    }
}
