//! Toggleable headings: `+#`, `+##` or `+###` with a collapsible body.
//!
//! The body is pipe-prefixed like a toggle's; an indented body is accepted too.

use super::toggle::is_explicit_close;
use super::whole_construct;
use crate::blocks::{Block, Heading};
use crate::common::lines::split_lines;
use crate::common::nested::{self, Convention};
use crate::context::ParserContext;
use crate::element::{ElementRule, Match, MultilineRule, Nesting};
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

static TOGGLEABLE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+(#{1,3})\s+(.+?)\s*$").expect("valid toggleable heading regex")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct ToggleableHeadingRule;

impl ElementRule for ToggleableHeadingRule {
    fn name(&self) -> &str {
        "toggleable_heading"
    }

    fn description(&self) -> &str {
        "Collapsible headings: +# Title with a | prefixed body"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        text.lines().any(|line| TOGGLEABLE_HEADING.is_match(line))
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Heading(h) if h.is_toggleable)
    }

    fn markdown_to_block(&self, text: &str, ctx: &ParserContext<'_>) -> Option<Block> {
        whole_construct(self, text, ctx)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::Heading(h) if h.is_toggleable => Some(format!(
                "+{} {}",
                "#".repeat(h.level.clamp(1, 3) as usize),
                serialize_inline(&h.rich_text)
            )),
            _ => None,
        }
    }

    fn nesting(&self) -> Nesting {
        Nesting::Pipe
    }

    fn as_multiline(&self) -> Option<&dyn MultilineRule> {
        Some(self)
    }
}

impl MultilineRule for ToggleableHeadingRule {
    fn find_matches(&self, text: &str, ctx: &ParserContext<'_>) -> Vec<Match> {
        let lines = split_lines(text);
        let mut matches = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            let Some(caps) = TOGGLEABLE_HEADING.captures(lines[index].text) else {
                index += 1;
                continue;
            };
            let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u8;
            let title = caps.get(2).map_or("", |m| m.as_str());

            let convention = match lines.get(index + 1) {
                Some(next) if next.is_indented() => Convention::Indent,
                _ => Convention::Pipe,
            };
            let (children, body) = nested::process(&lines, index + 1, convention, ctx);
            let mut last = body.next - 1;
            if lines.get(body.next).is_some_and(|l| is_explicit_close(l.text)) {
                last = body.next;
            }

            let mut heading = Heading::new(level, parse_inline(title));
            heading.is_toggleable = true;
            heading.children = children;
            matches.push(Match::new(
                lines[index].start,
                lines[last].end,
                Block::Heading(heading),
            ));
            index = last + 1;
        }

        matches
    }
}
