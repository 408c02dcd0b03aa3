//! Toggles: `+++ Title` followed by a pipe-prefixed body.
//!
//! ```text
//! +++ Details
//! | Hidden paragraph.
//! |
//! | - hidden list
//! ```
//!
//! A bare `+++` line right after the body closes the toggle explicitly. It is
//! accepted on input and never written.

use super::whole_construct;
use crate::blocks::{Block, TextBlock};
use crate::common::lines::split_lines;
use crate::common::nested::{self, Convention};
use crate::context::ParserContext;
use crate::element::{ElementRule, Match, MultilineRule, Nesting};
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

static TOGGLE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\+\+\s+(.+?)\s*$").expect("valid toggle regex"));

pub(crate) fn is_explicit_close(text: &str) -> bool {
    text.trim_end() == "+++"
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ToggleRule;

impl ElementRule for ToggleRule {
    fn name(&self) -> &str {
        "toggle"
    }

    fn description(&self) -> &str {
        "Collapsible sections: +++ Title with a | prefixed body"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        text.lines().any(|line| TOGGLE_START.is_match(line))
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Toggle(_))
    }

    fn markdown_to_block(&self, text: &str, ctx: &ParserContext<'_>) -> Option<Block> {
        whole_construct(self, text, ctx)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::Toggle(toggle) => Some(format!("+++ {}", serialize_inline(&toggle.rich_text))),
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

impl MultilineRule for ToggleRule {
    fn find_matches(&self, text: &str, ctx: &ParserContext<'_>) -> Vec<Match> {
        let lines = split_lines(text);
        let mut matches = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            let Some(title) = TOGGLE_START
                .captures(lines[index].text)
                .and_then(|caps| caps.get(1))
            else {
                index += 1;
                continue;
            };

            let (children, body) = nested::process(&lines, index + 1, Convention::Pipe, ctx);
            let mut last = body.next - 1;
            if lines.get(body.next).is_some_and(|l| is_explicit_close(l.text)) {
                last = body.next;
            }

            let block = Block::Toggle(TextBlock::with_children(
                parse_inline(title.as_str()),
                children,
            ));
            matches.push(Match::new(lines[index].start, lines[last].end, block));
            index = last + 1;
        }

        matches
    }
}
