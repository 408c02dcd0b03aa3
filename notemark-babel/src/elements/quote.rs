//! Quotes: consecutive lines starting with `>` form one quote block.

use super::whole_construct;
use crate::blocks::{Block, TextBlock};
use crate::common::lines::{join, split_lines};
use crate::context::ParserContext;
use crate::element::{ElementRule, Match, MultilineRule};
use crate::inline::{parse_inline, serialize_inline};

#[derive(Debug, Default, Clone, Copy)]
pub struct QuoteRule;

fn is_quote_line(text: &str) -> bool {
    text.starts_with('>')
}

fn strip_marker(text: &str) -> &str {
    let rest = text.strip_prefix('>').unwrap_or(text);
    rest.strip_prefix(' ').unwrap_or(rest).trim_end()
}

impl ElementRule for QuoteRule {
    fn name(&self) -> &str {
        "quote"
    }

    fn description(&self) -> &str {
        "Quotes: consecutive lines starting with >"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        text.lines().any(is_quote_line)
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Quote(_))
    }

    fn markdown_to_block(&self, text: &str, ctx: &ParserContext<'_>) -> Option<Block> {
        whole_construct(self, text, ctx)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        let Block::Quote(quote) = block else {
            return None;
        };
        let text = serialize_inline(&quote.rich_text);
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect();
        Some(join(&lines))
    }

    fn as_multiline(&self) -> Option<&dyn MultilineRule> {
        Some(self)
    }
}

impl MultilineRule for QuoteRule {
    fn find_matches(&self, text: &str, _ctx: &ParserContext<'_>) -> Vec<Match> {
        let lines = split_lines(text);
        let mut matches = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            if !is_quote_line(lines[index].text) {
                index += 1;
                continue;
            }
            let first = index;
            while index < lines.len() && is_quote_line(lines[index].text) {
                index += 1;
            }
            let content: Vec<&str> = lines[first..index]
                .iter()
                .map(|line| strip_marker(line.text))
                .collect();
            let block = Block::Quote(TextBlock::new(parse_inline(&join(&content))));
            matches.push(Match::new(lines[first].start, lines[index - 1].end, block));
        }

        matches
    }
}
