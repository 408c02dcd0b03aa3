//! Headings: `#` to `######` followed by a space.

use crate::blocks::{Block, Heading};
use crate::context::ParserContext;
use crate::element::ElementRule;
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("valid heading regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct HeadingRule;

impl ElementRule for HeadingRule {
    fn name(&self) -> &str {
        "heading"
    }

    fn description(&self) -> &str {
        "Headings, levels 1 to 6"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        HEADING.is_match(text)
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Heading(h) if !h.is_toggleable)
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let caps = HEADING.captures(text)?;
        let level = caps.get(1)?.as_str().len() as u8;
        let content = caps.get(2)?.as_str();
        Some(Block::Heading(Heading::new(level, parse_inline(content))))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::Heading(h) => Some(format!(
                "{} {}",
                "#".repeat(h.level.clamp(1, 6) as usize),
                serialize_inline(&h.rich_text)
            )),
            _ => None,
        }
    }
}
