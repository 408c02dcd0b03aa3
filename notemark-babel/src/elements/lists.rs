//! Bulleted and numbered list items.
//!
//! Items are single lines; indented lines right below an item become its children
//! (the line scanner collects them, see [`ElementRule::absorbs_indented_children`]).
//! Bullets are written back as `-`, numbered items are renumbered by the serializer.

use crate::blocks::{Block, TextBlock};
use crate::context::ParserContext;
use crate::element::{ElementRule, Nesting};
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.+?)\s*$").expect("valid bullet regex"));
static NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\.\s+(.+?)\s*$").expect("valid numbered regex"));
static TODO_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*+]\s+\[[ xX]?\]\s").expect("valid todo marker regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct BulletedListRule;

impl ElementRule for BulletedListRule {
    fn name(&self) -> &str {
        "bulleted_list"
    }

    fn description(&self) -> &str {
        "Bulleted list items: - item, * item, + item"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        BULLET.is_match(text) && !TODO_MARKER.is_match(text)
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::BulletedListItem(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        if TODO_MARKER.is_match(text) {
            return None;
        }
        let content = BULLET.captures(text)?.get(1)?.as_str();
        Some(Block::BulletedListItem(TextBlock::new(parse_inline(content))))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::BulletedListItem(item) => {
                Some(format!("- {}", serialize_inline(&item.rich_text)))
            }
            _ => None,
        }
    }

    fn nesting(&self) -> Nesting {
        Nesting::Indent
    }

    fn absorbs_indented_children(&self) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NumberedListRule;

impl ElementRule for NumberedListRule {
    fn name(&self) -> &str {
        "numbered_list"
    }

    fn description(&self) -> &str {
        "Numbered list items: 1. item"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        NUMBERED.is_match(text)
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::NumberedListItem(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let content = NUMBERED.captures(text)?.get(1)?.as_str();
        Some(Block::NumberedListItem(TextBlock::new(parse_inline(content))))
    }

    /// Always numbered `1.`; the serializer renumbers runs of items.
    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::NumberedListItem(item) => {
                Some(format!("1. {}", serialize_inline(&item.rich_text)))
            }
            _ => None,
        }
    }

    fn nesting(&self) -> Nesting {
        Nesting::Indent
    }

    fn absorbs_indented_children(&self) -> bool {
        true
    }
}
