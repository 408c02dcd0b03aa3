//! Paragraph fallback
//!
//! Accepts any text. The registry keeps it last so that it only sees lines no other
//! rule wanted; the line scanner hands it whole runs of accumulated lines, joined
//! with `\n`.

use crate::blocks::{Block, TextBlock};
use crate::context::ParserContext;
use crate::element::ElementRule;
use crate::inline::{parse_inline, serialize_inline};

#[derive(Debug, Default, Clone, Copy)]
pub struct ParagraphRule;

impl ElementRule for ParagraphRule {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn description(&self) -> &str {
        "Plain text, the fallback for anything unrecognised"
    }

    fn matches_markdown(&self, _text: &str) -> bool {
        true
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Paragraph(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Block::Paragraph(TextBlock::new(parse_inline(text))))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::Paragraph(p) => Some(serialize_inline(&p.rich_text)),
            _ => None,
        }
    }
}
