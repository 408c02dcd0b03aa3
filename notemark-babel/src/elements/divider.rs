//! Horizontal dividers: three or more hyphens alone on a line.

use crate::blocks::Block;
use crate::context::ParserContext;
use crate::element::ElementRule;
use once_cell::sync::Lazy;
use regex::Regex;

static DIVIDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-{3,}\s*$").expect("valid divider regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct DividerRule;

impl ElementRule for DividerRule {
    fn name(&self) -> &str {
        "divider"
    }

    fn description(&self) -> &str {
        "Horizontal rule: ---"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        DIVIDER.is_match(text)
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Divider)
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        self.matches_markdown(text).then_some(Block::Divider)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        self.matches_block(block).then(|| "---".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphen_runs() {
        assert!(DividerRule.matches_markdown("---"));
        assert!(DividerRule.matches_markdown("  -----  "));
        assert!(!DividerRule.matches_markdown("--"));
        assert!(!DividerRule.matches_markdown("--- text"));
    }
}
