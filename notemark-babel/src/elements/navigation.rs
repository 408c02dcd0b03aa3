//! Navigation helpers: `[toc]` and `[breadcrumb]`.

use crate::blocks::{Block, Color, TableOfContents};
use crate::context::ParserContext;
use crate::element::ElementRule;
use once_cell::sync::Lazy;
use regex::Regex;

static TOC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[toc\](?:\(([a-z_]+)\))?\s*$").expect("valid toc regex"));
static BREADCRUMB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[breadcrumb\]\s*$").expect("valid breadcrumb regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct TableOfContentsRule;

impl ElementRule for TableOfContentsRule {
    fn name(&self) -> &str {
        "table_of_contents"
    }

    fn description(&self) -> &str {
        "Table of contents: [toc] or [toc](color)"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        TOC.is_match(text.trim())
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::TableOfContents(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let caps = TOC.captures(text.trim())?;
        let color = match caps.get(1) {
            Some(name) => Color::from_name(name.as_str())?,
            None => Color::Default,
        };
        Some(Block::TableOfContents(TableOfContents { color }))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::TableOfContents(toc) if toc.color.is_default() => Some("[toc]".to_string()),
            Block::TableOfContents(toc) => Some(format!("[toc]({})", toc.color.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BreadcrumbRule;

impl ElementRule for BreadcrumbRule {
    fn name(&self) -> &str {
        "breadcrumb"
    }

    fn description(&self) -> &str {
        "Breadcrumb navigation: [breadcrumb]"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        BREADCRUMB.is_match(text.trim())
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Breadcrumb)
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        self.matches_markdown(text).then_some(Block::Breadcrumb)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        self.matches_block(block).then(|| "[breadcrumb]".to_string())
    }
}
