//! Child databases and pages: `[database: Title]`, `[page: Title]`.
//!
//! The rules only record the title. Creating the remote object is left to the
//! converter, which calls the resource factory once the document is assembled so
//! that objects are created in document order.

use crate::blocks::{Block, ChildResource};
use crate::context::ParserContext;
use crate::element::ElementRule;
use once_cell::sync::Lazy;
use regex::Regex;

static DATABASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[database:\s*(.+?)\s*\]\s*$").expect("valid child database regex")
});
static PAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[page:\s*(.+?)\s*\]\s*$").expect("valid child page regex"));

fn title<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ChildDatabaseRule;

impl ElementRule for ChildDatabaseRule {
    fn name(&self) -> &str {
        "child_database"
    }

    fn description(&self) -> &str {
        "Inline databases: [database: Title]"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        DATABASE.is_match(text.trim())
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::ChildDatabase(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        Some(Block::ChildDatabase(ChildResource {
            title: title(&DATABASE, text)?.to_string(),
            id: None,
        }))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::ChildDatabase(db) => Some(format!("[database: {}]", db.title)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ChildPageRule;

impl ElementRule for ChildPageRule {
    fn name(&self) -> &str {
        "child_page"
    }

    fn description(&self) -> &str {
        "Sub pages: [page: Title]"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        PAGE.is_match(text.trim())
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::ChildPage(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        Some(Block::ChildPage(ChildResource {
            title: title(&PAGE, text)?.to_string(),
            id: None,
        }))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::ChildPage(page) => Some(format!("[page: {}]", page.title)),
            _ => None,
        }
    }
}
