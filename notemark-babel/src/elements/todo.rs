//! Todo items: `- [ ] open`, `- [x] done`.

use crate::blocks::{Block, ToDo};
use crate::context::ParserContext;
use crate::element::{ElementRule, Nesting};
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

static TODO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[-*+]\s+\[([ xX]?)\]\s+(.+?)\s*$").expect("valid todo regex")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct TodoRule;

impl ElementRule for TodoRule {
    fn name(&self) -> &str {
        "todo"
    }

    fn description(&self) -> &str {
        "Checkbox items: - [ ] open, - [x] done"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        TODO.is_match(text)
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::ToDo(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let caps = TODO.captures(text)?;
        let checked = caps
            .get(1)
            .is_some_and(|m| m.as_str().eq_ignore_ascii_case("x"));
        let content = caps.get(2)?.as_str();
        Some(Block::ToDo(ToDo {
            rich_text: parse_inline(content),
            checked,
            ..Default::default()
        }))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::ToDo(todo) => {
                let mark = if todo.checked { "x" } else { " " };
                Some(format!("- [{mark}] {}", serialize_inline(&todo.rich_text)))
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
