//! Callouts: `!> [emoji] text`, or `!> text` with the default icon.

use crate::blocks::{Block, Callout, DEFAULT_CALLOUT_ICON};
use crate::context::ParserContext;
use crate::element::ElementRule;
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

static CALLOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!>(?:\s+(.*?))?\s*$").expect("valid callout regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct CalloutRule;

/// Splits a leading `[icon]` off the callout text.
///
/// The bracket must hold a single token and be followed by whitespace or the end of
/// the line, so `[label](url)` links stay part of the text.
fn split_icon(rest: &str) -> (Option<&str>, &str) {
    let Some(inner) = rest.strip_prefix('[') else {
        return (None, rest);
    };
    let Some(close) = inner.find(']') else {
        return (None, rest);
    };
    let icon = &inner[..close];
    let after = &inner[close + 1..];
    let valid = !icon.is_empty()
        && !icon.chars().any(char::is_whitespace)
        && after.chars().next().map_or(true, char::is_whitespace);
    if valid {
        (Some(icon), after.trim_start())
    } else {
        (None, rest)
    }
}

impl ElementRule for CalloutRule {
    fn name(&self) -> &str {
        "callout"
    }

    fn description(&self) -> &str {
        "Callouts: !> [emoji] text"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        CALLOUT.is_match(text)
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Callout(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let caps = CALLOUT.captures(text)?;
        let rest = caps.get(1).map_or("", |m| m.as_str());
        let (icon, content) = split_icon(rest);
        Some(Block::Callout(Callout::new(
            parse_inline(content),
            icon.unwrap_or(DEFAULT_CALLOUT_ICON),
        )))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        let Block::Callout(callout) = block else {
            return None;
        };
        let text = serialize_inline(&callout.rich_text);
        let line = if callout.icon.is_empty() || callout.icon == DEFAULT_CALLOUT_ICON {
            format!("!> {text}")
        } else {
            format!("!> [{}] {text}", callout.icon)
        };
        Some(line.trim_end().to_string())
    }
}
