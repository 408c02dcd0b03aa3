//! Embeds: `<embed:caption>(url)` or `<embed>(url)`.

use crate::blocks::{Block, LinkPreview};
use crate::context::ParserContext;
use crate::element::ElementRule;
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

static EMBED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^<embed(?::(.*?))?>\s*\((https?://[^\s")]+)\)\s*$"#).expect("valid embed regex")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbedRule;

impl ElementRule for EmbedRule {
    fn name(&self) -> &str {
        "embed"
    }

    fn description(&self) -> &str {
        "Embedded pages: <embed:caption>(url)"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        EMBED.is_match(text.trim())
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Embed(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let caps = EMBED.captures(text.trim())?;
        let caption = caps.get(1).map_or("", |m| m.as_str()).trim();
        Some(Block::Embed(LinkPreview {
            url: caps.get(2)?.as_str().to_string(),
            caption: parse_inline(caption),
        }))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        let Block::Embed(embed) = block else {
            return None;
        };
        if embed.caption.is_empty() {
            Some(format!("<embed>({})", embed.url))
        } else {
            Some(format!(
                "<embed:{}>({})",
                serialize_inline(&embed.caption),
                embed.url
            ))
        }
    }
}
