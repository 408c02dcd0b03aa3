//! Bookmarks: `[bookmark](url "title" "description")`.
//!
//! Title and description become three caption runs: title, ` - `, description.
//! Only that exact run shape is written back as two quoted strings, so a title that
//! itself contains ` - ` survives.

use crate::blocks::{plain_text, Block, LinkPreview, TextRun};
use crate::context::ParserContext;
use crate::element::ElementRule;
use once_cell::sync::Lazy;
use regex::Regex;

static BOOKMARK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[bookmark\]\((https?://[^\s")]+)(?:\s+"([^"]*)")?(?:\s+"([^"]*)")?\)\s*$"#)
        .expect("valid bookmark regex")
});

const CAPTION_SEPARATOR: &str = " - ";

#[derive(Debug, Default, Clone, Copy)]
pub struct BookmarkRule;

impl ElementRule for BookmarkRule {
    fn name(&self) -> &str {
        "bookmark"
    }

    fn description(&self) -> &str {
        "Link previews: [bookmark](url \"title\" \"description\")"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        BOOKMARK.is_match(text.trim())
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Bookmark(_))
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let caps = BOOKMARK.captures(text.trim())?;
        let url = caps.get(1)?.as_str().to_string();
        let title = caps.get(2).map_or("", |m| m.as_str()).trim();
        let description = caps.get(3).map_or("", |m| m.as_str()).trim();

        let caption = match (title.is_empty(), description.is_empty()) {
            (true, true) => Vec::new(),
            (false, true) => vec![TextRun::plain(title)],
            (true, false) => vec![TextRun::plain(description)],
            (false, false) => vec![
                TextRun::plain(title),
                TextRun::plain(CAPTION_SEPARATOR),
                TextRun::plain(description),
            ],
        };
        Some(Block::Bookmark(LinkPreview { url, caption }))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        let Block::Bookmark(bookmark) = block else {
            return None;
        };
        let url = &bookmark.url;
        let line = match bookmark.caption.as_slice() {
            [title, separator, description] if separator.content == CAPTION_SEPARATOR => {
                format!(
                    "[bookmark]({url} \"{}\" \"{}\")",
                    plain_text(std::slice::from_ref(title)),
                    plain_text(std::slice::from_ref(description))
                )
            }
            [] => format!("[bookmark]({url})"),
            caption => format!("[bookmark]({url} \"{}\")", plain_text(caption)),
        };
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::MarkdownConverter;

    fn round_trip(line: &str) -> String {
        let converter = MarkdownConverter::standard();
        let block = BookmarkRule
            .markdown_to_block(line, &converter.context())
            .unwrap();
        BookmarkRule.block_to_markdown(&block).unwrap()
    }

    #[test]
    fn title_and_description() {
        let line = r#"[bookmark](https://rust-lang.org "Rust" "A language empowering everyone")"#;
        assert_eq!(round_trip(line), line);
    }

    #[test]
    fn title_only_and_bare() {
        assert_eq!(
            round_trip(r#"[bookmark](https://x.test "Title")"#),
            r#"[bookmark](https://x.test "Title")"#
        );
        assert_eq!(
            round_trip("[bookmark](https://x.test)"),
            "[bookmark](https://x.test)"
        );
    }

    #[test]
    fn title_containing_separator_is_kept_whole() {
        let line = r#"[bookmark](https://x.test "Rust - The Book")"#;
        assert_eq!(round_trip(line), line);

        let both = r#"[bookmark](https://x.test "A - B" "C - D")"#;
        assert_eq!(round_trip(both), both);
    }

    #[test]
    fn caption_runs_are_title_separator_description() {
        let converter = MarkdownConverter::standard();
        let block = BookmarkRule
            .markdown_to_block(r#"[bookmark](https://x.test "T" "D")"#, &converter.context())
            .unwrap();
        let Block::Bookmark(bookmark) = block else {
            panic!("expected a bookmark");
        };
        let runs: Vec<&str> = bookmark.caption.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(runs, vec!["T", " - ", "D"]);
    }

    #[test]
    fn requires_http_url() {
        assert!(!BookmarkRule.matches_markdown("[bookmark](ftp://x.test)"));
    }
}
