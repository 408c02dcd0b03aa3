//! Fenced code blocks.
//!
//! The content is kept literally in a single run. A fence that is never closed runs
//! to the end of the input.

use super::whole_construct;
use crate::blocks::{Block, Code, TextRun, PLAIN_TEXT_LANGUAGE};
use crate::common::lines::{join, split_lines};
use crate::context::ParserContext;
use crate::element::{ElementRule, Match, MultilineRule};
use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```\s*([^\s`]*)\s*$").expect("valid fence regex"));
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```\s*$").expect("valid fence regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct CodeRule;

impl ElementRule for CodeRule {
    fn name(&self) -> &str {
        "code"
    }

    fn description(&self) -> &str {
        "Fenced code blocks with an optional language"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        text.contains("```")
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Code(_))
    }

    fn markdown_to_block(&self, text: &str, ctx: &ParserContext<'_>) -> Option<Block> {
        whole_construct(self, text, ctx)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        let Block::Code(code) = block else {
            return None;
        };
        let language = if code.language == PLAIN_TEXT_LANGUAGE {
            ""
        } else {
            code.language.as_str()
        };
        let content: String = code.rich_text.iter().map(|r| r.content.as_str()).collect();
        if content.is_empty() {
            Some(format!("```{language}\n```"))
        } else {
            Some(format!("```{language}\n{content}\n```"))
        }
    }

    fn as_multiline(&self) -> Option<&dyn MultilineRule> {
        Some(self)
    }
}

impl MultilineRule for CodeRule {
    fn find_matches(&self, text: &str, _ctx: &ParserContext<'_>) -> Vec<Match> {
        let lines = split_lines(text);
        let mut matches = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            let Some(caps) = FENCE_OPEN.captures(lines[index].text) else {
                index += 1;
                continue;
            };
            let open = index;
            let language = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|lang| !lang.is_empty())
                .unwrap_or(PLAIN_TEXT_LANGUAGE)
                .to_string();

            let close = (open + 1..lines.len()).find(|&i| FENCE_CLOSE.is_match(lines[i].text));
            let (content_end, last) = match close {
                Some(close) => (close, close),
                None => {
                    // Unterminated: up to the last non-blank line.
                    let last = (open + 1..lines.len())
                        .rev()
                        .find(|&i| !lines[i].is_blank())
                        .unwrap_or(open);
                    (last + 1, last)
                }
            };

            let content: Vec<&str> = lines[open + 1..content_end]
                .iter()
                .map(|line| line.text)
                .collect();
            let content = join(&content);
            let rich_text = if content.is_empty() {
                Vec::new()
            } else {
                vec![TextRun::plain(content)]
            };
            let block = Block::Code(Code {
                rich_text,
                language,
                caption: Vec::new(),
            });
            matches.push(Match::new(lines[open].start, lines[last].end, block));
            index = last + 1;
        }

        matches
    }
}
