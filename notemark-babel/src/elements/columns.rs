//! Column layouts.
//!
//! ```text
//! ::: columns
//! ::: column 0.7
//! Left side
//! :::
//! ::: column 0.3
//! Right side
//! :::
//! :::
//! ```
//!
//! Each column's body is converted recursively. Openers inside a column raise the
//! depth so nested layouts close in the right place. Text between columns goes into
//! a column of its own. A layout that is never closed runs to the end of the input;
//! one without any content is left as text.

use super::whole_construct;
use crate::blocks::{Block, Column, ColumnList};
use crate::common::lines::{join, split_lines};
use crate::context::ParserContext;
use crate::element::{ElementRule, Match, MultilineRule, Nesting};
use once_cell::sync::Lazy;
use regex::Regex;

static COLUMNS_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:::\s*columns\s*$").expect("valid columns regex"));
static COLUMN_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:::\s*column(?:\s+(\d*\.?\d+))?\s*$").expect("valid column regex")
});
static BLOCK_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:::\s*$").expect("valid block end regex"));

fn is_opener(text: &str) -> bool {
    COLUMNS_START.is_match(text) || COLUMN_START.is_match(text)
}

fn format_ratio(ratio: f64) -> String {
    let text = format!("{ratio:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnListRule;

impl ElementRule for ColumnListRule {
    fn name(&self) -> &str {
        "column_list"
    }

    fn description(&self) -> &str {
        "Side by side layouts: ::: columns / ::: column [ratio]"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        text.lines().any(|line| COLUMNS_START.is_match(line))
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::ColumnList(_))
    }

    fn markdown_to_block(&self, text: &str, ctx: &ParserContext<'_>) -> Option<Block> {
        whole_construct(self, text, ctx)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        self.matches_block(block).then(|| "::: columns".to_string())
    }

    fn nesting(&self) -> Nesting {
        Nesting::Concatenate
    }

    fn as_multiline(&self) -> Option<&dyn MultilineRule> {
        Some(self)
    }
}

struct OpenColumn<'t> {
    ratio: Option<f64>,
    lines: Vec<&'t str>,
    depth: usize,
    /// Opened by stray text rather than by `::: column`; ends at the next opener.
    implicit: bool,
}

impl<'t> OpenColumn<'t> {
    fn opened(ratio: Option<&str>) -> Self {
        Self {
            ratio: ratio.and_then(|r| r.parse().ok()),
            lines: Vec::new(),
            depth: 0,
            implicit: false,
        }
    }

    fn implicit(first: &'t str) -> Self {
        Self {
            ratio: None,
            lines: vec![first],
            depth: usize::from(COLUMNS_START.is_match(first.trim_end())),
            implicit: true,
        }
    }
}

impl MultilineRule for ColumnListRule {
    fn find_matches(&self, text: &str, ctx: &ParserContext<'_>) -> Vec<Match> {
        let lines = split_lines(text);
        let mut matches = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            if !COLUMNS_START.is_match(lines[index].text) {
                index += 1;
                continue;
            }

            let open = index;
            let mut last = lines.len() - 1;
            let mut finished: Vec<OpenColumn<'_>> = Vec::new();
            let mut current: Option<OpenColumn<'_>> = None;

            for (i, line) in lines.iter().enumerate().skip(open + 1) {
                let text = line.text.trim_end();

                // Stray text is ended by the next column or by the layout closer.
                let implicit_top = matches!(&current, Some(c) if c.implicit && c.depth == 0);
                if implicit_top {
                    if let Some(caps) = COLUMN_START.captures(text) {
                        finished.extend(current.take());
                        current = Some(OpenColumn::opened(caps.get(1).map(|m| m.as_str())));
                        continue;
                    }
                    if BLOCK_END.is_match(text) {
                        finished.extend(current.take());
                        last = i;
                        break;
                    }
                }

                match current.as_mut() {
                    Some(column) => {
                        if is_opener(text) {
                            column.depth += 1;
                            column.lines.push(text);
                        } else if BLOCK_END.is_match(text) {
                            if column.depth > 0 {
                                column.depth -= 1;
                                column.lines.push(text);
                            } else {
                                finished.extend(current.take());
                            }
                        } else {
                            column.lines.push(line.text);
                        }
                    }
                    None => {
                        if let Some(caps) = COLUMN_START.captures(text) {
                            current = Some(OpenColumn::opened(caps.get(1).map(|m| m.as_str())));
                        } else if BLOCK_END.is_match(text) {
                            last = i;
                            break;
                        } else if !text.trim().is_empty() {
                            log::debug!(
                                "text outside a column at offset {}, keeping it in a column of its own",
                                line.start
                            );
                            current = Some(OpenColumn::implicit(line.text));
                        }
                    }
                }
            }
            if let Some(unclosed) = current.take() {
                finished.push(unclosed);
            }

            if finished.is_empty() {
                log::debug!(
                    "column layout at offset {} has no columns, leaving it as text",
                    lines[open].start
                );
                index = open + 1;
                continue;
            }

            let columns = finished
                .into_iter()
                .map(|column| {
                    let body = join(&column.lines);
                    let children = if body.trim().is_empty() {
                        Vec::new()
                    } else {
                        ctx.convert_nested(&body)
                    };
                    Block::Column(Column {
                        width_ratio: column.ratio,
                        children,
                    })
                })
                .collect();

            let block = Block::ColumnList(ColumnList { children: columns });
            matches.push(Match::new(lines[open].start, lines[last].end, block));
            index = last + 1;
        }

        matches
    }
}

/// Writes the opener of a single column; its body and closer come from the serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnRule;

impl ElementRule for ColumnRule {
    fn name(&self) -> &str {
        "column"
    }

    fn description(&self) -> &str {
        "A single column inside a column layout"
    }

    /// Columns only exist inside a layout, which builds them.
    fn matches_markdown(&self, _text: &str) -> bool {
        false
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Column(_))
    }

    fn markdown_to_block(&self, _text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        None
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        match block {
            Block::Column(Column {
                width_ratio: Some(ratio),
                ..
            }) => Some(format!("::: column {}", format_ratio(*ratio))),
            Block::Column(_) => Some("::: column".to_string()),
            _ => None,
        }
    }

    fn nesting(&self) -> Nesting {
        Nesting::Fenced
    }
}
