//! Pipe tables.
//!
//! A table is a header row, a separator row (`| --- | :-: |`) and any number of
//! body rows, all starting at column 0. Rows with a different number of cells than
//! the header make the rule decline, and the lines fall back to paragraph text.

use super::whole_construct;
use crate::blocks::{Block, Table, TableRow, TextRun};
use crate::common::lines::{join, split_lines};
use crate::context::ParserContext;
use crate::element::{ElementRule, Match, MultilineRule};
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;

static ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|(.+)\|\s*$").expect("valid row regex"));
static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|([\s\-:|]+)\|\s*$").expect("valid separator regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct TableRule;

fn split_cells(line: &str) -> Vec<Vec<TextRun>> {
    let inner = line.trim();
    let inner = inner.strip_prefix('|').unwrap_or(inner);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner
        .split('|')
        .map(|cell| parse_inline(cell.trim()))
        .collect()
}

fn is_separator(line: &str) -> bool {
    SEPARATOR.is_match(line) && line.contains('-')
}

impl ElementRule for TableRule {
    fn name(&self) -> &str {
        "table"
    }

    fn description(&self) -> &str {
        "Pipe tables with a header separator row"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        text.contains('|')
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Table(_))
    }

    fn markdown_to_block(&self, text: &str, ctx: &ParserContext<'_>) -> Option<Block> {
        whole_construct(self, text, ctx)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        let Block::Table(table) = block else {
            return None;
        };
        let width = table.table_width.max(1);
        let render = |cells: &[Vec<TextRun>]| {
            let cells: Vec<String> = (0..width)
                .map(|i| cells.get(i).map(|c| serialize_inline(c)).unwrap_or_default())
                .collect();
            format!("| {} |", cells.join(" | "))
        };

        let mut rows = table.children.iter().filter_map(|child| match child {
            Block::TableRow(row) => Some(row),
            _ => None,
        });
        let header = rows.next().map(|row| render(&row.cells))?;
        let separator = format!("|{}|", vec![" --- "; width].join("|"));
        let mut lines = vec![header, separator];
        lines.extend(rows.map(|row| render(&row.cells)));
        Some(join(&lines))
    }

    fn as_multiline(&self) -> Option<&dyn MultilineRule> {
        Some(self)
    }
}

impl MultilineRule for TableRule {
    fn find_matches(&self, text: &str, _ctx: &ParserContext<'_>) -> Vec<Match> {
        let lines = split_lines(text);
        let mut matches = Vec::new();
        let mut index = 0;

        while index + 1 < lines.len() {
            let header = lines[index].text;
            if !ROW.is_match(header) || !is_separator(lines[index + 1].text) {
                index += 1;
                continue;
            }

            let mut last = index + 1;
            while last + 1 < lines.len() && ROW.is_match(lines[last + 1].text) {
                last += 1;
            }

            let header_cells = split_cells(header);
            let width = header_cells.len();
            let separator_width = split_cells(lines[index + 1].text).len();
            let body: Vec<Vec<Vec<TextRun>>> = lines[index + 2..=last]
                .iter()
                .map(|line| split_cells(line.text))
                .collect();

            if separator_width != width || body.iter().any(|row| row.len() != width) {
                log::debug!(
                    "table at offset {} has inconsistent column counts, leaving it as text",
                    lines[index].start
                );
                index = last + 1;
                continue;
            }

            let mut children = vec![Block::TableRow(TableRow {
                cells: header_cells,
            })];
            children.extend(body.into_iter().map(|cells| Block::TableRow(TableRow { cells })));
            let block = Block::Table(Table {
                table_width: width,
                has_column_header: true,
                has_row_header: false,
                children,
            });
            matches.push(Match::new(lines[index].start, lines[last].end, block));
            index = last + 1;
        }

        matches
    }
}
