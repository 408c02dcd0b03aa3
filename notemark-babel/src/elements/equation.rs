//! Block equations: `$$expr$$` on one line, or a `$$` fence.

use super::whole_construct;
use crate::blocks::{Block, Equation};
use crate::common::lines::{join, split_lines};
use crate::context::ParserContext;
use crate::element::{ElementRule, Match, MultilineRule};
use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$\$(.+?)\$\$\s*$").expect("valid equation regex"));
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$\$\s*$").expect("valid fence regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct EquationRule;

impl ElementRule for EquationRule {
    fn name(&self) -> &str {
        "equation"
    }

    fn description(&self) -> &str {
        "Block equations: $$expression$$"
    }

    fn matches_markdown(&self, text: &str) -> bool {
        text.contains("$$")
    }

    fn matches_block(&self, block: &Block) -> bool {
        matches!(block, Block::Equation(_))
    }

    fn markdown_to_block(&self, text: &str, ctx: &ParserContext<'_>) -> Option<Block> {
        whole_construct(self, text, ctx)
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        let Block::Equation(equation) = block else {
            return None;
        };
        let expression = equation.expression.trim();
        if expression.contains('\n') {
            Some(format!("$$\n{expression}\n$$"))
        } else {
            Some(format!("$${expression}$$"))
        }
    }

    fn as_multiline(&self) -> Option<&dyn MultilineRule> {
        Some(self)
    }
}

impl MultilineRule for EquationRule {
    fn find_matches(&self, text: &str, _ctx: &ParserContext<'_>) -> Vec<Match> {
        let lines = split_lines(text);
        let mut matches = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index];
            if let Some(expression) = INLINE_FORM.captures(line.text).and_then(|c| c.get(1)) {
                let block = Block::Equation(Equation {
                    expression: expression.as_str().trim().to_string(),
                });
                matches.push(Match::new(line.start, line.end, block));
                index += 1;
                continue;
            }

            if FENCE.is_match(line.text) {
                let close = (index + 1..lines.len()).find(|&i| FENCE.is_match(lines[i].text));
                if let Some(close) = close {
                    let body: Vec<&str> = lines[index + 1..close].iter().map(|l| l.text).collect();
                    let block = Block::Equation(Equation {
                        expression: join(&body).trim().to_string(),
                    });
                    matches.push(Match::new(line.start, lines[close].end, block));
                    index = close + 1;
                    continue;
                }
            }
            index += 1;
        }

        matches
    }
}
