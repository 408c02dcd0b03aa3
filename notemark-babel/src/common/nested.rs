//! Nested-content processor
//!
//! Containers hold Markdown of their own. This module cuts that inner Markdown out
//! of the surrounding lines according to one of two line conventions, and hands it
//! back to the converter through [`ParserContext::convert_nested`]:
//!
//! - Pipe-prefixed (toggles, toggleable headings): every body line starts with `|`.
//!   The `|` and one optional space are stripped and a bare `|` is a blank line. An
//!   empty line continues the body only when the next line is pipe-prefixed again.
//! - Indented (children of list items, toggleable heading bodies without pipes):
//!   a tab strips one character, spaces strip up to two. Empty lines continue the
//!   body only when the next non-empty line is indented.
//!
//! Fenced bodies (`::: column` ... `:::`) depend on depth tracking and live with the
//! columns rule.
//!
//! Only the extracted inner text is ever converted again, so every recursion works
//! on strictly less input than its caller.

use super::lines::{join, Line};
use crate::blocks::Block;
use crate::context::ParserContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    Pipe,
    Indent,
}

/// The inner text of a body and where it stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub text: String,
    /// Index of the first line after the body
    pub next: usize,
    /// Number of lines consumed
    pub consumed: usize,
}

impl Body {
    pub fn is_empty(&self) -> bool {
        self.consumed == 0
    }
}

pub fn is_pipe_line(text: &str) -> bool {
    text.starts_with('|')
}

/// `| text` becomes `text`, a bare `|` becomes an empty line.
pub fn strip_pipe(text: &str) -> &str {
    let rest = text.strip_prefix('|').unwrap_or(text);
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Removes one tab or up to two spaces of indentation.
pub fn strip_indent(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix('\t') {
        return rest;
    }
    let spaces = text.bytes().take(2).take_while(|b| *b == b' ').count();
    &text[spaces..]
}

/// Collects the body starting at `lines[from]` under `convention`.
pub fn collect_body(lines: &[Line<'_>], from: usize, convention: Convention) -> Body {
    match convention {
        Convention::Pipe => collect_pipe_body(lines, from),
        Convention::Indent => collect_indented_body(lines, from),
    }
}

fn collect_pipe_body(lines: &[Line<'_>], from: usize) -> Body {
    let mut inner = Vec::new();
    let mut index = from;
    while let Some(line) = lines.get(index) {
        if is_pipe_line(line.text) {
            inner.push(strip_pipe(line.text.trim_end()));
        } else if line.is_blank() && lines.get(index + 1).is_some_and(|l| is_pipe_line(l.text)) {
            inner.push("");
        } else {
            break;
        }
        index += 1;
    }
    Body {
        text: join(&inner),
        next: index,
        consumed: index - from,
    }
}

fn collect_indented_body(lines: &[Line<'_>], from: usize) -> Body {
    let mut inner = Vec::new();
    let mut index = from;
    while let Some(line) = lines.get(index) {
        if line.is_indented() {
            inner.push(strip_indent(line.text.trim_end()));
        } else if line.is_blank() {
            let continues = lines[index..]
                .iter()
                .find(|l| !l.is_blank())
                .is_some_and(|l| l.is_indented());
            if !continues {
                break;
            }
            inner.push("");
        } else {
            break;
        }
        index += 1;
    }
    Body {
        text: join(&inner),
        next: index,
        consumed: index - from,
    }
}

/// Collects a body and converts it into child blocks.
pub fn process(
    lines: &[Line<'_>],
    from: usize,
    convention: Convention,
    ctx: &ParserContext<'_>,
) -> (Vec<Block>, Body) {
    let body = collect_body(lines, from, convention);
    let children = if body.text.trim().is_empty() {
        Vec::new()
    } else {
        ctx.convert_nested(&body.text)
    };
    (children, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::lines::split_lines;

    #[test]
    fn pipe_body_stops_at_unprefixed_line() {
        let lines = split_lines("| one\n|\n| two\nafter");
        let body = collect_body(&lines, 0, Convention::Pipe);
        assert_eq!(body.text, "one\n\ntwo");
        assert_eq!(body.next, 3);
    }

    #[test]
    fn pipe_body_blank_line_needs_pipe_after_it() {
        let lines = split_lines("| one\n\n| two\n\nafter");
        let body = collect_body(&lines, 0, Convention::Pipe);
        assert_eq!(body.text, "one\n\ntwo");
        assert_eq!(body.consumed, 3);
    }

    #[test]
    fn indented_body_strips_at_most_two_spaces() {
        let lines = split_lines("  - child\n    deeper\n\tTabbed\n\n  more\nend");
        let body = collect_body(&lines, 0, Convention::Indent);
        assert_eq!(body.text, "- child\n  deeper\nTabbed\n\nmore");
        assert_eq!(body.next, 5);
    }

    #[test]
    fn indented_body_ends_before_trailing_blank_lines() {
        let lines = split_lines("  child\n\nnext");
        let body = collect_body(&lines, 0, Convention::Indent);
        assert_eq!(body.text, "child");
        assert_eq!(body.consumed, 1);
    }

    #[test]
    fn empty_body_when_nothing_matches() {
        let lines = split_lines("plain");
        assert!(collect_body(&lines, 0, Convention::Pipe).is_empty());
        assert!(collect_body(&lines, 0, Convention::Indent).is_empty());
    }
}
