//! Element rule trait definition
//!
//! An element rule knows one construct of the dialect in both directions: how to
//! recognise it in Markdown and build a [`Block`], and how to write a block of its
//! type back. Rules are registered in a [`crate::registry::RuleRegistry`], whose
//! order decides which rule wins when several recognise the same line.
//!
//! Most rules look at one line at a time. Constructs spanning several lines (code
//! fences, tables, toggles, columns, ...) additionally implement [`MultilineRule`]
//! and expose it through [`ElementRule::as_multiline`]; those are run over the whole
//! text before the line scanner sees it.

use crate::blocks::Block;
use crate::context::ParserContext;

/// How the serializer re-emits a block's children after the rule's own output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// Children are not written.
    None,
    /// Each child line is prefixed with `| ` (a bare `|` for blank lines).
    Pipe,
    /// Each child line is indented by two spaces.
    Indent,
    /// Children follow verbatim and a closing `:::` ends the block.
    Fenced,
    /// Children are written one after another without blank lines, then `:::`.
    Concatenate,
}

/// A located multi-line construct.
///
/// `start..end` is a byte range into the text given to the converter, such that
/// `&text[start..end]` is exactly the consumed span (trailing newline excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub block: Block,
}

impl Match {
    pub fn new(start: usize, end: usize, block: Block) -> Self {
        Self { start, end, block }
    }

    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &Match) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Trait for element rules
///
/// # Examples
///
/// ```ignore
/// struct DividerRule;
///
/// impl ElementRule for DividerRule {
///     fn name(&self) -> &str {
///         "divider"
///     }
///
///     fn matches_markdown(&self, text: &str) -> bool {
///         text.trim() == "---"
///     }
///
///     fn matches_block(&self, block: &Block) -> bool {
///         matches!(block, Block::Divider)
///     }
///
///     fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
///         self.matches_markdown(text).then_some(Block::Divider)
///     }
///
///     fn block_to_markdown(&self, block: &Block) -> Option<String> {
///         self.matches_block(block).then(|| "---".to_string())
///     }
/// }
/// ```
pub trait ElementRule: Send + Sync {
    /// Unique name of this rule (e.g. "heading", "toggle")
    fn name(&self) -> &str;

    /// Optional description, shown by `notemark list-elements`
    fn description(&self) -> &str {
        ""
    }

    /// Cheap check whether `text` may contain this construct.
    ///
    /// For single-line rules `text` is one line. For multiline rules it is the
    /// whole text and the check only gates [`MultilineRule::find_matches`].
    fn matches_markdown(&self, text: &str) -> bool;

    /// Whether this rule writes blocks of this type
    fn matches_block(&self, block: &Block) -> bool;

    /// Builds a block from one line (or one construct). `None` declines.
    fn markdown_to_block(&self, text: &str, ctx: &ParserContext<'_>) -> Option<Block>;

    /// Writes a block without its children. `None` declines.
    fn block_to_markdown(&self, block: &Block) -> Option<String>;

    /// How children are written after [`ElementRule::block_to_markdown`]
    fn nesting(&self) -> Nesting {
        Nesting::None
    }

    /// Whether indented lines following this construct are its children.
    fn absorbs_indented_children(&self) -> bool {
        false
    }

    /// The multi-line capability, if this rule has one
    fn as_multiline(&self) -> Option<&dyn MultilineRule> {
        None
    }

    fn is_multiline(&self) -> bool {
        self.as_multiline().is_some()
    }
}

/// Locates constructs spanning several lines.
pub trait MultilineRule: Send + Sync {
    /// Every construct of this kind in `text`, in document order.
    ///
    /// Constructs are only recognised when their opening line starts at column 0;
    /// indented regions belong to the children of list items.
    fn find_matches(&self, text: &str, ctx: &ParserContext<'_>) -> Vec<Match>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_overlap_and_containment() {
        let outer = Match::new(0, 20, Block::Divider);
        let inner = Match::new(5, 10, Block::Divider);
        let partial = Match::new(15, 30, Block::Divider);
        let after = Match::new(20, 25, Block::Divider);

        assert!(outer.overlaps(&inner));
        assert!(outer.contains(&inner));
        assert!(outer.overlaps(&partial));
        assert!(!outer.contains(&partial));
        assert!(!outer.overlaps(&after));
    }
}
