//! Element rules of the dialect
//!
//! One module per construct (or family of constructs). Every rule is a stateless unit
//! struct implementing [`crate::element::ElementRule`]; multi-line constructs also implement
//! [`MultilineRule`]. See [`crate::registry::RuleRegistryBuilder`] for the order in
//! which the standard set is registered.

pub mod bookmark;
pub mod callout;
pub mod child;
pub mod code;
pub mod columns;
pub mod divider;
pub mod embed;
pub mod equation;
pub mod heading;
pub mod lists;
pub mod media;
pub mod navigation;
pub mod paragraph;
pub mod quote;
pub mod table;
pub mod todo;
pub mod toggle;
pub mod toggleable_heading;

pub use bookmark::BookmarkRule;
pub use callout::CalloutRule;
pub use child::{ChildDatabaseRule, ChildPageRule};
pub use code::CodeRule;
pub use columns::{ColumnListRule, ColumnRule};
pub use divider::DividerRule;
pub use embed::EmbedRule;
pub use equation::EquationRule;
pub use heading::HeadingRule;
pub use lists::{BulletedListRule, NumberedListRule};
pub use media::{MediaKind, MediaRule};
pub use navigation::{BreadcrumbRule, TableOfContentsRule};
pub use paragraph::ParagraphRule;
pub use quote::QuoteRule;
pub use table::TableRule;
pub use todo::TodoRule;
pub use toggle::ToggleRule;
pub use toggleable_heading::ToggleableHeadingRule;

use crate::blocks::Block;
use crate::context::ParserContext;
use crate::element::MultilineRule;

/// Single-construct entry point for multiline rules: the block of a match that
/// starts at the beginning of `text`.
pub(crate) fn whole_construct<R: MultilineRule>(
    rule: &R,
    text: &str,
    ctx: &ParserContext<'_>,
) -> Option<Block> {
    rule.find_matches(text, ctx)
        .into_iter()
        .find(|m| m.start == 0)
        .map(|m| m.block)
}
