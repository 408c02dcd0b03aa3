//! Markdown to block-tree conversion
//!
//! [`MarkdownConverter`] owns a registry and runs the pipeline:
//!
//! ```text
//! markdown
//!   -> normalise line endings
//!   -> multiline extraction   (common::extractor)
//!   -> overlap resolution     (common::assembler::resolve_overlaps)
//!   -> line scanning          (common::scanner)
//!   -> assembly + spacing     (common::assembler::assemble)
//!   -> collaborator calls     (common::resolver, top level only)
//!   -> Vec<Block>
//! ```
//!
//! Containers convert their bodies by calling back into the converter through
//! [`ParserContext::convert_nested`], so nested Markdown goes through the same
//! registry. The reverse direction is [`MarkdownConverter::serialize`].

use crate::blocks::Block;
use crate::common::lines::normalize_line_endings;
use crate::common::scanner::LineScanner;
use crate::common::{assembler, extractor, resolver};
use crate::context::{NestedConverter, ParserContext};
use crate::registry::RuleRegistry;
use crate::serializer::BlockSerializer;

/// Options that change the shape of the produced tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Insert an empty paragraph after code blocks, tables, toggles, quotes,
    /// callouts and column layouts.
    pub spacing: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { spacing: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    registry: RuleRegistry,
    options: ConvertOptions,
}

impl MarkdownConverter {
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            options: ConvertOptions::default(),
        }
    }

    pub fn standard() -> Self {
        Self::new(RuleRegistry::standard())
    }

    pub fn minimal() -> Self {
        Self::new(RuleRegistry::minimal())
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// A context without collaborators. Add them with the `with_*` methods.
    pub fn context(&self) -> ParserContext<'_> {
        ParserContext::new(self)
    }

    /// Converts Markdown into blocks without any collaborators.
    pub fn convert(&self, markdown: &str) -> Vec<Block> {
        self.convert_with(markdown, &self.context())
    }

    /// Converts Markdown into blocks, calling the collaborators in `ctx`.
    pub fn convert_with(&self, markdown: &str, ctx: &ParserContext<'_>) -> Vec<Block> {
        let blocks = self.convert_fragment(markdown, ctx);
        resolver::resolve(blocks, &self.registry, ctx)
    }

    fn convert_fragment(&self, markdown: &str, ctx: &ParserContext<'_>) -> Vec<Block> {
        if markdown.trim().is_empty() {
            return Vec::new();
        }
        let text = normalize_line_endings(markdown);

        let matches = extractor::find_all_matches(&self.registry, &text, ctx);
        let claimed = assembler::resolve_overlaps(matches);
        let scanned = LineScanner::new(&self.registry).scan(&text, &claimed, ctx);
        log::debug!(
            "{} multiline and {} single-line block(s)",
            claimed.len(),
            scanned.len()
        );

        assembler::assemble(claimed, scanned, self.options.spacing)
    }

    /// Writes blocks back as Markdown.
    pub fn serialize(&self, blocks: &[Block]) -> String {
        BlockSerializer::new(&self.registry).serialize(blocks)
    }
}

impl NestedConverter for MarkdownConverter {
    fn convert_nested(&self, text: &str, ctx: &ParserContext<'_>) -> Vec<Block> {
        self.convert_fragment(text, ctx)
    }
}
