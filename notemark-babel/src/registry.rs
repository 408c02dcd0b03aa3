//! Rule registry for element discovery and selection
//!
//! A [`RuleRegistry`] is an ordered list of element rules. Order is significant: the
//! first rule that recognises a line (or writes a block) wins, so specific rules are
//! registered before the general ones they overlap with (todo before bulleted list,
//! toggleable heading before heading) and the paragraph fallback always comes last.
//!
//! Registries are plain values. Build one with [`RuleRegistryBuilder`] or take one of
//! the presets:
//!
//! ```ignore
//! let registry = RuleRegistryBuilder::new()
//!     .with_headings()
//!     .with_lists()
//!     .with_code()
//!     .build();
//! assert_eq!(registry.fallback().name(), "paragraph");
//! ```

use crate::blocks::Block;
use crate::element::ElementRule;
use crate::elements::*;
use once_cell::sync::Lazy;
use std::sync::Arc;

const FALLBACK_NAME: &str = "paragraph";

static DEFAULT_FALLBACK: Lazy<Arc<dyn ElementRule>> = Lazy::new(|| Arc::new(ParagraphRule));

/// Ordered collection of element rules
///
/// The multiline rules and the single-line rules are partitioned whenever the
/// collection changes, so the pipeline never asks a rule for its capabilities on
/// the hot path.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn ElementRule>>,
    multiline: Vec<Arc<dyn ElementRule>>,
    single_line: Vec<Arc<dyn ElementRule>>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            multiline: Vec::new(),
            single_line: Vec::new(),
        }
    }

    /// Register a rule
    ///
    /// A rule with the same name is removed first, so re-registering moves it to
    /// the end. A registered paragraph fallback stays behind every other rule.
    pub fn register<R: ElementRule + 'static>(&mut self, rule: R) {
        self.register_arc(Arc::new(rule));
    }

    pub fn register_arc(&mut self, rule: Arc<dyn ElementRule>) {
        self.rules.retain(|r| r.name() != rule.name());
        self.rules.push(rule);
        if let Some(index) = self.rules.iter().position(|r| r.name() == FALLBACK_NAME) {
            let fallback = self.rules.remove(index);
            self.rules.push(fallback);
        }
        self.partition();
    }

    /// Remove a rule by name, returning whether it was present
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.name() != name);
        let removed = self.rules.len() != before;
        if removed {
            self.partition();
        }
        removed
    }

    fn partition(&mut self) {
        let (multiline, single_line) = self
            .rules
            .iter()
            .cloned()
            .partition(|rule| rule.is_multiline());
        self.multiline = multiline;
        self.single_line = single_line;
    }

    /// Get a rule by name
    pub fn get(&self, name: &str) -> Option<&dyn ElementRule> {
        self.rules
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    /// Check if a rule exists
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Rule names in registration order
    pub fn list_rules(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.name().to_string()).collect()
    }

    pub fn rules(&self) -> &[Arc<dyn ElementRule>] {
        &self.rules
    }

    /// Rules with a multiline capability, in registration order
    pub fn multiline_rules(&self) -> &[Arc<dyn ElementRule>] {
        &self.multiline
    }

    /// Rules that work on one line at a time, in registration order
    pub fn single_line_rules(&self) -> &[Arc<dyn ElementRule>] {
        &self.single_line
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule of any kind that recognises `text`
    pub fn find_markdown_handler(&self, text: &str) -> Option<&dyn ElementRule> {
        self.rules
            .iter()
            .find(|r| r.matches_markdown(text))
            .map(|r| r.as_ref())
    }

    /// First single-line rule other than the fallback that recognises `line`
    pub fn find_line_handler(&self, line: &str) -> Option<&dyn ElementRule> {
        let fallback = self.fallback().name();
        self.single_line
            .iter()
            .filter(|r| r.name() != fallback)
            .find(|r| r.matches_markdown(line))
            .map(|r| r.as_ref())
    }

    /// First rule that writes blocks of this type
    pub fn find_block_handler(&self, block: &Block) -> Option<&dyn ElementRule> {
        self.rules
            .iter()
            .find(|r| r.matches_block(block))
            .map(|r| r.as_ref())
    }

    /// The paragraph rule, registered or not
    pub fn fallback(&self) -> &dyn ElementRule {
        self.get(FALLBACK_NAME)
            .unwrap_or_else(|| DEFAULT_FALLBACK.as_ref())
    }

    /// Every construct of the dialect
    pub fn standard() -> Self {
        RuleRegistryBuilder::new().start_standard().build()
    }

    /// Headings, lists and paragraphs
    pub fn minimal() -> Self {
        RuleRegistryBuilder::new().start_minimal().build()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.list_rules())
            .finish()
    }
}

pub fn create_standard_registry() -> RuleRegistry {
    RuleRegistry::standard()
}

pub fn create_minimal_registry() -> RuleRegistry {
    RuleRegistry::minimal()
}

/// Fluent construction of a [`RuleRegistry`]
///
/// Each `with_*` call appends its rules; adding a rule that is already present
/// moves it to the end. [`RuleRegistryBuilder::build`] makes sure the paragraph
/// fallback is registered and last.
#[derive(Default)]
pub struct RuleRegistryBuilder {
    rules: Vec<Arc<dyn ElementRule>>,
}

impl RuleRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything added so far
    pub fn start_empty(mut self) -> Self {
        self.rules.clear();
        self
    }

    pub fn start_minimal(self) -> Self {
        self.start_empty()
            .with_headings()
            .with_lists()
            .with_paragraphs()
    }

    pub fn start_standard(self) -> Self {
        self.start_empty()
            .with_toggles()
            .with_toggleable_headings()
            .with_headings()
            .with_callouts()
            .with_code()
            .with_dividers()
            .with_tables()
            .with_columns()
            .with_equations()
            .with_quotes()
            .with_todos()
            .with_lists()
            .with_bookmarks()
            .with_embeds()
            .with_media()
            .with_table_of_contents()
            .with_breadcrumbs()
            .with_child_blocks()
            .with_paragraphs()
    }

    pub fn with_headings(self) -> Self {
        self.add_element(HeadingRule)
    }

    pub fn with_lists(self) -> Self {
        self.add_element(BulletedListRule)
            .add_element(NumberedListRule)
    }

    pub fn with_todos(self) -> Self {
        self.add_element(TodoRule)
    }

    pub fn with_quotes(self) -> Self {
        self.add_element(QuoteRule)
    }

    pub fn with_callouts(self) -> Self {
        self.add_element(CalloutRule)
    }

    pub fn with_code(self) -> Self {
        self.add_element(CodeRule)
    }

    pub fn with_dividers(self) -> Self {
        self.add_element(DividerRule)
    }

    pub fn with_tables(self) -> Self {
        self.add_element(TableRule)
    }

    pub fn with_toggles(self) -> Self {
        self.add_element(ToggleRule)
    }

    pub fn with_toggleable_headings(self) -> Self {
        self.add_element(ToggleableHeadingRule)
    }

    /// Column layouts and the single column they contain
    pub fn with_columns(self) -> Self {
        self.add_element(ColumnListRule).add_element(ColumnRule)
    }

    pub fn with_bookmarks(self) -> Self {
        self.add_element(BookmarkRule)
    }

    pub fn with_embeds(self) -> Self {
        self.add_element(EmbedRule)
    }

    /// Images, videos, audio, files and PDFs
    pub fn with_media(self) -> Self {
        MediaKind::ALL
            .into_iter()
            .fold(self, |builder, kind| builder.add_element(MediaRule::new(kind)))
    }

    pub fn with_equations(self) -> Self {
        self.add_element(EquationRule)
    }

    pub fn with_table_of_contents(self) -> Self {
        self.add_element(TableOfContentsRule)
    }

    pub fn with_breadcrumbs(self) -> Self {
        self.add_element(BreadcrumbRule)
    }

    /// Child databases and child pages
    pub fn with_child_blocks(self) -> Self {
        self.add_element(ChildDatabaseRule)
            .add_element(ChildPageRule)
    }

    pub fn with_paragraphs(self) -> Self {
        self.add_element(ParagraphRule)
    }

    /// Append a rule, replacing one with the same name
    pub fn add_element<R: ElementRule + 'static>(mut self, rule: R) -> Self {
        self.rules.retain(|r| r.name() != rule.name());
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn remove_element(mut self, name: &str) -> Self {
        self.rules.retain(|r| r.name() != name);
        self
    }

    pub fn move_to_end(mut self, name: &str) -> Self {
        if let Some(index) = self.rules.iter().position(|r| r.name() == name) {
            let rule = self.rules.remove(index);
            self.rules.push(rule);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name() == name)
    }

    pub fn build(self) -> RuleRegistry {
        let builder = if self.contains(FALLBACK_NAME) {
            self.move_to_end(FALLBACK_NAME)
        } else {
            self.with_paragraphs()
        };

        let mut registry = RuleRegistry::new();
        for rule in builder.rules {
            registry.rules.push(rule);
        }
        registry.partition();
        log::debug!(
            "built rule registry with {} rules ({} multiline)",
            registry.len(),
            registry.multiline.len()
        );
        registry
    }
}
