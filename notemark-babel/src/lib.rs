//! Conversion between a Markdown dialect and a typed block tree
//!
//!     The block tree is the document model of a remote content-management API: every
//!     node is a typed block (paragraph, heading, toggle, table, ...) with rich-text runs
//!     and, for containers, children. This crate converts Markdown into that tree and
//!     back, and keeps converted documents within the API's size limits.
//!
//!     This is a pure lib: it never prints, reads the environment or talks to the
//!     network. Remote side effects (creating child pages, uploading files, appending
//!     blocks) go through the collaborator traits in [`context`] and [`splitter`].
//!
//! Architecture
//!
//!     Every construct of the dialect is an element rule (./element.rs, ./elements/*).
//!     Rules are collected in an ordered registry (./registry.rs) and the converter
//!     (./converter.rs) runs them as a pipeline over the text:
//!
//!     markdown
//!       -> multiline extraction     ./common/extractor.rs
//!       -> overlap resolution       ./common/assembler.rs
//!       -> line scanning            ./common/scanner.rs
//!       -> assembly + spacing       ./common/assembler.rs
//!       -> collaborator calls       ./common/resolver.rs
//!       -> Vec<Block>
//!
//!     Containers (toggles, list items, columns) convert their bodies recursively through
//!     the same converter (./common/nested.rs). The reverse direction is a single
//!     recursive walk (./serializer.rs) driven by the same registry, and the inline part
//!     of both directions is ./inline.rs.
//!
//!     The file structure :
//!     .
//!     ├── blocks                  # Block tree, rich text, JSON wire shape
//!     ├── common                  # Pipeline stages shared by all rules
//!     ├── context.rs              # ParserContext and collaborator traits
//!     ├── converter.rs            # MarkdownConverter
//!     ├── element.rs              # ElementRule / MultilineRule traits
//!     ├── elements                # One module per construct
//!     ├── error.rs
//!     ├── format.rs               # Markdown / block JSON selection
//!     ├── inline.rs               # Inline run formatter
//!     ├── registry.rs             # RuleRegistry and its builder
//!     ├── serializer.rs           # Block tree to Markdown
//!     └── splitter.rs             # Content-length splitter
//!
//! Testing
//!     tests
//!     ├── blocks                  # JSON shape and round trips
//!     ├── markdown                # Conversion scenarios and properties
//!     └── splitter                # Splitting and submission fallback
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are
//!     included through tests/lib.rs.

pub mod blocks;
pub mod common;
pub mod context;
pub mod converter;
pub mod element;
pub mod elements;
pub mod error;
pub mod format;
pub mod inline;
pub mod registry;
pub mod serializer;
pub mod splitter;

pub use blocks::{blocks_from_json, blocks_to_json, Block, TextRun};
pub use context::{FileUploader, NestedConverter, ParserContext, ResourceFactory};
pub use converter::{ConvertOptions, MarkdownConverter};
pub use element::{ElementRule, Match, MultilineRule, Nesting};
pub use error::{CollaboratorError, ConversionError, SinkError};
pub use format::DocumentFormat;
pub use inline::{parse_inline, serialize_inline};
pub use registry::{
    create_minimal_registry, create_standard_registry, RuleRegistry, RuleRegistryBuilder,
};
pub use serializer::BlockSerializer;
pub use splitter::{BlockSink, ContentLengthSplitter, SubmitReport, DEFAULT_MAX_TEXT_LENGTH};
