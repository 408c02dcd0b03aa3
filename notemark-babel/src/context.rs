//! Parser context and the collaborators rules may call.
//!
//! Rules are stateless. Everything a rule needs beyond its own text arrives through
//! [`ParserContext`]: the callback that converts nested Markdown with the same
//! registry, and optional handles to the remote side (creating child databases and
//! pages, uploading local files). No state survives a top-level conversion.

use crate::blocks::Block;
use crate::error::CollaboratorError;
use std::path::Path;

/// Converts a fragment of Markdown into blocks, recursively.
///
/// Implemented by [`crate::converter::MarkdownConverter`]; rules only ever see it
/// through [`ParserContext::convert_nested`].
pub trait NestedConverter: Send + Sync {
    fn convert_nested(&self, text: &str, ctx: &ParserContext<'_>) -> Vec<Block>;
}

/// Creates remote resources referenced by the Markdown.
pub trait ResourceFactory: Send + Sync {
    /// Creates a database under `parent_id` and returns its id.
    fn create_database(&self, parent_id: Option<&str>, title: &str)
        -> Result<String, CollaboratorError>;

    /// Creates a page under `parent_id` and returns its id.
    fn create_page(&self, parent_id: Option<&str>, title: &str)
        -> Result<String, CollaboratorError>;
}

/// Uploads a local file and returns the upload id referenced by media blocks.
pub trait FileUploader: Send + Sync {
    fn upload(&self, path: &Path) -> Result<String, CollaboratorError>;
}

/// Context handed to every rule invocation.
#[derive(Clone, Copy)]
pub struct ParserContext<'a> {
    converter: &'a dyn NestedConverter,
    resources: Option<&'a dyn ResourceFactory>,
    uploader: Option<&'a dyn FileUploader>,
    parent_id: Option<&'a str>,
}

impl<'a> ParserContext<'a> {
    pub fn new(converter: &'a dyn NestedConverter) -> Self {
        Self {
            converter,
            resources: None,
            uploader: None,
            parent_id: None,
        }
    }

    pub fn with_resources(mut self, resources: &'a dyn ResourceFactory) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn with_uploader(mut self, uploader: &'a dyn FileUploader) -> Self {
        self.uploader = Some(uploader);
        self
    }

    pub fn with_parent_id(mut self, parent_id: &'a str) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Converts nested Markdown with the same converter and collaborators.
    pub fn convert_nested(&self, text: &str) -> Vec<Block> {
        self.converter.convert_nested(text, self)
    }

    pub fn resources(&self) -> Option<&'a dyn ResourceFactory> {
        self.resources
    }

    pub fn uploader(&self) -> Option<&'a dyn FileUploader> {
        self.uploader
    }

    pub fn parent_id(&self) -> Option<&'a str> {
        self.parent_id
    }
}
