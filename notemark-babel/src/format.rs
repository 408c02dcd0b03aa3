//! Document formats
//!
//! The two representations a document can be read from and written to: the Markdown
//! dialect and the block-tree JSON. Both directions go through a
//! [`MarkdownConverter`], so the registry decides which constructs are understood.

use crate::blocks::{blocks_from_json, blocks_to_json, Block};
use crate::converter::MarkdownConverter;
use crate::error::ConversionError;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Markdown,
    Blocks,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Markdown, DocumentFormat::Blocks];

    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Blocks => "blocks",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "Markdown dialect",
            DocumentFormat::Blocks => "Block-tree JSON",
        }
    }

    /// File extensions without the leading dot
    pub fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Markdown => &["md", "markdown"],
            DocumentFormat::Blocks => &["json"],
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConversionError> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| ConversionError::FormatNotFound(name.to_string()))
    }

    /// Detect the format from a file extension
    ///
    /// ```ignore
    /// assert_eq!(DocumentFormat::detect_from_filename("notes.md"), Some(DocumentFormat::Markdown));
    /// assert_eq!(DocumentFormat::detect_from_filename("page.json"), Some(DocumentFormat::Blocks));
    /// assert_eq!(DocumentFormat::detect_from_filename("notes.txt"), None);
    /// ```
    pub fn detect_from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
    }

    /// Reads a document in this format.
    pub fn read(
        &self,
        source: &str,
        converter: &MarkdownConverter,
    ) -> Result<Vec<Block>, ConversionError> {
        match self {
            DocumentFormat::Markdown => Ok(converter.convert(source)),
            DocumentFormat::Blocks => blocks_from_json(source),
        }
    }

    /// Writes a document in this format.
    pub fn write(
        &self,
        blocks: &[Block],
        converter: &MarkdownConverter,
        pretty: bool,
    ) -> Result<String, ConversionError> {
        match self {
            DocumentFormat::Markdown => Ok(converter.serialize(blocks)),
            DocumentFormat::Blocks => blocks_to_json(blocks, pretty),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_from_filename() {
        assert_eq!(
            DocumentFormat::detect_from_filename("notes.md"),
            Some(DocumentFormat::Markdown)
        );
        assert_eq!(
            DocumentFormat::detect_from_filename("dir/NOTES.Markdown"),
            Some(DocumentFormat::Markdown)
        );
        assert_eq!(
            DocumentFormat::detect_from_filename("page.json"),
            Some(DocumentFormat::Blocks)
        );
        assert_eq!(DocumentFormat::detect_from_filename("notes.txt"), None);
        assert_eq!(DocumentFormat::detect_from_filename("README"), None);
    }

    #[test]
    fn from_name() {
        assert_eq!(
            DocumentFormat::from_name("blocks").unwrap(),
            DocumentFormat::Blocks
        );
        assert!(matches!(
            DocumentFormat::from_name("html"),
            Err(ConversionError::FormatNotFound(name)) if name == "html"
        ));
    }

    #[test]
    fn markdown_to_blocks_and_back() {
        let converter = MarkdownConverter::standard();
        let blocks = DocumentFormat::Markdown
            .read("# Title\n\n- [x] done", &converter)
            .unwrap();
        let json = DocumentFormat::Blocks.write(&blocks, &converter, false).unwrap();
        let back = DocumentFormat::Blocks.read(&json, &converter).unwrap();
        assert_eq!(back, blocks);
        assert_eq!(
            DocumentFormat::Markdown.write(&back, &converter, true).unwrap(),
            "# Title\n\n- [x] done"
        );
    }
}
