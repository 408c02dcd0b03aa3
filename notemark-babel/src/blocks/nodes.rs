//! Core data structures of the block tree.
//!
//! A [`Block`] carries exactly one typed payload. Text-bearing payloads hold a
//! `rich_text` run list, containers hold `children`. The JSON shape used by the
//! remote API lives in [`crate::blocks::wire`], these types stay free of it.

use super::rich_text::{plain_text, Color, TextRun};

/// A node of the block tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(TextBlock),
    Heading(Heading),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDo),
    Quote(TextBlock),
    Callout(Callout),
    Code(Code),
    Divider,
    Table(Table),
    TableRow(TableRow),
    Toggle(TextBlock),
    ColumnList(ColumnList),
    Column(Column),
    Bookmark(LinkPreview),
    Embed(LinkPreview),
    Image(Media),
    Video(Media),
    Audio(Media),
    File(Media),
    Pdf(Media),
    Equation(Equation),
    TableOfContents(TableOfContents),
    Breadcrumb,
    ChildDatabase(ChildResource),
    ChildPage(ChildResource),
}

/// Payload shared by paragraphs, list items, quotes and toggles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub rich_text: Vec<TextRun>,
    pub color: Color,
    pub children: Vec<Block>,
}

impl TextBlock {
    pub fn new(rich_text: Vec<TextRun>) -> Self {
        Self {
            rich_text,
            ..Default::default()
        }
    }

    pub fn with_children(rich_text: Vec<TextRun>, children: Vec<Block>) -> Self {
        Self {
            rich_text,
            children,
            ..Default::default()
        }
    }
}

/// Heading levels 1 to 6. Toggleable headings own their body as children.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub rich_text: Vec<TextRun>,
    pub color: Color,
    pub is_toggleable: bool,
    pub children: Vec<Block>,
}

impl Heading {
    pub fn new(level: u8, rich_text: Vec<TextRun>) -> Self {
        Self {
            level: level.clamp(1, 6),
            rich_text,
            color: Color::Default,
            is_toggleable: false,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToDo {
    pub rich_text: Vec<TextRun>,
    pub checked: bool,
    pub color: Color,
    pub children: Vec<Block>,
}

/// Icon shown in front of a callout when none is given.
pub const DEFAULT_CALLOUT_ICON: &str = "💡";

#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub rich_text: Vec<TextRun>,
    pub icon: String,
    pub color: Color,
    pub children: Vec<Block>,
}

impl Callout {
    pub fn new(rich_text: Vec<TextRun>, icon: impl Into<String>) -> Self {
        Self {
            rich_text,
            icon: icon.into(),
            color: Color::Default,
            children: Vec::new(),
        }
    }
}

/// Language used for code blocks without an info string.
pub const PLAIN_TEXT_LANGUAGE: &str = "plain text";

#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub rich_text: Vec<TextRun>,
    pub language: String,
    pub caption: Vec<TextRun>,
}

/// A table; its children are [`Block::TableRow`] values, header row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<Vec<TextRun>>,
}

/// Children are [`Block::Column`] values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnList {
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    pub width_ratio: Option<f64>,
    pub children: Vec<Block>,
}

/// Bookmarks and embeds: a URL with an optional caption.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkPreview {
    pub url: String,
    pub caption: Vec<TextRun>,
}

/// Where the bytes of a media block come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    External { url: String },
    FileUpload { id: String },
    /// Stored by the remote service; the URL is signed and expires.
    Hosted {
        url: String,
        expiry_time: Option<String>,
    },
    /// A local path that still has to be uploaded.
    Local { path: String },
}

impl FileSource {
    /// URL, upload id or path, depending on the source.
    pub fn location(&self) -> &str {
        match self {
            FileSource::External { url } => url,
            FileSource::FileUpload { id } => id,
            FileSource::Hosted { url, .. } => url,
            FileSource::Local { path } => path,
        }
    }
}

/// Payload of image, video, audio, file and pdf blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub source: FileSource,
    pub caption: Vec<TextRun>,
    pub name: Option<String>,
}

impl Media {
    pub fn external(url: impl Into<String>, caption: Vec<TextRun>) -> Self {
        Self {
            source: FileSource::External { url: url.into() },
            caption,
            name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Equation {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableOfContents {
    pub color: Color,
}

/// A database or page created beneath the current one.
///
/// `id` is only known once a resource factory has created the remote object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChildResource {
    pub title: String,
    pub id: Option<String>,
}

impl Block {
    pub fn paragraph(rich_text: Vec<TextRun>) -> Self {
        Block::Paragraph(TextBlock::new(rich_text))
    }

    /// The empty paragraph used as a visual separator.
    pub fn empty_paragraph() -> Self {
        Block::Paragraph(TextBlock::default())
    }

    /// The block type name as used on the wire (`heading_2`, `to_do`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading(h) => match h.level {
                1 => "heading_1",
                2 => "heading_2",
                3 => "heading_3",
                4 => "heading_4",
                5 => "heading_5",
                _ => "heading_6",
            },
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Divider => "divider",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::Toggle(_) => "toggle",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::Audio(_) => "audio",
            Block::File(_) => "file",
            Block::Pdf(_) => "pdf",
            Block::Equation(_) => "equation",
            Block::TableOfContents(_) => "table_of_contents",
            Block::Breadcrumb => "breadcrumb",
            Block::ChildDatabase(_) => "child_database",
            Block::ChildPage(_) => "child_page",
        }
    }

    pub fn rich_text(&self) -> Option<&[TextRun]> {
        match self {
            Block::Paragraph(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Quote(b)
            | Block::Toggle(b) => Some(&b.rich_text),
            Block::Heading(h) => Some(&h.rich_text),
            Block::ToDo(t) => Some(&t.rich_text),
            Block::Callout(c) => Some(&c.rich_text),
            Block::Code(c) => Some(&c.rich_text),
            _ => None,
        }
    }

    pub fn rich_text_mut(&mut self) -> Option<&mut Vec<TextRun>> {
        match self {
            Block::Paragraph(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Quote(b)
            | Block::Toggle(b) => Some(&mut b.rich_text),
            Block::Heading(h) => Some(&mut h.rich_text),
            Block::ToDo(t) => Some(&mut t.rich_text),
            Block::Callout(c) => Some(&mut c.rich_text),
            Block::Code(c) => Some(&mut c.rich_text),
            _ => None,
        }
    }

    /// Every run list this block owns: rich text, captions and table cells.
    pub fn runs(&self) -> Vec<&[TextRun]> {
        match self {
            Block::Code(c) => vec![&c.rich_text, &c.caption],
            Block::TableRow(row) => row.cells.iter().map(Vec::as_slice).collect(),
            Block::Bookmark(p) | Block::Embed(p) => vec![&p.caption],
            Block::Image(m) | Block::Video(m) | Block::Audio(m) | Block::File(m) | Block::Pdf(m) => {
                vec![&m.caption]
            }
            other => other.rich_text().into_iter().collect(),
        }
    }

    /// Mutable counterpart of [`Block::runs`].
    pub fn runs_mut(&mut self) -> Vec<&mut Vec<TextRun>> {
        match self {
            Block::Code(c) => vec![&mut c.rich_text, &mut c.caption],
            Block::TableRow(row) => row.cells.iter_mut().collect(),
            Block::Bookmark(p) | Block::Embed(p) => vec![&mut p.caption],
            Block::Image(m) | Block::Video(m) | Block::Audio(m) | Block::File(m) | Block::Pdf(m) => {
                vec![&mut m.caption]
            }
            other => other.rich_text_mut().into_iter().collect(),
        }
    }

    /// Children of a container block; empty for leaves.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Paragraph(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Quote(b)
            | Block::Toggle(b) => &b.children,
            Block::Heading(h) => &h.children,
            Block::ToDo(t) => &t.children,
            Block::Callout(c) => &c.children,
            Block::Table(t) => &t.children,
            Block::ColumnList(c) => &c.children,
            Block::Column(c) => &c.children,
            _ => &[],
        }
    }

    /// Mutable children, or `None` when the block type cannot hold any.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match self {
            Block::Paragraph(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Quote(b)
            | Block::Toggle(b) => Some(&mut b.children),
            Block::Heading(h) => Some(&mut h.children),
            Block::ToDo(t) => Some(&mut t.children),
            Block::Callout(c) => Some(&mut c.children),
            Block::Table(t) => Some(&mut t.children),
            Block::ColumnList(c) => Some(&mut c.children),
            Block::Column(c) => Some(&mut c.children),
            _ => None,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Plain text of this block's own runs (children excluded).
    pub fn plain_text(&self) -> String {
        match self {
            Block::TableRow(row) => row
                .cells
                .iter()
                .map(|cell| plain_text(cell))
                .collect::<Vec<_>>()
                .join(" "),
            Block::Bookmark(p) | Block::Embed(p) => plain_text(&p.caption),
            Block::Image(m) | Block::Video(m) | Block::Audio(m) | Block::File(m) | Block::Pdf(m) => {
                plain_text(&m.caption)
            }
            Block::Equation(e) => e.expression.clone(),
            Block::ChildDatabase(c) | Block::ChildPage(c) => c.title.clone(),
            _ => self.rich_text().map(plain_text).unwrap_or_default(),
        }
    }

    pub fn is_empty_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(p) if p.rich_text.is_empty() && p.children.is_empty())
    }

    /// Blocks that span several Markdown lines and are followed by a separator.
    pub fn is_multiline_kind(&self) -> bool {
        matches!(
            self,
            Block::Code(_)
                | Block::Table(_)
                | Block::Toggle(_)
                | Block::Quote(_)
                | Block::Callout(_)
                | Block::ColumnList(_)
        )
    }
}
