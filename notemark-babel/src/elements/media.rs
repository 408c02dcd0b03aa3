//! Media blocks: images, videos, audio, files and PDFs.
//!
//! | Markdown                  | Block |
//! |---------------------------|-------|
//! | `![caption](url)`         | image |
//! | `@[caption](url)`         | video |
//! | `$[caption](url)`         | audio |
//! | `[file](url "caption")`   | file  |
//! | `[pdf](url "caption")`    | pdf   |
//!
//! `http(s)` URLs become external sources and `upload:<id>` refers to a finished
//! upload. Images, files and PDFs also accept local paths, which the converter hands
//! to the file uploader once the whole document has been parsed.

use crate::blocks::{plain_text, Block, FileSource, Media};
use crate::context::ParserContext;
use crate::element::ElementRule;
use crate::inline::{parse_inline, serialize_inline};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Scheme used to write upload ids back as Markdown.
pub const UPLOAD_SCHEME: &str = "upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    File,
    Pdf,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Image,
        MediaKind::Video,
        MediaKind::Audio,
        MediaKind::File,
        MediaKind::Pdf,
    ];

    fn name(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::File => "file",
            MediaKind::Pdf => "pdf",
        }
    }

    fn accepts_local_files(&self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::File | MediaKind::Pdf)
    }

    fn wrap(&self, media: Media) -> Block {
        match self {
            MediaKind::Image => Block::Image(media),
            MediaKind::Video => Block::Video(media),
            MediaKind::Audio => Block::Audio(media),
            MediaKind::File => Block::File(media),
            MediaKind::Pdf => Block::Pdf(media),
        }
    }

    fn unwrap<'b>(&self, block: &'b Block) -> Option<&'b Media> {
        match (self, block) {
            (MediaKind::Image, Block::Image(m))
            | (MediaKind::Video, Block::Video(m))
            | (MediaKind::Audio, Block::Audio(m))
            | (MediaKind::File, Block::File(m))
            | (MediaKind::Pdf, Block::Pdf(m)) => Some(m),
            _ => None,
        }
    }
}

// Caption first, then location.
static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^!\[([^\]]*)\]\(([^)\s]+)\)\s*$").expect("valid image regex")
});
static VIDEO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@\[([^\]]*)\]\(([^)\s]+)\)\s*$").expect("valid video regex")
});
static AUDIO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\$\[([^\]]*)\]\(([^)\s]+)\)\s*$"#).expect("valid audio regex")
});
// Location first, then the optional quoted caption.
static FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[file\]\(([^)\s"]+)(?:\s+"([^"]*)")?\)\s*$"#).expect("valid file regex")
});
static PDF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[pdf\]\(([^)\s"]+)(?:\s+"([^"]*)")?\)\s*$"#).expect("valid pdf regex")
});

/// Classifies a location written in Markdown.
fn source_for(location: &str) -> Option<FileSource> {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Some(FileSource::External {
                url: location.to_string(),
            })
        }
        Ok(url) if url.scheme() == UPLOAD_SCHEME => Some(FileSource::FileUpload {
            id: url.path().to_string(),
        }),
        _ => None,
    }
}

fn location_for(source: &FileSource) -> String {
    match source {
        FileSource::External { url } | FileSource::Hosted { url, .. } => url.clone(),
        FileSource::FileUpload { id } => format!("{UPLOAD_SCHEME}:{id}"),
        FileSource::Local { path } => path.clone(),
    }
}

/// One rule per media kind, sharing the parsing code.
#[derive(Debug, Clone, Copy)]
pub struct MediaRule {
    kind: MediaKind,
}

impl MediaRule {
    pub fn new(kind: MediaKind) -> Self {
        Self { kind }
    }

    pub fn image() -> Self {
        Self::new(MediaKind::Image)
    }

    pub fn video() -> Self {
        Self::new(MediaKind::Video)
    }

    pub fn audio() -> Self {
        Self::new(MediaKind::Audio)
    }

    pub fn file() -> Self {
        Self::new(MediaKind::File)
    }

    pub fn pdf() -> Self {
        Self::new(MediaKind::Pdf)
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    fn regex(&self) -> &'static Regex {
        match self.kind {
            MediaKind::Image => &IMAGE,
            MediaKind::Video => &VIDEO,
            MediaKind::Audio => &AUDIO,
            MediaKind::File => &FILE,
            MediaKind::Pdf => &PDF,
        }
    }

    /// `(location, caption)` of a matching line.
    fn parts<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        let caps = self.regex().captures(text.trim())?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        match self.kind {
            MediaKind::Image | MediaKind::Video | MediaKind::Audio => Some((group(2), group(1))),
            MediaKind::File | MediaKind::Pdf => Some((group(1), group(2))),
        }
    }
}

impl ElementRule for MediaRule {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn description(&self) -> &str {
        match self.kind {
            MediaKind::Image => "Images: ![caption](url)",
            MediaKind::Video => "Videos: @[caption](url)",
            MediaKind::Audio => "Audio: $[caption](url)",
            MediaKind::File => "Files: [file](url \"caption\")",
            MediaKind::Pdf => "PDF documents: [pdf](url \"caption\")",
        }
    }

    fn matches_markdown(&self, text: &str) -> bool {
        self.regex().is_match(text.trim())
    }

    fn matches_block(&self, block: &Block) -> bool {
        self.kind.unwrap(block).is_some()
    }

    fn markdown_to_block(&self, text: &str, _ctx: &ParserContext<'_>) -> Option<Block> {
        let (location, caption) = self.parts(text)?;
        let source = match source_for(location) {
            Some(source) => source,
            None if self.kind.accepts_local_files() => FileSource::Local {
                path: location.to_string(),
            },
            None => {
                log::debug!("{} needs a remote URL, got {location:?}", self.kind.name());
                return None;
            }
        };
        Some(self.kind.wrap(Media {
            source,
            caption: parse_inline(caption),
            name: None,
        }))
    }

    fn block_to_markdown(&self, block: &Block) -> Option<String> {
        let media = self.kind.unwrap(block)?;
        let location = location_for(&media.source);
        let caption = serialize_inline(&media.caption);
        let line = match self.kind {
            MediaKind::Image => format!("![{caption}]({location})"),
            MediaKind::Video => format!("@[{caption}]({location})"),
            MediaKind::Audio => format!("$[{caption}]({location})"),
            MediaKind::File | MediaKind::Pdf => {
                let caption = plain_text(&media.caption);
                if caption.is_empty() {
                    format!("[{}]({location})", self.kind.name())
                } else {
                    format!("[{}]({location} \"{caption}\")", self.kind.name())
                }
            }
        };
        Some(line)
    }
}
