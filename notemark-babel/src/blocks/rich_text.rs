//! Rich text runs: the inline content carried by every text block.

use serde::{Deserialize, Serialize};

/// Text and background colors understood by the block model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
}

impl Color {
    pub const ALL: [Color; 19] = [
        Color::Default,
        Color::Gray,
        Color::Brown,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Pink,
        Color::Red,
        Color::GrayBackground,
        Color::BrownBackground,
        Color::OrangeBackground,
        Color::YellowBackground,
        Color::GreenBackground,
        Color::BlueBackground,
        Color::PurpleBackground,
        Color::PinkBackground,
        Color::RedBackground,
    ];

    /// The snake_case name used both on the wire and in highlight markers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Gray => "gray",
            Color::Brown => "brown",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Red => "red",
            Color::GrayBackground => "gray_background",
            Color::BrownBackground => "brown_background",
            Color::OrangeBackground => "orange_background",
            Color::YellowBackground => "yellow_background",
            Color::GreenBackground => "green_background",
            Color::BlueBackground => "blue_background",
            Color::PurpleBackground => "purple_background",
            Color::PinkBackground => "pink_background",
            Color::RedBackground => "red_background",
        }
    }

    pub fn from_name(name: &str) -> Option<Color> {
        let name = name.trim().to_ascii_lowercase();
        Color::ALL.into_iter().find(|color| color.as_str() == name)
    }

    pub fn is_default(&self) -> bool {
        *self == Color::Default
    }
}

/// Formatting flags of a run. Always fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    pub fn is_plain(&self) -> bool {
        *self == Annotations::default()
    }

    /// Merges an enclosing span's formatting into these annotations.
    ///
    /// Flags are OR-ed; a color is only taken from the outer span when this run
    /// does not carry one of its own.
    pub fn merge_outer(&mut self, outer: &Annotations) {
        self.bold |= outer.bold;
        self.italic |= outer.italic;
        self.strikethrough |= outer.strikethrough;
        self.underline |= outer.underline;
        self.code |= outer.code;
        if self.color.is_default() {
            self.color = outer.color;
        }
    }
}

/// An inline reference to another entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mention {
    Page { id: String },
    Database { id: String },
    Date { start: String, end: Option<String> },
}

impl Mention {
    /// The text a mention displays when no title is known.
    pub fn display_text(&self) -> &str {
        match self {
            Mention::Page { id } | Mention::Database { id } => id,
            Mention::Date { start, .. } => start,
        }
    }
}

/// A contiguous piece of inline content with uniform formatting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "crate::blocks::wire::RichTextWire")]
#[serde(from = "crate::blocks::wire::RichTextWire")]
pub struct TextRun {
    pub content: String,
    pub annotations: Annotations,
    pub link: Option<String>,
    pub mention: Option<Mention>,
}

impl TextRun {
    /// An unformatted run.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_annotations(content: impl Into<String>, annotations: Annotations) -> Self {
        Self {
            content: content.into(),
            annotations,
            ..Default::default()
        }
    }

    pub fn mention(mention: Mention) -> Self {
        Self {
            content: mention.display_text().to_string(),
            mention: Some(mention),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.annotations.color = color;
        self
    }

    pub fn linked(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Number of characters the destination counts against its length limit.
    pub fn len_chars(&self) -> usize {
        self.content.chars().count()
    }
}

/// Concatenates the content of a run list.
pub fn plain_text(runs: &[TextRun]) -> String {
    runs.iter().map(|run| run.content.as_str()).collect()
}
