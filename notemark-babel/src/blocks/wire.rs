//! JSON shape of the block tree
//!
//! Blocks are written the way the remote API expects them:
//!
//! ```text
//! { "object": "block", "type": "toggle", "toggle": { "rich_text": [...], "children": [...] },
//!   "has_children": true, "archived": false }
//! ```
//!
//! The payload structs below are private mirrors of that layout. [`Block`] and
//! [`TextRun`] convert to and from them, so the public model never carries
//! wire-only fields.

use super::nodes::*;
use super::rich_text::{Annotations, Color, Mention, TextRun};
use crate::error::ConversionError;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RichTextWire {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<TextContentWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mention: Option<MentionWire>,
    #[serde(default)]
    annotations: Annotations,
    #[serde(default)]
    plain_text: String,
    #[serde(default)]
    href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TextContentWire {
    content: String,
    #[serde(default)]
    link: Option<UrlWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UrlWire {
    url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IdWire {
    id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HostedWire {
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiry_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DateWire {
    start: String,
    #[serde(default)]
    end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MentionWire {
    Page { page: IdWire },
    Database { database: IdWire },
    Date { date: DateWire },
}

impl From<TextRun> for RichTextWire {
    fn from(run: TextRun) -> Self {
        let href = run.link.clone();
        match run.mention {
            Some(mention) => {
                let mention = match mention {
                    Mention::Page { id } => MentionWire::Page {
                        page: IdWire { id },
                    },
                    Mention::Database { id } => MentionWire::Database {
                        database: IdWire { id },
                    },
                    Mention::Date { start, end } => MentionWire::Date {
                        date: DateWire { start, end },
                    },
                };
                RichTextWire {
                    kind: "mention".to_string(),
                    text: None,
                    mention: Some(mention),
                    annotations: run.annotations,
                    plain_text: run.content,
                    href,
                }
            }
            None => RichTextWire {
                kind: "text".to_string(),
                text: Some(TextContentWire {
                    content: run.content.clone(),
                    link: run.link.map(|url| UrlWire { url }),
                }),
                mention: None,
                annotations: run.annotations,
                plain_text: run.content,
                href,
            },
        }
    }
}

impl From<RichTextWire> for TextRun {
    fn from(wire: RichTextWire) -> Self {
        let mention = wire.mention.map(|mention| match mention {
            MentionWire::Page { page } => Mention::Page { id: page.id },
            MentionWire::Database { database } => Mention::Database { id: database.id },
            MentionWire::Date { date } => Mention::Date {
                start: date.start,
                end: date.end,
            },
        });
        let (content, link) = match wire.text {
            Some(text) => (text.content, text.link.map(|l| l.url)),
            None => (wire.plain_text, None),
        };
        TextRun {
            content,
            annotations: wire.annotations,
            link: link.or(wire.href.filter(|_| mention.is_none())),
            mention,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TextPayload {
    #[serde(default)]
    rich_text: Vec<TextRun>,
    #[serde(default)]
    color: Color,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
}

impl From<TextBlock> for TextPayload {
    fn from(block: TextBlock) -> Self {
        Self {
            rich_text: block.rich_text,
            color: block.color,
            children: block.children,
        }
    }
}

impl From<TextPayload> for TextBlock {
    fn from(payload: TextPayload) -> Self {
        Self {
            rich_text: payload.rich_text,
            color: payload.color,
            children: payload.children,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HeadingPayload {
    #[serde(default)]
    rich_text: Vec<TextRun>,
    #[serde(default)]
    color: Color,
    #[serde(default)]
    is_toggleable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToDoPayload {
    #[serde(default)]
    rich_text: Vec<TextRun>,
    #[serde(default)]
    checked: bool,
    #[serde(default)]
    color: Color,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IconWire {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    emoji: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CalloutPayload {
    #[serde(default)]
    rich_text: Vec<TextRun>,
    #[serde(default)]
    icon: Option<IconWire>,
    #[serde(default)]
    color: Color,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
}

fn plain_text_language() -> String {
    PLAIN_TEXT_LANGUAGE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CodePayload {
    #[serde(default)]
    rich_text: Vec<TextRun>,
    #[serde(default)]
    caption: Vec<TextRun>,
    #[serde(default = "plain_text_language")]
    language: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EmptyPayload {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TablePayload {
    table_width: usize,
    #[serde(default)]
    has_column_header: bool,
    #[serde(default)]
    has_row_header: bool,
    #[serde(default)]
    children: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableRowPayload {
    #[serde(default)]
    cells: Vec<Vec<TextRun>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChildrenPayload {
    #[serde(default)]
    children: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width_ratio: Option<f64>,
    #[serde(default)]
    children: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinkPayload {
    url: String,
    #[serde(default)]
    caption: Vec<TextRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum FileSourceWire {
    External { external: UrlWire },
    FileUpload { file_upload: IdWire },
    File { file: HostedWire },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MediaPayload {
    #[serde(flatten)]
    source: FileSourceWire,
    #[serde(default)]
    caption: Vec<TextRun>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<Media> for MediaPayload {
    fn from(media: Media) -> Self {
        let source = match media.source {
            FileSource::External { url } => FileSourceWire::External {
                external: UrlWire { url },
            },
            FileSource::FileUpload { id } => FileSourceWire::FileUpload {
                file_upload: IdWire { id },
            },
            FileSource::Hosted { url, expiry_time } => FileSourceWire::File {
                file: HostedWire { url, expiry_time },
            },
            // Unresolved paths only exist mid-conversion.
            FileSource::Local { path } => FileSourceWire::External {
                external: UrlWire { url: path },
            },
        };
        Self {
            source,
            caption: media.caption,
            name: media.name,
        }
    }
}

impl From<MediaPayload> for Media {
    fn from(payload: MediaPayload) -> Self {
        let source = match payload.source {
            FileSourceWire::External { external } => FileSource::External { url: external.url },
            FileSourceWire::FileUpload { file_upload } => {
                FileSource::FileUpload { id: file_upload.id }
            }
            FileSourceWire::File { file } => FileSource::Hosted {
                url: file.url,
                expiry_time: file.expiry_time,
            },
        };
        Self {
            source,
            caption: payload.caption,
            name: payload.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EquationPayload {
    expression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableOfContentsPayload {
    #[serde(default)]
    color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChildResourcePayload {
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl From<ChildResource> for ChildResourcePayload {
    fn from(child: ChildResource) -> Self {
        Self {
            title: child.title,
            id: child.id,
        }
    }
}

impl From<ChildResourcePayload> for ChildResource {
    fn from(payload: ChildResourcePayload) -> Self {
        Self {
            title: payload.title,
            id: payload.id,
        }
    }
}

impl Block {
    fn payload_value(&self) -> Result<Value, serde_json::Error> {
        match self.clone() {
            Block::Paragraph(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Quote(b)
            | Block::Toggle(b) => serde_json::to_value(TextPayload::from(b)),
            Block::Heading(h) => serde_json::to_value(HeadingPayload {
                rich_text: h.rich_text,
                color: h.color,
                is_toggleable: h.is_toggleable,
                children: h.children,
            }),
            Block::ToDo(t) => serde_json::to_value(ToDoPayload {
                rich_text: t.rich_text,
                checked: t.checked,
                color: t.color,
                children: t.children,
            }),
            Block::Callout(c) => serde_json::to_value(CalloutPayload {
                rich_text: c.rich_text,
                icon: Some(IconWire {
                    kind: "emoji".to_string(),
                    emoji: Some(c.icon),
                }),
                color: c.color,
                children: c.children,
            }),
            Block::Code(c) => serde_json::to_value(CodePayload {
                rich_text: c.rich_text,
                caption: c.caption,
                language: c.language,
            }),
            Block::Divider | Block::Breadcrumb => serde_json::to_value(EmptyPayload::default()),
            Block::Table(t) => serde_json::to_value(TablePayload {
                table_width: t.table_width,
                has_column_header: t.has_column_header,
                has_row_header: t.has_row_header,
                children: t.children,
            }),
            Block::TableRow(r) => serde_json::to_value(TableRowPayload { cells: r.cells }),
            Block::ColumnList(c) => serde_json::to_value(ChildrenPayload {
                children: c.children,
            }),
            Block::Column(c) => serde_json::to_value(ColumnPayload {
                width_ratio: c.width_ratio,
                children: c.children,
            }),
            Block::Bookmark(p) | Block::Embed(p) => serde_json::to_value(LinkPayload {
                url: p.url,
                caption: p.caption,
            }),
            Block::Image(m) | Block::Video(m) | Block::Audio(m) | Block::File(m) | Block::Pdf(m) => {
                serde_json::to_value(MediaPayload::from(m))
            }
            Block::Equation(e) => serde_json::to_value(EquationPayload {
                expression: e.expression,
            }),
            Block::TableOfContents(t) => {
                serde_json::to_value(TableOfContentsPayload { color: t.color })
            }
            Block::ChildDatabase(c) | Block::ChildPage(c) => {
                serde_json::to_value(ChildResourcePayload::from(c))
            }
        }
    }

    fn from_payload(kind: &str, payload: Value) -> Result<Block, String> {
        fn read<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, String> {
            serde_json::from_value(payload).map_err(|e| e.to_string())
        }

        let block = match kind {
            "paragraph" => Block::Paragraph(read::<TextPayload>(payload)?.into()),
            "bulleted_list_item" => Block::BulletedListItem(read::<TextPayload>(payload)?.into()),
            "numbered_list_item" => Block::NumberedListItem(read::<TextPayload>(payload)?.into()),
            "quote" => Block::Quote(read::<TextPayload>(payload)?.into()),
            "toggle" => Block::Toggle(read::<TextPayload>(payload)?.into()),
            "heading_1" | "heading_2" | "heading_3" | "heading_4" | "heading_5" | "heading_6" => {
                let level = kind
                    .trim_start_matches("heading_")
                    .parse::<u8>()
                    .map_err(|e| e.to_string())?;
                let h: HeadingPayload = read(payload)?;
                Block::Heading(Heading {
                    level,
                    rich_text: h.rich_text,
                    color: h.color,
                    is_toggleable: h.is_toggleable,
                    children: h.children,
                })
            }
            "to_do" => {
                let t: ToDoPayload = read(payload)?;
                Block::ToDo(ToDo {
                    rich_text: t.rich_text,
                    checked: t.checked,
                    color: t.color,
                    children: t.children,
                })
            }
            "callout" => {
                let c: CalloutPayload = read(payload)?;
                let icon = c
                    .icon
                    .and_then(|icon| icon.emoji)
                    .unwrap_or_else(|| DEFAULT_CALLOUT_ICON.to_string());
                Block::Callout(Callout {
                    rich_text: c.rich_text,
                    icon,
                    color: c.color,
                    children: c.children,
                })
            }
            "code" => {
                let c: CodePayload = read(payload)?;
                Block::Code(Code {
                    rich_text: c.rich_text,
                    language: c.language,
                    caption: c.caption,
                })
            }
            "divider" => Block::Divider,
            "breadcrumb" => Block::Breadcrumb,
            "table" => {
                let t: TablePayload = read(payload)?;
                Block::Table(Table {
                    table_width: t.table_width,
                    has_column_header: t.has_column_header,
                    has_row_header: t.has_row_header,
                    children: t.children,
                })
            }
            "table_row" => Block::TableRow(TableRow {
                cells: read::<TableRowPayload>(payload)?.cells,
            }),
            "column_list" => Block::ColumnList(ColumnList {
                children: read::<ChildrenPayload>(payload)?.children,
            }),
            "column" => {
                let c: ColumnPayload = read(payload)?;
                Block::Column(Column {
                    width_ratio: c.width_ratio,
                    children: c.children,
                })
            }
            "bookmark" | "embed" => {
                let p: LinkPayload = read(payload)?;
                let preview = LinkPreview {
                    url: p.url,
                    caption: p.caption,
                };
                if kind == "bookmark" {
                    Block::Bookmark(preview)
                } else {
                    Block::Embed(preview)
                }
            }
            "image" => Block::Image(read::<MediaPayload>(payload)?.into()),
            "video" => Block::Video(read::<MediaPayload>(payload)?.into()),
            "audio" => Block::Audio(read::<MediaPayload>(payload)?.into()),
            "file" => Block::File(read::<MediaPayload>(payload)?.into()),
            "pdf" => Block::Pdf(read::<MediaPayload>(payload)?.into()),
            "equation" => Block::Equation(Equation {
                expression: read::<EquationPayload>(payload)?.expression,
            }),
            "table_of_contents" => Block::TableOfContents(TableOfContents {
                color: read::<TableOfContentsPayload>(payload)?.color,
            }),
            "child_database" => Block::ChildDatabase(read::<ChildResourcePayload>(payload)?.into()),
            "child_page" => Block::ChildPage(read::<ChildResourcePayload>(payload)?.into()),
            other => return Err(format!("unknown block type '{other}'")),
        };
        Ok(block)
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.type_name();
        let payload = self.payload_value().map_err(serde::ser::Error::custom)?;
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", kind)?;
        map.serialize_entry(kind, &payload)?;
        map.serialize_entry("has_children", &self.has_children())?;
        map.serialize_entry("archived", &false)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("type"))?
            .to_string();
        let payload = value
            .get_mut(kind.as_str())
            .map(Value::take)
            .unwrap_or_else(|| Value::Object(Default::default()));
        Block::from_payload(&kind, payload).map_err(D::Error::custom)
    }
}

/// Writes a block list as a JSON array.
pub fn blocks_to_json(blocks: &[Block], pretty: bool) -> Result<String, ConversionError> {
    let json = if pretty {
        serde_json::to_string_pretty(blocks)?
    } else {
        serde_json::to_string(blocks)?
    };
    Ok(json)
}

/// Reads a block list.
///
/// Accepts a bare array, or an object holding the array under `children`
/// (append payloads) or `results` (list responses).
pub fn blocks_from_json(json: &str) -> Result<Vec<Block>, ConversionError> {
    let value: Value = serde_json::from_str(json)?;
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("children").or_else(|| map.remove("results")) {
            Some(list) => list,
            None => {
                return Err(ConversionError::InvalidDocument(
                    "expected a block array or an object with `children`".to_string(),
                ))
            }
        },
        other => {
            return Err(ConversionError::InvalidDocument(format!(
                "expected a block array, found {other}"
            )))
        }
    };
    Ok(serde_json::from_value(list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::rich_text::plain_text;
    use serde_json::json;

    #[test]
    fn paragraph_uses_typed_payload_key() {
        let block = Block::paragraph(vec![TextRun::plain("Hi").bold()]);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "paragraph");
        assert_eq!(value["paragraph"]["rich_text"][0]["text"]["content"], "Hi");
        assert_eq!(value["paragraph"]["rich_text"][0]["annotations"]["bold"], true);
        assert_eq!(value["has_children"], false);
    }

    #[test]
    fn heading_level_comes_from_type_name() {
        let value = json!({
            "type": "heading_3",
            "heading_3": { "rich_text": [{ "type": "text", "text": { "content": "T" } }] }
        });
        let block: Block = serde_json::from_value(value).unwrap();
        match block {
            Block::Heading(h) => {
                assert_eq!(h.level, 3);
                assert_eq!(plain_text(&h.rich_text), "T");
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn mention_runs_round_trip() {
        let run = TextRun::mention(Mention::Date {
            start: "2024-05-01".to_string(),
            end: None,
        });
        let value = serde_json::to_value(&run).unwrap();
        assert_eq!(value["type"], "mention");
        assert_eq!(value["mention"]["type"], "date");
        assert_eq!(value["mention"]["date"]["start"], "2024-05-01");
        let back: TextRun = serde_json::from_value(value).unwrap();
        assert_eq!(back, run);
    }

    #[test]
    fn media_source_is_flattened() {
        let block = Block::Image(Media::external("https://x.test/a.png", vec![]));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["image"]["type"], "external");
        assert_eq!(value["image"]["external"]["url"], "https://x.test/a.png");
    }

    #[test]
    fn unknown_block_type_is_rejected() {
        let err = blocks_from_json(r#"[{"type": "synced_block", "synced_block": {}}]"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("synced_block"), "{err}");
    }

    #[test]
    fn accepts_children_envelope() {
        let blocks = blocks_from_json(r#"{"children": [{"type": "divider", "divider": {}}]}"#)
            .unwrap();
        assert_eq!(blocks, vec![Block::Divider]);
    }
}
