//! Block-tree JSON shape
//!
//! Payload checks compare `serde_json::Value`s, so key order inside payloads does not
//! matter. The envelope order is fixed and snapshotted.

use crate::common::fixture;
use insta::assert_json_snapshot;
use notemark_babel::blocks::FileSource;
use notemark_babel::{blocks_from_json, blocks_to_json, Block, ConversionError, MarkdownConverter};
use serde_json::{json, Value};

fn to_value(markdown: &str) -> Value {
    let blocks = MarkdownConverter::standard().convert(markdown);
    let json = blocks_to_json(&blocks, false).expect("blocks serialize");
    serde_json::from_str(&json).expect("valid JSON")
}

fn plain_annotations() -> Value {
    json!({
        "bold": false,
        "italic": false,
        "strikethrough": false,
        "underline": false,
        "code": false,
        "color": "default"
    })
}

#[test]
fn test_paragraph_with_bold_and_link() {
    let value = to_value("Hi **there** [docs](https://docs.rs)");
    let mut bold = plain_annotations();
    bold["bold"] = json!(true);

    assert_eq!(
        value,
        json!([{
            "object": "block",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [
                    {
                        "type": "text",
                        "text": { "content": "Hi ", "link": null },
                        "annotations": plain_annotations(),
                        "plain_text": "Hi ",
                        "href": null
                    },
                    {
                        "type": "text",
                        "text": { "content": "there", "link": null },
                        "annotations": bold,
                        "plain_text": "there",
                        "href": null
                    },
                    {
                        "type": "text",
                        "text": { "content": " ", "link": null },
                        "annotations": plain_annotations(),
                        "plain_text": " ",
                        "href": null
                    },
                    {
                        "type": "text",
                        "text": { "content": "docs", "link": { "url": "https://docs.rs" } },
                        "annotations": plain_annotations(),
                        "plain_text": "docs",
                        "href": "https://docs.rs"
                    }
                ],
                "color": "default"
            },
            "has_children": false,
            "archived": false
        }])
    );
}

#[test]
fn test_block_envelope() {
    let blocks = MarkdownConverter::standard().convert("[toc](blue)");
    assert_json_snapshot!(blocks[0], @r#"
    {
      "object": "block",
      "type": "table_of_contents",
      "table_of_contents": {
        "color": "blue"
      },
      "has_children": false,
      "archived": false
    }
    "#);
}

#[test]
fn test_external_image() {
    let value = to_value("![](https://x.test/a.png)");
    assert_eq!(value[0]["type"], "image");
    assert_eq!(
        value[0]["image"],
        json!({
            "type": "external",
            "external": { "url": "https://x.test/a.png" },
            "caption": []
        })
    );
}

#[test]
fn test_uploaded_file() {
    let value = to_value("[file](upload:abc \"Notes\")");
    assert_eq!(value[0]["file"]["type"], "file_upload");
    assert_eq!(value[0]["file"]["file_upload"], json!({ "id": "abc" }));
    assert_eq!(value[0]["file"]["caption"][0]["plain_text"], "Notes");
}

#[test]
fn test_service_hosted_files_are_read() {
    let json = r#"[{
        "object": "block",
        "type": "image",
        "image": {
            "type": "file",
            "file": { "url": "https://files.test/a.png?sig=1", "expiry_time": "2024-05-01T12:00:00.000Z" },
            "caption": []
        },
        "has_children": false,
        "archived": false
    }]"#;
    let blocks = blocks_from_json(json).unwrap();
    let Block::Image(media) = &blocks[0] else {
        panic!("expected an image, got {:?}", blocks[0]);
    };
    assert_eq!(
        media.source,
        FileSource::Hosted {
            url: "https://files.test/a.png?sig=1".to_string(),
            expiry_time: Some("2024-05-01T12:00:00.000Z".to_string()),
        }
    );

    let written: Value = serde_json::from_str(&blocks_to_json(&blocks, false).unwrap()).unwrap();
    assert_eq!(written[0]["image"]["type"], "file");
    assert_eq!(
        written[0]["image"]["file"]["expiry_time"],
        "2024-05-01T12:00:00.000Z"
    );

    let markdown = MarkdownConverter::standard().serialize(&blocks);
    assert_eq!(markdown, "![](https://files.test/a.png?sig=1)");
}

#[test]
fn test_container_children_are_nested() {
    let value = to_value("+++ More\n| inner");
    assert_eq!(value[0]["has_children"], true);
    assert_eq!(value[0]["toggle"]["children"][0]["type"], "paragraph");
    // separator after the toggle
    assert_eq!(value[1]["paragraph"]["rich_text"], json!([]));
}

#[test]
fn test_mentions_are_written_as_mentions() {
    let value = to_value("@db[tasks] @date[2024-02-29]");
    let runs = &value[0]["paragraph"]["rich_text"];
    assert_eq!(runs[0]["type"], "mention");
    assert_eq!(
        runs[0]["mention"],
        json!({ "type": "database", "database": { "id": "tasks" } })
    );
    assert_eq!(runs[2]["mention"]["date"]["start"], "2024-02-29");
}

#[test]
fn test_accepts_wrapped_lists() {
    let array = r#"[{"type": "divider", "divider": {}}]"#;
    let children = r#"{"children": [{"type": "divider", "divider": {}}]}"#;
    let results = r#"{"object": "list", "results": [{"type": "divider"}]}"#;
    for json in [array, children, results] {
        assert_eq!(blocks_from_json(json).unwrap(), vec![Block::Divider]);
    }
}

#[test]
fn test_object_without_block_list_is_rejected() {
    let err = blocks_from_json(r#"{"foo": 1}"#).unwrap_err();
    assert!(matches!(err, ConversionError::InvalidDocument(_)), "{err:?}");
}

#[test]
fn test_unknown_block_type_is_a_json_error() {
    let err = blocks_from_json(r#"[{"type": "hologram", "hologram": {}}]"#).unwrap_err();
    assert!(matches!(err, ConversionError::Json(_)), "{err:?}");
    assert!(err.to_string().contains("unknown block type"));
}

#[test]
fn test_kitchensink_survives_json() {
    let converter = MarkdownConverter::standard();
    let blocks = converter.convert(&fixture("kitchensink.md"));
    let json = blocks_to_json(&blocks, true).unwrap();
    assert_eq!(blocks_from_json(&json).unwrap(), blocks);
}
