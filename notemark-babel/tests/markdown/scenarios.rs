//! Markdown → blocks scenarios
//!
//! Each test converts a small document and checks the resulting tree through its
//! outline (see `tests/common`).

use crate::common::outline;
use insta::assert_snapshot;
use notemark_babel::blocks::{Color, FileSource, TextRun};
use notemark_babel::{Block, MarkdownConverter};

fn convert(md: &str) -> Vec<Block> {
    MarkdownConverter::standard().convert(md)
}

#[test]
fn test_heading_and_italic_paragraph() {
    let blocks = convert("# Welcome\n\nThis is *italic* text.");
    assert_snapshot!(outline(&blocks), @r"
    heading_1: Welcome
    paragraph: This is italic text.
    ");
    assert_eq!(
        blocks[1].rich_text().unwrap()[1],
        TextRun::plain("italic").italic()
    );
}

#[test]
fn test_toggle_with_hidden_content() {
    let blocks = convert("+++ Details\n| Hidden content\n\nVisible");
    assert_snapshot!(outline(&blocks), @r"
    toggle: Details
      paragraph: Hidden content
    paragraph
    paragraph: Visible
    ");
}

#[test]
fn test_two_column_layout_with_ratios() {
    let md = "::: columns\n::: column 0.7\nLeft\n:::\n::: column 0.3\nRight\n:::\n:::";
    let blocks = convert(md);
    assert_snapshot!(outline(&blocks), @r"
    column_list
      column (0.7)
        paragraph: Left
      column (0.3)
        paragraph: Right
    paragraph
    ");
}

#[test]
fn test_two_todos_without_paragraph_between() {
    let blocks = convert("- [ ] Buy milk\n- [x] Call mom");
    assert_snapshot!(outline(&blocks), @r"
    to_do [ ]: Buy milk
    to_do [x]: Call mom
    ");
}

#[test]
fn test_nested_lists() {
    let blocks = convert("- parent\n  - child\n    - grandchild\n- sibling\n\n1. first\n   continued");
    assert_snapshot!(outline(&blocks), @r"
    bulleted_list_item: parent
      bulleted_list_item: child
        bulleted_list_item: grandchild
    bulleted_list_item: sibling
    numbered_list_item: first
      paragraph: continued
    ");
}

#[test]
fn test_interleaved_constructs_keep_document_order() {
    let md = "Intro\n\n```\ncode\n```\n\n- item\n\n> quote\n\n| a | b |\n| - | - |\n| 1 | 2 |\nOutro";
    let blocks = convert(md);
    assert_snapshot!(outline(&blocks), @r"
    paragraph: Intro
    code: code
    paragraph
    bulleted_list_item: item
    quote: quote
    paragraph
    table
      table_row: a b
      table_row: 1 2
    paragraph
    paragraph: Outro
    ");
}

#[test]
fn test_paragraph_lines_are_joined() {
    let blocks = convert("First line\nsecond line\n\nNext paragraph");
    assert_snapshot!(outline(&blocks), @r"
    paragraph: First line⏎second line
    paragraph: Next paragraph
    ");
}

#[test]
fn test_toggleable_heading_with_nested_toggle() {
    let md = "+# Chapter\n| Intro text\n| +++ Inner\n| | Deep";
    let blocks = convert(md);
    assert_snapshot!(outline(&blocks), @r"
    heading_1: Chapter
      paragraph: Intro text
      toggle: Inner
        paragraph: Deep
      paragraph
    ");
    match &blocks[0] {
        Block::Heading(heading) => assert!(heading.is_toggleable),
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn test_malformed_table_becomes_text() {
    let blocks = convert("| a | b |\n| --- | --- |\n| only |");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].plain_text(), "| a | b |\n| --- | --- |\n| only |");
}

#[test]
fn test_unterminated_code_runs_to_end() {
    let blocks = convert("before\n\n```python\nprint('x')\n\nmore");
    assert_snapshot!(outline(&blocks), @r"
    paragraph: before
    code: print('x')⏎⏎more
    paragraph
    ");
}

#[test]
fn test_media_and_links() {
    let blocks = convert(
        "![Logo](https://x.test/logo.png)\n\n[bookmark](https://x.test \"X\" \"The X site\")\n\n[toc](gray)",
    );
    match &blocks[0] {
        Block::Image(image) => assert_eq!(
            image.source,
            FileSource::External {
                url: "https://x.test/logo.png".to_string()
            }
        ),
        other => panic!("expected image, got {other:?}"),
    }
    assert_eq!(blocks[1].plain_text(), "X - The X site");
    match &blocks[2] {
        Block::TableOfContents(toc) => assert_eq!(toc.color, Color::Gray),
        other => panic!("expected table of contents, got {other:?}"),
    }
}

#[test]
fn test_mentions_inside_text() {
    let blocks = convert("Ask @[user-page] about @db[tasks-db] before @date[2024-12-24].");
    let runs = blocks[0].rich_text().unwrap();
    let mentions = runs.iter().filter(|run| run.mention.is_some()).count();
    assert_eq!(mentions, 3);
}

#[test]
fn test_crlf_input_matches_lf_input() {
    let lf = convert("# T\n\n- a\n- b\n\n```\nx\n```");
    let crlf = convert("# T\r\n\r\n- a\r\n- b\r\n\r\n```\r\nx\r\n```");
    assert_eq!(lf, crlf);
}
