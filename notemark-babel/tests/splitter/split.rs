//! Splitting converted documents under the run-length limit

use notemark_babel::blocks::Code;
use notemark_babel::splitter::split_sentences;
use notemark_babel::{
    Block, ContentLengthSplitter, MarkdownConverter, TextRun, DEFAULT_MAX_TEXT_LENGTH,
};

fn split(markdown: &str, limit: usize) -> Vec<Block> {
    let blocks = MarkdownConverter::standard().convert(markdown);
    ContentLengthSplitter::new(limit).split_blocks(blocks)
}

#[test]
fn test_default_limit_leaves_headroom() {
    assert_eq!(DEFAULT_MAX_TEXT_LENGTH, 1900);
    assert_eq!(
        ContentLengthSplitter::default().max_text_length(),
        DEFAULT_MAX_TEXT_LENGTH
    );
}

#[test]
fn test_zero_limit_is_clamped() {
    assert_eq!(ContentLengthSplitter::new(0).max_text_length(), 1);
}

#[test]
fn test_long_paragraph_is_split_per_sentence() {
    let paragraph = "Alpha beta gamma. Delta epsilon zeta! Eta theta iota?";
    let blocks = split(paragraph, 30);
    let texts: Vec<String> = blocks.iter().map(Block::plain_text).collect();
    assert_eq!(
        texts,
        vec!["Alpha beta gamma.", "Delta epsilon zeta!", "Eta theta iota?"]
    );
    assert!(blocks.iter().all(|b| matches!(b, Block::Paragraph(_))));
}

#[test]
fn test_formatting_survives_sentence_split() {
    let blocks = split("First *part* here. Then `code` follows.", 20);
    assert_eq!(blocks.len(), 2);
    let runs = blocks[1].rich_text().unwrap();
    assert!(runs.iter().any(|run| run.annotations.code && run.content == "code"));
}

#[test]
fn test_other_blocks_are_truncated_not_split() {
    let heading = format!("# {}", "h".repeat(50));
    let blocks = split(&heading, 10);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].plain_text(), "h".repeat(10));
}

#[test]
fn test_long_sentence_is_truncated_after_splitting() {
    let text = format!("Short one. {}.", "x".repeat(40));
    let blocks = split(&text, 15);
    assert_eq!(blocks[0].plain_text(), "Short one.");
    assert_eq!(blocks[1].plain_text().chars().count(), 15);
}

#[test]
fn test_code_content_is_truncated_inside_toggles() {
    let md = format!("+++ Big\n| ```\n| {}\n| ```", "c".repeat(30));
    let blocks = split(&md, 12);
    let code = &blocks[0].children()[0];
    assert_eq!(code.plain_text(), "c".repeat(12));
}

#[test]
fn test_table_cells_are_truncated() {
    let md = format!("| head |\n| --- |\n| {} |", "t".repeat(50));
    let blocks = split(&md, 10);
    let Block::TableRow(row) = &blocks[0].children()[1] else {
        panic!("expected a table row, got {:?}", blocks[0].children()[1]);
    };
    assert_eq!(row.cells[0][0].content, "t".repeat(10));
    assert_eq!(row.cells[0][0].len_chars(), 10);
}

#[test]
fn test_captions_are_truncated() {
    let caption = "c".repeat(40);
    let md = format!(
        "![{caption}](https://x.test/i.png)\n\n[bookmark](https://x.test \"{caption}\")"
    );
    let blocks = split(&md, 8);
    assert_eq!(blocks[0].plain_text(), "c".repeat(8));
    assert_eq!(blocks[1].plain_text(), "c".repeat(8));
}

#[test]
fn test_code_caption_is_truncated() {
    let code = Block::Code(Code {
        rich_text: vec![TextRun::plain("short")],
        language: "rust".to_string(),
        caption: vec![TextRun::plain("k".repeat(30))],
    });
    let blocks = ContentLengthSplitter::new(5).split_blocks(vec![code]);
    let Block::Code(code) = &blocks[0] else {
        panic!("expected code, got {:?}", blocks[0]);
    };
    assert_eq!(code.caption[0].content, "k".repeat(5));
}

#[test]
fn test_sentence_boundaries() {
    assert_eq!(
        split_sentences("Wait... what? Yes. e.g.this stays"),
        vec!["Wait...", "what?", "Yes.", "e.g.this stays"]
    );
}
