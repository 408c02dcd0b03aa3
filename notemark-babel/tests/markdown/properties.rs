//! Property tests for the conversion pipeline.

use notemark_babel::{Block, ContentLengthSplitter, MarkdownConverter};
use proptest::prelude::*;

/// Canonical constructs that can follow each other after a blank line without
/// changing meaning.
const FRAGMENTS: &[&str] = &[
    "## Title",
    "Some plain words.",
    "Text with **bold** and [a link](https://x.test).",
    "```rust\nlet x = 1;\n```",
    "> quoted",
    "!> [📌] Pinned",
    "---",
    "+++ Toggle\n| inside",
    "$$x^2$$",
    "[bookmark](https://x.test \"X\")",
    "[toc]",
    "[page: Child]",
];

fn all_text(blocks: &[Block], out: &mut String) {
    for block in blocks {
        out.push_str(&block.plain_text());
        out.push('\n');
        all_text(block.children(), out);
    }
}

fn longest_run(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| {
            let own = block
                .runs()
                .iter()
                .flat_map(|runs| runs.iter())
                .map(|run| run.content.chars().count())
                .max()
                .unwrap_or(0);
            own.max(longest_run(block.children()))
        })
        .max()
        .unwrap_or(0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_convert_is_total(input in "[-#*_`|+>!\\[\\]()=@$:~ a-z0-9.\n]{0,300}") {
        let converter = MarkdownConverter::standard();
        let blocks = converter.convert(&input);
        let _ = converter.serialize(&blocks);
    }

    #[test]
    fn prop_arbitrary_unicode_does_not_panic(input in any::<String>()) {
        let converter = MarkdownConverter::standard();
        let _ = converter.convert(&input);
    }

    #[test]
    fn prop_plain_words_survive(lines in prop::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,6}", 1..8)) {
        let input = lines.join("\n\n");
        let blocks = MarkdownConverter::standard().convert(&input);
        let mut text = String::new();
        all_text(&blocks, &mut text);
        for word in input.split_whitespace() {
            prop_assert!(text.contains(word), "lost {word:?} from {input:?}");
        }
    }

    #[test]
    fn prop_split_blocks_respects_limit(
        sentences in prop::collection::vec("[A-Za-z ]{1,60}[.!?]", 1..12),
        limit in 10usize..80,
    ) {
        let text = sentences.join(" ");
        let input = [
            text.clone(),
            format!("- {text}"),
            format!("| head |\n| --- |\n| {text} |"),
            format!("![{text}](https://x.test/i.png)"),
            format!("[bookmark](https://x.test \"{text}\")"),
            format!("+++ Toggle\n| {text}"),
            format!("```\n{text}\n```"),
        ]
        .join("\n\n");
        let splitter = ContentLengthSplitter::new(limit);
        let blocks = splitter.split_blocks(MarkdownConverter::standard().convert(&input));
        prop_assert!(longest_run(&blocks) <= limit);
    }

    #[test]
    fn prop_fragment_documents_round_trip(picks in prop::collection::vec(prop::sample::select(FRAGMENTS), 1..8)) {
        let input = picks.join("\n\n");
        let converter = MarkdownConverter::standard();
        let output = converter.serialize(&converter.convert(&input));
        prop_assert_eq!(output, input);
    }
}
