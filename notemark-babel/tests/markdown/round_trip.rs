//! Markdown → blocks → Markdown
//!
//! Canonical Markdown (the way the serializer writes it) has to survive a round trip
//! unchanged. Non-canonical input only has to reach a fixed point after one pass.

use crate::common::{fixture, init_logging};
use notemark_babel::MarkdownConverter;
use rstest::rstest;

fn round_trip(md: &str) -> String {
    let converter = MarkdownConverter::standard();
    converter.serialize(&converter.convert(md))
}

#[test]
fn test_kitchensink_round_trip() {
    init_logging();
    let md = fixture("kitchensink.md");
    assert_eq!(round_trip(&md), md.trim_end());
}

#[rstest]
#[case::heading("## Section")]
#[case::emphasis("Mixed **bold** and *italic* and ~~gone~~")]
#[case::nested_emphasis("***both***")]
#[case::link("See [the docs](https://docs.rs)")]
#[case::highlight("Colored ==blue:note== here")]
#[case::mentions("@[page-1] and @db[db-2] on @date[2024-01-31]")]
#[case::bullets("- a\n- b\n- c")]
#[case::numbered("1. a\n2. b")]
#[case::todos("- [x] done\n- [ ] open")]
#[case::nested_bullets("- a\n  - b\n    - c")]
#[case::quote("> one\n> two")]
#[case::callout_default_icon("!> Plain note")]
#[case::callout_icon("!> [🔥] Hot")]
#[case::code("```python\nprint('hi')\n```")]
#[case::code_plain("```\nraw\n```")]
#[case::divider("---")]
#[case::table("| a | b |\n| --- | --- |\n| 1 | 2 |")]
#[case::toggle("+++ Title\n| body\n|\n| - item")]
#[case::toggleable_heading("+### Small\n| inside")]
#[case::columns("::: columns\n::: column\nA\n:::\n::: column\nB\n:::\n:::")]
#[case::bookmark("[bookmark](https://x.test \"Title\")")]
#[case::bookmark_title_with_dash("[bookmark](https://x.test \"Rust - The Book\")")]
#[case::embed("<embed>(https://x.test/e)")]
#[case::image("![](https://x.test/i.png)")]
#[case::uploaded_file("[file](upload:abc123 \"Notes\")")]
#[case::equation_inline("$$a^2 + b^2$$")]
#[case::equation_block("$$\nx = 1\ny = 2\n$$")]
#[case::toc_color("[toc](blue)")]
#[case::breadcrumb("[breadcrumb]")]
#[case::child_page("[page: Notes]")]
#[case::spacer("above\n\n<!-- spacer -->\n\nbelow")]
fn test_canonical_construct_round_trips(#[case] md: &str) {
    assert_eq!(round_trip(md), md);
}

#[rstest]
#[case::star_bullets("* a\n* b", "- a\n- b")]
#[case::misnumbered("3. a\n7. b", "1. a\n2. b")]
#[case::uppercase_todo("- [X] done", "- [x] done")]
#[case::extra_blank_lines("a\n\n\n\nb", "a\n\nb")]
#[case::explicit_toggle_close("+++ T\n| x\n+++", "+++ T\n| x")]
#[case::default_callout_icon("!> [💡] Idea", "!> Idea")]
#[case::table_alignment("| a |\n| :---: |\n| 1 |", "| a |\n| --- |\n| 1 |")]
#[case::crlf("# T\r\n\r\ntext", "# T\n\ntext")]
#[case::spacer_after_code("```\nx\n```\n\n<!-- spacer -->\n\ntext", "```\nx\n```\n\ntext")]
#[case::stray_column_text(
    "::: columns\nStray intro text\n::: column\nA\n:::\n:::",
    "::: columns\n::: column\nStray intro text\n:::\n::: column\nA\n:::\n:::"
)]
fn test_non_canonical_input_is_normalized(#[case] md: &str, #[case] expected: &str) {
    let once = round_trip(md);
    assert_eq!(once, expected);
    assert_eq!(round_trip(&once), once);
}
