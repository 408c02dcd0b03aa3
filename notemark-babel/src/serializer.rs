//! Block tree to Markdown
//!
//! Each block is written by the first rule of the registry that claims its type, and
//! its children are then written according to that rule's [`Nesting`]:
//!
//! | Nesting       | Children                                      |
//! |---------------|-----------------------------------------------|
//! | `None`        | not written                                   |
//! | `Pipe`        | prefixed with `| ` (bare `|` on blank lines)  |
//! | `Indent`      | indented by two spaces                        |
//! | `Fenced`      | written as is, then a `:::` line              |
//! | `Concatenate` | joined with single newlines, then `:::`       |
//!
//! Siblings are separated by a blank line, except consecutive list items of the same
//! kind, which are separated by a single newline. Numbered items are renumbered from 1
//! within each run.
//!
//! Empty paragraphs are either separators the converter inserted after a multi-line
//! block (skipped, the converter inserts them again) or deliberate spacing, written as
//! [`SPACER_MARKER`].

use crate::blocks::Block;
use crate::common::lines::join;
use crate::common::scanner::SPACER_MARKER;
use crate::element::Nesting;
use crate::inline::serialize_inline;
use crate::registry::RuleRegistry;

const FENCE_CLOSE: &str = ":::";

pub struct BlockSerializer<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> BlockSerializer<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn serialize(&self, blocks: &[Block]) -> String {
        let mut out = String::new();
        let mut previous: Option<&Block> = None;
        let mut last_written: Option<&Block> = None;
        let mut number = 0;

        for block in blocks {
            let is_separator =
                block.is_empty_paragraph() && previous.is_some_and(Block::is_multiline_kind);
            previous = Some(block);
            if is_separator {
                continue;
            }

            let Some(mut rendered) = self.render(block) else {
                continue;
            };

            if let Block::NumberedListItem(_) = block {
                number = match last_written {
                    Some(Block::NumberedListItem(_)) => number + 1,
                    _ => 1,
                };
                rendered = renumber(&rendered, number);
            }

            if let Some(last) = last_written {
                out.push_str(if same_list_kind(last, block) { "\n" } else { "\n\n" });
            }
            out.push_str(&rendered);
            last_written = Some(block);
        }

        out
    }

    /// One block with its children, or `None` when nothing can write it.
    fn render(&self, block: &Block) -> Option<String> {
        if block.is_empty_paragraph() {
            return Some(SPACER_MARKER.to_string());
        }

        let Some(rule) = self.registry.find_block_handler(block) else {
            return self.render_unhandled(block);
        };
        let Some(head) = rule.block_to_markdown(block) else {
            log::warn!("{} declined to write a {}", rule.name(), block.type_name());
            return self.render_unhandled(block);
        };

        let children = block.children();
        let rendered = match rule.nesting() {
            Nesting::None => head,
            _ if children.is_empty() && matches!(rule.nesting(), Nesting::Pipe | Nesting::Indent) => {
                head
            }
            Nesting::Pipe => {
                let body = self.serialize(children);
                let lines: Vec<String> = body
                    .split('\n')
                    .map(|line| {
                        if line.is_empty() {
                            "|".to_string()
                        } else {
                            format!("| {line}")
                        }
                    })
                    .collect();
                format!("{head}\n{}", join(&lines))
            }
            Nesting::Indent => {
                let body = self.serialize(children);
                let lines: Vec<String> = body
                    .split('\n')
                    .map(|line| {
                        if line.is_empty() {
                            String::new()
                        } else {
                            format!("  {line}")
                        }
                    })
                    .collect();
                format!("{head}\n{}", join(&lines))
            }
            Nesting::Fenced => {
                let body = self.serialize(children);
                if body.is_empty() {
                    format!("{head}\n{FENCE_CLOSE}")
                } else {
                    format!("{head}\n{body}\n{FENCE_CLOSE}")
                }
            }
            Nesting::Concatenate => {
                let mut parts = vec![head];
                parts.extend(children.iter().filter_map(|child| self.render(child)));
                parts.push(FENCE_CLOSE.to_string());
                join(&parts)
            }
        };
        Some(rendered)
    }

    fn render_unhandled(&self, block: &Block) -> Option<String> {
        match block.rich_text() {
            Some(runs) if !runs.is_empty() => Some(serialize_inline(runs)),
            _ => {
                log::warn!("no rule writes {} blocks, skipping it", block.type_name());
                None
            }
        }
    }
}

fn same_list_kind(a: &Block, b: &Block) -> bool {
    matches!(
        (a, b),
        (Block::BulletedListItem(_), Block::BulletedListItem(_))
            | (Block::NumberedListItem(_), Block::NumberedListItem(_))
            | (Block::ToDo(_), Block::ToDo(_))
    )
}

fn renumber(rendered: &str, number: usize) -> String {
    match rendered.split_once(". ") {
        Some((marker, rest)) if marker.chars().all(|c| c.is_ascii_digit()) => {
            format!("{number}. {rest}")
        }
        _ => rendered.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Code, TextBlock, TextRun, ToDo};

    fn serialize(blocks: &[Block]) -> String {
        let registry = RuleRegistry::standard();
        BlockSerializer::new(&registry).serialize(blocks)
    }

    fn item(text: &str) -> TextBlock {
        TextBlock::new(vec![TextRun::plain(text)])
    }

    #[test]
    fn numbered_items_are_renumbered_per_run() {
        let blocks = vec![
            Block::NumberedListItem(item("a")),
            Block::NumberedListItem(item("b")),
            Block::paragraph(vec![TextRun::plain("break")]),
            Block::NumberedListItem(item("c")),
        ];
        assert_eq!(serialize(&blocks), "1. a\n2. b\n\nbreak\n\n1. c");
    }

    #[test]
    fn mixed_lists_get_blank_lines() {
        let blocks = vec![
            Block::BulletedListItem(item("a")),
            Block::ToDo(ToDo {
                rich_text: vec![TextRun::plain("b")],
                checked: true,
                ..Default::default()
            }),
            Block::ToDo(ToDo {
                rich_text: vec![TextRun::plain("c")],
                ..Default::default()
            }),
        ];
        assert_eq!(serialize(&blocks), "- a\n\n- [x] b\n- [ ] c");
    }

    #[test]
    fn indented_children() {
        let parent = Block::BulletedListItem(TextBlock::with_children(
            vec![TextRun::plain("parent")],
            vec![
                Block::BulletedListItem(item("child")),
                Block::paragraph(vec![TextRun::plain("note")]),
            ],
        ));
        assert_eq!(serialize(&[parent]), "- parent\n  - child\n\n  note");
    }

    #[test]
    fn pipe_children() {
        let toggle = Block::Toggle(TextBlock::with_children(
            vec![TextRun::plain("More")],
            vec![
                Block::paragraph(vec![TextRun::plain("one")]),
                Block::paragraph(vec![TextRun::plain("two")]),
            ],
        ));
        assert_eq!(serialize(&[toggle]), "+++ More\n| one\n|\n| two");
    }

    #[test]
    fn separators_and_spacers() {
        let code = Block::Code(Code {
            rich_text: vec![TextRun::plain("x")],
            language: "rust".to_string(),
            caption: vec![],
        });
        let blocks = vec![
            code,
            Block::empty_paragraph(),
            Block::paragraph(vec![TextRun::plain("a")]),
            Block::empty_paragraph(),
            Block::paragraph(vec![TextRun::plain("b")]),
        ];
        assert_eq!(
            serialize(&blocks),
            "```rust\nx\n```\n\na\n\n<!-- spacer -->\n\nb"
        );
    }

    #[test]
    fn unhandled_blocks_fall_back_to_text() {
        let registry = RuleRegistry::minimal();
        let serializer = BlockSerializer::new(&registry);
        let quote = Block::Quote(item("quoted"));
        assert_eq!(serializer.serialize(&[quote, Block::Divider]), "quoted");
    }
}
