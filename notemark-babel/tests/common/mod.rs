//! Shared helpers for the integration tests.

use notemark_babel::Block;
use std::path::PathBuf;

/// Shows library logging in the output of failing tests.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reads a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// One line per block, `type: text`, children indented by two spaces.
///
/// Line breaks inside a block's text are shown as `⏎`.
pub fn outline(blocks: &[Block]) -> String {
    let mut lines = Vec::new();
    write_outline(blocks, 0, &mut lines);
    lines.join("\n")
}

fn write_outline(blocks: &[Block], depth: usize, lines: &mut Vec<String>) {
    for block in blocks {
        let mut line = format!("{}{}", "  ".repeat(depth), label(block));
        let text = block.plain_text();
        if !text.is_empty() {
            line.push_str(": ");
            line.push_str(&text.replace('\n', "⏎"));
        }
        lines.push(line);
        write_outline(block.children(), depth + 1, lines);
    }
}

fn label(block: &Block) -> String {
    match block {
        Block::ToDo(todo) => format!("to_do [{}]", if todo.checked { "x" } else { " " }),
        Block::Column(column) => match column.width_ratio {
            Some(ratio) => format!("column ({ratio})"),
            None => "column".to_string(),
        },
        other => other.type_name().to_string(),
    }
}
