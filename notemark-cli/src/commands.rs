//! Command handlers
//!
//! Handlers report failures on stderr and exit with status 1.

use notemark_babel::DocumentFormat;
use notemark_config::NotemarkConfig;
use std::fs;

/// Resolves the source format from `--from` or the input's extension.
fn source_format(input: &str, from: Option<&str>) -> DocumentFormat {
    match from {
        Some(name) => format_or_exit(name),
        None => DocumentFormat::detect_from_filename(input).unwrap_or_else(|| {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }),
    }
}

fn format_or_exit(name: &str) -> DocumentFormat {
    DocumentFormat::from_name(name).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
pub fn handle_convert_command(
    input: &str,
    from: Option<&str>,
    to: &str,
    output: Option<&str>,
    config: &NotemarkConfig,
) {
    let from = source_format(input, from);
    let to = format_or_exit(to);
    let converter = config.converter();

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let mut blocks = from.read(&source, &converter).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    log::info!("read {} top-level block(s) as {from}", blocks.len());

    if to == DocumentFormat::Blocks {
        blocks = config.splitter().split_blocks(blocks);
    }

    let mut result = to
        .write(&blocks, &converter, config.output.pretty_json)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
    if !result.ends_with('\n') {
        result.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the list-elements command
pub fn handle_list_elements_command(config: &NotemarkConfig) {
    let converter = config.converter();
    let registry = converter.registry();
    let width = registry
        .rules()
        .iter()
        .map(|rule| rule.name().len())
        .max()
        .unwrap_or(0);

    println!("Element rules (in match order):\n");
    for rule in registry.rules() {
        let kind = if rule.as_multiline().is_some() {
            "multi-line"
        } else {
            "line"
        };
        println!(
            "  {:width$}  {:10}  {}",
            rule.name(),
            kind,
            rule.description()
        );
    }
}

/// Handle the list-formats command
pub fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in DocumentFormat::ALL {
        println!(
            "  {:10} {} (.{})",
            format.name(),
            format.description(),
            format.file_extensions().join(", .")
        );
    }
}
