// Command-line interface for notemark
//
// Converts documents between the Markdown dialect and the block-tree JSON used by the
// remote API. The work is done by the notemark-babel crate; this binary reads files,
// picks formats and applies the configuration.
//
// The source format is auto-detected from the file extension and can be overridden
// with --from. The target format is always explicit.
// Usage:
//  notemark <input> --to <format> [--from <format>] [--output <file>]  - Convert (default)
//  notemark convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  notemark list-elements                - List the element rules in registry order
//  notemark list-formats                 - List the document formats
//
// Global options:
//  --config <path>  Layer a notemark.toml over the defaults (./notemark.toml is read if present)
//  -v, -vv, -vvv    Log warnings, info, debug and trace output to stderr

mod commands;

use clap::{Arg, ArgAction, Command, ValueHint};
use notemark_config::{Loader, NotemarkConfig};

const SUBCOMMANDS: &[&str] = &["convert", "list-elements", "list-formats", "help"];

fn build_cli() -> Command {
    Command::new("notemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between the notemark Markdown dialect and block trees")
        .long_about(
            "notemark converts documents between an extended Markdown dialect and the\n\
            block-tree JSON used by block-based note services.\n\n\
            Commands:\n  \
            - convert:       Transform between document formats (default command)\n  \
            - list-elements: Show the active element rules\n  \
            - list-formats:  Show the supported document formats\n\n\
            Examples:\n  \
            notemark notes.md --to blocks             # Markdown to block JSON (stdout)\n  \
            notemark page.json --to markdown -o p.md  # Block JSON to Markdown file\n  \
            notemark list-elements --config notemark.toml",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a notemark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase logging output (repeat for more)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown dialect (.md, .markdown)\n  \
                    - blocks:   Block-tree JSON (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    notemark convert notes.md --to blocks\n  \
                    notemark convert page.json --to markdown -o page.md\n  \
                    notemark notes.md --to blocks --max-text-length 500  # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: markdown, blocks\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("max-text-length")
                        .long("max-text-length")
                        .value_name("CHARS")
                        .help("Split and truncate text runs longer than this when writing blocks")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("list-elements").about("List the active element rules in registry order"),
        )
        .subcommand(Command::new("list-formats").about("List the supported document formats"))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn main() {
    // If the first argument is not a subcommand, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_count("verbose"));

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let max_text_length = sub_matches.get_one::<usize>("max-text-length").copied();
            let config = load_cli_config(config_path, max_text_length);
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = sub_matches.get_one::<String>("from").map(|s| s.as_str());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            commands::handle_convert_command(input, from, to, output, &config);
        }
        Some(("list-elements", _)) => {
            let config = load_cli_config(config_path, None);
            commands::handle_list_elements_command(&config);
        }
        Some(("list-formats", _)) => {
            commands::handle_list_formats_command();
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>, max_text_length: Option<usize>) -> NotemarkConfig {
    let loader = Loader::new().with_optional_file("notemark.toml");
    let loader = match explicit_path {
        Some(path) => loader.with_file(path),
        None => loader,
    };
    let loader = match max_text_length {
        Some(length) => loader
            .set_override("limits.max_text_length", length as i64)
            .unwrap_or_else(|err| {
                eprintln!("Invalid --max-text-length: {err}");
                std::process::exit(1);
            }),
        None => loader,
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
