//! Inline run formatter
//!
//! Converts the inline part of the dialect into [`TextRun`]s and back.
//!
//! | Markdown               | Run                                   |
//! |------------------------|---------------------------------------|
//! | `**x**`                | bold                                  |
//! | `__x__`                | underline                             |
//! | `*x*`, `_x_`           | italic                                |
//! | `~~x~~`                | strikethrough                         |
//! | `` `x` ``              | code (content is literal)             |
//! | `[x](url)`             | link                                  |
//! | `==color:x==`, `==x==` | color, yellow background by default   |
//! | `@[id]`                | page mention                          |
//! | `@db[id]`              | database mention                      |
//! | `@date[YYYY-MM-DD]`    | date mention                          |
//!
//! Parsing repeatedly looks for the earliest match among all patterns. When two
//! patterns start at the same offset the one listed first in [`PATTERNS`] wins, so
//! double markers are listed before their single-character prefixes. The inner text
//! of emphasis, highlight and link spans is parsed again and the enclosing formatting
//! is merged into every inner run, which gives nested emphasis such as `***x***`.
//!
//! Serialization wraps each run in a fixed order, innermost first: code,
//! strikethrough, underline, italic, bold, highlight, link.

use crate::blocks::{Annotations, Color, Mention, TextRun};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineKind {
    Bold,
    Underline,
    ItalicStar,
    ItalicUnderscore,
    Strikethrough,
    Code,
    Link,
    ColoredHighlight,
    Highlight,
    DateMention,
    DatabaseMention,
    PageMention,
}

struct InlinePattern {
    kind: InlineKind,
    regex: Regex,
}

static PATTERNS: Lazy<Vec<InlinePattern>> = Lazy::new(|| {
    [
        (InlineKind::Bold, r"\*\*(.+?\**)\*\*"),
        (InlineKind::Underline, r"__(.+?_*)__"),
        (InlineKind::ItalicStar, r"\*([^*\n]+)\*"),
        (InlineKind::ItalicUnderscore, r"_([^_\n]+)_"),
        (InlineKind::Strikethrough, r"~~(.+?)~~"),
        (InlineKind::Code, r"`([^`\n]+)`"),
        (InlineKind::Link, r"\[([^\]\n]+)\]\(([^)\s]+)\)"),
        (InlineKind::ColoredHighlight, r"==([a-z_]+):(.+?)=="),
        (InlineKind::Highlight, r"==(.+?)=="),
        (InlineKind::DateMention, r"@date\[(\d{4}-\d{2}-\d{2})\]"),
        (InlineKind::DatabaseMention, r"@db\[([^\]\s]+)\]"),
        (InlineKind::PageMention, r"@\[([^\]\s]+)\]"),
    ]
    .into_iter()
    .map(|(kind, source)| InlinePattern {
        kind,
        regex: Regex::new(source).expect("inline patterns are valid static regexes"),
    })
    .collect()
});

/// Parses inline Markdown into runs. Unrecognised text becomes plain runs.
pub fn parse_inline(text: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let earliest = PATTERNS
            .iter()
            .filter_map(|p| p.regex.captures(rest).map(|caps| (p.kind, caps)))
            .min_by_key(|(_, caps)| caps.get(0).map_or(usize::MAX, |m| m.start()));

        let Some((kind, caps)) = earliest else {
            push_plain(&mut runs, rest);
            break;
        };
        let Some(whole) = caps.get(0) else {
            push_plain(&mut runs, rest);
            break;
        };

        push_plain(&mut runs, &rest[..whole.start()]);
        runs.extend(runs_for_match(kind, &caps));
        rest = &rest[whole.end()..];
    }

    runs
}

fn push_plain(runs: &mut Vec<TextRun>, text: &str) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.annotations.is_plain() && last.link.is_none() && last.mention.is_none() => {
            last.content.push_str(text)
        }
        _ => runs.push(TextRun::plain(text)),
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

fn runs_for_match(kind: InlineKind, caps: &Captures<'_>) -> Vec<TextRun> {
    let outer = |apply: fn(&mut Annotations)| {
        let mut annotations = Annotations::default();
        apply(&mut annotations);
        wrap(group(caps, 1), &annotations, None)
    };

    match kind {
        InlineKind::Bold => outer(|a| a.bold = true),
        InlineKind::Underline => outer(|a| a.underline = true),
        InlineKind::ItalicStar | InlineKind::ItalicUnderscore => outer(|a| a.italic = true),
        InlineKind::Strikethrough => outer(|a| a.strikethrough = true),
        InlineKind::Code => vec![TextRun::plain(group(caps, 1)).code()],
        InlineKind::Link => wrap(
            group(caps, 1),
            &Annotations::default(),
            Some(group(caps, 2)),
        ),
        InlineKind::ColoredHighlight => {
            let name = group(caps, 1);
            match resolve_highlight_color(name) {
                Some(color) => wrap(group(caps, 2), &colored(color), None),
                // Not a color: the whole span is a default highlight.
                None => {
                    let inner = format!("{name}:{}", group(caps, 2));
                    wrap(&inner, &colored(Color::YellowBackground), None)
                }
            }
        }
        InlineKind::Highlight => wrap(group(caps, 1), &colored(Color::YellowBackground), None),
        InlineKind::DateMention => vec![TextRun::mention(Mention::Date {
            start: group(caps, 1).to_string(),
            end: None,
        })],
        InlineKind::DatabaseMention => vec![TextRun::mention(Mention::Database {
            id: group(caps, 1).to_string(),
        })],
        InlineKind::PageMention => vec![TextRun::mention(Mention::Page {
            id: group(caps, 1).to_string(),
        })],
    }
}

fn colored(color: Color) -> Annotations {
    Annotations {
        color,
        ..Default::default()
    }
}

/// `red` resolves to red; an unknown name is retried as a background color.
fn resolve_highlight_color(name: &str) -> Option<Color> {
    Color::from_name(name).or_else(|| Color::from_name(&format!("{name}_background")))
}

fn wrap(inner: &str, outer: &Annotations, link: Option<&str>) -> Vec<TextRun> {
    let mut runs = parse_inline(inner);
    if runs.is_empty() {
        runs.push(TextRun::plain(inner));
    }
    for run in &mut runs {
        run.annotations.merge_outer(outer);
        if run.link.is_none() {
            if let Some(url) = link {
                run.link = Some(url.to_string());
            }
        }
    }
    runs
}

/// Serializes runs back into inline Markdown.
pub fn serialize_inline(runs: &[TextRun]) -> String {
    runs.iter().map(serialize_run).collect()
}

fn serialize_run(run: &TextRun) -> String {
    let mut text = match &run.mention {
        Some(Mention::Page { id }) => format!("@[{id}]"),
        Some(Mention::Database { id }) => format!("@db[{id}]"),
        Some(Mention::Date { start, .. }) => format!("@date[{start}]"),
        None => run.content.clone(),
    };
    if text.is_empty() {
        return text;
    }

    let a = &run.annotations;
    if a.code {
        text = format!("`{text}`");
    }
    if a.strikethrough {
        text = format!("~~{text}~~");
    }
    if a.underline {
        text = format!("__{text}__");
    }
    if a.italic {
        text = format!("*{text}*");
    }
    if a.bold {
        text = format!("**{text}**");
    }
    match a.color {
        Color::Default => {}
        Color::YellowBackground => text = format!("=={text}=="),
        color => text = format!("=={}:{text}==", color.as_str()),
    }
    if let Some(url) = &run.link {
        text = format!("[{text}]({url})");
    }
    text
}
