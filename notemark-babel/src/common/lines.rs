//! Line splitting with byte offsets.
//!
//! Every offset used by the pipeline (multiline matches, scanned lines) points into
//! the same string: the input after CRLF normalisation.

use std::borrow::Cow;

/// One line of input, without its newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character (the newline is excluded)
    pub end: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Starts with a space or a tab and has content.
    pub fn is_indented(&self) -> bool {
        !self.is_blank() && (self.text.starts_with(' ') || self.text.starts_with('\t'))
    }
}

/// Splits `text` on `\n`, recording where each line starts and ends.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for piece in text.split('\n') {
        let end = start + piece.len();
        lines.push(Line {
            start,
            end,
            text: piece,
        });
        start = end + 1;
    }
    lines
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Joins owned line fragments back into text.
pub fn join<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_slice_back_to_lines() {
        let text = "alpha\n\nbeta\n";
        let lines = split_lines(text);
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert_eq!(&text[line.start..line.end], line.text);
        }
        assert_eq!(lines[2].text, "beta");
        assert!(lines[1].is_blank());
    }

    #[test]
    fn indentation_requires_content() {
        let lines = split_lines("  x\n   \n\ty");
        assert!(lines[0].is_indented());
        assert!(!lines[1].is_indented());
        assert!(lines[2].is_indented());
    }

    #[test]
    fn crlf_is_normalised() {
        assert_eq!(normalize_line_endings("a\r\nb\rc"), "a\nb\nc");
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
    }
}
