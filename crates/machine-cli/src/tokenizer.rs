//! Program text ingestion and instruction tokenization.
//!
//! A program is plain text with one instruction per line. Tokens are
//! separated by whitespace or commas; both are kept verbatim inside a
//! double-quoted run.

/// A program line with its position in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The line text (without trailing newline).
    pub text: String,
    /// 1-indexed line number in the source file.
    pub file_line: usize,
}

impl SourceLine {
    /// Splits the line into instruction tokens.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        tokenize(&self.text)
    }
}

/// Splits program text into lines, preserving file line numbers.
#[must_use]
pub fn source_lines(content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| SourceLine {
            text: line.to_string(),
            file_line: idx + 1,
        })
        .collect()
}

/// Splits one instruction line into tokens.
///
/// Quote characters stay part of the token they delimit. An unterminated
/// quote runs to the end of the line.
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if !in_quotes && is_separator(ch) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

const fn is_separator(ch: char) -> bool {
    ch == ',' || ch.is_ascii_whitespace()
}
