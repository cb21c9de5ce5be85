//! Status and diff line parsing
//!
//! Both porcelain status output and `--name-status` diff output share the same
//! shape: a short prefix code, whitespace, then the path. The splitting rule
//! is: after trimming leading whitespace, the prefix is the maximal leading
//! non-whitespace run and the path is the remainder with leading spaces/tabs
//! trimmed. One layer of matching surrounding quotes is stripped from the path
//! (git quotes paths containing spaces).
//!
//! Parsing never fails past the caller: a malformed line degrades to
//! [`ChangeKind::Unknown`] with the whole line as the path, because one bad
//! line must not abort the rest of the batch.

use crate::models::ChangeKind;

/// A parsed status/diff line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub kind: ChangeKind,
    pub path: String,
}

/// Strip one layer of matching surrounding quotes
fn unquote(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &path[1..path.len() - 1];
        }
    }
    path
}

/// Parse one raw status/diff line into a change kind and path.
///
/// Diff lines must be tagged by the caller with a leading `C` before parsing
/// so their prefixes classify as committed variants.
pub fn parse_line(line: &str) -> ParsedLine {
    let trimmed = line.trim_start();

    let boundary = trimmed.find(|c: char| c == ' ' || c == '\t');
    let Some(boundary) = boundary else {
        // No prefix/path boundary; keep the line visible rather than drop it.
        tracing::warn!(line, "status line has no prefix, classifying as unknown");
        return ParsedLine {
            kind: ChangeKind::Unknown,
            path: trimmed.to_string(),
        };
    };

    let prefix = &trimmed[..boundary];
    let remainder = trimmed[boundary..].trim_start_matches([' ', '\t']);
    let path = unquote(remainder);

    ParsedLine {
        kind: ChangeKind::from_prefix(prefix),
        path: path.to_string(),
    }
}

/// Split raw command output into non-empty lines
pub fn output_lines(output: &str) -> impl Iterator<Item = &str> {
    output
        .split(['\r', '\n'])
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
}
