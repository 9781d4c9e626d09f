//! Logging utilities for sanitizing player-supplied strings so log lines
//! stay single-line and readable.

use std::fmt::Write;

const MAX_PREVIEW: usize = 120;

/// Escape a string for single-line logging. Newlines, carriage returns,
/// tabs, and backslashes get backslash escapes; other control characters
/// render as `\xNN`. Input past the preview cap is replaced with an
/// ellipsis.
pub fn escape_log(s: &str) -> String {
    let mut chars = s.chars();
    let mut out = chars
        .by_ref()
        .take(MAX_PREVIEW)
        .fold(String::with_capacity(s.len().min(MAX_PREVIEW) + 8), |mut out, ch| {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\x{:02X}", c as u32);
                }
                c => out.push(c),
            }
            out
        });
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
