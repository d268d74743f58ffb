//! KeyValues text rendering.
//!
//! Keys and values are always quoted, sections are brace-delimited and
//! indented with tabs. Duplicate keys are written as repeated lines.

use super::{KeyValues, Node};
use std::fmt::{self, Write as _};
use std::io;

/// Escape `s` for use between KeyValues quotes.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `kv` as KeyValues text.
#[must_use]
pub fn to_string(kv: &KeyValues) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_section(&mut out, kv, 0);
    out
}

/// Render `kv` as KeyValues text into `out`.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write<W: io::Write>(out: &mut W, kv: &KeyValues) -> io::Result<()> {
    out.write_all(to_string(kv).as_bytes())
}

fn write_section(out: &mut String, kv: &KeyValues, depth: usize) -> fmt::Result {
    let indent = "\t".repeat(depth);
    for (key, node) in kv.iter() {
        match node {
            Node::Value(value) => {
                writeln!(out, "{indent}\"{}\"\t\t\"{}\"", escape(key), escape(value))?;
            }
            Node::Section(section) => {
                writeln!(out, "{indent}\"{}\"", escape(key))?;
                writeln!(out, "{indent}{{")?;
                write_section(out, section, depth + 1)?;
                writeln!(out, "{indent}}}")?;
            }
        }
    }
    Ok(())
}
