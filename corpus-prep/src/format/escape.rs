//! Reversible escaping for the delimited path-context format.
//!
//! `.c2s` lines separate label and paths with spaces, path fields with
//! commas, and node types with pipes. Raw tokens may contain any of those,
//! so every emitted field goes through an injective mapping the reader can
//! invert exactly.

/// Placeholder emitted when token-type output is requested but the
/// front-end resolved nothing for the node.
pub const NO_TYPE: &str = "<NT>";

const ESCAPE: char = '\\';

/// Escapes one field for the space/comma/pipe-delimited format.
///
/// Mapping: `\` -> `\\`, newline -> `\n`, carriage return -> `\r`,
/// tab -> `\t`, comma -> `\c`, space -> `\s`, pipe -> `\p`.
pub fn escape_field(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => push_escaped(&mut out, '\\'),
            '\n' => push_escaped(&mut out, 'n'),
            '\r' => push_escaped(&mut out, 'r'),
            '\t' => push_escaped(&mut out, 't'),
            ',' => push_escaped(&mut out, 'c'),
            ' ' => push_escaped(&mut out, 's'),
            '|' => push_escaped(&mut out, 'p'),
            _ => out.push(ch),
        }
    }
    out
}

fn push_escaped(out: &mut String, marker: char) {
    out.push(ESCAPE);
    out.push(marker);
}

/// Inverts [`escape_field`]. Sequences the encoder never produces pass
/// through unchanged, so decoding is total.
pub fn unescape_field(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch != ESCAPE {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('c') => out.push(','),
            Some('s') => out.push(' '),
            Some('p') => out.push('|'),
            Some(other) => {
                out.push(ESCAPE);
                out.push(other);
            }
            None => out.push(ESCAPE),
        }
    }
    out
}
