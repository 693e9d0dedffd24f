//! Color-directive normalization for fetched vector markup.
//!
//! Injected icons should inherit the surrounding text color, so every
//! explicit `fill`/`stroke` color — attribute form (`fill="#f00"`) or
//! inline-style form (`style="fill:#f00"`), single- or double-quoted,
//! case-insensitive — is rewritten to `currentColor`. `none` and
//! `transparent` values are structural and stay untouched.

const INHERIT: &[u8] = b"currentColor";
const PROPERTIES: [&[u8]; 2] = [b"fill", b"stroke"];

/// Rewrite every explicit fill/stroke color directive in `markup` to the
/// inherit-color directive.
pub fn normalize_colors(markup: &str) -> String {
    let bytes = markup.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match directive_at(bytes, i) {
            Some(directive) => {
                // Copy the property name, separator, and any opening quote
                // verbatim, then the (possibly replaced) value.
                out.extend_from_slice(&bytes[i..directive.value_start]);
                let value = &bytes[directive.value_start..directive.value_end];
                if keep_value(value) {
                    out.extend_from_slice(value);
                } else {
                    out.extend_from_slice(INHERIT);
                }
                i = directive.value_end;
            },
            None => {
                out.push(bytes[i]);
                i += 1;
            },
        }
    }

    // The scanner only copies byte ranges of the valid input or ASCII.
    String::from_utf8(out).expect("normalized markup is valid UTF-8")
}

struct Directive {
    value_start: usize,
    value_end: usize,
}

/// Match a fill/stroke directive starting at `start`, returning the byte
/// range of its value.
fn directive_at(bytes: &[u8], start: usize) -> Option<Directive> {
    if start > 0 && is_name_byte(bytes[start - 1]) {
        return None;
    }

    let property = PROPERTIES
        .iter()
        .find(|p| matches_ignore_case(bytes, start, p))?;
    let mut i = start + property.len();

    i = skip_spaces(bytes, i);
    match bytes.get(i)? {
        // Attribute form: fill = "value" / fill = 'value'
        b'=' => {
            i = skip_spaces(bytes, i + 1);
            let quote = *bytes.get(i)?;
            if quote != b'"' && quote != b'\'' {
                return None;
            }
            let value_start = i + 1;
            let close = bytes[value_start..].iter().position(|b| *b == quote)?;
            Some(Directive {
                value_start,
                value_end: value_start + close,
            })
        },
        // Inline-style form: fill: value (terminated by ';', a quote, or end)
        b':' => {
            let value_start = skip_spaces(bytes, i + 1);
            let mut value_end = value_start;
            while value_end < bytes.len()
                && !matches!(bytes[value_end], b';' | b'"' | b'\'')
            {
                value_end += 1;
            }
            if value_end == value_start {
                return None;
            }
            Some(Directive {
                value_start,
                value_end,
            })
        },
        _ => None,
    }
}

fn matches_ignore_case(bytes: &[u8], start: usize, pattern: &[u8]) -> bool {
    bytes.len() >= start + pattern.len()
        && bytes[start..start + pattern.len()].eq_ignore_ascii_case(pattern)
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn keep_value(value: &[u8]) -> bool {
    let trimmed: Vec<u8> = value
        .iter()
        .copied()
        .skip_while(|b| b.is_ascii_whitespace())
        .collect();
    let trimmed: &[u8] = {
        let end = trimmed
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |p| p + 1);
        &trimmed[..end]
    };
    trimmed.eq_ignore_ascii_case(b"none") || trimmed.eq_ignore_ascii_case(b"transparent")
}
