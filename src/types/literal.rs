/// Decode the body of a quoted rule literal: `\"` becomes `"`. Every other
/// backslash is kept as written, so regex escapes like `\d` survive.
#[must_use]
pub fn unescape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'"') {
            chars.next();
            out.push('"');
        } else {
            out.push(c);
        }
    }
    out
}

/// Encode a literal value for use between double quotes. Inverse of
/// [`unescape_literal`].
#[must_use]
pub fn escape_literal(value: &str) -> String {
    value.replace('"', "\\\"")
}
