//! Decoding of basic literal text.

/// Decode an interpreted (`"..."`) or raw (`` `...` ``) string literal.
///
/// Returns `None` for malformed escapes.
pub fn unquote(raw: &str) -> Option<String> {
    if let Some(body) = raw.strip_prefix('`').and_then(|r| r.strip_suffix('`')) {
        // Carriage returns are discarded from raw strings.
        return Some(body.replace('\r', ""));
    }
    let body = raw.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            '\\' => '\\',
            '"' => '"',
            'x' => hex_escape(&mut chars, 2)?,
            'u' => hex_escape(&mut chars, 4)?,
            'U' => hex_escape(&mut chars, 8)?,
            d @ '0'..='7' => {
                let mut value = d.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                char::from_u32(value)?
            }
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

fn hex_escape(chars: &mut impl Iterator<Item = char>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value.checked_mul(16)? + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}

/// Parse an integer literal, honouring `0x`/`0b`/`0o`/legacy-octal prefixes
/// and `_` separators.
pub fn parse_int(raw: &str) -> Option<i64> {
    let clean = raw.replace('_', "");
    let (digits, radix) = match clean.get(..2) {
        Some("0x" | "0X") => (&clean[2..], 16),
        Some("0b" | "0B") => (&clean[2..], 2),
        Some("0o" | "0O") => (&clean[2..], 8),
        _ if clean.len() > 1 && clean.starts_with('0') => (&clean[1..], 8),
        _ => (clean.as_str(), 10),
    };
    i64::from_str_radix(digits, radix).ok()
}

/// Parse a decimal float literal.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.replace('_', "").parse().ok()
}

#[cfg(test)]
mod tests;
