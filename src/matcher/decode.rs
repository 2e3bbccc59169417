use memchr::memchr;

/// Percent-decodes a captured path segment. Returns `None` when a `%` is not
/// followed by two hex digits or the decoded bytes are not valid UTF-8; the
/// empty string passes through unchanged.
pub fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();

    if memchr(b'%', bytes).is_none() {
        return Some(raw.to_string());
    }

    let mut output = Vec::with_capacity(bytes.len());
    let mut idx = 0usize;

    while idx < bytes.len() {
        let byte = bytes[idx];
        if byte == b'%' {
            let hi = *bytes.get(idx + 1)?;
            let lo = *bytes.get(idx + 2)?;
            output.push(decode_hex_pair(hi, lo)?);
            idx += 3;
            continue;
        }

        output.push(byte);
        idx += 1;
    }

    String::from_utf8(output).ok()
}

/// Encoding dual of [`percent_decode`]: every byte outside the unreserved set
/// `A-Za-z0-9 - _ . ! ~ * ' ( )` becomes `%XX`. Usable directly as a
/// [`CompileOptions::encode`](crate::pattern::CompileOptions) function.
pub fn percent_encode(value: &str) -> String {
    let mut output = String::with_capacity(value.len());

    for &byte in value.as_bytes() {
        if is_unreserved(byte) {
            output.push(byte as char);
        } else {
            output.push('%');
            output.push(hex_digit(byte >> 4));
            output.push(hex_digit(byte & 0x0f));
        }
    }

    output
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')'
        )
}

fn hex_digit(value: u8) -> char {
    match value {
        0..=9 => (b'0' + value) as char,
        _ => (b'A' + value - 10) as char,
    }
}

fn decode_hex_pair(hi: u8, lo: u8) -> Option<u8> {
    fn val(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    Some(val(hi)? << 4 | val(lo)?)
}
