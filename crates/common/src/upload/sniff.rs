/// Number of leading bytes inspected to classify content
pub const SNIFF_LEN: usize = 1024;

/// Type prefixes accepted for upload
pub const ALLOWED_MIME_PREFIXES: [&str; 3] = ["image/", "text/", "application/pdf"];

const TEXT_PLAIN: &str = "text/plain";
const EMPTY: &str = "application/x-empty";
const OCTET_STREAM: &str = "application/octet-stream";

/// Classify `data` by its leading bytes. The name of the file plays no part.
pub fn sniff_mime(data: &[u8]) -> &'static str {
    let sample = &data[..data.len().min(SNIFF_LEN)];

    if sample.is_empty() {
        return EMPTY;
    }

    if let Some(kind) = infer::get(sample) {
        return kind.mime_type();
    }

    if looks_like_text(sample) {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    }
}

pub fn is_allowed(mime: &str) -> bool {
    ALLOWED_MIME_PREFIXES
        .iter()
        .any(|prefix| mime.starts_with(prefix))
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// UTF-16 with a byte order mark, UTF-8 (with or without a mark) and
///  8-bit encodings such as Latin-1 or CP1252 all count as text.
fn looks_like_text(sample: &[u8]) -> bool {
    if let Some(verdict) = utf16_text(sample) {
        return verdict;
    }

    let sample = sample.strip_prefix(UTF8_BOM).unwrap_or(sample);
    if sample.contains(&0) {
        return false;
    }
    is_utf8(sample) || is_8bit_text(sample)
}

// The sample may cut a multi-byte character in half, which still counts as text.
fn is_utf8(sample: &[u8]) -> bool {
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && e.valid_up_to() > 0,
    }
}

/// `None` when `sample` has no UTF-16 byte order mark
fn utf16_text(sample: &[u8]) -> Option<bool> {
    let (body, big_endian) = match sample {
        [0xff, 0xfe, rest @ ..] => (rest, false),
        [0xfe, 0xff, rest @ ..] => (rest, true),
        _ => return None,
    };

    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    let mut decoded = char::decode_utf16(units).peekable();
    while let Some(c) = decoded.next() {
        match c {
            Ok(c) if is_text_char(c) => {}
            // a surrogate pair split by the end of the sample
            Err(_) if decoded.peek().is_none() => {}
            _ => return Some(false),
        }
    }
    Some(true)
}

/// Single-byte text: printable ASCII, the usual whitespace controls, and
///  any byte with the high bit set.
fn is_8bit_text(sample: &[u8]) -> bool {
    sample
        .iter()
        .all(|&b| b >= 0x80 || is_text_char(char::from(b)))
}

fn is_text_char(c: char) -> bool {
    !c.is_control() || matches!(c, '\t' | '\n' | '\r' | '\x07' | '\x08' | '\x0b' | '\x0c' | '\x1b')
}
