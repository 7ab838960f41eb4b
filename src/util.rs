//! Text decoding helpers for content documents.

use std::borrow::Cow;

/// Decode a content document to text.
///
/// Tries UTF-8 first (a UTF-8 or UTF-16 BOM is honoured by `encoding_rs`),
/// then the encoding named in the XML declaration, then Windows-1252, which
/// old ebooks commonly use without declaring it.
pub fn decode_markup(bytes: &[u8]) -> Cow<'_, str> {
    decode_text(bytes, extract_xml_encoding(bytes))
}

/// Decode bytes with UTF-8, falling back to `hint_encoding` and then Windows-1252.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let fallback = hint_encoding
        .and_then(|name| encoding_rs::Encoding::for_label(name.as_bytes()))
        .unwrap_or(encoding_rs::WINDOWS_1252);
    let (result, _, _) = fallback.decode(bytes);
    result
}

/// Find the `encoding="..."` value of a leading XML declaration.
///
/// Only the first 100 bytes are inspected.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(100)];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let (&quote, rest) = after_enc.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = rest.iter().position(|&b| b == quote)?;

    std::str::from_utf8(&rest[..end]).ok()
}
