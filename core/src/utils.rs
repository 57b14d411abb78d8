//! utils.rs
//! Rendering helpers for diagnostics (summaries, error details).

/// Render bytes as `b"..."` when printable, otherwise as `0x<hex>`.
pub fn fmt_bytes(b: &[u8]) -> String {
    if !b.is_empty() && b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

/// Hex preview of at most `max` bytes, with a trailing marker when cut.
pub fn hex_preview(b: &[u8], max: usize) -> String {
    if b.len() <= max {
        hex::encode(b)
    } else {
        format!("{}..(+{})", hex::encode(&b[..max]), b.len() - max)
    }
}
