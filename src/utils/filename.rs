//! Filename sanitization for uploads.
//!
//! The sanitized name is only ever used as the download name; bytes on disk
//! are addressed by the item id. Sanitizing still matters because the name
//! goes back out in a Content-Disposition header.

/// Reduce a client-supplied filename to a safe flat name.
///
/// Path components are stripped, anything outside `[A-Za-z0-9._-]` becomes
/// a single underscore, and leading dots/dashes are removed. Returns None
/// when nothing safe remains.
pub fn sanitize_filename(name: &str) -> Option<String> {
    // keep only the last path segment, whichever separator the client used
    let name = name.rsplit(['/', '\\']).next().unwrap_or("");

    let mut out = String::with_capacity(name.len());
    let mut last_was_replacement = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            out.push(ch);
            last_was_replacement = false;
        } else if !last_was_replacement && !out.is_empty() {
            out.push('_');
            last_was_replacement = true;
        }
    }

    let cleaned = out
        .trim_start_matches(['.', '-', '_'])
        .trim_end_matches('_');

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
