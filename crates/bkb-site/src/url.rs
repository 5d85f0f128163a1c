//! Fetch URL construction for generated documents.
//!
//! Each path component is percent-encoded like `encodeURIComponent`, except
//! that `|`, `(`, `)` and `,` stay literal. Those characters appear verbatim
//! in document filenames and must survive URL construction unchanged.

use bkb_core::DocumentKey;

/// Characters left unencoded in addition to the RFC 3986 unreserved set.
const EXEMPT: [char; 4] = ['|', '(', ')', ','];

/// Percent-encode one path component.
#[must_use]
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut buf = [0u8; 4];
    for ch in value.chars() {
        if EXEMPT.contains(&ch) {
            out.push(ch);
        } else {
            out.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }
    out
}

/// URL of a document relative to the page: `{prefix}/{category}/{filename}`.
///
/// An empty prefix yields `{category}/{filename}`.
#[must_use]
pub fn document_url(prefix: &str, key: &DocumentKey) -> String {
    let path = format!(
        "{}/{}",
        encode_component(&key.category_dir),
        encode_component(&key.filename)
    );
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        path
    } else {
        format!("{prefix}/{path}")
    }
}
