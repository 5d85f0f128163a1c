//! Fenced-block unwrapping for generated documents.
//!
//! Models often wrap a whole Markdown answer in a ```` ```markdown ```` fence.
//! The page should render the interior, not a code block.

use std::borrow::Cow;

/// Info strings that mark a fence as wrapping a Markdown document.
const DOCUMENT_MARKERS: [&str; 2] = ["markdown", "md"];

/// Strip an opening document fence and its closing fence.
///
/// Leading whitespace before the opening fence is ignored. The closing fence
/// is the last bare fence line of the same character and at least the same
/// length; text after it is kept, separated from the interior by a newline.
/// Text that does not open with a document fence is returned unchanged. An
/// unterminated fence loses only its opening line.
#[must_use]
pub fn unwrap_fenced(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim_start();
    let (opening, body) = trimmed
        .split_once('\n')
        .unwrap_or((trimmed, ""));

    let Some((fence_char, fence_len)) = parse_opening(opening.trim_end()) else {
        return Cow::Borrowed(text);
    };

    let Some((close_start, close_end)) = find_closing(body, fence_char, fence_len) else {
        return Cow::Borrowed(body);
    };

    let interior = body[..close_start].trim_end();
    let trailing = body[close_end..].trim_end();
    if trailing.trim_start().is_empty() {
        Cow::Borrowed(interior)
    } else {
        Cow::Owned(format!("{interior}\n{trailing}"))
    }
}

/// Byte range of the last closing fence line in `body`, newline included.
fn find_closing(body: &str, fence_char: char, fence_len: usize) -> Option<(usize, usize)> {
    let mut found = None;
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        let next = offset + line.len();
        if is_closing(line.trim(), fence_char, fence_len) {
            found = Some((offset, next));
        }
        offset = next;
    }
    found
}

/// Returns the fence character and run length if `line` opens a document fence.
fn parse_opening(line: &str) -> Option<(char, usize)> {
    let fence_char = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let fence_len = line.chars().take_while(|c| *c == fence_char).count();
    if fence_len < 3 {
        return None;
    }
    let info = line[fence_len..].trim();
    DOCUMENT_MARKERS
        .iter()
        .any(|marker| info.eq_ignore_ascii_case(marker))
        .then_some((fence_char, fence_len))
}

fn is_closing(line: &str, fence_char: char, fence_len: usize) -> bool {
    line.len() >= fence_len && line.chars().all(|c| c == fence_char)
}
