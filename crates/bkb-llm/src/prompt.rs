//! Prompt rendering.

use bkb_core::BiomarkerRecord;

/// Substitute the record's fields into a prompt template.
///
/// Recognised placeholders: `{name_foreign}`, `{name_local}`, `{category}`.
/// Unknown braces are left as they are. Substitution is a single pass over the
/// template, so braces inside record values are never expanded.
#[must_use]
pub fn render_prompt(template: &str, record: &BiomarkerRecord) -> String {
    let placeholders = [
        ("{name_foreign}", record.name_foreign.as_str()),
        ("{name_local}", record.name_local.as_str()),
        ("{category}", record.category.as_str()),
    ];

    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open..];
        match placeholders
            .iter()
            .find(|(placeholder, _)| tail.starts_with(placeholder))
        {
            Some((placeholder, value)) => {
                rendered.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
    }
    rendered.push_str(rest);
    rendered
}
