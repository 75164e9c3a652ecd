//! Candidate display formatting.
//!
//! Templates use `{placeholder}` syntax:
//!
//! | placeholder | value                                       |
//! |-------------|---------------------------------------------|
//! | `{docset}`  | docset name                                 |
//! | `{name}`    | entry name                                  |
//! | `{type}`    | entry type                                  |
//! | `{file}`    | page file name without extension or anchor  |
//!
//! Unknown placeholders are kept literally. Substitution is a single pass,
//! so braces inside substituted values are never expanded again.

use crate::services::url::clean_path;
use crate::types::IndexRow;

/// Renders `template` for one row of `docset`.
#[must_use]
pub fn format_candidate(template: &str, docset: &str, row: &IndexRow) -> String {
    let mut out = String::with_capacity(template.len() + row.name.len() + docset.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        match &after[..close] {
            "docset" => out.push_str(docset),
            "name" => out.push_str(&row.name),
            "type" => out.push_str(&row.entry_type),
            "file" => out.push_str(&short_file_name(&row.path)),
            other => {
                out.push('{');
                out.push_str(other);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Last path segment with markers, fragment and extension removed:
/// `<dash_entry_x>commands/blpop.html#syntax` becomes `blpop`.
#[must_use]
pub fn short_file_name(path: &str) -> String {
    let cleaned = clean_path(path);
    // Fragments can contain '/', e.g. "#//apple_ref/cpp/func/x"
    let without_fragment = cleaned.split('#').next().unwrap_or_default();
    let segment = without_fragment
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => segment.to_string(),
    }
}
