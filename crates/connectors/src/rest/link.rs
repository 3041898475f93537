//! `Link` response header handling (RFC 8288 subset).
//!
//! Entries look like `<https://host/orders.json?page_info=abc>; rel="next"`
//! and are comma separated. Only the target of the `next` relation matters.

use model::pagination::cursor::PageCursor;

/// Returns the cursor for the `next` relation, or `None` on the last page.
pub fn next_cursor(header: &str) -> Option<PageCursor> {
    link_entries(header)
        .into_iter()
        .find(|(_, rels)| rels.iter().any(|rel| rel.eq_ignore_ascii_case("next")))
        .map(|(target, _)| PageCursor::new(target))
}

/// Splits a header into `(target, relations)` pairs. Targets are delimited by
/// angle brackets, so commas inside a URL do not break an entry.
fn link_entries(header: &str) -> Vec<(String, Vec<String>)> {
    let mut entries = Vec::new();
    let mut rest = header;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };
        let target = after_open[..close].trim().to_string();
        let params_and_rest = &after_open[close + 1..];
        let params_end = params_and_rest.find('<').unwrap_or(params_and_rest.len());
        let params = &params_and_rest[..params_end];

        entries.push((target, relations(params)));
        rest = &params_and_rest[params_end..];
    }

    entries
}

fn relations(params: &str) -> Vec<String> {
    params
        .split([';', ','])
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("rel")
                .then(|| value.trim().trim_matches('"').to_string())
        })
        .flat_map(|value| {
            value
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
