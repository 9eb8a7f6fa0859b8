//! Redaction of SAS credentials for display and logging

const REDACTED: &str = "REDACTED";

fn is_query_separator(c: char) -> bool {
    c == '?' || c == '&'
}

fn redact_pair(pair: &str) -> String {
    match pair.split_once('=') {
        Some((key, _)) if key.eq_ignore_ascii_case("sig") => format!("{}={}", key, REDACTED),
        _ => pair.to_string(),
    }
}

/// Mask the `sig` parameter of a SAS query string, keeping everything else
pub fn redact_sas(sas: &str) -> String {
    let (prefix, query) = match sas.chars().next() {
        Some(c) if is_query_separator(c) => (Some(c), &sas[1..]),
        _ => (None, sas),
    };

    let redacted = query
        .split('&')
        .map(redact_pair)
        .collect::<Vec<_>>()
        .join("&");

    match prefix {
        Some(c) => format!("{}{}", c, redacted),
        None => redacted,
    }
}

/// Mask every `sig` parameter in a full blob URL
///
/// Blob URLs append the SAS verbatim, so it may start with `&` and the
/// URL may carry no `?` at all. Every `?`/`&` separated segment is checked.
pub fn redact_url(url: &str) -> String {
    let mut redacted = String::with_capacity(url.len());
    let mut rest = url;

    while let Some(pos) = rest.find(is_query_separator) {
        redacted.push_str(&rest[..=pos]);
        rest = &rest[pos + 1..];

        let end = rest.find(is_query_separator).unwrap_or(rest.len());
        redacted.push_str(&redact_pair(&rest[..end]));
        rest = &rest[end..];
    }
    redacted.push_str(rest);

    redacted
}
