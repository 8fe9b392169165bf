//! Rule text helpers.
//!
//! Rules are opaque filter-list tokens. The only structure this crate relies
//! on is the exception marker and the handful of anchors used to derive a
//! clickable sample URL.

use std::borrow::Cow;

/// Prefix marking an exception (allow) rule.
pub const EXCEPTION_MARKER: &str = "@@";

const DOMAIN_ANCHOR: &str = "||";
const START_ANCHOR: &str = "|";
const SUBDOMAIN_WILDCARD: &str = ".";
const HTTP_PREFIX: &str = "http://";

pub fn is_exception(rule: &str) -> bool {
    rule.starts_with(EXCEPTION_MARKER)
}

/// Derive a human-clickable example URL matched by `rule`.
///
/// Lossy and heuristic; the result is not expected to round-trip.
pub fn sample_url(rule: &str) -> String {
    let rule = decode_rule(rule);

    if let Some(rest) = rule.strip_prefix(DOMAIN_ANCHOR) {
        return format!("{HTTP_PREFIX}{rest}");
    }
    if let Some(rest) = rule.strip_prefix(SUBDOMAIN_WILDCARD) {
        return format!("{HTTP_PREFIX}{rest}");
    }
    if let Some(rest) = rule.strip_prefix(START_ANCHOR) {
        return rest.to_string();
    }

    let rule = rule.replace("wikipedia.org*", "wikipedia.org/wiki/");
    if rule.starts_with("http") {
        rule
    } else {
        format!("{HTTP_PREFIX}{rule}")
    }
}

/// Percent-decode a rule, reading the bytes as UTF-8 and falling back to GBK.
///
/// Bytes GBK cannot decode either are dropped.
fn decode_rule(rule: &str) -> Cow<'_, str> {
    let bytes = urlencoding::decode_binary(rule.as_bytes());
    if let Cow::Borrowed(_) = bytes {
        return Cow::Borrowed(rule);
    }

    match String::from_utf8(bytes.into_owned()) {
        Ok(decoded) => Cow::Owned(decoded),
        Err(e) => {
            let (decoded, had_errors) = encoding_rs::GBK.decode_without_bom_handling(e.as_bytes());
            if had_errors {
                Cow::Owned(decoded.chars().filter(|&c| c != '\u{FFFD}').collect())
            } else {
                Cow::Owned(decoded.into_owned())
            }
        }
    }
}
