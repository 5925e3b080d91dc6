// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! URI recognition shared by subjects, aliases, hrefs, relation types and
//! property names.

use once_cell::sync::Lazy;
use regex::Regex;

/// Absolute URI shape from RFC 2396: a scheme, a colon, then at least one
/// reserved/unreserved character or escaped octet. Whitespace and non-ASCII
/// text end a match.
static ABSOLUTE_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*:(?:[A-Za-z0-9\-_.!~*'();/?:@&=+$,\[\]#]|%[0-9A-Fa-f]{2})+")
        .expect("valid absolute uri regex")
});

/// Returns true when scanning `candidate` for URIs yields exactly one match
/// and that match is the whole string.
pub fn is_uri(candidate: &str) -> bool {
    let mut matches = ABSOLUTE_URI_RE.find_iter(candidate);
    match (matches.next(), matches.next()) {
        (Some(only), None) => only.start() == 0 && only.end() == candidate.len(),
        _ => false,
    }
}
