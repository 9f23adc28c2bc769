//! Content negotiation for the Accept header family.
//!
//! The client's preferences are parsed into q-ranked entries and
//! intersected with what the resource offers. Selection walks acceptable
//! entries in descending q order and, within one entry, offered candidates
//! in the order the resource listed them; the first qualifying pair wins,
//! so acceptable rank dominates offered rank. A match against an entry
//! with `q=0` never qualifies.

/// One parsed segment of an Accept-family header.
///
/// For media types the primary token splits into `major`/`minor`
/// (`text/html`); for charsets, languages, and encodings the whole token
/// lives in `major` and `minor` stays `None`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AcceptEntry {
    pub major: String,
    pub minor: Option<String>,
    pub q: f32,
}

impl AcceptEntry {
    fn matches_media(&self, offered_major: &str, offered_minor: &str) -> bool {
        let major_ok = self.major == "*" || self.major == offered_major;
        let minor_ok = match self.minor.as_deref() {
            Some("*") | None => true,
            Some(minor) => minor == offered_minor,
        };
        major_ok && minor_ok
    }

    fn matches_value(&self, offered: &str) -> bool {
        self.major == "*" || self.major == offered
    }
}

/// Parses an Accept-family header into entries sorted descending by
/// q-value. The sort is stable, so same-q entries keep header order.
pub(crate) fn parse(header: &str) -> Vec<AcceptEntry> {
    let mut entries: Vec<AcceptEntry> = header
        .to_ascii_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
        .collect();

    entries.sort_by(|a, b| b.q.partial_cmp(&a.q).unwrap_or(std::cmp::Ordering::Equal));
    entries
}

fn parse_segment(segment: &str) -> AcceptEntry {
    let mut parts = segment.split(';');
    let token = parts.next().unwrap_or_default().trim();

    let q = parts
        .filter_map(|param| param.trim().strip_prefix("q="))
        .next()
        .and_then(|value| value.trim().parse::<f32>().ok())
        .unwrap_or(1.0);

    let (major, minor) = match token.split_once('/') {
        Some((major, minor)) => (major.trim().to_string(), Some(minor.trim().to_string())),
        None => (token.to_string(), None),
    };

    AcceptEntry { major, minor, q }
}

/// Selects the best offered media type for an `Accept` header.
///
/// The chosen value is returned exactly as the resource spelled it.
pub(crate) fn best_media_type<S: AsRef<str>>(offered: &[S], header: &str) -> Option<String> {
    let entries = parse(header);
    for entry in &entries {
        if entry.q == 0.0 {
            continue;
        }
        for candidate in offered {
            let lowered = candidate.as_ref().to_ascii_lowercase();
            let (major, minor) = lowered.split_once('/').unwrap_or((lowered.as_str(), "*"));
            if entry.matches_media(major, minor) {
                return Some(candidate.as_ref().to_string());
            }
        }
    }
    None
}

/// Selects the best offered value for a header whose tokens carry no
/// `/` structure: `Accept-Charset` and `Accept-Language`.
pub(crate) fn best_value<S: AsRef<str>>(offered: &[S], header: &str) -> Option<String> {
    select_value(offered, parse(header))
}

/// Selects the best offered encoding for an `Accept-Encoding` header.
///
/// `identity;q=0.1` is injected when the client did not mention identity,
/// so the default encoding stays acceptable unless explicitly rejected.
pub(crate) fn best_encoding<S: AsRef<str>>(offered: &[S], header: &str) -> Option<String> {
    let mut entries = parse(header);
    if !entries.iter().any(|entry| entry.major == "identity") {
        entries.push(AcceptEntry { major: "identity".to_string(), minor: None, q: 0.1 });
        entries.sort_by(|a, b| b.q.partial_cmp(&a.q).unwrap_or(std::cmp::Ordering::Equal));
    }
    select_value(offered, entries)
}

/// The highest-ranked acceptable token from a header, independent of any
/// offering. Used when a resource leaves a dimension unconstrained.
pub(crate) fn preferred(header: &str) -> Option<String> {
    parse(header).into_iter().find(|entry| entry.q > 0.0 && entry.major != "*").map(|entry| entry.major)
}

fn select_value<S: AsRef<str>>(offered: &[S], entries: Vec<AcceptEntry>) -> Option<String> {
    for entry in &entries {
        if entry.q == 0.0 {
            continue;
        }
        for candidate in offered {
            if entry.matches_value(&candidate.as_ref().to_ascii_lowercase()) {
                return Some(candidate.as_ref().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ranks_by_q() {
        let entries = parse("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8");
        assert_eq!(entries[0].major, "text");
        assert_eq!(entries[0].minor.as_deref(), Some("html"));
        assert_eq!(entries[1].minor.as_deref(), Some("xhtml+xml"));
        assert_eq!(entries[2].major, "*");
        assert!(entries[0].q > entries[1].q && entries[1].q > entries[2].q);
    }

    #[test]
    fn parse_lowercases_and_defaults_q() {
        let entries = parse("TEXT/HTML");
        assert_eq!(entries[0].major, "text");
        assert_eq!(entries[0].q, 1.0);
    }

    #[test]
    fn wildcard_matches_anything() {
        assert_eq!(best_media_type(&["text/html"], "*/*"), Some("text/html".to_string()));
        assert_eq!(best_media_type(&["text/html"], "text/*"), Some("text/html".to_string()));
    }

    #[test]
    fn no_intersection_is_none() {
        // an offering of text/plain satisfies neither segment
        assert_eq!(best_media_type(&["text/plain"], "text/html,application/xhtml+xml;q=0.9"), None);
    }

    #[test]
    fn acceptable_rank_dominates_offered_rank() {
        let offered = ["text/plain", "text/html"];
        let chosen = best_media_type(&offered, "text/html,text/plain;q=0.5");
        assert_eq!(chosen, Some("text/html".to_string()));
    }

    #[test]
    fn offered_order_breaks_ties() {
        let offered = ["application/xml", "application/json"];
        let chosen = best_media_type(&offered, "application/*");
        assert_eq!(chosen, Some("application/xml".to_string()));
    }

    #[test]
    fn zero_q_disqualifies() {
        assert_eq!(best_media_type(&["text/html"], "text/html;q=0"), None);
    }

    #[test]
    fn charset_tokens_have_no_slash() {
        assert_eq!(best_value(&["utf8"], "iso-8859-5, unicode-1-1;q=0.8, utf8"), Some("utf8".to_string()));
        assert_eq!(best_value(&["utf8"], "iso-8859-5"), None);
    }

    #[test]
    fn identity_injected_unless_rejected() {
        assert_eq!(best_encoding(&["identity"], "gzip"), Some("identity".to_string()));
        assert_eq!(best_encoding(&["identity"], "gzip, identity;q=0"), None);
    }

    #[test]
    fn injected_identity_ranks_below_named_encodings() {
        let offered = ["identity", "gzip"];
        assert_eq!(best_encoding(&offered, "gzip"), Some("gzip".to_string()));
    }

    #[test]
    fn preferred_skips_wildcard_and_rejections() {
        assert_eq!(preferred("en,*;q=0.8"), Some("en".to_string()));
        assert_eq!(preferred("*"), None);
        assert_eq!(preferred("da;q=0"), None);
    }
}
