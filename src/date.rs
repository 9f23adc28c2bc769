//! HTTP date parsing and formatting.
//!
//! Conditional request headers may carry any of the three legal HTTP date
//! forms (IMF-fixdate, RFC 850, asctime); responses always emit
//! IMF-fixdate. A value that parses as none of the three is treated as if
//! the header were absent, so parsing returns an `Option` rather than an
//! error.

use std::time::SystemTime;

/// Parses an HTTP date in any of the three accepted formats.
///
/// Returns `None` for anything unparseable; the caller falls through as if
/// the header were not sent.
pub fn parse_http_date(value: &str) -> Option<SystemTime> {
    httpdate::parse_http_date(value.trim()).ok()
}

/// Formats a timestamp as an IMF-fixdate string, e.g.
/// `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn fmt_http_date(time: SystemTime) -> String {
    httpdate::fmt_http_date(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const IMF_FIXDATE: &str = "Sun, 06 Nov 1994 08:49:37 GMT";
    const RFC_850: &str = "Sunday, 06-Nov-94 08:49:37 GMT";
    const ASCTIME: &str = "Sun Nov  6 08:49:37 1994";

    #[test]
    fn parses_all_three_formats() {
        let imf = parse_http_date(IMF_FIXDATE).unwrap();
        let rfc850 = parse_http_date(RFC_850).unwrap();
        let asctime = parse_http_date(ASCTIME).unwrap();

        assert_eq!(imf, rfc850);
        assert_eq!(imf, asctime);
    }

    #[test]
    fn reformat_round_trips() {
        for input in [IMF_FIXDATE, RFC_850, ASCTIME] {
            let parsed = parse_http_date(input).unwrap();
            let reparsed = parse_http_date(&fmt_http_date(parsed)).unwrap();
            assert_eq!(parsed, reparsed);
        }
    }

    #[test]
    fn emits_imf_fixdate() {
        let time = parse_http_date(RFC_850).unwrap();
        assert_eq!(fmt_http_date(time), IMF_FIXDATE);
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_http_date("not a date").is_none());
        assert!(parse_http_date("").is_none());
        assert!(parse_http_date("06/11/1994").is_none());
    }

    #[test]
    fn ordering_is_preserved() {
        let earlier = parse_http_date(IMF_FIXDATE).unwrap();
        let later = earlier + Duration::from_secs(60);
        assert!(later > earlier);
        assert!(parse_http_date(&fmt_http_date(later)).unwrap() > earlier);
    }
}
