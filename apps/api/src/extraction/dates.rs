//! Date-range recognition shared by the education and work-experience scanners.
//!
//! A range is `<point> <sep> <point | open-ended>` where a point is a bare
//! four-digit year or `Month Year`, the separator is a hyphen, en-dash, em-dash
//! or `to`, and the open end is `Present`, `Current`, `Now` or `Today`.
//! Tokens are returned exactly as written; nothing is parsed into a date.

use std::sync::LazyLock;

use regex::Regex;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";
const YEAR: &str = r"(?:19|20)\d{2}";

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let point = format!(r"(?:{MONTH}\.?,?\s+)?{YEAR}");
    Regex::new(&format!(
        r"(?i)\b(?P<from>{point})\s*(?:[-–—]|\bto\b)\s*(?P<to>{point}|present|current|now|today)\b"
    ))
    .expect("valid regex")
});

/// A date range found inside a line, with its byte span in that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
    pub start: usize,
    pub end: usize,
}

/// The first date range in `line`, if any.
pub fn find_date_range(line: &str) -> Option<DateRange> {
    let caps = DATE_RANGE_RE.captures(line)?;
    let whole = caps.get(0)?;
    Some(DateRange {
        from: caps.name("from")?.as_str().to_string(),
        to: caps.name("to")?.as_str().to_string(),
        start: whole.start(),
        end: whole.end(),
    })
}
