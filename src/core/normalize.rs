// src/core/normalize.rs
//
// Cell text → typed values. Every function here is total: bad input gives
// `None` (or an empty list), never a panic.
use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::sanitize::normalize_ws;

/// Tried in order; first success wins.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // 2024-12-15
    "%m/%d/%Y", // 12/15/2024
    "%m/%d/%y", // 12/15/24
    "%B %d, %Y", // December 15, 2024
    "%b %d, %Y", // Dec 15, 2024
];

/// Day-first layout seen on some attendance grids. Only ever tried after
/// [`DATE_FORMATS`] so US dates keep priority.
const DAY_FIRST_FORMAT: &str = "%d/%m/%Y";

const BLANK_MARKERS: &[&str] = &["--", "n/a"];

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("invalid regex: number"));

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d+(?:\.\d+)?)\s*%").expect("invalid regex: percent"));

fn try_format(text: &str, fmt: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(text, fmt).ok()?;
    // chrono happily reads "24" through %Y as the year 24
    if fmt.contains("%Y") && date.year() < 1000 {
        return None;
    }
    Some(date)
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = normalize_ws(text);
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS.iter().find_map(|fmt| try_format(&text, fmt))
}

/// [`parse_date`] plus the day-first fallback.
pub fn parse_date_lenient(text: &str) -> Option<NaiveDate> {
    parse_date(text).or_else(|| try_format(&normalize_ws(text), DAY_FIRST_FORMAT))
}

/// Plain float, finite only ("NaN"/"inf" are not scores).
pub fn parse_number(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_int(text: &str) -> Option<u32> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<u32>().ok()
}

/// First number anywhere in `text`, e.g. "Days Present: 70" → 70.0.
pub fn first_number(text: &str) -> Option<f64> {
    NUMBER_RE
        .find(text)
        .and_then(|m| parse_number(m.as_str()))
}

/// First `NN%` / `NN.N %` anywhere in `text`.
pub fn find_percent(text: &str) -> Option<f64> {
    PERCENT_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_number(m.as_str()))
}

/// "17/20" → (17, 20); "/10" → (None, 10); "85" → (85, None); "--" → (None, None).
pub fn parse_score(text: &str) -> (Option<f64>, Option<f64>) {
    let t = normalize_ws(text);
    if t.is_empty() || t == "--" {
        return (None, None);
    }
    match t.split_once('/') {
        Some((earned, rest)) => {
            // "17/20/x" keeps only the second field as the denominator
            let possible = rest.split('/').next().unwrap_or("");
            (parse_number(earned), parse_number(possible))
        }
        None => (parse_number(&t), None),
    }
}

fn parse_percent_like(text: &str) -> Option<f64> {
    let t = normalize_ws(text);
    if t.is_empty() || BLANK_MARKERS.iter().any(|m| t.eq_ignore_ascii_case(m)) {
        return None;
    }
    parse_number(&t.replace('%', ""))
}

/// "85%" / "85" / " 85 % " → 85.0; blank, "--", "N/A" → None.
pub fn parse_percent(text: &str) -> Option<f64> {
    parse_percent_like(text)
}

/// Category weight, same shape as a percent ("30%" → 30.0).
pub fn parse_weight(text: &str) -> Option<f64> {
    parse_percent_like(text)
}

/// "6.NS.1, 6.NS.2, 6.NS.1" → ["6.NS.1", "6.NS.2"], order kept.
pub fn parse_standards(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(',')
        .map(normalize_ws)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
