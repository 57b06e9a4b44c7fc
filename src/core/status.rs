// src/core/status.rs
//
// Assignment completion status from several weak signals. The portal marks
// status with an icon label on one install, a class name on another, plain
// text or a coloured dot on a third. Rules run in a fixed order; the first
// one that answers wins. Inside a rule the keyword list order decides, so a
// cell with both a "Late" and a "Collected" icon reads as Collected.
use std::fmt;

use scraper::ElementRef;
use serde::Serialize;

use super::html::{self, descendant_elements};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AssignmentStatus {
    Collected,
    Missing,
    Late,
    Exempt,
    Unknown,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Collected => "Collected",
            AssignmentStatus::Missing => "Missing",
            AssignmentStatus::Late => "Late",
            AssignmentStatus::Exempt => "Exempt",
            AssignmentStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the classifier looks at, lifted out of the DOM so the rules
/// can be tested without markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusSignals {
    /// `alt` / `title` / `aria-label` of icons, document order.
    pub icon_labels: Vec<String>,
    /// Class tokens of the cell and everything under it, lowercased.
    pub class_tokens: Vec<String>,
    /// Visible text, lowercased.
    pub text: String,
    pub has_red: bool,
    pub has_green: bool,
}

const ICON_LABELS: &[(&str, AssignmentStatus)] = &[
    ("Collected", AssignmentStatus::Collected),
    ("Missing", AssignmentStatus::Missing),
    ("Late", AssignmentStatus::Late),
    ("Exempt", AssignmentStatus::Exempt),
];

const CLASS_KEYWORDS: &[(&str, AssignmentStatus)] = &[
    ("missing", AssignmentStatus::Missing),
    ("collected", AssignmentStatus::Collected),
    ("late", AssignmentStatus::Late),
    ("exempt", AssignmentStatus::Exempt),
];

const TEXT_KEYWORDS: &[(&str, AssignmentStatus)] = &[
    ("missing", AssignmentStatus::Missing),
    ("collected", AssignmentStatus::Collected),
    ("complete", AssignmentStatus::Collected),
    ("late", AssignmentStatus::Late),
    ("exempt", AssignmentStatus::Exempt),
];

type Rule = fn(&StatusSignals) -> Option<AssignmentStatus>;

/// Precedence, highest first.
const RULES: &[(&str, Rule)] = &[
    ("icon", by_icon_label),
    ("class", by_class_name),
    ("text", by_text),
    ("color", by_color),
];

// label order decides, not icon order: Collected, Missing, Late, Exempt
fn by_icon_label(s: &StatusSignals) -> Option<AssignmentStatus> {
    ICON_LABELS
        .iter()
        .find(|(l, _)| s.icon_labels.iter().any(|label| label.trim() == *l))
        .map(|(_, st)| *st)
}

fn by_class_name(s: &StatusSignals) -> Option<AssignmentStatus> {
    CLASS_KEYWORDS
        .iter()
        .find(|(kw, _)| s.class_tokens.iter().any(|c| c.contains(kw)))
        .map(|(_, st)| *st)
}

fn by_text(s: &StatusSignals) -> Option<AssignmentStatus> {
    TEXT_KEYWORDS
        .iter()
        .find(|(kw, _)| s.text.contains(kw))
        .map(|(_, st)| *st)
}

// red is tested first, so it wins when both are present
fn by_color(s: &StatusSignals) -> Option<AssignmentStatus> {
    if s.has_red {
        Some(AssignmentStatus::Missing)
    } else if s.has_green {
        Some(AssignmentStatus::Collected)
    } else {
        None
    }
}

pub fn classify_status(signals: &StatusSignals) -> AssignmentStatus {
    for (name, rule) in RULES {
        if let Some(st) = rule(signals) {
            logd!("Status: '{}' rule → {}", name, st);
            return st;
        }
    }
    AssignmentStatus::Unknown
}

/// Classify straight from a table cell.
pub fn classify_cell(cell: ElementRef<'_>) -> AssignmentStatus {
    classify_status(&signals_from_cell(cell))
}

fn is_color_segment(class: &str, color: &str) -> bool {
    class.split(['-', '_']).any(|seg| seg == color)
}

fn style_color(style: &str, color: &str) -> bool {
    let style = style.to_ascii_lowercase();
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(prop, _)| {
            let p = prop.trim();
            p == "color" || p == "background-color" || p == "background"
        })
        .any(|(_, val)| val.contains(color))
}

pub fn signals_from_cell(cell: ElementRef<'_>) -> StatusSignals {
    let mut out = StatusSignals {
        text: html::text_of(cell).to_lowercase(),
        ..Default::default()
    };

    for el in std::iter::once(cell).chain(descendant_elements(cell)) {
        let name = el.value().name();
        if matches!(name, "img" | "i" | "span" | "svg" | "em") {
            for key in ["alt", "title", "aria-label"] {
                if let Some(label) = el.value().attr(key) {
                    out.icon_labels.push(label.trim().to_string());
                }
            }
        }

        let classes = html::classes_lc(el);
        if classes.iter().any(|c| is_color_segment(c, "red")) {
            out.has_red = true;
        }
        if classes.iter().any(|c| is_color_segment(c, "green")) {
            out.has_green = true;
        }
        if let Some(style) = el.value().attr("style") {
            out.has_red |= style_color(style, "red");
            out.has_green |= style_color(style, "green");
        }
        out.class_tokens.extend(classes);
    }
    out
}
