// src/specs/mod.rs
//! # Page specs
//!
//! One module per portal page. Each spec knows where the data lives in that
//! page's HTML and how to read it when the layout drifts between installs.
//!
//! ## What lives here
//! - **Pure HTML parsing** of a page already rendered and saved by someone else.
//! - **Strategy order** for finding the table (stable id, then class, then a
//!   header-keyword scan), expressed as a `&[TableMatch]` list per page.
//! - **Row shaping** into the typed records of `crate::records`.
//!
//! ## What does **not** live here
//! - Fetching, sessions, retries. The caller hands over a string.
//! - Persistence, ids, merge keys. Records leave here as plain values.
//! - Export formatting (`store`, `csv`).
//!
//! ## Conventions
//! - A missing table is an empty result, never an error.
//! - A bad row is skipped with a `RowSkip` reason and a DEBUG line; the rest
//!   of the table still comes through.
//! - A bad cell is a `None` field, not a skipped row.
//!
//! ## Current specs
//! - `assignments`: class assignments summary (fixed 10 columns, status icons).
//! - `grades`: home page quick lookup (header-mapped terms) and grade history.
//! - `attendance`: dashboard summary (table or stat cards), daily grid, patterns.
//! - `course_scores`: per-course scores page (category weights, assignment detail).
//! - `teacher_comments`: comments per course, mailto-derived teacher.
//! - `schedule`: class schedule list.
use scraper::ElementRef;

pub mod assignments;
pub mod attendance;
pub mod course_scores;
pub mod grades;
pub mod schedule;
pub mod teacher_comments;

/// Why a row did not become a record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RowSkip {
    #[error("too few columns ({found} < {need})")]
    TooFewColumns { found: usize, need: usize },
    #[error("missing or too-short name")]
    MissingName,
    #[error("'no records' placeholder row")]
    NoRecordsSentinel,
    #[error("no data cells")]
    NoCells,
    #[error("header row repeated in the body")]
    RepeatedHeader,
}

/// Run `parse` over every row, keep the successes, log the rest.
pub(crate) fn collect_rows<'a, I, T, F>(page: &str, rows: I, mut parse: F) -> Vec<T>
where
    I: IntoIterator<Item = ElementRef<'a>>,
    F: FnMut(ElementRef<'a>) -> Result<T, RowSkip>,
{
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (i, row) in rows.into_iter().enumerate() {
        match parse(row) {
            Ok(rec) => out.push(rec),
            Err(why) => {
                skipped += 1;
                logd!("{}: row {} skipped: {}", page, i, why);
            }
        }
    }
    logd!("{}: {} record(s), {} row(s) skipped", page, out.len(), skipped);
    out
}

/// Required-name guard shared by every page.
pub(crate) fn require_name(name: &str) -> Result<(), RowSkip> {
    if name.chars().count() < crate::config::consts::MIN_NAME_LEN {
        Err(RowSkip::MissingName)
    } else {
        Ok(())
    }
}

pub(crate) fn require_columns(found: usize, need: usize) -> Result<(), RowSkip> {
    if found == 0 {
        Err(RowSkip::NoCells)
    } else if found < need {
        Err(RowSkip::TooFewColumns { found, need })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards() {
        assert_eq!(require_name("A"), Err(RowSkip::MissingName));
        assert_eq!(require_name(""), Err(RowSkip::MissingName));
        assert!(require_name("Quiz").is_ok());
        assert_eq!(require_columns(0, 5), Err(RowSkip::NoCells));
        assert_eq!(require_columns(3, 5), Err(RowSkip::TooFewColumns { found: 3, need: 5 }));
        assert!(require_columns(6, 5).is_ok());
    }

    #[test]
    fn skip_reasons_read_well() {
        assert_eq!(
            RowSkip::TooFewColumns { found: 3, need: 10 }.to_string(),
            "too few columns (3 < 10)"
        );
        assert_eq!(RowSkip::NoRecordsSentinel.to_string(), "'no records' placeholder row");

        let boxed: Box<dyn std::error::Error> = Box::new(RowSkip::MissingName);
        assert_eq!(boxed.to_string(), "missing or too-short name");
    }
}
