// src/specs/assignments.rs
//! Spec for the *Class Assignments* summary page.
//!
//! Layout (fixed, at least 10 `<td>` per row):
//! `Teacher | Course | Term | Due Date | Category | Assignment | Score | Percent | Grade | Codes`
//!
//! - The table is found by id, then by the `linkDescList` class, then by any
//!   table whose headers mention "assignment" or "due date".
//! - Status comes from the Codes cell through the status classifier
//!   (icon label, class name, text, colour).
//! - The portal renders an empty term as a single row reading
//!   "No Assignments Found."; that row is dropped.
use scraper::{ElementRef, Html};

use crate::config::consts;
use crate::core::html::{text_of, parse_doc};
use crate::core::normalize::{parse_date, parse_percent, parse_score};
use crate::core::status::classify_cell;
use crate::core::table::{data_cells, is_header_row, locate_table, rows, TableMatch};
use crate::records::AssignmentRecord;
use super::{collect_rows, require_columns, require_name, RowSkip};

const STRATEGIES: &[TableMatch] = &[
    TableMatch::Css(consts::ASSIGNMENTS_TABLE_IDS[0]),
    TableMatch::Css(consts::ASSIGNMENTS_TABLE_IDS[1]),
    TableMatch::Css(consts::ASSIGNMENTS_TABLE_CLASS),
    TableMatch::Headers(&[&["assignment", "due date"]]),
];

// Column positions
const TEACHER: usize = 0;
const COURSE: usize = 1;
const TERM: usize = 2;
const DUE: usize = 3;
const CATEGORY: usize = 4;
const NAME: usize = 5;
const SCORE: usize = 6;
const PERCENT: usize = 7;
const LETTER: usize = 8;
const CODES: usize = 9;

pub fn parse(html: &str) -> Vec<AssignmentRecord> {
    let doc = parse_doc(html);
    from_doc(&doc)
}

pub fn from_doc(doc: &Html) -> Vec<AssignmentRecord> {
    let Some(table) = locate_table(doc, STRATEGIES) else {
        logd!("Assignments: no assignments table on page");
        return Vec::new();
    };
    let body = rows(table).filter(|r| !is_header_row(*r) && !in_thead(*r));
    collect_rows("Assignments", body, parse_row)
}

fn in_thead(row: ElementRef<'_>) -> bool {
    row.parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|p| p.value().name() == "thead")
}

fn non_blank(s: String) -> Option<String> {
    if s.is_empty() || s == "--" { None } else { Some(s) }
}

fn parse_row(row: ElementRef<'_>) -> Result<AssignmentRecord, RowSkip> {
    let cells = data_cells(row);

    // placeholder row is usually a single colspan cell, so test it first
    if cells
        .first()
        .is_some_and(|c| text_of(*c) == consts::NO_ASSIGNMENTS_SENTINEL)
    {
        return Err(RowSkip::NoRecordsSentinel);
    }
    require_columns(cells.len(), consts::ASSIGNMENTS_MIN_COLUMNS)?;

    let name = text_of(cells[NAME]);
    require_name(&name)?;

    let (score_earned, score_possible) = parse_score(&text_of(cells[SCORE]));

    Ok(AssignmentRecord {
        name,
        course: text_of(cells[COURSE]),
        teacher: text_of(cells[TEACHER]),
        term: text_of(cells[TERM]),
        category: text_of(cells[CATEGORY]),
        due_date: parse_date(&text_of(cells[DUE])),
        score_earned,
        score_possible,
        percent: parse_percent(&text_of(cells[PERCENT])),
        letter_grade: non_blank(text_of(cells[LETTER])),
        status: classify_cell(cells[CODES]),
        raw_codes: text_of(cells[CODES]),
    })
}
