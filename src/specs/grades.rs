// src/specs/grades.rs
//! Spec for the *Grades and Attendance* home page (quick lookup), plus the
//! grade history page.
//!
//! Column order on the home page varies by school, so the header row is read
//! once into a `HeaderMap<GradeCol>` and every data row is indexed through it.
//! Recognised headers: `COURSE`, `TEACHER`, `EXP`, the term codes
//! `Q1..Q4 S1 S2 Y1` (exact), `ABS`, `TAR`, `ROOM`.
//!
//! A term cell may carry a letter, a 0–4 standards mark and a percentage in
//! one blob ("A 95%", "B+ 88", "3"). Tokens are classified one by one and
//! merged; a later token overwrites an earlier one of the same kind.
use scraper::{ElementRef, Html};

use crate::config::consts;
use crate::core::html::{attr, parse_doc, spaced_text_of, text_excluding, text_of};
use crate::core::normalize::{parse_int, parse_number, parse_percent};
use crate::core::sanitize::normalize_ws;
use crate::core::table::{cells, data_cells, is_header_row, locate_table, rows, HeaderMap, TableMatch};
use crate::records::{CourseGradeRow, GradeCell, GradeHistoryEntry, GradesPage, Term};
use super::teacher_comments::{mailto_anchor, teacher_from_cell};
use super::{collect_rows, require_columns, require_name, RowSkip};

const STRATEGIES: &[TableMatch] = &[
    TableMatch::Css(consts::GRADES_TABLE_ID),
    TableMatch::ClassContains(consts::GRADES_CLASS_HINTS),
    TableMatch::Headers(&[&["course"], &["q1", "grade"]]),
];

const HISTORY_STRATEGIES: &[TableMatch] = &[
    TableMatch::ClassContains(consts::HISTORY_CLASS_HINTS),
    TableMatch::Headers(&[&["grade"]]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GradeCol {
    Course,
    Teacher,
    /// "Exp." period column; stands in for the teacher when nothing better exists.
    Expression,
    Term(Term),
    Absences,
    Tardies,
    Room,
}

/// Header (already upper-cased) → column kind.
pub fn classify_header(h: &str) -> Option<GradeCol> {
    if h.contains("COURSE") {
        Some(GradeCol::Course)
    } else if h.contains("TEACHER") {
        Some(GradeCol::Teacher)
    } else if h.contains("EXP") {
        Some(GradeCol::Expression)
    } else if let Some(t) = Term::from_header(h) {
        Some(GradeCol::Term(t))
    } else if h.contains("ABS") {
        Some(GradeCol::Absences)
    } else if h.contains("TAR") {
        Some(GradeCol::Tardies)
    } else if h.contains("ROOM") {
        Some(GradeCol::Room)
    } else {
        None
    }
}

/* ---------------- grade cells ---------------- */

const LETTER_GRADES: &[&str] = &[
    "A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "D-", "F", "P", "I", "W",
];
const NUMERIC_GRADES: &[&str] = &["4", "3", "2", "1", "0"];

/// Letter → GPA points. Pass / Incomplete / Withdrawn carry no points.
pub fn letter_to_gpa(letter: &str) -> Option<f64> {
    let pts = match letter {
        "A+" | "A" => 4.0,
        "A-" => 3.7,
        "B+" => 3.3,
        "B" => 3.0,
        "B-" => 2.7,
        "C+" => 2.3,
        "C" => 2.0,
        "C-" => 1.7,
        "D+" => 1.3,
        "D" => 1.0,
        "D-" => 0.7,
        "F" => 0.0,
        _ => return None,
    };
    Some(pts)
}

enum Token {
    Letter(String, Option<f64>),
    Percent(f64),
}

fn classify_token(tok: &str) -> Option<Token> {
    if LETTER_GRADES.contains(&tok) {
        return Some(Token::Letter(tok.to_string(), letter_to_gpa(tok)));
    }
    if NUMERIC_GRADES.contains(&tok) {
        return Some(Token::Letter(tok.to_string(), parse_number(tok)));
    }
    if tok.contains('%') {
        return parse_percent(tok).map(Token::Percent);
    }
    let v = parse_number(tok)?;
    // bare numbers: up to 4 reads as a standards mark, above as a percentage
    if v <= 4.0 {
        Some(Token::Letter(tok.to_string(), Some(v)))
    } else {
        Some(Token::Percent(v))
    }
}

/// `None` for an empty cell or a "no grade" marker.
pub fn parse_grade_cell(text: &str) -> Option<GradeCell> {
    let text = normalize_ws(text);
    if text.is_empty() || consts::GRADE_NULL_MARKERS.contains(&text.as_str()) {
        return None;
    }

    let mut cell = GradeCell::default();
    for tok in text.split_whitespace() {
        match classify_token(tok) {
            Some(Token::Letter(l, gpa)) => {
                cell.letter_grade = Some(l);
                cell.gpa_points = gpa;
            }
            Some(Token::Percent(p)) => cell.percent = Some(p),
            None => {}
        }
    }

    if cell.letter_grade.is_none() && cell.percent.is_none() {
        cell.letter_grade = Some(text);
    }
    Some(cell)
}

/* ---------------- home page ---------------- */

pub fn parse(html: &str) -> GradesPage {
    let doc = parse_doc(html);
    from_doc(&doc)
}

pub fn from_doc(doc: &Html) -> GradesPage {
    let Some(table) = locate_table(doc, STRATEGIES) else {
        logd!("Grades: no grades table on page");
        return GradesPage::default();
    };

    let all: Vec<ElementRef<'_>> = rows(table).collect();
    let Some((at, map)) = all
        .iter()
        .enumerate()
        .map(|(i, r)| (i, HeaderMap::from_row(*r, classify_header)))
        .find(|(_, m)| m.contains(GradeCol::Course))
    else {
        logd!("Grades: table has no COURSE header");
        return GradesPage::default();
    };

    let terms: Vec<Term> = map
        .keys()
        .iter()
        .filter_map(|k| match k {
            GradeCol::Term(t) => Some(*t),
            _ => None,
        })
        .collect();
    logd!("Grades: header row {} maps {} column(s), terms {:?}", at, map.len(), terms);

    let body = all[at + 1..].iter().copied().filter(|r| !is_header_row(*r));
    let courses = collect_rows("Grades", body, |r| parse_row(r, &map, &terms));
    GradesPage { courses, terms }
}

fn parse_row(row: ElementRef<'_>, map: &HeaderMap<GradeCol>, terms: &[Term]) -> Result<CourseGradeRow, RowSkip> {
    let cols: Vec<ElementRef<'_>> = cells(row).collect();
    let course_idx = map.get(GradeCol::Course).unwrap_or(0);
    require_columns(cols.len(), course_idx + 1)?;
    let col = |k: GradeCol| map.get(k).and_then(|i| cols.get(i).copied());

    let course_cell = cols[course_idx];
    let course = CourseCell::read(course_cell);
    require_name(&course.name)?;

    let teacher_name = match col(GradeCol::Teacher).map(text_of) {
        Some(t) if !t.is_empty() => t,
        _ => match (course.teacher, col(GradeCol::Expression)) {
            (Some(t), _) => t,
            (None, Some(exp)) => text_of(exp),
            (None, None) => s!(),
        },
    };

    let room = match col(GradeCol::Room).map(text_of) {
        Some(r) if !r.is_empty() => r,
        _ => course.room.unwrap_or_default(),
    };

    let grades = terms
        .iter()
        .map(|t| (*t, col(GradeCol::Term(*t)).and_then(|c| parse_grade_cell(&spaced_text_of(c)))))
        .collect();

    Ok(CourseGradeRow {
        course_name: course.name,
        teacher_name,
        room,
        grades,
        absences: col(GradeCol::Absences).and_then(|c| parse_int(&text_of(c))),
        tardies: col(GradeCol::Tardies).and_then(|c| parse_int(&text_of(c))),
        course_link: course.link,
    })
}

/// What the course cell says about itself. On most installs it reads
/// `Science 6 <br> <a href="mailto:..">Email Smith, John</a> - Rm: 204`.
struct CourseCell {
    name: String,
    teacher: Option<String>,
    room: Option<String>,
    link: Option<String>,
}

impl CourseCell {
    fn read(cell: ElementRef<'_>) -> Self {
        let is_mailto = |a: ElementRef<'_>| {
            a.value().name() == "a"
                && attr(a, "href").is_some_and(|h| h.trim().to_ascii_lowercase().starts_with("mailto:"))
        };
        let own_text = text_excluding(cell, &is_mailto);
        let (name_part, room) = match own_text.find(consts::ROOM_MARKER) {
            Some(i) => (
                &own_text[..i],
                Some(own_text[i + consts::ROOM_MARKER.len()..].trim().to_string()).filter(|r| !r.is_empty()),
            ),
            None => (own_text.as_str(), None),
        };
        let name = name_part.trim_end_matches(|c: char| c == '-' || c.is_whitespace()).to_string();

        let teacher = mailto_anchor(cell)
            .map(|_| teacher_from_cell(cell).0)
            .filter(|t| !t.is_empty());

        let link = cell
            .select(sel!("a[href]"))
            .find(|a| !is_mailto(*a))
            .and_then(|a| attr(a, "href"))
            .map(|h| h.trim().to_string());

        CourseCell { name, teacher, room, link }
    }
}

/* ---------------- grade history ---------------- */

pub fn parse_history(html: &str) -> Vec<GradeHistoryEntry> {
    let doc = parse_doc(html);
    history_from_doc(&doc)
}

pub fn history_from_doc(doc: &Html) -> Vec<GradeHistoryEntry> {
    let Some(table) = locate_table(doc, HISTORY_STRATEGIES) else {
        logd!("History: no grade history table on page");
        return Vec::new();
    };
    let body = rows(table).filter(|r| !is_header_row(*r));
    collect_rows("History", body, |row| {
        let c = data_cells(row);
        require_columns(c.len(), consts::HISTORY_MIN_COLUMNS)?;
        let course_name = text_of(c[1]);
        require_name(&course_name)?;
        Ok(GradeHistoryEntry {
            term: text_of(c[0]),
            course_name,
            letter_grade: text_of(c[2]),
            percent: parse_percent(&text_of(c[3])),
        })
    })
}
