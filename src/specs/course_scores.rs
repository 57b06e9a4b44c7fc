// src/specs/course_scores.rs
//! Spec for the per-course *Scores* page.
//!
//! Two independent tables:
//! - category weights (`Category | Weight | Points Earned | Points Possible`),
//!   read by class (`category-name`, `weight`, `points-earned`,
//!   `points-possible`) or, failing that, by position;
//! - assignment rows, read by class (`assignment-name`, `due-date`, …) or by
//!   header name when the skin has no classes. Each row may hide an
//!   `.assignment-detail` block with description, standards and comments.
use scraper::{ElementRef, Html};

use crate::config::consts;
use crate::core::html::{find_by_class, has_class, parse_doc, text_by_class, text_excluding, text_of};
use crate::core::normalize::{parse_date, parse_number, parse_percent, parse_score, parse_standards, parse_weight};
use crate::core::table::{data_cells, is_header_row, locate_table, rows, HeaderMap, TableMatch};
use crate::records::{CourseCategory, CourseScoreAssignment, CourseScores};
use super::{collect_rows, require_name, RowSkip};

const CATEGORY_STRATEGIES: &[TableMatch] = &[
    TableMatch::Css(consts::CATEGORY_WEIGHTS_SELECTORS[0]),
    TableMatch::Css(consts::CATEGORY_WEIGHTS_SELECTORS[1]),
    TableMatch::Headers(&[&["weight"]]),
];

const SCORE_STRATEGIES: &[TableMatch] = &[
    TableMatch::Css(consts::SCORE_TABLE_SELECTORS[0]),
    TableMatch::Css(consts::SCORE_TABLE_SELECTORS[1]),
    TableMatch::Headers(&[&["assignment", "score"]]),
];

const DETAIL_CLASS: &str = "assignment-detail";

pub fn parse(html: &str) -> CourseScores {
    let doc = parse_doc(html);
    from_doc(&doc)
}

pub fn from_doc(doc: &Html) -> CourseScores {
    let course_name = doc.select(sel!("h2")).next().map(text_of).unwrap_or_default();
    let teacher_name = doc
        .select(sel!(".teacher"))
        .next()
        .or_else(|| doc.select(sel!(".teacher-info")).next())
        .map(text_of)
        .unwrap_or_default();

    CourseScores {
        course_name,
        teacher_name,
        categories: categories(doc),
        assignments: assignments(doc),
    }
}

/* ---------------- categories ---------------- */

fn categories(doc: &Html) -> Vec<CourseCategory> {
    let Some(table) = locate_table(doc, CATEGORY_STRATEGIES) else {
        logd!("Scores: no category weights on page");
        return Vec::new();
    };
    let body = rows(table).filter(|r| !data_cells(*r).is_empty());
    collect_rows("Categories", body, category_row)
}

fn category_row(row: ElementRef<'_>) -> Result<CourseCategory, RowSkip> {
    let by_class = |c: &str| text_by_class(row, c);

    let (name, weight, earned, possible) = match by_class("category-name") {
        Some(name) if !name.is_empty() => (
            name,
            by_class("weight"),
            by_class("points-earned"),
            by_class("points-possible"),
        ),
        _ => {
            let cells = data_cells(row);
            if cells.len() < 2 {
                return Err(RowSkip::TooFewColumns { found: cells.len(), need: 2 });
            }
            let at = |i: usize| cells.get(i).map(|c| text_of(*c));
            (text_of(cells[0]), at(1), at(2), at(3))
        }
    };
    require_name(&name)?;

    Ok(CourseCategory {
        name,
        weight: weight.as_deref().and_then(parse_weight),
        points_earned: earned.as_deref().and_then(parse_number),
        points_possible: possible.as_deref().and_then(parse_number),
    })
}

/* ---------------- assignments ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ScoreCol {
    Due,
    Category,
    Name,
    Score,
    Percent,
    Letter,
    Codes,
}

fn classify_header(h: &str) -> Option<ScoreCol> {
    if h.contains("DUE") {
        Some(ScoreCol::Due)
    } else if h.contains("CATEGORY") {
        Some(ScoreCol::Category)
    } else if h.contains("ASSIGNMENT") {
        Some(ScoreCol::Name)
    } else if h.contains("SCORE") {
        Some(ScoreCol::Score)
    } else if h.contains('%') {
        Some(ScoreCol::Percent)
    } else if h.contains("GRADE") || h.contains("GRD") {
        Some(ScoreCol::Letter)
    } else if h.contains("CODES") {
        Some(ScoreCol::Codes)
    } else {
        None
    }
}

fn assignments(doc: &Html) -> Vec<CourseScoreAssignment> {
    let Some(table) = locate_table(doc, SCORE_STRATEGIES) else {
        logd!("Scores: no assignment table on page");
        return Vec::new();
    };

    let header = rows(table)
        .find(|r| is_header_row(*r))
        .map(|r| HeaderMap::from_row(r, classify_header));

    let marked: Vec<ElementRef<'_>> = rows(table).filter(|r| has_class(*r, "assignment-row")).collect();
    let body: Vec<ElementRef<'_>> = if marked.is_empty() {
        rows(table).filter(|r| !data_cells(*r).is_empty()).collect()
    } else {
        marked
    };
    collect_rows("Scores", body, |r| assignment_row(r, header.as_ref()))
}

/// One field, by class first, header position second.
fn field_cell<'a>(
    row: ElementRef<'a>,
    cells: &[ElementRef<'a>],
    header: Option<&HeaderMap<ScoreCol>>,
    class: &str,
    col: ScoreCol,
) -> Option<ElementRef<'a>> {
    find_by_class(row, class).or_else(|| header.and_then(|h| h.get(col)).and_then(|i| cells.get(i).copied()))
}

fn assignment_row(row: ElementRef<'_>, header: Option<&HeaderMap<ScoreCol>>) -> Result<CourseScoreAssignment, RowSkip> {
    let cells = data_cells(row);
    if cells.is_empty() {
        return Err(RowSkip::NoCells);
    }
    let field = |class: &str, col: ScoreCol| field_cell(row, &cells, header, class, col);
    let text = |class: &str, col: ScoreCol| field(class, col).map(text_of).unwrap_or_default();

    let is_detail = |e: ElementRef<'_>| has_class(e, DETAIL_CLASS);
    let name_cell = field("assignment-name", ScoreCol::Name);
    let name = match name_cell {
        Some(cell) => match cell.select(sel!("a")).next() {
            Some(a) => text_of(a),
            None => text_excluding(cell, &is_detail),
        },
        None => text_excluding(cells[0], &is_detail),
    };
    require_name(&name)?;

    let detail = find_by_class(row, DETAIL_CLASS);
    let detail_text = |class: &str| detail.and_then(|d| text_by_class(d, class)).unwrap_or_default();

    let score = text("score", ScoreCol::Score);
    let (points_earned, points_possible) = parse_score(&score);

    Ok(CourseScoreAssignment {
        name,
        due_date: parse_date(&text("due-date", ScoreCol::Due)),
        category: text("category", ScoreCol::Category),
        points_earned,
        points_possible,
        percent: parse_percent(&text("percent", ScoreCol::Percent)),
        letter_grade: text("letter-grade", ScoreCol::Letter),
        codes: text("codes", ScoreCol::Codes),
        description: detail_text("description"),
        standards: parse_standards(&detail_text("standards")),
        comments: detail_text("comments"),
        score,
    })
}
