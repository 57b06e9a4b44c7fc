// src/specs/schedule.rs
//! Spec for the *My Schedule* list view.
//!
//! Layout (fixed, at least 6 `<td>`):
//! `Exp. | Term | Course-Section | Course Name | Teacher | Room`
//!
//! Long schedules repeat the header row as a `<td>` row every few lines;
//! those start with "Exp" and are dropped.
use scraper::{ElementRef, Html};

use crate::config::consts;
use crate::core::html::{parse_doc, text_of};
use crate::core::sanitize::strip_prefix_ci;
use crate::core::table::{data_cells, locate_table, rows, TableMatch};
use crate::records::ScheduleEntry;
use super::teacher_comments::teacher_from_cell;
use super::{collect_rows, require_columns, require_name, RowSkip};

const STRATEGIES: &[TableMatch] = &[
    TableMatch::Css(consts::SCHEDULE_TABLE_ID),
    TableMatch::ClassContains(consts::SCHEDULE_CLASS_HINTS),
    TableMatch::Headers(&[&["course"], &["room", "teacher"]]),
];

pub fn parse(html: &str) -> Vec<ScheduleEntry> {
    let doc = parse_doc(html);
    from_doc(&doc)
}

pub fn from_doc(doc: &Html) -> Vec<ScheduleEntry> {
    let Some(table) = locate_table(doc, STRATEGIES) else {
        logd!("Schedule: no schedule table on page");
        return Vec::new();
    };
    collect_rows("Schedule", rows(table), parse_row)
}

fn parse_row(row: ElementRef<'_>) -> Result<ScheduleEntry, RowSkip> {
    let c = data_cells(row);
    require_columns(c.len(), consts::SCHEDULE_MIN_COLUMNS)?;

    let expression = text_of(c[0]);
    if strip_prefix_ci(&expression, "Exp").is_some() {
        return Err(RowSkip::RepeatedHeader);
    }
    let course_name = text_of(c[3]);
    require_name(&course_name)?;

    let teacher = match teacher_from_cell(c[4]) {
        (name, _) if !name.is_empty() => name,
        _ => text_of(c[4]),
    };

    Ok(ScheduleEntry {
        expression,
        term: text_of(c[1]),
        course_section: text_of(c[2]),
        course_name,
        teacher,
        room: text_of(c[5]),
    })
}
