// src/specs/attendance.rs
//! Spec for attendance: the dashboard summary, the day-by-day grid, and
//! statistics over the grid.
//!
//! Dashboard, two layers:
//! 1. a summary table whose first column labels the row ("Days Present", …);
//! 2. "stat cards" (`class` containing `stat`/`metric`) pairing a label
//!    element with a value element, or just text with a number in it.
//!    Layer 2 only fills what layer 1 left empty.
//!
//! Daily grid, first non-empty strategy wins:
//! 1. any element with a `data-date` (except day blocks, see 2);
//! 2. `div.attendance-day[data-date]` with `span.status` / `span.code`;
//! 3. the attendance table's body, week label skipped, cells dated by
//!    `data-date` or `title`.
use chrono::{Datelike, Weekday};
use scraper::{ElementRef, Html};

use crate::config::consts;
use crate::core::html::{
    class_attr_lc, class_contains_any, descendant_elements, has_class, parse_doc, text_excluding, text_of,
};
use crate::core::normalize::{find_percent, first_number, parse_date_lenient};
use crate::core::table::{cells, data_cells, locate_table, rows, TableMatch};
use crate::records::{AttendancePatterns, AttendanceSummaryRecord, DailyAttendanceRecord, DailyStatus, WeekdayCounts};

const SUMMARY_STRATEGIES: &[TableMatch] = &[
    TableMatch::Css(consts::ATTENDANCE_SUMMARY_TABLES[0]),
    TableMatch::Css(consts::ATTENDANCE_SUMMARY_TABLES[1]),
    TableMatch::Css(consts::ATTENDANCE_SUMMARY_TABLES[2]),
    TableMatch::RowLabels(&[&["present"], &["absent", "enrolled"]]),
];

/* ---------------- dashboard ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Rate,
    Enrolled,
    Present,
    Absent,
    AbsExcused,
    AbsUnexcused,
    Tardies,
    TardiesExcused,
    TardiesUnexcused,
}

/// Row / card label (any case) → summary field.
fn field_for_label(label: &str) -> Option<Field> {
    let l = label.to_lowercase();
    let excuse = || {
        if l.contains("unexcused") {
            Some(true)
        } else if l.contains("excused") {
            Some(false)
        } else {
            None
        }
    };
    if l.contains("rate") || l.contains('%') {
        Some(Field::Rate)
    } else if l.contains("enrolled") {
        Some(Field::Enrolled)
    } else if l.contains("present") {
        Some(Field::Present)
    } else if l.contains("tard") {
        Some(match excuse() {
            Some(true) => Field::TardiesUnexcused,
            Some(false) => Field::TardiesExcused,
            None => Field::Tardies,
        })
    } else if l.contains("absen") {
        Some(match excuse() {
            Some(true) => Field::AbsUnexcused,
            Some(false) => Field::AbsExcused,
            None => Field::Absent,
        })
    } else {
        None
    }
}

fn to_count(v: f64) -> Option<u32> {
    (v.is_finite() && v >= 0.0 && v <= u32::MAX as f64).then(|| v.round() as u32)
}

/// Store `value_text` into `field` unless already set. Returns true if it stored.
fn fill(rec: &mut AttendanceSummaryRecord, field: Field, value_text: &str) -> bool {
    if field == Field::Rate {
        if rec.rate.is_some() {
            return false;
        }
        rec.rate = find_percent(value_text).or_else(|| first_number(value_text));
        return rec.rate.is_some();
    }
    let slot = match field {
        Field::Enrolled => &mut rec.days_enrolled,
        Field::Present => &mut rec.days_present,
        Field::Absent => &mut rec.days_absent,
        Field::AbsExcused => &mut rec.absences_excused,
        Field::AbsUnexcused => &mut rec.absences_unexcused,
        Field::Tardies => &mut rec.tardies_total,
        Field::TardiesExcused => &mut rec.tardies_excused,
        Field::TardiesUnexcused => &mut rec.tardies_unexcused,
        Field::Rate => return false,
    };
    if slot.is_some() {
        return false;
    }
    *slot = first_number(value_text).and_then(to_count);
    slot.is_some()
}

fn all_filled(rec: &AttendanceSummaryRecord) -> bool {
    rec.rate.is_some()
        && rec.days_enrolled.is_some()
        && rec.days_present.is_some()
        && rec.days_absent.is_some()
        && rec.absences_excused.is_some()
        && rec.absences_unexcused.is_some()
        && rec.tardies_total.is_some()
        && rec.tardies_excused.is_some()
        && rec.tardies_unexcused.is_some()
}

pub fn parse_dashboard(html: &str) -> AttendanceSummaryRecord {
    let doc = parse_doc(html);
    dashboard_from_doc(&doc)
}

pub fn dashboard_from_doc(doc: &Html) -> AttendanceSummaryRecord {
    let mut rec = AttendanceSummaryRecord::default();

    match locate_table(doc, SUMMARY_STRATEGIES) {
        Some(table) => {
            let n = from_summary_table(table, &mut rec);
            logd!("Attendance: summary table gave {} field(s)", n);
        }
        None => logd!("Attendance: summary table missing, scanning stat cards"),
    }

    if !all_filled(&rec) {
        let n = from_stat_cards(doc, &mut rec);
        logd!("Attendance: stat cards filled {} field(s)", n);
    }
    rec
}

fn from_summary_table(table: ElementRef<'_>, rec: &mut AttendanceSummaryRecord) -> usize {
    let mut filled = 0;
    for row in rows(table) {
        let mut it = cells(row);
        let Some(label_cell) = it.next() else { continue };
        let Some(field) = field_for_label(&text_of(label_cell)) else { continue };
        // first cell after the label that carries a number
        let value = it.map(text_of).find(|t| first_number(t).is_some());
        if let Some(v) = value {
            if fill(rec, field, &v) {
                filled += 1;
            }
        }
    }
    filled
}

fn is_card_part(el: ElementRef<'_>) -> bool {
    class_contains_any(el, consts::STAT_LABEL_HINTS) || class_contains_any(el, consts::STAT_VALUE_HINTS)
}

fn is_stat(el: ElementRef<'_>) -> bool {
    class_contains_any(el, consts::STAT_CLASS_HINTS)
}

/// A stat element that is not itself a label/value part and holds no other
/// stat card (so grid wrappers are passed over in favour of their cards).
fn is_card(el: ElementRef<'_>) -> bool {
    is_stat(el) && !is_card_part(el) && !descendant_elements(el).any(|d| is_stat(d) && !is_card_part(d))
}

fn from_stat_cards(doc: &Html, rec: &mut AttendanceSummaryRecord) -> usize {
    let mut filled = 0;
    for card in doc.select(sel!("*")).filter(|e| is_card(*e)) {
        let label_el = descendant_elements(card).find(|d| class_contains_any(*d, consts::STAT_LABEL_HINTS));
        let value_el = descendant_elements(card).find(|d| class_contains_any(*d, consts::STAT_VALUE_HINTS));

        let label = match label_el {
            Some(l) => text_of(l),
            None => text_of(card),
        };
        let Some(field) = field_for_label(&label) else { continue };

        let value = match (value_el, label_el) {
            (Some(v), _) => text_of(v),
            (None, Some(l)) => {
                let lid = l.id();
                text_excluding(card, &|e| e.id() == lid)
            }
            (None, None) => text_of(card),
        };
        if fill(rec, field, &value) {
            filled += 1;
        }
    }
    filled
}

/* ---------------- daily grid ---------------- */

/// Class keywords beat the code; codes are compared upper-cased.
pub fn normalize_attendance_status(code: &str, class: &str) -> DailyStatus {
    let class = class.to_lowercase();
    for (kw, st) in [
        ("present", DailyStatus::Present),
        ("absent", DailyStatus::Absent),
        ("tardy", DailyStatus::Tardy),
        ("excused", DailyStatus::Excused),
    ] {
        if class.contains(kw) {
            return st;
        }
    }
    match code.trim().to_uppercase().as_str() {
        "." | "P" | "PRESENT" => DailyStatus::Present,
        "A" | "ABSENT" => DailyStatus::Absent,
        "T" | "TARDY" => DailyStatus::Tardy,
        "E" | "EX" | "EXCUSED" => DailyStatus::Excused,
        _ => DailyStatus::Unknown,
    }
}

pub fn parse_daily(html: &str) -> Vec<DailyAttendanceRecord> {
    let doc = parse_doc(html);
    daily_from_doc(&doc)
}

pub fn daily_from_doc(doc: &Html) -> Vec<DailyAttendanceRecord> {
    type Strategy = fn(&Html) -> Vec<DailyAttendanceRecord>;
    const STRATEGIES: &[(&str, Strategy)] = &[
        ("data-date cells", from_dated_cells),
        ("day blocks", from_day_blocks),
        ("attendance table", from_grid_table),
    ];
    for (name, strategy) in STRATEGIES {
        let recs = strategy(doc);
        if !recs.is_empty() {
            logd!("Daily: {} record(s) via {}", recs.len(), name);
            return recs;
        }
    }
    logd!("Daily: no attendance grid on page");
    Vec::new()
}

fn code_of(el: ElementRef<'_>) -> String {
    el.select(sel!("span.code")).next().map(text_of).unwrap_or_else(|| text_of(el))
}

fn dated(el: ElementRef<'_>, raw: Option<&str>) -> Option<DailyAttendanceRecord> {
    let Some(date) = raw.and_then(parse_date_lenient) else {
        if let Some(r) = raw {
            logd!("Daily: unreadable date '{}' dropped", r);
        }
        return None;
    };
    let code = code_of(el);
    let status = normalize_attendance_status(&code, &class_attr_lc(el));
    Some(DailyAttendanceRecord { date, status, code })
}

fn from_dated_cells(doc: &Html) -> Vec<DailyAttendanceRecord> {
    doc.select(sel!("[data-date]"))
        .filter(|el| !has_class(*el, "attendance-day"))
        .filter_map(|el| dated(el, el.value().attr("data-date")))
        .collect()
}

fn from_day_blocks(doc: &Html) -> Vec<DailyAttendanceRecord> {
    doc.select(sel!("div.attendance-day[data-date]"))
        .filter_map(|day| {
            let date = day.value().attr("data-date").and_then(parse_date_lenient)?;
            let status = match day.select(sel!("span.status")).next() {
                Some(s) => normalize_attendance_status(&text_of(s), &class_attr_lc(s)),
                None => DailyStatus::Unknown,
            };
            let code = day.select(sel!("span.code")).next().map(text_of).unwrap_or_default();
            Some(DailyAttendanceRecord { date, status, code })
        })
        .collect()
}

fn from_grid_table(doc: &Html) -> Vec<DailyAttendanceRecord> {
    let hint = consts::DAILY_GRID_HINT;
    let Some(table) = doc.select(sel!("table")).find(|t| {
        class_contains_any(*t, &[hint])
            || t.value().id().is_some_and(|id| id.to_ascii_lowercase().contains(hint))
    }) else {
        return Vec::new();
    };
    let Some(tbody) = table.select(sel!("tbody")).next() else { return Vec::new() };

    let mut out = Vec::new();
    for row in rows(tbody) {
        let tds = data_cells(row);
        if tds.len() < 2 {
            continue;
        }
        for cell in &tds[1..] {
            let raw = cell.value().attr("data-date").or_else(|| cell.value().attr("title"));
            out.extend(dated(*cell, raw));
        }
    }
    out
}

/* ---------------- patterns ---------------- */

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn detect_patterns(records: &[DailyAttendanceRecord]) -> AttendancePatterns {
    let mut p = AttendancePatterns {
        by_weekday: WEEK.map(|d| (d, WeekdayCounts::default())),
        longest_absence_streak: 0,
        total_present: 0,
        total_absent: 0,
        total_tardy: 0,
        total_excused: 0,
        attendance_rate: 100.0,
    };

    let mut sorted: Vec<&DailyAttendanceRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let mut streak = 0u32;
    for r in sorted {
        let day = &mut p.by_weekday[r.date.weekday().num_days_from_monday() as usize].1;
        day.total_records += 1;
        match r.status {
            DailyStatus::Absent => {
                p.total_absent += 1;
                day.absence_count += 1;
                streak += 1;
                p.longest_absence_streak = p.longest_absence_streak.max(streak);
            }
            DailyStatus::Present => {
                p.total_present += 1;
                day.present_count += 1;
                streak = 0;
            }
            DailyStatus::Tardy => {
                p.total_tardy += 1;
                day.tardy_count += 1;
                streak = 0;
            }
            DailyStatus::Excused => {
                p.total_excused += 1;
                streak = 0;
            }
            DailyStatus::Unknown => streak = 0,
        }
    }

    let counted = p.total_present + p.total_absent + p.total_tardy;
    if counted > 0 {
        let attended = (p.total_present + p.total_tardy) as f64;
        p.attendance_rate = (1000.0 * attended / counted as f64).round() / 10.0;
    }
    p
}

impl AttendancePatterns {
    /// Weekdays whose absence share is at least `threshold`, worst first.
    pub fn concerning_days(&self, threshold: f64) -> Vec<(Weekday, f64)> {
        let mut days: Vec<(Weekday, f64)> = self
            .by_weekday
            .iter()
            .filter(|(_, c)| c.total_records > 0)
            .map(|(d, c)| (*d, c.absence_count as f64 / c.total_records as f64))
            .filter(|(_, share)| *share >= threshold)
            .collect();
        days.sort_by(|a, b| b.1.total_cmp(&a.1));
        days
    }

    pub fn day(&self, weekday: Weekday) -> WeekdayCounts {
        self.by_weekday[weekday.num_days_from_monday() as usize].1
    }
}
