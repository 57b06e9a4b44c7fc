// src/records.rs
//
// Plain value types handed to the storage side. No ids, no merge keys:
// identity belongs to whoever persists these.
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

pub use crate::core::status::AssignmentStatus;

/* ---------------- Assignments ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssignmentRecord {
    pub name: String,
    pub course: String,
    pub teacher: String,
    pub term: String,
    pub category: String,
    pub due_date: Option<NaiveDate>,
    pub score_earned: Option<f64>,
    pub score_possible: Option<f64>,
    pub percent: Option<f64>,
    pub letter_grade: Option<String>,
    pub status: AssignmentStatus,
    pub raw_codes: String,
}

/* ---------------- Grades / home ---------------- */

/// Grading period column on the home page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Term {
    Q1,
    Q2,
    Q3,
    Q4,
    S1,
    S2,
    Y1,
}

impl Term {
    pub const ALL: [Term; 7] = [Term::Q1, Term::Q2, Term::Q3, Term::Q4, Term::S1, Term::S2, Term::Y1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Q1 => "Q1",
            Term::Q2 => "Q2",
            Term::Q3 => "Q3",
            Term::Q4 => "Q4",
            Term::S1 => "S1",
            Term::S2 => "S2",
            Term::Y1 => "Y1",
        }
    }

    /// Exact header match ("Q1", "s2"); anything else is not a term.
    pub fn from_header(h: &str) -> Option<Term> {
        let h = h.trim();
        Term::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(h))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GradeCell {
    pub letter_grade: Option<String>,
    pub percent: Option<f64>,
    pub gpa_points: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseGradeRow {
    pub course_name: String,
    pub teacher_name: String,
    pub room: String,
    /// Every term column the page shows; `None` for a blank cell.
    pub grades: BTreeMap<Term, Option<GradeCell>>,
    pub absences: Option<u32>,
    pub tardies: Option<u32>,
    pub course_link: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GradesPage {
    pub courses: Vec<CourseGradeRow>,
    /// Term columns in header order.
    pub terms: Vec<Term>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GradeHistoryEntry {
    pub term: String,
    pub course_name: String,
    pub letter_grade: String,
    pub percent: Option<f64>,
}

/* ---------------- Attendance ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AttendanceSummaryRecord {
    /// 0–100
    pub rate: Option<f64>,
    pub days_enrolled: Option<u32>,
    pub days_present: Option<u32>,
    pub days_absent: Option<u32>,
    pub absences_excused: Option<u32>,
    pub absences_unexcused: Option<u32>,
    pub tardies_total: Option<u32>,
    pub tardies_excused: Option<u32>,
    pub tardies_unexcused: Option<u32>,
}

impl AttendanceSummaryRecord {
    pub fn is_empty(&self) -> bool {
        *self == AttendanceSummaryRecord::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DailyStatus {
    Present,
    Absent,
    Tardy,
    Excused,
    Unknown,
}

impl DailyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DailyStatus::Present => "Present",
            DailyStatus::Absent => "Absent",
            DailyStatus::Tardy => "Tardy",
            DailyStatus::Excused => "Excused",
            DailyStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DailyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyAttendanceRecord {
    pub date: NaiveDate,
    pub status: DailyStatus,
    pub code: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WeekdayCounts {
    pub absence_count: u32,
    pub tardy_count: u32,
    pub present_count: u32,
    pub total_records: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttendancePatterns {
    /// Monday first.
    pub by_weekday: [(chrono::Weekday, WeekdayCounts); 7],
    pub longest_absence_streak: u32,
    pub total_present: u32,
    pub total_absent: u32,
    pub total_tardy: u32,
    pub total_excused: u32,
    pub attendance_rate: f64,
}

/* ---------------- Course scores ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseCategory {
    pub name: String,
    pub weight: Option<f64>,
    pub points_earned: Option<f64>,
    pub points_possible: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseScoreAssignment {
    pub name: String,
    pub due_date: Option<NaiveDate>,
    pub category: String,
    /// As shown, e.g. "17/20" or "--".
    pub score: String,
    pub points_earned: Option<f64>,
    pub points_possible: Option<f64>,
    pub percent: Option<f64>,
    pub letter_grade: String,
    pub codes: String,
    pub description: String,
    pub standards: Vec<String>,
    pub comments: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CourseScores {
    pub course_name: String,
    pub teacher_name: String,
    pub categories: Vec<CourseCategory>,
    pub assignments: Vec<CourseScoreAssignment>,
}

/* ---------------- Teacher comments ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TeacherCommentRecord {
    pub expression: String,
    pub course_number: String,
    pub course_name: String,
    pub teacher_name: String,
    pub teacher_email: String,
    pub comment: String,
}

/* ---------------- Schedule ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub expression: String,
    pub term: String,
    pub course_section: String,
    pub course_name: String,
    pub teacher: String,
    pub room: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_headers() {
        assert_eq!(Term::from_header("Q1"), Some(Term::Q1));
        assert_eq!(Term::from_header(" y1 "), Some(Term::Y1));
        assert_eq!(Term::from_header("Q5"), None);
        assert_eq!(Term::from_header("Q1 Grade"), None);
        assert!(Term::S1 < Term::S2);
    }

    #[test]
    fn empty_summary() {
        assert!(AttendanceSummaryRecord::default().is_empty());
        let s = AttendanceSummaryRecord { days_present: Some(0), ..Default::default() };
        assert!(!s.is_empty());
    }
}
