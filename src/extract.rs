// src/extract.rs
//! Extraction facade: one pure function per page type.
//!
//! Every function takes the page's HTML and returns owned records. None of
//! them fail: a page without the expected table gives an empty list (or an
//! all-`None` summary), and unreadable rows are dropped individually. Calling
//! twice on the same string gives the same result.
use serde::Serialize;

use crate::config::options::{PageKind, ParseOptions};
use crate::records::{
    AssignmentRecord, AttendancePatterns, AttendanceSummaryRecord, CourseScores, DailyAttendanceRecord,
    GradeHistoryEntry, GradesPage, ScheduleEntry, TeacherCommentRecord,
};
use crate::specs;

pub fn parse_assignments(html: &str) -> Vec<AssignmentRecord> {
    specs::assignments::parse(html)
}

pub fn parse_grades(html: &str) -> GradesPage {
    specs::grades::parse(html)
}

pub fn parse_grade_history(html: &str) -> Vec<GradeHistoryEntry> {
    specs::grades::parse_history(html)
}

pub fn parse_attendance_dashboard(html: &str) -> AttendanceSummaryRecord {
    specs::attendance::parse_dashboard(html)
}

pub fn parse_daily_attendance(html: &str) -> Vec<DailyAttendanceRecord> {
    specs::attendance::parse_daily(html)
}

/// Counts, weekday breakdown and streaks over a day-by-day list.
pub fn detect_attendance_patterns(records: &[DailyAttendanceRecord]) -> AttendancePatterns {
    specs::attendance::detect_patterns(records)
}

pub fn parse_course_scores(html: &str) -> CourseScores {
    specs::course_scores::parse(html)
}

/// `comments_only` drops courses whose comment is blank.
pub fn parse_teacher_comments(html: &str, comments_only: bool) -> Vec<TeacherCommentRecord> {
    specs::teacher_comments::parse(html, comments_only)
}

pub fn student_name_from_comments_page(html: &str) -> Option<String> {
    specs::teacher_comments::student_name(html)
}

pub fn parse_schedule(html: &str) -> Vec<ScheduleEntry> {
    specs::schedule::parse(html)
}

/// Result of [`parse_page`]; serializes as the inner value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageData {
    Assignments(Vec<AssignmentRecord>),
    Grades(GradesPage),
    GradeHistory(Vec<GradeHistoryEntry>),
    AttendanceDashboard(AttendanceSummaryRecord),
    DailyAttendance(Vec<DailyAttendanceRecord>),
    CourseScores(CourseScores),
    TeacherComments(Vec<TeacherCommentRecord>),
    Schedule(Vec<ScheduleEntry>),
}

impl PageData {
    pub fn kind(&self) -> PageKind {
        match self {
            PageData::Assignments(_) => PageKind::Assignments,
            PageData::Grades(_) => PageKind::Grades,
            PageData::GradeHistory(_) => PageKind::GradeHistory,
            PageData::AttendanceDashboard(_) => PageKind::AttendanceDashboard,
            PageData::DailyAttendance(_) => PageKind::DailyAttendance,
            PageData::CourseScores(_) => PageKind::CourseScores,
            PageData::TeacherComments(_) => PageKind::TeacherComments,
            PageData::Schedule(_) => PageKind::Schedule,
        }
    }

    /// Number of records; a summary counts as one when any field is set.
    pub fn len(&self) -> usize {
        match self {
            PageData::Assignments(v) => v.len(),
            PageData::Grades(g) => g.courses.len(),
            PageData::GradeHistory(v) => v.len(),
            PageData::AttendanceDashboard(s) => usize::from(!s.is_empty()),
            PageData::DailyAttendance(v) => v.len(),
            PageData::CourseScores(c) => c.categories.len() + c.assignments.len(),
            PageData::TeacherComments(v) => v.len(),
            PageData::Schedule(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dispatch on page kind.
pub fn parse_page(kind: PageKind, html: &str, opts: ParseOptions) -> PageData {
    let data = match kind {
        PageKind::Assignments => PageData::Assignments(parse_assignments(html)),
        PageKind::Grades => PageData::Grades(parse_grades(html)),
        PageKind::GradeHistory => PageData::GradeHistory(parse_grade_history(html)),
        PageKind::AttendanceDashboard => PageData::AttendanceDashboard(parse_attendance_dashboard(html)),
        PageKind::DailyAttendance => PageData::DailyAttendance(parse_daily_attendance(html)),
        PageKind::CourseScores => PageData::CourseScores(parse_course_scores(html)),
        PageKind::TeacherComments => PageData::TeacherComments(parse_teacher_comments(html, opts.comments_only)),
        PageKind::Schedule => PageData::Schedule(parse_schedule(html)),
    };
    logf!("Parsed {} page: {} record(s)", kind.slug(), data.len());
    data
}
