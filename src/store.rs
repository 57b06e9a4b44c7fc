// src/store.rs
//
// Tabular shape of every record list: headers + string rows, ready for
// `csv::to_export_string`. Persistence itself belongs to whoever consumes
// the records; this only flattens them.
use chrono::NaiveDate;

use crate::extract::PageData;
use crate::records::{
    AssignmentRecord, AttendanceSummaryRecord, CourseCategory, CourseGradeRow, CourseScoreAssignment,
    DailyAttendanceRecord, GradeHistoryEntry, GradesPage, ScheduleEntry, TeacherCommentRecord,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn from_records<T: ToRows>(items: &[T]) -> Self {
        DataSet {
            headers: T::HEADERS.iter().map(|h| s!(*h)).collect(),
            rows: items.iter().map(ToRows::to_row).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One record → one row, columns in `HEADERS` order.
pub trait ToRows {
    const HEADERS: &'static [&'static str];
    fn to_row(&self) -> Vec<String>;
}

fn opt_num(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn opt_int(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn opt_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

impl ToRows for AssignmentRecord {
    const HEADERS: &'static [&'static str] = &[
        "Name", "Course", "Teacher", "Term", "Category", "Due", "Earned", "Possible", "Percent", "Grade",
        "Status", "Codes",
    ];
    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.course.clone(),
            self.teacher.clone(),
            self.term.clone(),
            self.category.clone(),
            opt_date(self.due_date),
            opt_num(self.score_earned),
            opt_num(self.score_possible),
            opt_num(self.percent),
            self.letter_grade.clone().unwrap_or_default(),
            s!(self.status.as_str()),
            self.raw_codes.clone(),
        ]
    }
}

impl ToRows for GradeHistoryEntry {
    const HEADERS: &'static [&'static str] = &["Term", "Course", "Grade", "Percent"];
    fn to_row(&self) -> Vec<String> {
        vec![self.term.clone(), self.course_name.clone(), self.letter_grade.clone(), opt_num(self.percent)]
    }
}

impl ToRows for AttendanceSummaryRecord {
    const HEADERS: &'static [&'static str] = &[
        "Rate", "Enrolled", "Present", "Absent", "Absent Excused", "Absent Unexcused", "Tardies",
        "Tardies Excused", "Tardies Unexcused",
    ];
    fn to_row(&self) -> Vec<String> {
        vec![
            opt_num(self.rate),
            opt_int(self.days_enrolled),
            opt_int(self.days_present),
            opt_int(self.days_absent),
            opt_int(self.absences_excused),
            opt_int(self.absences_unexcused),
            opt_int(self.tardies_total),
            opt_int(self.tardies_excused),
            opt_int(self.tardies_unexcused),
        ]
    }
}

impl ToRows for DailyAttendanceRecord {
    const HEADERS: &'static [&'static str] = &["Date", "Status", "Code"];
    fn to_row(&self) -> Vec<String> {
        vec![opt_date(Some(self.date)), s!(self.status.as_str()), self.code.clone()]
    }
}

impl ToRows for CourseCategory {
    const HEADERS: &'static [&'static str] = &["Category", "Weight", "Earned", "Possible"];
    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            opt_num(self.weight),
            opt_num(self.points_earned),
            opt_num(self.points_possible),
        ]
    }
}

impl ToRows for CourseScoreAssignment {
    const HEADERS: &'static [&'static str] = &[
        "Name", "Due", "Category", "Score", "Percent", "Grade", "Codes", "Description", "Standards", "Comments",
    ];
    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            opt_date(self.due_date),
            self.category.clone(),
            self.score.clone(),
            opt_num(self.percent),
            self.letter_grade.clone(),
            self.codes.clone(),
            self.description.clone(),
            self.standards.join(", "),
            self.comments.clone(),
        ]
    }
}

impl ToRows for TeacherCommentRecord {
    const HEADERS: &'static [&'static str] = &["Exp", "Course #", "Course", "Teacher", "Email", "Comment"];
    fn to_row(&self) -> Vec<String> {
        vec![
            self.expression.clone(),
            self.course_number.clone(),
            self.course_name.clone(),
            self.teacher_name.clone(),
            self.teacher_email.clone(),
            self.comment.clone(),
        ]
    }
}

impl ToRows for ScheduleEntry {
    const HEADERS: &'static [&'static str] = &["Exp", "Term", "Section", "Course", "Teacher", "Room"];
    fn to_row(&self) -> Vec<String> {
        vec![
            self.expression.clone(),
            self.term.clone(),
            self.course_section.clone(),
            self.course_name.clone(),
            self.teacher.clone(),
            self.room.clone(),
        ]
    }
}

/// Term columns vary per page, so the grades table is built from the page
/// rather than through `ToRows`: two columns per term (grade, percent).
pub fn grades_dataset(page: &GradesPage) -> DataSet {
    let mut headers = vec![s!("Course"), s!("Teacher"), s!("Room")];
    for t in &page.terms {
        headers.push(t.to_string());
        headers.push(join!(t.as_str(), " %"));
    }
    headers.extend([s!("Absences"), s!("Tardies"), s!("Link")]);

    let rows = page.courses.iter().map(|c| grade_row(c, page)).collect();
    DataSet { headers, rows }
}

fn grade_row(c: &CourseGradeRow, page: &GradesPage) -> Vec<String> {
    let mut row = vec![c.course_name.clone(), c.teacher_name.clone(), c.room.clone()];
    for t in &page.terms {
        let cell = c.grades.get(t).and_then(|g| g.as_ref());
        row.push(cell.and_then(|g| g.letter_grade.clone()).unwrap_or_default());
        row.push(opt_num(cell.and_then(|g| g.percent)));
    }
    row.push(opt_int(c.absences));
    row.push(opt_int(c.tardies));
    row.push(c.course_link.clone().unwrap_or_default());
    row
}

/// Every table a page yields, with a short title. Most pages give one;
/// the scores page gives categories and assignments.
pub fn datasets(data: &PageData) -> Vec<(&'static str, DataSet)> {
    match data {
        PageData::Assignments(v) => vec![("assignments", DataSet::from_records(v))],
        PageData::Grades(g) => vec![("grades", grades_dataset(g))],
        PageData::GradeHistory(v) => vec![("grade history", DataSet::from_records(v))],
        PageData::AttendanceDashboard(s) => {
            let rows = if s.is_empty() { &[][..] } else { std::slice::from_ref(s) };
            vec![("attendance", DataSet::from_records(rows))]
        }
        PageData::DailyAttendance(v) => vec![("daily attendance", DataSet::from_records(v))],
        PageData::CourseScores(c) => vec![
            ("categories", DataSet::from_records(&c.categories)),
            ("assignments", DataSet::from_records(&c.assignments)),
        ],
        PageData::TeacherComments(v) => vec![("comments", DataSet::from_records(v))],
        PageData::Schedule(v) => vec![("schedule", DataSet::from_records(v))],
    }
}
