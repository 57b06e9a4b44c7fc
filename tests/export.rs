// tests/export.rs
//
// Parsed pages flattened to CSV/TSV and serialized to JSON.
use portal_scrape::{csv, parse_page, store, PageKind, ParseOptions};

const SCHEDULE: &str = include_str!("fixtures/schedule.html");
const SCORES: &str = include_str!("fixtures/course_scores.html");
const GRADES: &str = include_str!("fixtures/grades.html");

#[test]
fn schedule_csv() {
    let data = parse_page(PageKind::Schedule, SCHEDULE, ParseOptions::default());
    let sets = store::datasets(&data);
    assert_eq!(sets.len(), 1);

    let out = csv::to_export_string(&sets[0].1, true, ',');
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "Exp,Term,Section,Course,Teacher,Room");
    assert_eq!(lines[1], "1(A),25-26,2100-3,Science 6,\"Smith, John\",204");
    // repeated header row is not data
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "3(A),S1,3300-2,Band,\"Ortiz, Ray\",Music");
}

#[test]
fn scores_split_into_two_tables() {
    let data = parse_page(PageKind::CourseScores, SCORES, ParseOptions::default());
    let sets = store::datasets(&data);
    let titles: Vec<_> = sets.iter().map(|(t, _)| *t).collect();
    assert_eq!(titles, ["categories", "assignments"]);
    assert_eq!(sets[0].1.rows.len(), 2);
    assert_eq!(sets[1].1.rows.len(), 3);

    let tsv = csv::to_export_string(&sets[0].1, false, '\t');
    assert_eq!(tsv.lines().next(), Some("Formative\t30\t45\t50"));
}

#[test]
fn grades_json_shape() {
    let data = parse_page(PageKind::Grades, GRADES, ParseOptions::default());
    let v = serde_json::to_value(&data).unwrap();
    assert_eq!(v["terms"], serde_json::json!(["Q1", "S1"]));
    let sci = &v["courses"][0];
    assert_eq!(sci["course_name"], "Science 6");
    assert_eq!(sci["grades"]["Q1"]["letter_grade"], "2");
    assert_eq!(sci["grades"]["Q1"]["gpa_points"], 2.0);
    assert!(v["courses"][1]["grades"]["S1"].is_null());
}

#[test]
fn dates_serialize_as_iso() {
    let data = parse_page(PageKind::DailyAttendance, include_str!("fixtures/daily_attendance.html"), ParseOptions::default());
    let v = serde_json::to_value(&data).unwrap();
    assert_eq!(v[0]["date"], "2024-12-09");
    assert_eq!(v[0]["status"], "Absent");
}
