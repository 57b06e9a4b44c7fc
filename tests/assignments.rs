// tests/assignments.rs
//
// Class assignments page, end to end from a saved page.
use chrono::NaiveDate;
use portal_scrape::{parse_assignments, AssignmentStatus};

const PAGE: &str = include_str!("fixtures/assignments.html");

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn missing_icon_row() {
    let recs = parse_assignments(PAGE);
    let cell = recs.iter().find(|r| r.name == "Cell Diagram").expect("row present");

    // icon says Missing even though the cell text says Collected
    assert_eq!(cell.status, AssignmentStatus::Missing);
    assert_eq!(cell.due_date, ymd(2025, 11, 3));
    assert_eq!((cell.score_earned, cell.score_possible), (None, Some(10.0)));
    assert_eq!(cell.percent, None);
    assert_eq!(cell.letter_grade, None);
    assert_eq!(cell.teacher, "Smith, John");
    assert_eq!(cell.course, "Science 6");
}

#[test]
fn every_status_signal() {
    let statuses: Vec<_> = parse_assignments(PAGE).iter().map(|r| (r.name.clone(), r.status)).collect();
    assert_eq!(
        statuses,
        vec![
            ("Cell Diagram".to_string(), AssignmentStatus::Missing),
            ("Lab Report 2".to_string(), AssignmentStatus::Collected),
            ("Fractions Practice".to_string(), AssignmentStatus::Late),
            ("Decimals Worksheet".to_string(), AssignmentStatus::Exempt),
            ("Practice Log".to_string(), AssignmentStatus::Missing),
        ]
    );
}

#[test]
fn bad_cells_become_none_not_dropped_rows() {
    let recs = parse_assignments(PAGE);
    let log = recs.iter().find(|r| r.name == "Practice Log").expect("row kept");
    assert_eq!(log.due_date, None);
    assert_eq!((log.score_earned, log.score_possible), (None, Some(10.0)));

    let ws = recs.iter().find(|r| r.name == "Decimals Worksheet").expect("row kept");
    assert_eq!(ws.due_date, ymd(2025, 10, 31));
    assert_eq!((ws.score_earned, ws.score_possible, ws.percent), (None, None, None));

    let lab = recs.iter().find(|r| r.name == "Lab Report 2").expect("row kept");
    assert_eq!((lab.score_earned, lab.score_possible), (Some(17.0), Some(20.0)));
    assert_eq!(lab.percent, Some(85.0));
    assert_eq!(lab.letter_grade.as_deref(), Some("B"));
}

#[test]
fn short_row_is_the_only_loss() {
    // six body rows, one of them truncated
    assert_eq!(parse_assignments(PAGE).len(), 5);
}

#[test]
fn well_formed_rows_survive_one_malformed_row() {
    let good = |n: usize| {
        format!(
            "<tr><td>T</td><td>C</td><td>S1</td><td>01/0{n}/2025</td><td>HW</td>\
             <td>Task {n}</td><td>1/1</td><td>100%</td><td>A</td><td></td></tr>"
        )
    };
    for bad in ["<tr><td>only</td><td>three</td><td>cells</td></tr>", "<tr><td colspan=\"10\">No Assignments Found.</td></tr>", "<tr></tr>"] {
        let body: String = (1..=4).map(good).collect::<String>() + bad + &good(5);
        let html = format!("<table id=\"results\">{body}</table>");
        assert_eq!(parse_assignments(&html).len(), 5, "{bad}");
    }
}
