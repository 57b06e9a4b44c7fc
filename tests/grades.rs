// tests/grades.rs
use portal_scrape::{parse_grade_history, parse_grades, GradeCell, Term};

const PAGE: &str = include_str!("fixtures/grades.html");

fn cell(letter: &str, percent: Option<f64>, gpa: Option<f64>) -> Option<GradeCell> {
    Some(GradeCell { letter_grade: Some(letter.to_string()), percent, gpa_points: gpa })
}

#[test]
fn terms_follow_header_order() {
    let page = parse_grades(PAGE);
    assert_eq!(page.terms, vec![Term::Q1, Term::S1]);
    assert_eq!(page.courses.len(), 3);
}

#[test]
fn numeric_marks_are_grades_not_percents() {
    let page = parse_grades(PAGE);
    let sci = &page.courses[0];
    assert_eq!(sci.course_name, "Science 6");
    assert_eq!(sci.grades[&Term::Q1], cell("2", None, Some(2.0)));
    assert_eq!(sci.grades[&Term::S1], cell("2", None, Some(2.0)));
}

#[test]
fn course_cell_pieces() {
    let page = parse_grades(PAGE);
    let sci = &page.courses[0];
    assert_eq!(sci.teacher_name, "Smith, John");
    assert_eq!(sci.room, "204");
    assert_eq!((sci.absences, sci.tardies), (Some(3), Some(1)));

    let math = &page.courses[1];
    assert_eq!(math.course_name, "Math 6");
    assert_eq!(math.teacher_name, "Lee, Ann");
    assert_eq!(math.room, "B12");
    assert_eq!((math.absences, math.tardies), (Some(0), Some(1)));
}

#[test]
fn letter_and_percent_share_a_cell() {
    let page = parse_grades(PAGE);
    let math = &page.courses[1];
    assert_eq!(math.grades[&Term::Q1], cell("B+", Some(88.0), Some(3.3)));
    assert_eq!(math.grades[&Term::S1], None);

    let band = &page.courses[2];
    assert_eq!(band.room, "Music");
    assert_eq!(band.grades[&Term::Q1], cell("A", Some(95.0), Some(4.0)));
    assert_eq!(band.grades[&Term::S1], None);
    assert_eq!((band.absences, band.tardies), (None, None));
}

#[test]
fn history_table() {
    let html = r#"<table class="history-grid">
        <tr><th>Term</th><th>Course</th><th>Grade</th><th>%</th></tr>
        <tr><td>S1</td><td>Science 5</td><td>A-</td><td>91</td></tr>
        <tr><td>S1</td><td>Art 5</td><td>P</td><td></td></tr>
        <tr><td>S2</td><td>X</td><td>B</td><td>80</td></tr>
      </table>"#;
    let hist = parse_grade_history(html);
    assert_eq!(hist.len(), 2);
    assert_eq!(hist[0].course_name, "Science 5");
    assert_eq!(hist[0].percent, Some(91.0));
    assert_eq!(hist[1].letter_grade, "P");
    assert_eq!(hist[1].percent, None);
}
