// tests/course_scores.rs
use chrono::NaiveDate;
use portal_scrape::parse_course_scores;

const PAGE: &str = include_str!("fixtures/course_scores.html");

#[test]
fn header_block() {
    let s = parse_course_scores(PAGE);
    assert_eq!(s.course_name, "Science 6");
    assert_eq!(s.teacher_name, "Smith, John");
}

#[test]
fn positional_categories() {
    let s = parse_course_scores(PAGE);
    assert_eq!(s.categories.len(), 2);
    assert_eq!(s.categories[0].name, "Formative");
    assert_eq!(s.categories[0].weight, Some(30.0));
    assert_eq!((s.categories[0].points_earned, s.categories[0].points_possible), (Some(45.0), Some(50.0)));
    assert_eq!(s.categories[1].points_earned, Some(88.5));
}

#[test]
fn header_mapped_assignments() {
    let s = parse_course_scores(PAGE);
    let names: Vec<_> = s.assignments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Lab Report 2", "Cell Diagram", "Vocabulary Check"]);

    let lab = &s.assignments[0];
    assert_eq!(lab.due_date, NaiveDate::from_ymd_opt(2024, 10, 28));
    assert_eq!(lab.category, "Summative");
    assert_eq!(lab.score, "17/20");
    assert_eq!(lab.percent, Some(85.0));
    assert_eq!(lab.letter_grade, "B");

    let missing = &s.assignments[1];
    assert_eq!(missing.codes, "Missing");
    assert_eq!((missing.points_earned, missing.points_possible), (None, Some(10.0)));
    assert_eq!(missing.percent, None);
}
