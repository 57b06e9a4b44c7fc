// tests/attendance.rs
use chrono::{NaiveDate, Weekday};
use portal_scrape::{
    detect_attendance_patterns, parse_attendance_dashboard, parse_daily_attendance, AttendanceSummaryRecord,
    DailyStatus,
};

const DASHBOARD: &str = include_str!("fixtures/attendance_dashboard.html");
const DAILY: &str = include_str!("fixtures/daily_attendance.html");

#[test]
fn stat_cards_stand_in_for_the_summary_table() {
    let s = parse_attendance_dashboard(DASHBOARD);
    assert_eq!(
        s,
        AttendanceSummaryRecord {
            rate: Some(88.6),
            days_present: Some(70),
            days_absent: Some(9),
            tardies_total: Some(2),
            ..Default::default()
        }
    );
}

#[test]
fn summary_table_wins_over_cards() {
    let html = format!(
        r#"<table id="attendanceSummary"><tr><td>Days Present</td><td>68</td></tr></table>{DASHBOARD}"#
    );
    let s = parse_attendance_dashboard(&html);
    assert_eq!(s.days_present, Some(68));
    assert_eq!(s.days_absent, Some(9));
}

#[test]
fn daily_grid_in_document_order() {
    let days = parse_daily_attendance(DAILY);
    assert_eq!(days.len(), 10);
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 12, 9).unwrap());
    assert_eq!(days[0].status, DailyStatus::Absent);
    assert_eq!(days[3].status, DailyStatus::Tardy);
    assert_eq!(days[6].status, DailyStatus::Excused);
    assert_eq!(days[9].date, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap());
    assert_eq!(days[9].status, DailyStatus::Present);
}

#[test]
fn weekday_patterns() {
    let p = detect_attendance_patterns(&parse_daily_attendance(DAILY));
    assert_eq!((p.total_present, p.total_absent, p.total_tardy, p.total_excused), (5, 3, 1, 1));
    assert_eq!(p.longest_absence_streak, 2);
    assert_eq!(p.attendance_rate, 66.7);

    let mon = p.day(Weekday::Mon);
    assert_eq!((mon.absence_count, mon.total_records), (2, 2));

    let worst = p.concerning_days(0.5);
    assert_eq!(worst, vec![(Weekday::Mon, 1.0), (Weekday::Tue, 0.5)]);
}
