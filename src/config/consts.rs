// src/config/consts.rs

// Shared row guards
pub const MIN_NAME_LEN: usize = 2;

// Assignments (classassignments.html)
pub const ASSIGNMENTS_TABLE_IDS: &[&str] = &["table#results", "table#assignments-table"];
pub const ASSIGNMENTS_TABLE_CLASS: &str = "table.linkDescList";
pub const ASSIGNMENTS_MIN_COLUMNS: usize = 10;
pub const NO_ASSIGNMENTS_SENTINEL: &str = "No Assignments Found.";

// Grades (home.html)
pub const GRADES_TABLE_ID: &str = "table#quickLookup";
pub const GRADES_CLASS_HINTS: &[&str] = &["grid", "grades"];
pub const GRADE_NULL_MARKERS: &[&str] = &["--", "-", "[ i ]", "[i]"];
pub const ROOM_MARKER: &str = "Rm:";

// Grade history
pub const HISTORY_CLASS_HINTS: &[&str] = &["history"];
pub const HISTORY_MIN_COLUMNS: usize = 4;

// Attendance dashboard
pub const ATTENDANCE_SUMMARY_TABLES: &[&str] = &[
    "table#attendanceSummary",
    "table.attendance-summary",
    ".attendance-summary table",
];
pub const STAT_CLASS_HINTS: &[&str] = &["stat", "metric"];
pub const STAT_LABEL_HINTS: &[&str] = &["label", "title", "name", "caption"];
pub const STAT_VALUE_HINTS: &[&str] = &["value", "number", "count", "amount"];

// Daily attendance grid
pub const DAILY_GRID_HINT: &str = "attendance";

// Course scores (scores.html)
pub const SCORE_TABLE_SELECTORS: &[&str] = &["table#scoreTable", ".assignments-detail table"];
pub const CATEGORY_WEIGHTS_SELECTORS: &[&str] = &[".category-weights table", ".category-weights"];

// Teacher comments (teachercomments.html)
pub const COMMENTS_TABLE_SELECTORS: &[&str] = &["table.grid", "table.linkDescList"];
pub const COMMENTS_MIN_COLUMNS: usize = 5;
pub const EMAIL_PREFIX: &str = "Email ";
pub const DETAILS_PREFIX: &str = "Details about";
pub const COMMENTS_HEADING_PREFIX: &str = "Teacher Comments:";

// Weekday absence share worth flagging
pub const CONCERNING_ABSENCE_SHARE: f64 = 0.3;

// Schedule (myschedule.html)
pub const SCHEDULE_TABLE_ID: &str = "table#results";
pub const SCHEDULE_CLASS_HINTS: &[&str] = &["schedule"];
pub const SCHEDULE_MIN_COLUMNS: usize = 6;

// CLI
pub const DEFAULT_LOG_FILE: &str = "portal_scrape.log";
