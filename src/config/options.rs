// src/config/options.rs
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Assignments,
    Grades,
    GradeHistory,
    AttendanceDashboard,
    DailyAttendance,
    CourseScores,
    TeacherComments,
    Schedule,
}

impl PageKind {
    pub const ALL: [PageKind; 8] = [
        PageKind::Assignments,
        PageKind::Grades,
        PageKind::GradeHistory,
        PageKind::AttendanceDashboard,
        PageKind::DailyAttendance,
        PageKind::CourseScores,
        PageKind::TeacherComments,
        PageKind::Schedule,
    ];

    /// Name used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            PageKind::Assignments => "assignments",
            PageKind::Grades => "grades",
            PageKind::GradeHistory => "grade-history",
            PageKind::AttendanceDashboard => "attendance",
            PageKind::DailyAttendance => "daily-attendance",
            PageKind::CourseScores => "course-scores",
            PageKind::TeacherComments => "comments",
            PageKind::Schedule => "schedule",
        }
    }

    pub fn from_slug(s: &str) -> Option<PageKind> {
        let s = s.trim().to_ascii_lowercase();
        PageKind::ALL.into_iter().find(|k| k.slug() == s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator; `None` for non-tabular formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

/// Per-call switches for the facade. Only the comments page reads any today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub comments_only: bool,
}

#[derive(Clone, Debug)]
pub struct Params {
    pub page: PageKind,
    pub input: Option<PathBuf>,      // saved HTML page
    pub out: Option<PathBuf>,        // stdout when None
    pub format: ExportFormat,
    pub include_headers: bool,       // header row for csv/tsv
    pub parse: ParseOptions,
    pub patterns: bool,              // daily attendance: weekday summary instead of rows
    pub log_file: Option<PathBuf>,
    pub verbose: bool,               // debug lines to stderr
}

impl Params {
    pub fn new() -> Self {
        Self {
            page: PageKind::Assignments,
            input: None,
            out: None,
            format: ExportFormat::Csv,
            include_headers: false,
            parse: ParseOptions::default(),
            patterns: false,
            log_file: None,
            verbose: false,
        }
    }
}

impl Params {
    /// Where `-o` points. A directory gets `<page>.<ext>` inside it; the
    /// patterns report is always JSON.
    pub fn out_path(&self) -> Option<PathBuf> {
        let mut path = self.out.clone()?;
        if path.is_dir() {
            let ext = if self.patterns { ExportFormat::Json.ext() } else { self.format.ext() };
            path.push(join!(self.page.slug(), ".", ext));
        }
        Some(path)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_for_every_page() {
        for kind in PageKind::ALL {
            assert_eq!(PageKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(PageKind::from_slug(" Grades "), Some(PageKind::Grades));
        assert_eq!(PageKind::from_slug("players"), None);
    }

    #[test]
    fn json_has_no_delimiter() {
        assert_eq!(ExportFormat::Csv.delim(), Some(','));
        assert_eq!(ExportFormat::Tsv.delim(), Some('\t'));
        assert_eq!(ExportFormat::Json.delim(), None);
        assert_eq!(ExportFormat::Json.ext(), "json");
    }

    #[test]
    fn out_dir_gets_page_file_name() {
        let dir = std::env::temp_dir();
        let mut p = Params::new();
        assert_eq!(p.out_path(), None);

        p.out = Some(dir.clone());
        p.page = PageKind::Schedule;
        p.format = ExportFormat::Tsv;
        assert_eq!(p.out_path(), Some(dir.join("schedule.tsv")));

        p.page = PageKind::DailyAttendance;
        p.patterns = true;
        assert_eq!(p.out_path(), Some(dir.join("daily-attendance.json")));

        let file = dir.join("no-such-dir").join("out.csv");
        p.out = Some(file.clone());
        assert_eq!(p.out_path(), Some(file));
    }
}
