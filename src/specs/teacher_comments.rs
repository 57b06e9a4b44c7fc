// src/specs/teacher_comments.rs
//! Spec for the *Teacher Comments* page.
//!
//! Layout (fixed, at least 5 `<td>` per row):
//! `Exp. | Course # | Course | Teacher | Comment`
//!
//! The teacher cell holds a `mailto:` anchor reading "Email Last, First"; both
//! the address and the name come from it. Older skins only carry an info link
//! titled "Details about Last, First", which is used for the name when there
//! is no mailto anchor. Comments sit in a `<pre>` and keep their line breaks.
use scraper::{ElementRef, Html};

use crate::config::consts;
use crate::core::html::{parse_doc, raw_text_of, text_of};
use crate::core::sanitize::{clean_multiline, strip_prefix_ci};
use crate::core::table::{data_cells, locate_table, rows, TableMatch};
use crate::records::TeacherCommentRecord;
use super::{collect_rows, require_columns, require_name, RowSkip};

const STRATEGIES: &[TableMatch] = &[
    TableMatch::Css(consts::COMMENTS_TABLE_SELECTORS[0]),
    TableMatch::Css(consts::COMMENTS_TABLE_SELECTORS[1]),
    TableMatch::Headers(&[&["teacher"], &["comment"]]),
];

pub fn parse(html: &str, comments_only: bool) -> Vec<TeacherCommentRecord> {
    let doc = parse_doc(html);
    from_doc(&doc, comments_only)
}

pub fn from_doc(doc: &Html, comments_only: bool) -> Vec<TeacherCommentRecord> {
    let Some(table) = locate_table(doc, STRATEGIES) else {
        logd!("Comments: no comments table on page");
        return Vec::new();
    };
    // header row has no <td>, the column guard drops it
    let recs = collect_rows("Comments", rows(table), parse_row);
    if !comments_only {
        return recs;
    }
    let before = recs.len();
    let kept: Vec<_> = recs.into_iter().filter(|r| !r.comment.trim().is_empty()).collect();
    logd!("Comments: comments_only kept {} of {}", kept.len(), before);
    kept
}

fn parse_row(row: ElementRef<'_>) -> Result<TeacherCommentRecord, RowSkip> {
    let cells = data_cells(row);
    require_columns(cells.len(), consts::COMMENTS_MIN_COLUMNS)?;

    let course_name = text_of(cells[2]);
    require_name(&course_name)?;

    let (teacher_name, teacher_email) = teacher_from_cell(cells[3]);

    Ok(TeacherCommentRecord {
        expression: text_of(cells[0]),
        course_number: text_of(cells[1]),
        course_name,
        teacher_name,
        teacher_email,
        comment: comment_text(cells[4]),
    })
}

fn comment_text(cell: ElementRef<'_>) -> String {
    match cell.select(sel!("pre")).next() {
        Some(pre) => clean_multiline(&raw_text_of(pre)),
        None => text_of(cell),
    }
}

/// The `mailto:` anchor inside `el`, if any.
pub(crate) fn mailto_anchor<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.select(sel!("a[href]")).find(|a| {
        a.value()
            .attr("href")
            .is_some_and(|h| strip_prefix_ci(h.trim(), "mailto:").is_some())
    })
}

/// `(name, email)` from a teacher cell; either may be empty.
pub(crate) fn teacher_from_cell(cell: ElementRef<'_>) -> (String, String) {
    let mut name = s!();
    let mut email = s!();

    if let Some(a) = mailto_anchor(cell) {
        if let Some(addr) = a.value().attr("href").and_then(|h| strip_prefix_ci(h.trim(), "mailto:")) {
            // drop "?subject=..." style suffixes
            email = addr.split('?').next().unwrap_or("").trim().to_string();
        }
        let label = text_of(a);
        if let Some(rest) = strip_prefix_ci(&label, consts::EMAIL_PREFIX) {
            name = rest.trim().to_string();
        }
    }

    if name.is_empty() {
        let titled = cell
            .select(sel!("a[title]"))
            .filter_map(|a| a.value().attr("title"))
            .find_map(|t| t.find(consts::DETAILS_PREFIX).map(|i| &t[i + consts::DETAILS_PREFIX.len()..]));
        if let Some(rest) = titled {
            name = rest.trim().to_string();
        }
    }

    (name, email)
}

/// Student name from the page heading ("Teacher Comments: Last, First").
pub fn student_name(html: &str) -> Option<String> {
    let doc = parse_doc(html);
    let h1 = doc.select(sel!("h1")).next()?;
    let text = text_of(h1);
    let at = text.find(consts::COMMENTS_HEADING_PREFIX)?;
    let name = text[at + consts::COMMENTS_HEADING_PREFIX.len()..].trim();
    if name.is_empty() { None } else { Some(name.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <h1>Teacher Comments: Doe, Jane Q</h1>
        <table class="grid linkDescList">
          <tr><th>Exp.</th><th>Course #</th><th>Course</th><th>Teacher</th><th>Comment</th></tr>
          <tr>
            <td>1/6(A-B)</td><td>54436<!-- 3501 161117 --></td><td>Science 6</td>
            <td><a class="button mini dialogM" title="Details about Smith, John" href="#">i</a>
                <a href="mailto:x@y.com">Email Smith, John</a></td>
            <td><pre>  Great effort this term.
                 Keep it up!  </pre></td>
          </tr>
          <tr>
            <td>2(A-B)</td><td>1200</td><td>Math 6</td>
            <td><a title="Details about Lee, Ann" href="#">i</a></td>
            <td><pre></pre></td>
          </tr>
          <tr><td>3</td><td>99</td><td>X</td><td></td><td>too short</td></tr>
        </table>"##;

    #[test]
    fn mailto_gives_name_and_email() {
        let recs = parse(PAGE, false);
        assert_eq!(recs.len(), 2);
        let r = &recs[0];
        assert_eq!(r.teacher_name, "Smith, John");
        assert_eq!(r.teacher_email, "x@y.com");
        assert_eq!(r.course_number, "54436");
        assert_eq!(r.expression, "1/6(A-B)");
        assert_eq!(r.comment, "Great effort this term.\nKeep it up!");
    }

    #[test]
    fn details_title_is_the_fallback() {
        let recs = parse(PAGE, false);
        assert_eq!(recs[1].teacher_name, "Lee, Ann");
        assert_eq!(recs[1].teacher_email, "");
        assert_eq!(recs[1].comment, "");
    }

    #[test]
    fn comments_only_drops_empty_comments() {
        let recs = parse(PAGE, true);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].course_name, "Science 6");
    }

    #[test]
    fn student_name_from_heading() {
        assert_eq!(student_name(PAGE).as_deref(), Some("Doe, Jane Q"));
        assert_eq!(student_name("<h1>Teacher Comments</h1>"), None);
        assert_eq!(student_name(""), None);
    }

    #[test]
    fn plain_table_found_by_headers() {
        let html = r#"
            <table class="layout"><tr><td>Welcome</td></tr></table>
            <table class="plain">
              <tr><th>Exp.</th><th>Course #</th><th>Course</th><th>Teacher</th><th>Comment</th></tr>
              <tr><td>4(A)</td><td>7001</td><td>Art 6</td>
                  <td><a href="mailto:ann@school.org">Email Lee, Ann</a></td>
                  <td><pre>Lovely colours.</pre></td></tr>
            </table>"#;
        let recs = parse(html, false);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].course_name, "Art 6");
        assert_eq!(recs[0].teacher_email, "ann@school.org");
        assert_eq!(recs[0].comment, "Lovely colours.");
    }

    #[test]
    fn no_table() {
        assert!(parse("<div>nothing</div>", false).is_empty());
    }
}
