// src/core/table.rs
//
// Finding the right <table> on pages that move it around between installs,
// and mapping header names to column positions where the order varies.
use std::collections::HashMap;
use std::hash::Hash;

use scraper::{ElementRef, Html, Selector};

use super::html::{child_elements, class_contains_any, text_of};
use super::sanitize::normalize_ws;

/// One way of recognising a table. Strategies are tried in the order given;
/// the first one that yields a table wins.
#[derive(Clone, Copy, Debug)]
pub enum TableMatch {
    /// A CSS selector: a stable id, a class combination, or a container
    /// (a non-table match resolves to its first descendant table).
    Css(&'static str),
    /// Any table whose class tokens contain one of the hints.
    ClassContains(&'static [&'static str]),
    /// Any table whose header text satisfies every group; a group is
    /// satisfied when any one of its keywords appears.
    Headers(&'static [&'static [&'static str]]),
    /// Any table whose row labels (first cell of each row) satisfy every group.
    RowLabels(&'static [&'static [&'static str]]),
}

fn all_groups_match(text: &str, groups: &[&[&str]]) -> bool {
    !groups.is_empty() && groups.iter().all(|g| g.iter().any(|kw| text.contains(kw)))
}

/// Lowercased header text of a table: all `<th>`, or the first row's cells
/// when the page uses `<td>` for headings.
pub fn header_text_lc(table: ElementRef<'_>) -> String {
    let ths: Vec<String> = table.select(sel!("th")).map(text_of).collect();
    let text = if ths.is_empty() {
        rows(table)
            .next()
            .map(|r| cells(r).map(text_of).collect::<Vec<_>>())
            .unwrap_or_default()
            .join(" ")
    } else {
        ths.join(" ")
    };
    text.to_lowercase()
}

fn row_labels_lc(table: ElementRef<'_>) -> String {
    rows(table)
        .filter_map(|r| cells(r).next())
        .map(text_of)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn via_css<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let sel = match Selector::parse(css) {
        Ok(s) => s,
        Err(e) => {
            loge!("Table: bad selector '{}': {:?}", css, e);
            return None;
        }
    };
    let hit = doc.select(&sel).next()?;
    if is_table(hit) {
        Some(hit)
    } else {
        hit.select(sel!("table")).next()
    }
}

fn try_match<'a>(doc: &'a Html, m: &TableMatch) -> Option<ElementRef<'a>> {
    match m {
        TableMatch::Css(css) => via_css(doc, css),
        TableMatch::ClassContains(hints) => doc
            .select(sel!("table"))
            .find(|t| class_contains_any(*t, hints)),
        TableMatch::Headers(groups) => doc
            .select(sel!("table"))
            .find(|t| all_groups_match(&header_text_lc(*t), groups)),
        TableMatch::RowLabels(groups) => doc
            .select(sel!("table"))
            .find(|t| all_groups_match(&row_labels_lc(*t), groups)),
    }
}

/// Walk `strategies` in order; `None` when nothing matches (not an error).
pub fn locate_table<'a>(doc: &'a Html, strategies: &[TableMatch]) -> Option<ElementRef<'a>> {
    for (i, m) in strategies.iter().enumerate() {
        if let Some(t) = try_match(doc, m) {
            logd!("Table: matched by strategy #{} {:?}", i, m);
            return Some(t);
        }
    }
    logd!("Table: no strategy matched ({} tried)", strategies.len());
    None
}

/// `<tr>` rows of this table, nested tables excluded.
pub fn rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let own = table.id();
    let scoped = is_table(table);
    table
        .select(sel!("tr"))
        .filter(move |tr| !scoped || nearest_table(*tr).map(|t| t.id()) == Some(own))
}

fn is_table(el: ElementRef<'_>) -> bool {
    el.value().name() == "table"
}

fn nearest_table<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| is_table(*a))
}

/// `<td>`/`<th>` cells directly under a row.
pub fn cells<'a>(row: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    child_elements(row).filter(|c| matches!(c.value().name(), "td" | "th"))
}

/// Only `<td>` cells directly under a row.
pub fn data_cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    child_elements(row).filter(|c| c.value().name() == "td").collect()
}

/// True for rows made only of `<th>` cells.
pub fn is_header_row(row: ElementRef<'_>) -> bool {
    let mut any = false;
    for c in cells(row) {
        if c.value().name() != "th" {
            return false;
        }
        any = true;
    }
    any
}

/// Header name → column index, built once from a header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderMap<K: Eq + Hash> {
    cols: HashMap<K, usize>,
    order: Vec<K>,
}

impl<K: Eq + Hash + Copy> HeaderMap<K> {
    /// Classify each header cell; later cells win when two map to one key.
    /// Positions honour `colspan`, so a "Last Week" heading spanning five
    /// day columns still lines the following headers up with the data cells.
    pub fn from_row<F>(row: ElementRef<'_>, classify: F) -> Self
    where
        F: Fn(&str) -> Option<K>,
    {
        let mut map = HeaderMap { cols: HashMap::new(), order: Vec::new() };
        let mut pos = 0usize;
        for cell in cells(row) {
            let h = normalize_header(&text_of(cell));
            if let Some(k) = classify(&h) {
                map.insert(k, pos);
            }
            pos += colspan(cell);
        }
        map
    }

    fn insert(&mut self, key: K, pos: usize) {
        if self.cols.insert(key, pos).is_none() {
            self.order.push(key);
        }
    }

    pub fn get(&self, key: K) -> Option<usize> {
        self.cols.get(&key).copied()
    }

    pub fn contains(&self, key: K) -> bool {
        self.cols.contains_key(&key)
    }

    /// Keys in the order their columns were first seen.
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cols.len()
    }
}

/// `colspan` of a cell, 1 when absent or nonsense.
pub fn colspan(cell: ElementRef<'_>) -> usize {
    cell.value()
        .attr("colspan")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

/// Header cells compare upper-cased with whitespace collapsed.
pub fn normalize_header(s: &str) -> String {
    normalize_ws(s).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <table class="nav"><tr><td>menu</td></tr></table>
        <table class="grid wide">
          <tr><th>Course</th><th>Q1</th></tr>
          <tr><td>Math</td><td>A</td></tr>
        </table>
        <table id="summary">
          <tr><td>Days Enrolled</td><td>79</td></tr>
          <tr><td>Days Present</td><td>70</td></tr>
        </table>
    "#;

    #[test]
    fn strategies_in_order() {
        let doc = Html::parse_document(PAGE);
        let t = locate_table(&doc, &[TableMatch::Css("table#nope"), TableMatch::ClassContains(&["grid"])]).unwrap();
        assert!(crate::core::html::has_class(t, "wide"));

        let t = locate_table(&doc, &[TableMatch::Headers(&[&["course"], &["q1", "grade"]])]).unwrap();
        assert!(crate::core::html::has_class(t, "grid"));

        let t = locate_table(&doc, &[TableMatch::RowLabels(&[&["enrolled"], &["present"]])]).unwrap();
        assert_eq!(t.value().id(), Some("summary"));
    }

    #[test]
    fn nothing_matches_is_none() {
        let doc = Html::parse_document(PAGE);
        assert!(locate_table(&doc, &[TableMatch::Headers(&[&["teacher"]])]).is_none());
        assert!(locate_table(&doc, &[]).is_none());
        let empty = Html::parse_document("");
        assert!(locate_table(&empty, &[TableMatch::ClassContains(&["grid"])]).is_none());
    }

    #[test]
    fn container_selector_descends_to_table() {
        let doc = Html::parse_document(
            r#"<div class="box"><h3>x</h3><table id="inner"><tr><td>1</td></tr></table></div>"#,
        );
        let t = locate_table(&doc, &[TableMatch::Css(".box")]).unwrap();
        assert_eq!(t.value().id(), Some("inner"));
    }

    #[test]
    fn nested_table_rows_are_not_ours() {
        let doc = Html::parse_document(
            r#"<table id="outer"><tr><td><table><tr><td>in</td></tr></table></td></tr><tr><td>out</td></tr></table>"#,
        );
        let t = locate_table(&doc, &[TableMatch::Css("table#outer")]).unwrap();
        assert_eq!(rows(t).count(), 2);
    }

    #[test]
    fn header_map_later_column_wins() {
        let doc = Html::parse_document(r#"<table><tr><th>Exp.</th><th>Course</th><th>Teacher</th></tr></table>"#);
        let t = locate_table(&doc, &[TableMatch::Css("table")]).unwrap();
        let m = HeaderMap::from_row(rows(t).next().unwrap(), |h| {
            if h.contains("COURSE") { Some(1) } else if h.contains("TEACHER") || h.contains("EXP") { Some(2) } else { None }
        });
        assert_eq!(m.get(1), Some(1));
        assert_eq!(m.get(2), Some(2));
        assert_eq!(m.keys(), &[2, 1]);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn header_positions_follow_colspan() {
        let doc = Html::parse_document(
            r#"<table><tr><th>Exp.</th><th colspan="5">Last Week</th><th>Course</th><th colspan="x">Q1</th><th>Q2</th></tr></table>"#,
        );
        let t = locate_table(&doc, &[TableMatch::Css("table")]).unwrap();
        let row = rows(t).next().unwrap();
        let m = HeaderMap::from_row(row, |h| match h {
            "COURSE" => Some("course"),
            "Q1" => Some("q1"),
            "Q2" => Some("q2"),
            _ => None,
        });
        assert_eq!(m.get("course"), Some(6));
        assert_eq!(m.get("q1"), Some(7));
        assert_eq!(m.get("q2"), Some(8));
    }

    #[test]
    fn header_rows() {
        let doc = Html::parse_document("<table><tr><th>a</th><th>b</th></tr><tr><td>1</td><th>x</th></tr></table>");
        let t = locate_table(&doc, &[TableMatch::Css("table")]).unwrap();
        let rs: Vec<_> = rows(t).collect();
        assert!(is_header_row(rs[0]));
        assert!(!is_header_row(rs[1]));
        assert_eq!(data_cells(rs[1]).len(), 1);
        assert_eq!(cells(rs[1]).count(), 2);
    }
}
