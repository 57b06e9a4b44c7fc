// src/csv.rs
use std::io::{self, Write};

use crate::store::DataSet;

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Write a whole data set, header line optional.
pub fn write_dataset<W: Write>(mut w: W, data: &DataSet, include_headers: bool, sep: char) -> io::Result<()> {
    if include_headers {
        write_row(&mut w, &data.headers, sep)?;
    }
    for r in &data.rows {
        write_row(&mut w, r, sep)?;
    }
    Ok(())
}

/// Same as [`write_dataset`] into a `String`.
pub fn to_export_string(data: &DataSet, include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_dataset(&mut buf, data, include_headers, sep);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds() -> DataSet {
        DataSet {
            headers: vec![s!("Course"), s!("Comment")],
            rows: vec![
                vec![s!("Math"), s!("Good, steady")],
                vec![s!("Art"), s!("Said \"wow\"\nthen left")],
            ],
        }
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let out = to_export_string(&ds(), true, ',');
        assert_eq!(
            out,
            "Course,Comment\nMath,\"Good, steady\"\nArt,\"Said \"\"wow\"\"\nthen left\"\n"
        );
    }

    #[test]
    fn tsv_without_headers() {
        let out = to_export_string(&ds(), false, '\t');
        assert!(out.starts_with("Math\tGood, steady\n"));
        assert!(!out.contains("Course"));
    }
}
