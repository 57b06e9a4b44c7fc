// src/cli.rs
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::{env, mem};

use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::config::consts::{CONCERNING_ABSENCE_SHARE, DEFAULT_LOG_FILE};
use crate::config::options::{ExportFormat, PageKind, Params};
use crate::log::{self, Level};
use crate::{csv, store};

pub fn run() -> Result<()> {
    let mut params = Params::new();
    parse_cli(&mut params, env::args().skip(1))?;
    install_logging(&params);
    run_with(&params)
}

pub fn run_with(params: &Params) -> Result<()> {
    let html = read_input(params.input.as_deref())?;
    logf!("Read {} bytes as {} page", html.len(), params.page.slug());

    let output = render(params, &html)?;
    match params.out_path() {
        Some(path) => {
            fs::write(&path, output).wrap_err_with(|| format!("writing {}", path.display()))?;
            logf!("Wrote {}", path.display());
        }
        None => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

/// Parse `html` per `params` and produce the text to emit.
pub fn render(params: &Params, html: &str) -> Result<String> {
    if params.patterns {
        if params.page != PageKind::DailyAttendance {
            bail!("--patterns only applies to --page daily-attendance");
        }
        let days = crate::parse_daily_attendance(html);
        let patterns = crate::detect_attendance_patterns(&days);
        let report = serde_json::json!({
            "concerning_days": patterns.concerning_days(CONCERNING_ABSENCE_SHARE),
            "patterns": patterns,
        });
        return Ok(serde_json::to_string_pretty(&report)? + "\n");
    }

    let data = crate::parse_page(params.page, html, params.parse);
    if data.is_empty() {
        logw!("No {} records found", params.page.slug());
    }

    let Some(sep) = params.format.delim() else {
        return Ok(serde_json::to_string_pretty(&data)? + "\n");
    };

    let sets = store::datasets(&data);
    let titled = sets.len() > 1;
    let mut out = String::new();
    for (i, (title, set)) in sets.iter().enumerate() {
        if titled {
            if i > 0 { out.push('\n'); }
            out.push_str(&join!("# ", title, "\n"));
        }
        out.push_str(&csv::to_export_string(set, params.include_headers, sep));
    }
    Ok(out)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        None => bail!("Missing input file (see --help)"),
        Some(p) if p.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).wrap_err("reading stdin")?;
            Ok(buf)
        }
        Some(p) => {
            // Saved pages are not always UTF-8; read lossy rather than refuse.
            let bytes = fs::read(p).wrap_err_with(|| format!("reading {}", p.display()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn install_logging(params: &Params) {
    if !params.verbose {
        log::set_level(Level::Info);
    }
    match (params.log_file.clone(), params.verbose) {
        (Some(path), true) => {
            log::install_sink(move |line| {
                eprint!("{line}");
                if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
                    let _ = f.write_all(line.as_bytes());
                }
            });
        }
        (Some(path), false) => {
            log::log_to_file(path);
        }
        (None, true) => {
            log::log_to_stderr();
        }
        (None, false) => {}
    }
}

pub fn parse_cli<I>(params: &mut Params, args: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--page" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --page"))?;
                params.page = PageKind::from_slug(&v).ok_or_else(|| eyre!("Unknown page: {}", v))?;
            }
            "--format" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --format"))?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    "json" => ExportFormat::Json,
                    other => bail!("Unknown format: {}", other),
                };
            }
            "-o" | "--out" => {
                params.out = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing output path"))?));
            }
            "--include-headers" => params.include_headers = true,
            "--comments-only" => params.parse.comments_only = true,
            "--patterns" => params.patterns = true,
            "--log" => params.log_file = Some(PathBuf::from(DEFAULT_LOG_FILE)),
            "--log-file" => {
                params.log_file = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing log path"))?));
            }
            "-v" | "--verbose" => params.verbose = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ if a.starts_with('-') && a != "-" => bail!("Unknown arg: {}", a),
            _ => {
                if let Some(prev) = mem::replace(&mut params.input, Some(PathBuf::from(&a))) {
                    bail!("More than one input file: {} and {}", prev.display(), a);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Params> {
        let mut p = Params::new();
        parse_cli(&mut p, args.iter().map(|a| s!(*a)))?;
        Ok(p)
    }

    #[test]
    fn flags_land_in_params() {
        let p = parse(&["--page", "comments", "--format", "TSV", "--comments-only", "page.html", "-o", "out.tsv"]).unwrap();
        assert_eq!(p.page, PageKind::TeacherComments);
        assert_eq!(p.format, ExportFormat::Tsv);
        assert!(p.parse.comments_only);
        assert_eq!(p.input, Some(PathBuf::from("page.html")));
        assert_eq!(p.out, Some(PathBuf::from("out.tsv")));
        assert_eq!(parse(&["--log"]).unwrap().log_file, Some(PathBuf::from(DEFAULT_LOG_FILE)));
    }

    #[test]
    fn bad_args_are_errors() {
        assert!(parse(&["--page", "players"]).is_err());
        assert!(parse(&["--page"]).is_err());
        assert!(parse(&["--format", "xml"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["a.html", "b.html"]).is_err());
        assert_eq!(parse(&["-"]).unwrap().input, Some(PathBuf::from("-")));
    }

    #[test]
    fn render_csv_and_json() {
        let html = r#"<table id="results"><tr><td>1(A)</td><td>S1</td><td>2100-3</td><td>Science 6</td>
            <td>Smith, John</td><td>204</td></tr></table>"#;
        let mut p = parse(&["--page", "schedule", "--include-headers"]).unwrap();
        let out = render(&p, html).unwrap();
        assert_eq!(out, "Exp,Term,Section,Course,Teacher,Room\n1(A),S1,2100-3,Science 6,\"Smith, John\",204\n");

        p.format = ExportFormat::Json;
        let json: serde_json::Value = serde_json::from_str(&render(&p, html).unwrap()).unwrap();
        assert_eq!(json[0]["room"], "204");
    }

    #[test]
    fn patterns_need_daily_page() {
        let p = parse(&["--page", "grades", "--patterns"]).unwrap();
        assert!(render(&p, "").is_err());
        let p = parse(&["--page", "daily-attendance", "--patterns"]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render(&p, "").unwrap()).unwrap();
        assert_eq!(json["patterns"]["attendance_rate"], 100.0);
        assert_eq!(json["concerning_days"], serde_json::json!([]));
    }
}
