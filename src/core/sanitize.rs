// src/core/sanitize.rs

/// Collapse every whitespace run (incl. NBSP) to a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Cell text as the rest of the crate wants it: trimmed, collapsed, never
/// absent. `None` reads as the empty string.
pub fn clean_text(s: Option<&str>) -> String {
    match s {
        Some(s) => normalize_ws(s),
        None => s!(),
    }
}

/// Keep line structure (for `<pre>` blocks) but trim each line and drop
/// blank ones.
pub fn clean_multiline(s: &str) -> String {
    s.lines()
        .map(normalize_ws)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// ASCII case-insensitive `strip_prefix`.
pub fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) { Some(&s[prefix.len()..]) } else { None }
}
