// src/core/sanitize.rs

/// Collapse whitespace runs into a single space and trim.
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

/// Final pass for every record value: `normalize_ws`, then the
/// empty-value marker when nothing is left.
///
/// Idempotent as long as `empty` is itself normalized
/// (`ExtractOptions` refuses markers that are not).
pub fn normalize(s: &str, empty: &str) -> String {
    let out = normalize_ws(s);
    if out.is_empty() { s!(empty) } else { out }
}

/// `": Stage 2 "` → `"Stage 2"`. Labels on the site are followed by a colon
/// that sits outside the bold tag, so it ends up on the value.
pub fn strip_label_punct(s: &str) -> String {
    normalize_ws(s.trim_matches(|c: char| c == ':' || c.is_whitespace()))
}

/// Keep everything before the *second* `(`.
/// `"Space-Time Smackdown (A2) Dialga (Pack)"` → `"Space-Time Smackdown (A2) Dialga"`.
/// Strings with fewer than two `(` come back untouched.
pub fn trim_after_second_parens(s: &str) -> String {
    match s.match_indices('(').nth(1) {
        Some((ix, _)) => s[..ix].trim().to_string(),
        None => s.to_string(),
    }
}

/// `"1,000 Pts "` → `"1000"`.
pub fn pack_points(s: &str) -> String {
    let t = s.replace(',', "");
    let t = t.trim();
    let t = t.strip_suffix("Pts").unwrap_or(t);
    t.trim().to_string()
}
