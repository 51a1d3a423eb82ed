// src/core/html.rs
//
// Scanning helpers for timesheet page snapshots. The markup is not under
// our control, so everything here is best-effort and tolerant: no panics
// on malformed input, unmatched tags simply end the scan.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Find the next `<tag` opener at or after `from`, case-insensitive.
/// Requires a boundary after the tag name so `<th` never matches `<thead`.
pub fn find_tag_open(s: &str, tag: &str, from: usize) -> Option<usize> {
    let lc = to_lower(s);
    let pat = to_lower(&format!("<{}", tag));
    let mut pos = from;
    loop {
        let hit = lc.get(pos..)?.find(&pat)? + pos;
        let after = hit + pat.len();
        match lc.as_bytes().get(after) {
            None | Some(b'>') | Some(b'/') => return Some(hit),
            Some(b) if b.is_ascii_whitespace() => return Some(hit),
            _ => pos = after,
        }
    }
}

/// `(start, end)` byte range of `<tag ...> ... </tag>` starting at or
/// after `from`. Naive close search; nested same-name tags are not
/// balanced, which is acceptable for the flat rows we walk.
pub fn tag_block(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_tag_open(s, tag, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let close = to_lower(&format!("</{}>", tag));
    let end_rel = to_lower(&s[open_end..]).find(&close)?;
    Some((start, open_end + end_rel + close.len()))
}

/// The opener slice of a block, through its first `>` (or the whole
/// block when unterminated).
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

/// Attribute value out of an opener slice. Handles double-quoted,
/// single-quoted and bare values; attribute names match case-insensitively.
pub fn tag_attr(opener: &str, name: &str) -> Option<String> {
    let lc = to_lower(opener);
    let needle = format!("{}=", to_lower(name));
    let mut pos = 0usize;
    while let Some(rel) = lc.get(pos..)?.find(&needle) {
        let at = pos + rel;
        let vstart = at + needle.len();
        // Boundary before the name, or we'd read data-id out of "xdata-id".
        if at > 0 && !lc.as_bytes()[at - 1].is_ascii_whitespace() {
            pos = vstart;
            continue;
        }
        let rest = &opener[vstart..];
        let mut chars = rest.chars();
        let val = match chars.next() {
            Some(q @ ('"' | '\'')) => {
                let body = &rest[1..];
                match body.find(q) {
                    Some(e) => &body[..e],
                    None => body,
                }
            }
            _ => rest
                .split(|c: char| c.is_ascii_whitespace() || c == '>')
                .next()
                .unwrap_or(""),
        };
        return Some(val.to_string());
    }
    None
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a block: inner markup stripped, entities resolved,
/// whitespace collapsed.
pub fn block_text(block: &str) -> String {
    strip_tags(normalize_entities(&inner_after_open_tag(block)))
}

/// Next `<td>` or `<th>` block inside a row, whichever comes first.
/// Returns `(start, end, is_th)`.
pub fn next_cell(s: &str, from: usize) -> Option<(usize, usize, bool)> {
    let td = tag_block(s, "td", from);
    let th = tag_block(s, "th", from);
    match (td, th) {
        (Some(d), Some(h)) => {
            if d.0 <= h.0 {
                Some((d.0, d.1, false))
            } else {
                Some((h.0, h.1, true))
            }
        }
        (Some(d), None) => Some((d.0, d.1, false)),
        (None, Some(h)) => Some((h.0, h.1, true)),
        (None, None) => None,
    }
}
