// src/reconcile.rs
//
// Cross-check the computed total against the total the page itself
// displays in a footer/summary element, when one can be found. A missing
// footer is "unverifiable", not a failure: page_total and matches stay
// absent.

use log::debug;
use serde::Serialize;

use crate::config::consts::FOOTER_CLASS_MARKERS;
use crate::core::html::{block_text, open_tag, tag_attr, tag_block};
use crate::data::EffortSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    pub computed_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
}

/// Compare `set.total()` with the first page total discoverable under
/// the ranked footer class markers, within absolute `tolerance`.
pub fn reconcile(set: &EffortSet, doc: &str, tolerance: f64) -> Reconciliation {
    let computed_total = set.total();
    let page_total = find_page_total(doc);
    let matches = page_total.map(|p| (computed_total - p).abs() < tolerance);
    if let (Some(p), Some(m)) = (page_total, matches) {
        debug!(
            "reconcile: page {} vs computed {} -> {}",
            p,
            computed_total,
            if m { "match" } else { "MISMATCH" }
        );
    }
    Reconciliation {
        computed_total,
        page_total,
        matches,
    }
}

const FOOTER_TAGS: &[&str] = &["div", "span", "td", "p"];

fn find_page_total(doc: &str) -> Option<f64> {
    for marker in FOOTER_CLASS_MARKERS {
        for tag in FOOTER_TAGS {
            let mut pos = 0usize;
            while let Some((s, e)) = tag_block(doc, tag, pos) {
                let block = &doc[s..e];
                pos = e;
                let class = tag_attr(open_tag(block), "class").unwrap_or_default();
                if !class.contains(marker) {
                    continue;
                }
                let text = block_text(block);
                if let Some(v) = total_consumed_pattern(&text) {
                    return Some(v);
                }
                // The bare summary line ("8.5 天 ...") in the table
                // footer leads with the number itself.
                if *marker == "table-footer" {
                    if let Some(v) = first_number(&text) {
                        return Some(v);
                    }
                }
            }
        }
    }
    None
}

/// `总消耗 N 小时` with optional whitespace around the number.
fn total_consumed_pattern(text: &str) -> Option<f64> {
    let chars: Vec<char> = text.chars().collect();
    let marker: Vec<char> = "总消耗".chars().collect();
    let hours: Vec<char> = "小时".chars().collect();

    let mut i = 0usize;
    while i + marker.len() <= chars.len() {
        if chars[i..i + marker.len()] != marker[..] {
            i += 1;
            continue;
        }
        let mut j = i + marker.len();
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        let (num, end) = read_number(&chars, j)?;
        if end > j {
            let mut k = end;
            while k < chars.len() && chars[k].is_whitespace() {
                k += 1;
            }
            if chars.len() >= k + hours.len() && chars[k..k + hours.len()] == hours[..] {
                return Some(num);
            }
        }
        i += marker.len();
    }
    None
}

fn first_number(text: &str) -> Option<f64> {
    let chars: Vec<char> = text.chars().collect();
    for i in 0..chars.len() {
        if chars[i].is_ascii_digit() {
            let (num, _) = read_number(&chars, i)?;
            return Some(num);
        }
    }
    None
}

/// Decimal at `from`; returns (value, end index). End == from when no
/// digits are present.
fn read_number(chars: &[char], from: usize) -> Option<(f64, usize)> {
    let mut j = from;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if j == from {
        return Some((0.0, from));
    }
    if j + 1 < chars.len() && chars[j] == '.' && chars[j + 1].is_ascii_digit() {
        j += 1;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
    }
    let num: f64 = chars[from..j].iter().collect::<String>().parse().ok()?;
    Some((num, j))
}
