// src/extract/locate.rs
//
// Find the table(s) that hold effort rows. The page markup varies by
// ZenTao version and skin, so selection is a ranked chain of class
// predicates, broadening down to "every table on the page". The first
// strategy that yields anything wins; an empty page is a valid result.

use log::debug;

use crate::core::html::{open_tag, tag_attr, tag_block};

/// One candidate table. `target` means a class strategy matched it (or
/// its class mentions effort at all) — the row extractor only uses its
/// cell-scanning fallback on target tables.
#[derive(Debug, Clone)]
pub struct TableHandle {
    pub index: usize,
    pub class: String,
    pub html: String,
    pub target: bool,
}

fn class_main_effort(c: &str) -> bool {
    c.contains("main-table") && c.contains("table-effort")
}
fn class_table_effort(c: &str) -> bool {
    c.contains("table-effort")
}
fn class_any_effort(c: &str) -> bool {
    c.contains("effort")
}

/// Ranked selection strategies, most specific first.
const STRATEGIES: &[(&str, fn(&str) -> bool)] = &[
    ("main-table.table-effort", class_main_effort),
    ("table-effort", class_table_effort),
    ("effort", class_any_effort),
];

struct RawTable {
    index: usize,
    start: usize,
    class: String,
    html: String,
}

pub fn locate(doc: &str) -> Vec<TableHandle> {
    let mut tables = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = tag_block(doc, "table", pos) {
        let block = &doc[s..e];
        let class = tag_attr(open_tag(block), "class").unwrap_or_default();
        tables.push(RawTable {
            index: tables.len(),
            start: s,
            class,
            html: block.to_string(),
        });
        pos = e;
    }

    // Forms carrying the effort classes wrap the real table in some
    // skins; a table inside a matching form counts for the strategy.
    let mut forms = Vec::new();
    pos = 0;
    while let Some((s, e)) = tag_block(doc, "form", pos) {
        let class = tag_attr(open_tag(&doc[s..e]), "class").unwrap_or_default();
        forms.push((s, e, class));
        pos = e;
    }

    for (name, pred) in STRATEGIES {
        let hits: Vec<&RawTable> = tables
            .iter()
            .filter(|t| {
                pred(&t.class)
                    || forms
                        .iter()
                        .any(|(fs, fe, fc)| pred(fc) && t.start > *fs && t.start < *fe)
            })
            .collect();
        if !hits.is_empty() {
            debug!("locate: strategy '{}' matched {} table(s)", name, hits.len());
            return hits
                .into_iter()
                .map(|t| TableHandle {
                    index: t.index,
                    class: t.class.clone(),
                    html: t.html.clone(),
                    target: true,
                })
                .collect();
        }
    }

    debug!(
        "locate: no class strategy matched, falling back to all {} table(s)",
        tables.len()
    );
    tables
        .into_iter()
        .map(|t| TableHandle {
            target: class_any_effort(&t.class),
            index: t.index,
            class: t.class,
            html: t.html,
        })
        .collect()
}
