// src/extract/rows.rs
//
// Walk a located table's data rows and turn them into effort records.
// Three ways to find the duration cell, in order: the inferred schema
// column, a cell classed c-consumed (ZenTao's own column classes), and
// finally a scan of every cell — the scan only on tables flagged as
// likely targets, and only when the row has no record yet.
//
// Zero-valued durations are never recorded: a parsed 0 is
// indistinguishable from parser failure, so it means "no data" rather
// than "zero effort".

use log::debug;

use crate::core::html::{block_text, next_cell, open_tag, tag_attr, tag_block};
use crate::data::{EffortRecord, EffortSet};
use crate::duration;

use super::locate::TableHandle;
use super::schema::TableSchema;

struct Cell {
    class: String,
    title: Option<String>,
    text: String,
    is_th: bool,
}

/// Extract this table's rows into `set`. Records keyed by
/// `(table.index, row index)`; duplicates are refused by the set itself.
pub fn extract(table: &TableHandle, schema: &TableSchema, set: &mut EffortSet) {
    let html = table.html.as_str();
    let thead = tag_block(html, "thead", 0);

    let mut row_index = 0usize;
    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = tag_block(html, "tr", pos) {
        let tr = &html[tr_s..tr_e];
        let in_thead = matches!(thead, Some((hs, he)) if tr_s > hs && tr_s < he);
        let this_row = row_index;
        row_index += 1;
        pos = tr_e;

        if in_thead {
            continue;
        }
        let cells = row_cells(tr);
        if cells.is_empty() || cells.iter().all(|c| c.is_th) {
            continue; // header-role row
        }

        // Schema column, else the page's own c-consumed class.
        let duration_col = schema
            .duration_col
            .or_else(|| cells.iter().position(|c| c.class.contains("c-consumed")));

        if let Some(col) = duration_col {
            if let Some(cell) = cells.get(col) {
                let hours = duration::parse(&cell.text);
                if hours > 0.0 {
                    let rec = harvest(table.index, this_row, tr, &cells, hours, &cell.text);
                    debug!(
                        "rows: table {} row {} -> {} h ({:?})",
                        table.index, this_row, hours, rec.raw_text
                    );
                    set.push(rec);
                }
                continue;
            }
        }

        if !table.target {
            continue;
        }
        // Scanning fallback: first positive cell in the row, and only if
        // the row was not captured already.
        for cell in &cells {
            let hours = duration::parse(&cell.text);
            if hours > 0.0 {
                if !set.contains_key(table.index, this_row) {
                    let rec = harvest(table.index, this_row, tr, &cells, hours, &cell.text);
                    debug!(
                        "rows: table {} row {} scan hit -> {} h ({:?})",
                        table.index, this_row, hours, rec.raw_text
                    );
                    set.push(rec);
                }
                break;
            }
        }
    }
}

fn row_cells(tr: &str) -> Vec<Cell> {
    let mut cells = Vec::new();
    let body = match tr.find('>') {
        Some(i) => i + 1, // skip the <tr ...> opener so its attrs aren't cells
        None => return cells,
    };
    let mut pos = body;
    while let Some((s, e, is_th)) = next_cell(tr, pos) {
        let block = &tr[s..e];
        let opener = open_tag(block);
        cells.push(Cell {
            class: tag_attr(opener, "class").unwrap_or_default(),
            title: tag_attr(opener, "title").filter(|t| !t.trim().is_empty()),
            text: block_text(block),
            is_th,
        });
        pos = e;
    }
    cells
}

/// Build a record, harvesting identity fields opportunistically: the
/// page's own cell classes first (c-date, c-name title, c-account, and
/// the row's data-id), positional cells 0/1/2 as fallback.
fn harvest(
    table_index: usize,
    row_index: usize,
    tr: &str,
    cells: &[Cell],
    hours: f64,
    raw: &str,
) -> EffortRecord {
    let by_class = |marker: &str| {
        cells
            .iter()
            .find(|c| c.class.contains(marker))
            .map(|c| c.text.clone())
            .filter(|t| !t.is_empty())
    };
    let positional = |i: usize| {
        cells
            .get(i)
            .map(|c| c.text.clone())
            .filter(|t| !t.is_empty())
    };

    let id = tag_attr(open_tag(tr), "data-id")
        .filter(|v| !v.is_empty())
        .or_else(|| positional(0));
    let date = by_class("c-date").or_else(|| positional(1));
    let name = cells
        .iter()
        .find(|c| c.class.contains("c-name"))
        .and_then(|c| c.title.clone().or_else(|| Some(c.text.clone())))
        .filter(|t| !t.is_empty())
        .or_else(|| positional(2));
    let account = by_class("c-account");

    EffortRecord {
        table_index,
        row_index,
        id,
        date,
        name,
        account,
        hours,
        raw_text: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::schema;

    fn kw() -> Vec<String> {
        crate::config::consts::HEADER_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect()
    }

    fn handle(html: &str, target: bool) -> TableHandle {
        TableHandle {
            index: 0,
            class: s!(),
            html: s!(html),
            target,
        }
    }

    #[test]
    fn schema_path_extracts_and_drops_zero() {
        let html = r#"<table>
            <tr><th>ID</th><th>日期</th><th>耗时</th></tr>
            <tr><td>1</td><td>2024-01-01</td><td>2h</td></tr>
            <tr><td>2</td><td>2024-01-02</td><td>30m</td></tr>
            <tr><td>3</td><td>2024-01-02</td><td>0</td></tr>
        </table>"#;
        let t = handle(html, true);
        let sch = schema::infer(&t.html, &kw());
        assert_eq!(sch.duration_col, Some(2));

        let mut set = EffortSet::new();
        extract(&t, &sch, &mut set);
        assert_eq!(set.len(), 2);
        assert!((set.total() - 2.5).abs() < 1e-9);

        let first = &set.records()[0];
        assert_eq!(first.id.as_deref(), Some("1"));
        assert_eq!(first.date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn class_cells_preferred_over_position() {
        let html = r#"<table>
            <tr data-id="987">
              <td class="c-date">2024-02-01</td>
              <td class="c-name" title="写代码">写…</td>
              <td class="c-consumed">1.5</td>
              <td class="c-account">yinxiao.li</td>
            </tr>
        </table>"#;
        let t = handle(html, true);
        let mut set = EffortSet::new();
        extract(&t, &TableSchema::none(), &mut set);

        assert_eq!(set.len(), 1);
        let r = &set.records()[0];
        assert_eq!(r.id.as_deref(), Some("987"));
        assert_eq!(r.date.as_deref(), Some("2024-02-01"));
        assert_eq!(r.name.as_deref(), Some("写代码"));
        assert_eq!(r.account.as_deref(), Some("yinxiao.li"));
        assert!((r.hours - 1.5).abs() < 1e-9);
    }

    #[test]
    fn scan_takes_one_cell_per_row() {
        // Two positive cells in one row: only the first becomes a record.
        let html = r#"<table>
            <tr><td>2h</td><td>3h</td></tr>
        </table>"#;
        let t = handle(html, true);
        let mut set = EffortSet::new();
        extract(&t, &TableSchema::none(), &mut set);
        assert_eq!(set.len(), 1);
        assert!((set.total() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn scan_skipped_on_untargeted_table() {
        let html = "<table><tr><td>2h</td></tr></table>";
        let t = handle(html, false);
        let mut set = EffortSet::new();
        extract(&t, &TableSchema::none(), &mut set);
        assert!(set.is_empty());
    }

    #[test]
    fn scan_never_duplicates_schema_capture() {
        let html = r#"<table>
            <tr><th>耗时</th><th>备注</th></tr>
            <tr><td>2h</td><td>4h extra</td></tr>
        </table>"#;
        let t = handle(html, true);
        let sch = schema::infer(&t.html, &kw());
        let mut set = EffortSet::new();
        extract(&t, &sch, &mut set);
        // A second pass over the same table must change nothing either.
        extract(&t, &TableSchema::none(), &mut set);
        assert_eq!(set.len(), 1);
        assert!((set.total() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn all_th_rows_and_thead_skipped() {
        let html = r#"<table>
            <thead><tr><td>耗时</td></tr></thead>
            <tr><th>耗时</th></tr>
            <tr><td>1h</td></tr>
        </table>"#;
        let t = handle(html, true);
        let mut set = EffortSet::new();
        extract(&t, &TableSchema { duration_col: Some(0) }, &mut set);
        assert_eq!(set.len(), 1);
        assert!((set.total() - 1.0).abs() < 1e-9);
    }
}
