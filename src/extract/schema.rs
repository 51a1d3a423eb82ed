// src/extract/schema.rs
//
// Guess which column of a located table carries the duration value by
// matching header text against a fixed keyword vocabulary. Computed once
// per table and consumed by the row extractor; `None` tells it to use
// the cell-scanning fallback instead.

use log::debug;

use crate::core::html::{block_text, next_cell, tag_block, to_lower};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub duration_col: Option<usize>,
}

impl TableSchema {
    pub fn none() -> Self {
        Self { duration_col: None }
    }
}

/// Infer the duration column. Header cells come from the `<thead>` row
/// when present, else the table's first row. First keyword hit, left to
/// right, wins.
pub fn infer(table_html: &str, keywords: &[String]) -> TableSchema {
    let header_row = match tag_block(table_html, "thead", 0) {
        Some((s, e)) => tag_block(&table_html[s..e], "tr", 0)
            .map(|(rs, re)| table_html[s + rs..s + re].to_string())
            .unwrap_or_else(|| table_html[s..e].to_string()),
        None => match tag_block(table_html, "tr", 0) {
            Some((s, e)) => table_html[s..e].to_string(),
            None => return TableSchema::none(),
        },
    };

    let lowered: Vec<String> = keywords.iter().map(|k| to_lower(k)).collect();

    let mut col = 0usize;
    let mut pos = 0usize;
    while let Some((s, e, _)) = next_cell(&header_row, pos) {
        let text = to_lower(&block_text(&header_row[s..e]));
        if lowered.iter().any(|k| !k.is_empty() && text.contains(k)) {
            debug!("schema: duration column '{}' at index {}", text, col);
            return TableSchema {
                duration_col: Some(col),
            };
        }
        col += 1;
        pos = e;
    }

    debug!("schema: no header keyword matched");
    TableSchema::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw() -> Vec<String> {
        crate::config::consts::HEADER_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect()
    }

    #[test]
    fn finds_consumed_column_in_first_row() {
        let t = "<table><tr><th>ID</th><th>日期</th><th>耗时</th></tr></table>";
        assert_eq!(infer(t, &kw()).duration_col, Some(2));
    }

    #[test]
    fn thead_preferred_over_body_rows() {
        let t = r#"<table>
            <thead><tr><td>编号</td><td>工时</td></tr></thead>
            <tbody><tr><td>1</td><td>2h</td></tr></tbody>
        </table>"#;
        assert_eq!(infer(t, &kw()).duration_col, Some(1));
    }

    #[test]
    fn first_match_wins_left_to_right() {
        // Both columns match the vocabulary; the leftmost is taken.
        let t = "<table><tr><th>时间</th><th>耗时</th></tr></table>";
        assert_eq!(infer(t, &kw()).duration_col, Some(0));
    }

    #[test]
    fn english_keywords_case_insensitive() {
        let t = "<table><tr><th>Task</th><th>Consumed</th></tr></table>";
        assert_eq!(infer(t, &kw()).duration_col, Some(1));
    }

    #[test]
    fn no_match_reports_none() {
        let t = "<table><tr><th>ID</th><th>标题</th></tr></table>";
        assert_eq!(infer(t, &kw()).duration_col, None);
        assert_eq!(infer("<table></table>", &kw()).duration_col, None);
    }
}
