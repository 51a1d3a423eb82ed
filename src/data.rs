// src/data.rs
//
// Core data model: one extracted effort record, and the deduplicated
// ordered set of them. Pure values; each run owns its own set and no
// state survives the run.

use serde::Serialize;

/// One logged unit of work pulled out of a timesheet row.
///
/// Identity is `(table_index, row_index)`: no matter how many extraction
/// strategies visit a row, at most one record exists for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffortRecord {
    pub table_index: usize,
    pub row_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub hours: f64,
    pub raw_text: String,
}

impl EffortRecord {
    pub fn key(&self) -> (usize, usize) {
        (self.table_index, self.row_index)
    }
}

/// Ordered, deduplicated collection of effort records.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EffortSet {
    records: Vec<EffortRecord>,
}

impl EffortSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its row identity is already taken.
    /// Returns whether the record went in.
    pub fn push(&mut self, rec: EffortRecord) -> bool {
        if self.contains_key(rec.table_index, rec.row_index) {
            return false;
        }
        self.records.push(rec);
        true
    }

    pub fn contains_key(&self, table_index: usize, row_index: usize) -> bool {
        self.records
            .iter()
            .any(|r| r.key() == (table_index, row_index))
    }

    /// Sum of member durations. Recomputed on every call so it can never
    /// go stale against the members.
    pub fn total(&self) -> f64 {
        self.records.iter().map(|r| r.hours).sum()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffortRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[EffortRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(t: usize, r: usize, hours: f64) -> EffortRecord {
        EffortRecord {
            table_index: t,
            row_index: r,
            id: None,
            date: None,
            name: None,
            account: None,
            hours,
            raw_text: format!("{hours}"),
        }
    }

    #[test]
    fn total_is_sum_of_members() {
        let mut set = EffortSet::new();
        set.push(rec(0, 1, 2.0));
        set.push(rec(0, 2, 0.5));
        set.push(rec(1, 0, 1.25));
        assert!((set.total() - 3.75).abs() < 1e-9);
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut set = EffortSet::new();
        assert!(set.push(rec(0, 3, 2.0)));
        assert!(!set.push(rec(0, 3, 5.0)));
        assert_eq!(set.len(), 1);
        assert!((set.total() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn same_row_index_in_other_table_is_distinct() {
        let mut set = EffortSet::new();
        assert!(set.push(rec(0, 3, 2.0)));
        assert!(set.push(rec(1, 3, 1.0)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn removing_largest_strictly_decreases_total() {
        let mut set = EffortSet::new();
        set.push(rec(0, 0, 1.0));
        set.push(rec(0, 1, 4.0));
        set.push(rec(0, 2, 0.25));
        let before = set.total();

        let max = set
            .iter()
            .cloned()
            .max_by(|a, b| a.hours.total_cmp(&b.hours))
            .unwrap();
        let mut rest = EffortSet::new();
        for r in set.iter().filter(|r| r.key() != max.key()) {
            rest.push(r.clone());
        }
        assert!(rest.total() < before);
    }
}
