// src/runner.rs
//
// One-shot pipeline: locate -> infer -> extract -> reconcile -> decide,
// wrapped into a single Report. Always returns a Report; fatal fetch or
// structural conditions short-circuit into its error slot instead of
// propagating.

use chrono::Local;
use log::{debug, info};

use crate::classify::{self, FetchSignal};
use crate::data::EffortSet;
use crate::decide;
use crate::extract;
use crate::params::Params;
use crate::reconcile::{self, Reconciliation};
use crate::report::{self, Outcome, Report};

pub fn run(doc: &str, signal: &FetchSignal, params: &Params) -> Report {
    let timestamp = Local::now();

    if let Some(err) = classify::classify(signal, doc) {
        info!("run: fetch condition short-circuits extraction: {err}");
        return report::build(
            params.date.clone(),
            timestamp,
            EffortSet::new(),
            empty_reconciliation(),
            Outcome::Error(err),
        );
    }

    let tables = extract::locate(doc);
    let mut set = EffortSet::new();
    for table in &tables {
        let schema = extract::infer(&table.html, &params.keywords);
        extract::extract(table, &schema, &mut set);
    }
    debug!(
        "run: {} table(s), {} record(s), computed total {}",
        tables.len(),
        set.len(),
        set.total()
    );

    if let Some(err) = classify::structural(&tables, &set) {
        info!("run: {err}");
        return report::build(
            params.date.clone(),
            timestamp,
            set,
            empty_reconciliation(),
            Outcome::Error(err),
        );
    }

    let reconciliation = reconcile::reconcile(&set, doc, params.tolerance);
    let decision = decide::decide(reconciliation.computed_total, params.target);
    report::build(
        params.date.clone(),
        timestamp,
        set,
        reconciliation,
        Outcome::Decision(decision),
    )
}

fn empty_reconciliation() -> Reconciliation {
    Reconciliation {
        computed_total: 0.0,
        page_total: None,
        matches: None,
    }
}
