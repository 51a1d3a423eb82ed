// src/params.rs
use std::path::PathBuf;

use crate::classify::FetchSignal;
use crate::config::consts::{DEFAULT_TARGET_HOURS, DEFAULT_TOLERANCE, HEADER_KEYWORDS};
use crate::util;

#[derive(Clone, Debug)]
pub struct Params {
    pub date: String,              // YYYYMMDD key the run reports under
    pub target: f64,               // daily hours target
    pub tolerance: f64,            // reconciliation tolerance (absolute)
    pub keywords: Vec<String>,     // schema-inference header vocabulary
    pub input: Option<PathBuf>,    // snapshot file to read
    pub out: Option<PathBuf>,      // report output directory, if writing
    pub json: bool,                // print JSON instead of the summary
    pub url: Option<String>,       // fetch metadata for classification
    pub status: Option<u16>,
    pub title: Option<String>,
}

impl Params {
    pub fn new() -> Self {
        Self {
            date: util::today(),
            target: DEFAULT_TARGET_HOURS,
            tolerance: DEFAULT_TOLERANCE,
            keywords: HEADER_KEYWORDS.iter().map(|k| s!(*k)).collect(),
            input: None,
            out: None,
            json: false,
            url: None,
            status: None,
            title: None,
        }
    }

    /// Fetch signal for the classifier, from whatever metadata the
    /// operator captured alongside the snapshot.
    pub fn signal(&self) -> FetchSignal {
        FetchSignal {
            status: self.status,
            final_url: self.url.clone(),
            title: self.title.clone(),
            transport_error: None,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
