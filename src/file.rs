// src/file.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::consts::{DEFAULT_OUT_DIR, REPORT_FILE_PREFIX};
use crate::report::Report;

pub fn read_snapshot(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading snapshot {}", path.display()))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(())
}

/// Write `report-YYYYMMDD.json` under `out_dir` (default `out/`).
/// Returns the path written.
pub fn write_report(report: &Report, out_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = out_dir.unwrap_or(Path::new(DEFAULT_OUT_DIR));
    ensure_directory(dir)?;
    let name = join!(REPORT_FILE_PREFIX, &report.date, ".json");
    let path = dir.join(name);
    fs::write(&path, report.to_json()?).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EffortSet;
    use crate::reconcile::Reconciliation;
    use crate::report::{Outcome, build};

    #[test]
    fn report_lands_under_date_stamped_name() {
        let mut dir = std::env::temp_dir();
        dir.push("zen_effort_file_test");
        let _ = fs::remove_dir_all(&dir);

        let report = build(
            s!("20240101"),
            chrono::Local::now(),
            EffortSet::new(),
            Reconciliation {
                computed_total: 0.0,
                page_total: None,
                matches: None,
            },
            Outcome::Decision(crate::decide::decide(0.0, 8.0)),
        );
        let path = write_report(&report, Some(&dir)).unwrap();
        assert!(path.to_string_lossy().ends_with("report-20240101.json"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"date\": \"20240101\""));
        let _ = fs::remove_dir_all(&dir);
    }
}
