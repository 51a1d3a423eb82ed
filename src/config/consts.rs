// src/config/consts.rs

// Decision
pub const DEFAULT_TARGET_HOURS: f64 = 8.0;

// Reconciliation
pub const DEFAULT_TOLERANCE: f64 = 0.01;

// Schema inference: header keywords that mark the duration column.
// Checked case-insensitively, first hit left to right wins.
pub const HEADER_KEYWORDS: &[&str] = &["耗时", "工时", "时间", "effort", "consumed", "hours"];

// Error classification
pub const FORBIDDEN_MARKERS: &[&str] = &["禁止访问", "无权访问", "forbidden", "access denied"];
pub const AUTH_REDIRECT_MARKER: &str = "user-login";

// Reconciliation: footer/summary element classes, most specific first.
pub const FOOTER_CLASS_MARKERS: &[&str] =
    &["table-footer", "footer-info", "total-info", "total", "footer"];

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const REPORT_FILE_PREFIX: &str = "report-";
