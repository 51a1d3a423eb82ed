// src/report.rs
//
// Terminal aggregate of one run. Built once, never mutated, handed to
// whatever notifier the operator wires up (stdout, mail, file). Carries
// exactly one of a Decision or an ErrorCondition.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::classify::ErrorCondition;
use crate::data::EffortSet;
use crate::decide::Decision;
use crate::reconcile::Reconciliation;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Decision(Decision),
    Error(ErrorCondition),
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub date: String,
    pub timestamp: DateTime<Local>,
    pub records: EffortSet,
    pub reconciliation: Reconciliation,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Pure aggregation, no I/O.
pub fn build(
    date: String,
    timestamp: DateTime<Local>,
    records: EffortSet,
    reconciliation: Reconciliation,
    outcome: Outcome,
) -> Report {
    Report {
        date,
        timestamp,
        records,
        reconciliation,
        outcome,
    }
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable rendering, the shape the notification mail used.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            s!("工作日志统计摘要"),
            format!("日期: {}", self.date),
            format!("统计时间: {}", self.timestamp.format("%Y-%m-%d %H:%M:%S")),
            format!("记录数量: {} 条", self.records.len()),
            format!("总耗时: {} 小时", self.reconciliation.computed_total),
        ];

        if let Some(page) = self.reconciliation.page_total {
            let verdict = match self.reconciliation.matches {
                Some(true) => "一致",
                _ => "不一致",
            };
            lines.push(format!("页面总计: {page} 小时 ({verdict})"));
        }

        match &self.outcome {
            Outcome::Decision(Decision::Sufficient { total }) => {
                lines.push(format!("今天的工时够了（{total} 小时）"));
            }
            Outcome::Decision(Decision::Insufficient { total, remaining }) => {
                lines.push(format!("今天的工时不够：{total} 小时，还差 {remaining} 小时"));
            }
            Outcome::Error(e) => {
                lines.push(format!("统计失败: {e}"));
            }
        }

        if !self.records.is_empty() {
            lines.push(s!("详细记录:"));
            for (i, r) in self.records.iter().enumerate() {
                let what = r
                    .name
                    .as_deref()
                    .or(r.id.as_deref())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("记录{}", i + 1));
                let when = r
                    .date
                    .as_deref()
                    .map(|d| format!(" ({d})"))
                    .unwrap_or_default();
                lines.push(format!("  {}. {} - {} 小时{}", i + 1, what, r.hours, when));
            }
        }

        lines.join("\n")
    }
}
