// src/decide.rs
//
// Target check. Pure and deterministic; the only policy in the whole
// pipeline.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    Sufficient { total: f64 },
    Insufficient { total: f64, remaining: f64 },
}

/// `total >= target` → Sufficient, else Insufficient with the hours
/// still owed.
pub fn decide(total: f64, target: f64) -> Decision {
    if total >= target {
        Decision::Sufficient { total }
    } else {
        Decision::Insufficient {
            total,
            remaining: target - total,
        }
    }
}
