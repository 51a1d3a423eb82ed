// src/classify.rs
//
// Map collaborator-reported fetch conditions into a closed error
// taxonomy. Ordering matters and is fixed: HTTP-status evidence beats
// URL-pattern evidence, because a forbidden response can superficially
// look like an auth redirect.

use serde::Serialize;
use thiserror::Error;

use crate::config::consts::{AUTH_REDIRECT_MARKER, FORBIDDEN_MARKERS};
use crate::core::html::{block_text, tag_block, to_lower};
use crate::data::EffortSet;
use crate::extract::TableHandle;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorCondition {
    #[error("access forbidden (HTTP {status})")]
    Forbidden {
        status: u16,
        server_messages: Vec<String>,
    },
    #[error("authentication required (redirected to {redirect_url})")]
    AuthRequired { redirect_url: String },
    #[error("network failure: {message}")]
    NetworkFailure { message: String },
    #[error("page structure mismatch: {detail}")]
    StructuralMismatch { detail: String },
}

/// What the external fetch collaborator observed. All fields optional;
/// an offline snapshot run legitimately has none of them.
#[derive(Debug, Clone, Default)]
pub struct FetchSignal {
    pub status: Option<u16>,
    pub final_url: Option<String>,
    pub title: Option<String>,
    pub transport_error: Option<String>,
}

/// Classify fetch-level conditions, first match wins:
/// forbidden → auth redirect → transport failure. `None` means the
/// fetch looked healthy and the pipeline may proceed.
pub fn classify(signal: &FetchSignal, doc: &str) -> Option<ErrorCondition> {
    let title = signal.title.as_deref().unwrap_or_default();
    let forbidden_marker = contains_forbidden(title) || contains_forbidden(doc);
    if signal.status == Some(403) || forbidden_marker {
        return Some(ErrorCondition::Forbidden {
            status: signal.status.unwrap_or(403),
            server_messages: server_messages(doc),
        });
    }

    if let Some(url) = signal.final_url.as_deref() {
        if url.contains(AUTH_REDIRECT_MARKER) {
            return Some(ErrorCondition::AuthRequired {
                redirect_url: s!(url),
            });
        }
    }

    if let Some(msg) = signal.transport_error.as_deref() {
        return Some(ErrorCondition::NetworkFailure { message: s!(msg) });
    }

    None
}

/// Post-extraction check: nothing located and nothing extracted means
/// the page structure does not look like a timesheet at all.
pub fn structural(tables: &[TableHandle], set: &EffortSet) -> Option<ErrorCondition> {
    if tables.is_empty() && set.is_empty() {
        return Some(ErrorCondition::StructuralMismatch {
            detail: s!("no effort table located in document"),
        });
    }
    None
}

fn contains_forbidden(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lc = to_lower(text);
    FORBIDDEN_MARKERS.iter().any(|m| lc.contains(m))
}

/// Structured server-message paragraphs on error pages, in order.
fn server_messages(doc: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = tag_block(doc, "p", pos) {
        let text = block_text(&doc[s..e]);
        if !text.is_empty() {
            out.push(text);
        }
        pos = e;
    }
    out
}
