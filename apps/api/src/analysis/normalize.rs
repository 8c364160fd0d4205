//! Response normalization — strips markdown code fences from model replies,
//! parses the remainder as JSON, and degrades to the stage's fixed fallback
//! when the reply is unusable. Parse failures never propagate and never
//! trigger another model call.

use serde_json::Value;
use tracing::debug;

use crate::analysis::report::ReportKind;

/// Turns a raw model reply into a structured result of `kind`'s shape.
pub fn normalize(raw: &str, kind: ReportKind) -> Value {
    let candidate = extract_fenced_payload(raw);

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) if shape_matches(&value, kind) => value,
        Ok(_) => {
            debug!(stage = kind.name(), "reply parsed to wrong top-level shape, using fallback");
            kind.fallback()
        }
        Err(_) => {
            debug!(stage = kind.name(), reply_chars = raw.len(), "unparseable reply, using fallback");
            kind.fallback()
        }
    }
}

fn shape_matches(value: &Value, kind: ReportKind) -> bool {
    if kind.expects_array() {
        value.is_array()
    } else {
        value.is_object()
    }
}

/// Extracts the fenced payload from a reply that may wrap its JSON in
/// markdown code fences, with or without surrounding prose.
///
/// A ```json-tagged fence wins: the payload runs to the next closing fence.
/// Otherwise generic fences span from the first opening to the last closing
/// marker. Replies without fences pass through trimmed.
fn extract_fenced_payload(raw: &str) -> &str {
    if let Some(start) = raw.find("```json") {
        let rest = &raw[start + 7..];
        if let Some(end) = rest.find("```") {
            return rest[..end].trim();
        }
    } else if let Some(start) = raw.find("```") {
        let rest = &raw[start + 3..];
        if let Some(end) = rest.rfind("```") {
            if end > 0 {
                return rest[..end].trim();
            }
        }
    }
    raw.trim()
}
