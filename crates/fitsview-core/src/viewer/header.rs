use serde_json::Value;

use crate::api::HeaderMap;

/// Look a keyword up exactly, then case-insensitively.
fn pick<'a>(header: &'a HeaderMap, key: &str) -> Option<&'a Value> {
    header
        .get(key)
        .or_else(|| {
            header
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
        .filter(|v| !is_blank(v))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One-line digest of the interesting FITS keywords, e.g.
/// `OBJECT=Sun | DATE-OBS=2024-11-06T22:53:10 | EXPTIME=0.5 | NAXIS=10×512×512`.
pub fn summarize_header(header: &HeaderMap) -> String {
    let mut parts = Vec::new();

    if let Some(object) = pick(header, "OBJECT") {
        parts.push(format!("OBJECT={}", value_text(object)));
    }
    if let Some(date) = pick(header, "DATE-OBS") {
        parts.push(format!("DATE-OBS={}", value_text(date)));
    }
    if let Some(exp) = pick(header, "EXPTIME").or_else(|| pick(header, "EXPOSURE")) {
        parts.push(format!("EXPTIME={}", value_text(exp)));
    }

    let naxis1 = pick(header, "NAXIS1").map(value_text);
    let naxis2 = pick(header, "NAXIS2").map(value_text);
    if let (Some(n1), Some(n2)) = (naxis1, naxis2) {
        match pick(header, "NAXIS3").map(value_text) {
            Some(n3) => parts.push(format!("NAXIS={n3}×{n2}×{n1}")),
            None => parts.push(format!("NAXIS={n2}×{n1}")),
        }
    }

    if parts.is_empty() {
        "No header information".to_string()
    } else {
        parts.join(" | ")
    }
}

/// `[10, 512, 512]` → `10×512×512`.
pub fn shape_label(shape: &[usize]) -> String {
    if shape.is_empty() {
        return "-".to_string();
    }
    shape
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("×")
}
