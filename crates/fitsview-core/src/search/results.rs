//! Display rules for catalog hits.

use std::path::Path;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::api::SearchResultItem;
use crate::consts::{SEARCH_EMPTY_MESSAGE, SEARCH_FAILURE_MESSAGE};
use crate::viewer::header::value_text;

use super::dates::format_date_time;

/// Fields encoded in an observation file name such as
/// `nxst_20241106_225310.658925_l1_chA`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservationStem {
    pub prefix: String,
    pub observed_at: NaiveDateTime,
    pub level: u32,
    pub channel: Option<String>,
}

fn is_alnum(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

/// Parse `prefix_YYYYMMDD_HHMMSS.ffffff_lN[_chan]`. Any extension is ignored.
pub fn parse_observation_stem(name: &str) -> Option<ObservationStem> {
    let file_name = Path::new(name).file_name()?.to_str()?;
    let stem = file_name.split('.').take(2).collect::<Vec<_>>().join(".");
    let parts: Vec<&str> = stem.split('_').collect();
    let (prefix, date, time, level, channel) = match parts.as_slice() {
        [p, d, t, l] => (*p, *d, *t, *l, None),
        [p, d, t, l, c] => (*p, *d, *t, *l, Some(*c)),
        _ => return None,
    };

    if !is_alnum(prefix) || !is_digits(date, 8) {
        return None;
    }
    let (whole, frac) = time.split_once('.')?;
    if !is_digits(whole, 6) || frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let level = level
        .strip_prefix('l')
        .or_else(|| level.strip_prefix('L'))
        .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))?
        .parse()
        .ok()?;
    if let Some(c) = channel {
        if !is_alnum(c) {
            return None;
        }
    }

    let observed_at =
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y%m%d %H%M%S%.f").ok()?;

    Some(ObservationStem {
        prefix: prefix.to_string(),
        observed_at,
        level,
        channel: channel.map(str::to_string),
    })
}

/// Exposure with two decimals and a seconds suffix; text is shown as sent.
pub fn exposure_label(exptime: Option<&Value>) -> String {
    match exptime {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => format!("{v:.2} s"),
            None => format!("{n} s"),
        },
        Some(Value::String(s)) if !s.trim().is_empty() => format!("{s} s"),
        _ => "- s".to_string(),
    }
}

pub fn frames_label(frames: Option<u64>) -> String {
    frames.map_or_else(|| "-".to_string(), |n| n.to_string())
}

pub fn target_label(target: Option<&str>) -> String {
    match target.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => "(unknown target)".to_string(),
    }
}

pub fn shape_text(shape: Option<&Value>) -> String {
    match shape {
        Some(Value::Array(dims)) if !dims.is_empty() => dims
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join("×"),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "-".to_string(),
    }
}

/// Summary line above the result list.
pub fn summary_line(total: u64) -> String {
    if total == 0 {
        SEARCH_EMPTY_MESSAGE.to_string()
    } else if total == 1 {
        "1 result".to_string()
    } else {
        format!("{total} results")
    }
}

pub fn failure_summary() -> String {
    SEARCH_FAILURE_MESSAGE.to_string()
}

/// One result card, ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultCard {
    pub file_id: String,
    pub target: String,
    pub filename: String,
    pub observed_at: String,
    pub exposure: String,
    pub frames: String,
    pub instrument: String,
    pub shape: String,
    pub flags: String,
    pub thumb_url: String,
}

impl ResultCard {
    pub fn new(item: &SearchResultItem, placeholder_thumb: &str) -> Self {
        let filename = item
            .filename
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| item.file_id.clone());
        let observed_at = item
            .date_obs
            .clone()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| {
                item.filename
                    .as_deref()
                    .and_then(parse_observation_stem)
                    .map(|stem| format_date_time(stem.observed_at))
            })
            .unwrap_or_default();

        Self {
            file_id: item.file_id.clone(),
            target: target_label(item.target.as_deref()),
            filename,
            observed_at,
            exposure: exposure_label(item.exptime.as_ref()),
            frames: frames_label(item.frames),
            instrument: item.instrument.clone().unwrap_or_default(),
            shape: shape_text(item.shape.as_ref()),
            flags: item.flags.join(", "),
            thumb_url: item
                .thumb_url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| placeholder_thumb.to_string()),
        }
    }
}
