//! Active filters mirrored as removable tags.

use std::fmt::Display;

use super::state::{Facet, Range, SearchState};

/// Which filter a chip stands for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChipKey {
    Query,
    DateRange,
    Facet(Facet, String),
    Exposure,
    Frames,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chip {
    pub key: ChipKey,
    pub label: String,
}

const OPEN_END: &str = "…";

fn end<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| OPEN_END.to_string(), |v| v.to_string())
}

fn range_label<T: Display + Copy>(range: Range<T>) -> String {
    format!("{}~{}", end(range.min), end(range.max))
}

/// Chips in display order: query, dates, instruments, flags, exposure, frames.
pub fn chips(state: &SearchState) -> Vec<Chip> {
    let mut out = Vec::new();

    if !state.query().is_empty() {
        out.push(Chip {
            key: ChipKey::Query,
            label: state.query().to_string(),
        });
    }
    if state.date_from().is_some() || state.date_to().is_some() {
        out.push(Chip {
            key: ChipKey::DateRange,
            label: format!(
                "{} ~ {}",
                state.date_from().unwrap_or(OPEN_END),
                state.date_to().unwrap_or(OPEN_END)
            ),
        });
    }
    for facet in [Facet::Instrument, Facet::Flag] {
        for value in state.facet_values(facet) {
            out.push(Chip {
                key: ChipKey::Facet(facet, value.clone()),
                label: value.clone(),
            });
        }
    }
    if !state.exposure().is_empty() {
        out.push(Chip {
            key: ChipKey::Exposure,
            label: format!("Exposure {}s", range_label(state.exposure())),
        });
    }
    if !state.frames().is_empty() {
        out.push(Chip {
            key: ChipKey::Frames,
            label: format!("Frames {}", range_label(state.frames())),
        });
    }
    out
}

/// Clear the filter behind `key`. The caller re-runs the search.
pub fn remove_chip(state: &mut SearchState, key: &ChipKey) {
    match key {
        ChipKey::Query => state.set_query(""),
        ChipKey::DateRange => state.set_date_range(None, None),
        ChipKey::Facet(facet, value) => state.clear_facet(*facet, value),
        ChipKey::Exposure => state.set_exposure(Range::default()),
        ChipKey::Frames => state.set_frames(Range::default()),
    }
}
