use std::collections::BTreeSet;
use std::fmt;

use tracing::warn;
use url::Url;

use crate::consts::DEFAULT_SORT_PARAM;

/// Result ordering understood by the search endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    NewestFirst,
    OldestFirst,
    Object,
    ShortestExposure,
    LongestExposure,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::NewestFirst,
        SortKey::OldestFirst,
        SortKey::Object,
        SortKey::ShortestExposure,
        SortKey::LongestExposure,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            Self::NewestFirst => DEFAULT_SORT_PARAM,
            Self::OldestFirst => "observed_at",
            Self::Object => "object",
            Self::ShortestExposure => "exptime",
            Self::LongestExposure => "-exptime",
        }
    }

    /// Unknown values fall back to the default ordering.
    pub fn from_param(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.as_param() == value.trim())
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NewestFirst => "Newest first",
            Self::OldestFirst => "Oldest first",
            Self::Object => "Target name",
            Self::ShortestExposure => "Shortest exposure",
            Self::LongestExposure => "Longest exposure",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Multi-select filter groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facet {
    Instrument,
    Flag,
}

impl Facet {
    pub fn param(self) -> &'static str {
        match self {
            Self::Instrument => "instrument",
            Self::Flag => "flags",
        }
    }
}

/// Inclusive numeric range; either end may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Range<T> {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Every search filter. Any filter change resets `page` to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
    query: String,
    date_from: Option<String>,
    date_to: Option<String>,
    instruments: BTreeSet<String>,
    flags: BTreeSet<String>,
    exposure: Range<f64>,
    frames: Range<u32>,
    sort: SortKey,
    page: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            date_from: None,
            date_to: None,
            instruments: BTreeSet::new(),
            flags: BTreeSet::new(),
            exposure: Range::default(),
            frames: Range::default(),
            sort: SortKey::default(),
            page: 1,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn split_set(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_facet_value(value: &str) -> bool {
    !value.trim().is_empty() && value.trim() == value && !value.contains(',')
}

/// Non-finite or unparsable input leaves the bound unset.
fn parse_exposure(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_frames(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

impl SearchState {
    /// Rebuild state from a query string (with or without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => state.query = value.trim().to_string(),
                "date_from" => state.date_from = non_empty(&value),
                "date_to" => state.date_to = non_empty(&value),
                "instrument" => state.instruments = split_set(&value),
                "flags" => state.flags = split_set(&value),
                "exp_min" => state.exposure.min = parse_exposure(&value),
                "exp_max" => state.exposure.max = parse_exposure(&value),
                "frames_min" => state.frames.min = parse_frames(&value),
                "frames_max" => state.frames.max = parse_frames(&value),
                "sort" => state.sort = SortKey::from_param(&value),
                "page" => state.page = value.trim().parse().unwrap_or(1),
                _ => {}
            }
        }
        state.page = state.page.max(1);
        state
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or(""))
    }

    /// Non-empty fields in a fixed order. Set facets are sorted and comma-joined.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.query.is_empty() {
            pairs.push(("q", self.query.clone()));
        }
        if let Some(from) = &self.date_from {
            pairs.push(("date_from", from.clone()));
        }
        if let Some(to) = &self.date_to {
            pairs.push(("date_to", to.clone()));
        }
        if !self.instruments.is_empty() {
            pairs.push((Facet::Instrument.param(), join(&self.instruments)));
        }
        if !self.flags.is_empty() {
            pairs.push((Facet::Flag.param(), join(&self.flags)));
        }
        if let Some(v) = self.exposure.min {
            pairs.push(("exp_min", v.to_string()));
        }
        if let Some(v) = self.exposure.max {
            pairs.push(("exp_max", v.to_string()));
        }
        if let Some(v) = self.frames.min {
            pairs.push(("frames_min", v.to_string()));
        }
        if let Some(v) = self.frames.max {
            pairs.push(("frames_max", v.to_string()));
        }
        pairs.push(("sort", self.sort.as_param().to_string()));
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }
        pairs
    }

    /// Canonical encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn date_from(&self) -> Option<&str> {
        self.date_from.as_deref()
    }

    pub fn date_to(&self) -> Option<&str> {
        self.date_to.as_deref()
    }

    pub fn facet_values(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Instrument => &self.instruments,
            Facet::Flag => &self.flags,
        }
    }

    pub fn is_active(&self, facet: Facet, value: &str) -> bool {
        self.facet_values(facet).contains(value)
    }

    pub fn exposure(&self) -> Range<f64> {
        self.exposure
    }

    pub fn frames(&self) -> Range<u32> {
        self.frames
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.page = 1;
    }

    pub fn set_date_range(&mut self, from: Option<String>, to: Option<String>) {
        self.date_from = from.as_deref().and_then(non_empty);
        self.date_to = to.as_deref().and_then(non_empty);
        self.page = 1;
    }

    pub fn set_date_from(&mut self, from: Option<String>) {
        let to = self.date_to.take();
        self.set_date_range(from, to);
    }

    pub fn set_date_to(&mut self, to: Option<String>) {
        let from = self.date_from.take();
        self.set_date_range(from, to);
    }

    /// Flip one facet value. Returns true when it is now active.
    ///
    /// Values travel comma-joined in the query string, so a value that is
    /// blank or contains a comma is refused and the state is left alone.
    pub fn toggle_facet(&mut self, facet: Facet, value: &str) -> bool {
        if !is_facet_value(value) {
            warn!(facet = facet.param(), value, "facet value rejected");
            return false;
        }
        let set = match facet {
            Facet::Instrument => &mut self.instruments,
            Facet::Flag => &mut self.flags,
        };
        self.page = 1;
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }

    pub fn clear_facet(&mut self, facet: Facet, value: &str) {
        match facet {
            Facet::Instrument => self.instruments.remove(value),
            Facet::Flag => self.flags.remove(value),
        };
        self.page = 1;
    }

    pub fn set_exposure(&mut self, range: Range<f64>) {
        self.exposure = Range {
            min: range.min.filter(|v| v.is_finite()),
            max: range.max.filter(|v| v.is_finite()),
        };
        self.page = 1;
    }

    /// Set exposure bounds from raw text fields.
    pub fn set_exposure_text(&mut self, min: &str, max: &str) {
        self.set_exposure(Range {
            min: parse_exposure(min),
            max: parse_exposure(max),
        });
    }

    pub fn set_frames(&mut self, range: Range<u32>) {
        self.frames = range;
        self.page = 1;
    }

    pub fn set_frames_text(&mut self, min: &str, max: &str) {
        self.set_frames(Range {
            min: parse_frames(min),
            max: parse_frames(max),
        });
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to another result page. The only setter that keeps the filters.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}
