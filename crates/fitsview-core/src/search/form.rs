//! Text buffers of the search form and how a submit copies them into
//! [`SearchState`].

use crate::error::{FitsViewError, Result};

use super::dates::{ManualDateInput, RangeEnd};
use super::state::SearchState;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchForm {
    pub query: String,
    pub from: ManualDateInput,
    pub to: ManualDateInput,
    pub exposure_min: String,
    pub exposure_max: String,
    pub frames_min: String,
    pub frames_max: String,
}

impl SearchForm {
    pub fn from_state(state: &SearchState) -> Self {
        let exposure = state.exposure();
        let frames = state.frames();
        Self {
            query: state.query().to_string(),
            from: ManualDateInput::from_param(state.date_from().unwrap_or(""), RangeEnd::From),
            to: ManualDateInput::from_param(state.date_to().unwrap_or(""), RangeEnd::To),
            exposure_min: text(exposure.min),
            exposure_max: text(exposure.max),
            frames_min: text(frames.min),
            frames_max: text(frames.max),
        }
    }

    /// Overwrite the date fields, e.g. after a quick range was applied.
    pub fn set_dates(&mut self, from: &str, to: &str) {
        self.from = ManualDateInput::from_param(from, RangeEnd::From);
        self.to = ManualDateInput::from_param(to, RangeEnd::To);
    }

    /// Copy every field into `state`. Both dates are parsed before anything
    /// is written, so on error `state` is unchanged.
    pub fn apply(&self, state: &mut SearchState) -> Result<()> {
        let from = labelled(RangeEnd::From, self.from.format())?;
        let to = labelled(RangeEnd::To, self.to.format())?;
        state.set_query(&self.query);
        state.set_date_range(from, to);
        state.set_exposure_text(&self.exposure_min, &self.exposure_max);
        state.set_frames_text(&self.frames_min, &self.frames_max);
        Ok(())
    }
}

fn text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn labelled<T>(end: RangeEnd, result: Result<T>) -> Result<T> {
    result.map_err(|e| match e {
        FitsViewError::InvalidInput(detail) => {
            FitsViewError::InvalidInput(format!("{} {detail}", end.label()))
        }
        other => other,
    })
}
