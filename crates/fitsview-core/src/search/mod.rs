//! Catalog search: filter state, its query-string form, the editable search
//! form, chips, results, and the frame timeline of a single hit.

pub mod chips;
pub mod controller;
pub mod dates;
pub mod form;
pub mod frames;
pub mod results;
pub mod state;
pub mod thumbnails;
pub mod timeline;

pub use chips::{chips, remove_chip, Chip, ChipKey};
pub use controller::{SearchController, SearchPhase};
pub use dates::{format_date_time, ManualDateInput, Meridiem, QuickRange, RangeEnd};
pub use form::SearchForm;
pub use frames::FrameCache;
pub use results::{parse_observation_stem, ObservationStem, ResultCard};
pub use state::{Facet, Range, SearchState, SortKey};
pub use thumbnails::ThumbnailRequests;
pub use timeline::TimelinePlayer;
