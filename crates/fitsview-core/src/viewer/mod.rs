//! Viewer: the current file, its preview, and the slit/spectrum extracted at
//! the selected pixel.

pub mod events;
pub mod header;
pub mod session;
pub mod spectrum;
pub mod state;

pub use events::{ViewerEvent, ViewerObserver};
pub use header::{shape_label, summarize_header};
pub use session::{RefreshReport, ViewOutcome, ViewerSession};
pub use spectrum::SpectrumSeries;
pub use state::{LoadedFile, SliceControl, ViewerState};
