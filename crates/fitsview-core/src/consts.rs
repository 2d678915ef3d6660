/// Percentile clip sent with every preview and slit request. Held fixed so the
/// stretch does not change when correction is toggled.
pub const DEFAULT_PERCENT_CLIP: f64 = 1.0;

/// Default timeline playback rate in frames per second.
pub const DEFAULT_TIMELINE_FPS: f32 = 4.0;

/// Lowest and highest frame rate the timeline accepts.
pub const MIN_TIMELINE_FPS: f32 = 0.5;
pub const MAX_TIMELINE_FPS: f32 = 30.0;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Radius of the selection marker circle, in logical pixels.
pub const MARKER_RADIUS: f32 = 6.0;

/// Half-length of the selection marker cross arms, in logical pixels.
pub const MARKER_ARM: f32 = 8.0;

/// Fallback message when an upload fails without a server-provided reason.
pub const GENERIC_UPLOAD_FAILURE: &str = "Upload failed";

/// Summary shown when the search request fails.
pub const SEARCH_FAILURE_MESSAGE: &str = "Something went wrong while searching.";

/// Summary shown when the search succeeds with no matches.
pub const SEARCH_EMPTY_MESSAGE: &str = "No matching observations.";

/// Sort key used when the location carries none (or an unknown one).
pub const DEFAULT_SORT_PARAM: &str = "-observed_at";

/// Output format for manual and quick-range dates.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
