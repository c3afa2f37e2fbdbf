/// Base URL every page and archive link is resolved against.
pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";

pub const DOWNLOADS_DIR: &str = "downloads";
pub const RESULTS_DIR: &str = "results";
pub const CACHE_DIR: &str = ".http_cache";

/// Display text of sidebar version anchors, e.g. "Python 3.11 (stable)".
/// Anchors that don't match fall back to (raw text, empty status).
pub const VERSION_STATUS_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";

/// Case-sensitive suffix match for the "PDF, A4" archive link on download.html.
pub const PDF_A4_PATTERN: &str = r".+pdf-a4\.zip$";

/// Marker that identifies the full version list among the sidebar `<ul>`s.
pub const ALL_VERSIONS_MARKER: &str = "All versions";

pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
