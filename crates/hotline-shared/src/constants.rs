/// Application name
pub const APP_NAME: &str = "Hotline";

/// A contact counts as online if seen within this window.
pub const ONLINE_WINDOW_SECS: i64 = 5 * 60;

/// Search queries shorter than this never reach the network.
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Minimum password length enforced at the input layer only.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Simulated ring time before a call flips to connected.
pub const CONNECT_DELAY_SECS: u64 = 2;

/// Persisted sessions older than this are discarded on load.
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

/// Storage key (file name) for the persisted session document.
pub const SESSION_FILE_NAME: &str = "session.json";
