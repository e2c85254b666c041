//! File persistence and serialization configuration

/// Where eframe stores the UI state between sessions.
pub const APP_STATE_PATH: &str = "terradeg_state.json";

/// Default location of the analysis-ready data bundle.
pub const DEFAULT_BUNDLE_PATH: &str = "bundle_data/terradeg_bundle.bin";

/// Default location of the session credentials file.
pub const DEFAULT_CREDENTIALS_PATH: &str = "bundle_data/credentials.json";

/// Current version of the bundle serialization format.
/// Bump whenever the bincode layout of `DataBundle` changes.
pub const BUNDLE_VERSION: u32 = 2;
