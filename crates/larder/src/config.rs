//! Configuration constants for larder

/// Application metadata
pub mod app {
    /// Application name (used for the data directory, etc.)
    pub const NAME: &str = "larder";
}

/// Persistence-related configuration
pub mod storage {
    /// Key of the slot holding the serialized favorites set
    pub const FAVORITES_KEY: &str = "recipe-favorites";

    /// Current favorites document version
    pub const FAVORITES_VERSION: u32 = 1;

    /// Environment variable overriding the data directory
    pub const DATA_DIR_ENV: &str = "LARDER_DATA_DIR";

    /// Extension of files written by `FileStorage`
    pub const FILE_EXTENSION: &str = "json";

    /// Longest file name most filesystems allow, in bytes
    pub const MAX_FILE_NAME_LEN: usize = 255;

    /// Longest key accepted by `FileStorage`, leaving room for `.json`
    pub const MAX_KEY_LEN: usize = MAX_FILE_NAME_LEN - FILE_EXTENSION.len() - 1;
}
