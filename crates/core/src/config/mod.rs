//! Configuration loading and the recognized indexing options.
//!
//! Configuration lives in a TOML file with named profiles; the active
//! profile resolves to a vault root plus an [`IndexSettings`] struct that is
//! passed explicitly to every component (no ambient global state).

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{
    ConfigFile, IndexItemStyle, IndexSettings, LoggingConfig, Profile, ResolvedConfig,
    SortOrder,
};
