//! Configuration file loading for bizplan
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `BIZPLAN_` (`__` separates nesting)
//! 2. `--config <path>` specified file
//! 3. Project root: `./bizplan.toml` or `./.bizplan.toml`
//! 4. Global: `$XDG_CONFIG_HOME/bizplan/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAnalysisConfig, FileConfig, FileModelsConfig, FileOllamaConfig, FileOutputConfig,
    FileOutputFormat, FileRefinementConfig, FileSearchConfig, WebBackend,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX};
