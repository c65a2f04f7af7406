//! Configuration file loading for prospect-search
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Legacy environment variables (`GOOGLE_API_KEY`, `GOOGLE_CSE_ID`, `OPENAI_*`)
//! 2. `PROSPECT_<SECTION>__<KEY>` environment variables
//! 3. `--config <path>` specified file
//! 4. Project root: `./prospect.toml` or `./.prospect.toml`
//! 5. Global: `~/.config/prospect-search/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCollectorConfig, FileConfig, FileLoggingConfig, FilePlannerConfig,
    FileSearchConfig, PlannerKind,
};
pub use loader::{ConfigLoader, LEGACY_ENV_KEYS};
