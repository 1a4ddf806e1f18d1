//! Configuration file loading for atoss-distill
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ATOSS_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./atoss.toml` or `./.atoss.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/atoss-distill/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    FileBatchConfig, FileConfig, FileDatasetConfig, FileInferenceConfig, FileSplitConfig,
};
pub use loader::ConfigLoader;
