//! Configuration Management
//!
//! Hierarchical resolution, later layers win:
//! 1. Built-in defaults
//! 2. Global config (~/.config/autodocs/config.toml)
//! 3. Project config (.autodocs/config.toml)
//! 4. Environment variables (AUTODOCS_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
