//! Config Command
//!
//! Manage autodocs configuration.
//!
//! Usage:
//!   autodocs config show [-f json]
//!   autodocs config path
//!   autodocs config init [-g] [--force]

use console::style;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::{AutodocError, Result};

/// Show the merged effective configuration
pub fn show(format: &str) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "text" | "toml" => false,
        other => {
            return Err(AutodocError::Config(format!(
                "Invalid format '{}'. Valid values: text, json",
                other
            )));
        }
    };

    let config = ConfigLoader::load()?;
    let rendered = ConfigLoader::render(&config, as_json)?;
    if !as_json {
        println!("{}", style("# Effective configuration").dim());
    }
    println!("{}", rendered);
    Ok(())
}

/// Show configuration file paths
pub fn path() -> Result<()> {
    let output = Output::new();
    output.section("Configuration files");

    match ConfigLoader::global_config_path() {
        Some(global) => output.field("Global", describe(&global)),
        None => output.field("Global", "(no config directory)"),
    }
    output.field("Project", describe(&ConfigLoader::project_config_path()));
    output.field("Environment", "AUTODOCS_<SECTION>_<KEY>");
    Ok(())
}

fn describe(path: &std::path::Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}

/// Initialize global or project configuration
pub fn init(global: bool, force: bool) -> Result<()> {
    let output = Output::new();
    let (path, created) = ConfigLoader::init(global, force)?;
    let scope = if global { "global" } else { "project" };

    if created {
        output.success(&format!("Initialized {} configuration", scope));
        output.field("Config", path.display());
    } else {
        output.warning(&format!(
            "{} already exists; use --force to overwrite",
            path.display()
        ));
    }
    Ok(())
}
