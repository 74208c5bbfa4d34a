//! Languages Command
//!
//! Print every recognized language with its extensions and extraction strategy.

use console::style;

use crate::analyzer::{ExtractorRegistry, Language};

pub fn run() {
    let registry = ExtractorRegistry::with_defaults();

    println!(
        "\n{}",
        style(format!("{:<18} {:<12} {}", "Language", "Strategy", "Extensions")).bold()
    );
    println!("{}", "─".repeat(60));

    for lang in Language::all() {
        let exts: Vec<String> = lang.extensions().iter().map(|e| format!(".{}", e)).collect();
        println!(
            "{:<18} {:<12} {}",
            lang.as_str(),
            registry.strategy_for(*lang).to_string(),
            exts.join(" ")
        );
    }
    println!();
}
