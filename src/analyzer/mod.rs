//! Code Analyzer Module
//!
//! - Extension classification ([`language`])
//! - File discovery with gitignore support ([`scanner`])
//! - Structural extraction, exact and approximate ([`extractor`])

pub mod extractor;
pub mod language;
pub mod scanner;

pub use extractor::{Extractor, ExtractorRegistry, Strategy};
pub use language::{Language, classify, is_supported, supported_extensions};
pub use scanner::FileScanner;
