//! Report Renderer
//!
//! Markdown export and PDF rendering are independent: a PDF failure never
//! undoes the markdown file.

pub mod markdown;
pub mod pdf;

pub use markdown::{render_markdown, write_markdown};
pub use pdf::{render_pdf, render_pdf_bytes};
