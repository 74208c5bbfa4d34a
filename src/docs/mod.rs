//! Documentation generation: personas, prompts, aggregation and rendering.

pub mod aggregator;
pub mod persona;
pub mod prompt;
pub mod render;

pub use aggregator::{AggregatorOptions, DocumentAggregator, PLACEHOLDER_PREFIX, placeholder_text};
pub use persona::{Persona, default_personas};
pub use prompt::build_prompt;
pub use render::{render_markdown, render_pdf, render_pdf_bytes, write_markdown};
