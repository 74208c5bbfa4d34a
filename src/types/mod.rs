pub mod error;
pub mod report;
pub mod source;

pub use error::{AutodocError, ErrorCategory, ErrorClassifier, LlmError, Result};
pub use report::{DocumentFragment, FileDocumentBundle, ProjectReport};
pub use source::{Categories, SourceUnit, StructuralSummary};
