//! Persona prompt construction.
//!
//! Layout, one block per line:
//!
//! ```text
//! <persona framing>
//!
//! File: <path>
//! Language: <language>
//! Functions: <names or none>
//! Classes: <names or none>
//! <Extra>: <names or none>      (one line per extra category)
//!
//! Code:
//! <source, possibly truncated>
//!
//! Please respond as the <persona>, taking into account that this is <language> code.
//! ```

use std::collections::BTreeSet;

use super::persona::Persona;
use crate::types::StructuralSummary;

const TRUNCATION_MARKER: &str = "\n... [truncated]";

/// Build the prompt for one (summary, persona) pair.
///
/// `max_code_chars` of 0 sends the whole source.
pub fn build_prompt(persona: &Persona, summary: &StructuralSummary, max_code_chars: usize) -> String {
    let language = summary.language.as_str();
    let mut prompt = String::with_capacity(summary.code.len() + 1024);

    prompt.push_str(persona.framing());
    prompt.push_str("\n\n");
    prompt.push_str(&format!("File: {}\n", summary.path));
    prompt.push_str(&format!("Language: {}\n", language));
    prompt.push_str(&format!("Functions: {}\n", join_names(&summary.functions)));
    prompt.push_str(&format!("Classes: {}\n", join_names(&summary.classes)));
    for (category, names) in &summary.extras {
        prompt.push_str(&format!("{}: {}\n", capitalize(category), join_names(names)));
    }
    prompt.push_str("\nCode:\n");
    prompt.push_str(&truncate_code(&summary.code, max_code_chars));
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Please respond as the {}, taking into account that this is {} code.",
        persona.name(),
        language
    ));

    prompt
}

fn join_names(names: &BTreeSet<String>) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut at a char boundary so multi-byte text never splits.
fn truncate_code(code: &str, max_chars: usize) -> std::borrow::Cow<'_, str> {
    if max_chars == 0 {
        return code.into();
    }
    match code.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{}", &code[..idx], TRUNCATION_MARKER).into(),
        None => code.into(),
    }
}
