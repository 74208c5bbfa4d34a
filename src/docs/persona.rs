//! Documentation viewpoints.

/// A fixed documentation viewpoint: who the text is for and what it stresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    name: String,
    framing: String,
}

const ARCHITECT_FRAMING: &str = "You are a software architect with expertise in multiple \
programming languages. Your job is to analyze the structure, architecture, and design decisions \
in the given code. Provide high-level insights like how components are organized, design \
patterns used, responsibilities of modules, and relationships between classes, functions, \
interfaces, traits, or other language-specific constructs. Consider language-specific \
architectural patterns and best practices. Avoid diving too deep into implementation details.";

const DEVELOPER_FRAMING: &str = "You are a senior software developer with expertise in multiple \
programming languages. Your goal is to explain the logic and flow of the code at a technical \
level. Focus on how functions work, class responsibilities, input/output behavior, and any edge \
cases. Explain how the components interact and mention relevant libraries or APIs used. \
Consider language-specific features, syntax, and conventions. Avoid overly high-level or \
overly simplified descriptions.";

const USER_FRAMING: &str = "You are a helpful assistant explaining code in multiple programming \
languages to someone with basic or no programming knowledge. Summarize what the code is trying \
to do in simple language. Avoid technical jargon. Use analogies or everyday language when \
possible. Mention the programming language being used and explain any language-specific \
concepts in simple terms. The goal is to make the code understandable to non-developers or \
beginners.";

impl Persona {
    pub fn new(name: impl Into<String>, framing: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            framing: framing.into(),
        }
    }

    /// Structure, design patterns, module responsibilities
    pub fn architect() -> Self {
        Self::new("Architect Agent", ARCHITECT_FRAMING)
    }

    /// Logic, control flow, inputs/outputs, edge cases
    pub fn developer() -> Self {
        Self::new("Developer Agent", DEVELOPER_FRAMING)
    }

    /// Plain-language summary for non-programmers
    pub fn user() -> Self {
        Self::new("User Agent", USER_FRAMING)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn framing(&self) -> &str {
        &self.framing
    }
}

/// The three built-in personas, in evaluation order.
pub fn default_personas() -> Vec<Persona> {
    vec![Persona::architect(), Persona::developer(), Persona::user()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_and_names() {
        let names: Vec<_> = default_personas()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Architect Agent", "Developer Agent", "User Agent"]);
    }

    #[test]
    fn test_framings_are_distinct() {
        let personas = default_personas();
        assert!(personas[0].framing().contains("architect"));
        assert!(personas[1].framing().contains("edge cases"));
        assert!(personas[2].framing().contains("non-developers"));
        assert!(!personas[0].framing().contains("  "));
    }
}
