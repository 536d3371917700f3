use serde::{Deserialize, Serialize};

/// One section of the instruction block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub name: String,
    /// Characters of the section body as injected.
    pub chars: usize,
    /// True if the body is a placeholder rather than retrieved text.
    pub placeholder: bool,
}

/// Machine-readable report of an instruction block build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptReport {
    pub sections: Vec<SectionReport>,
    pub persona_chars: usize,
    pub memory_chars: usize,
    pub conversation_chars: usize,
    pub total_chars: usize,
}

impl PromptReport {
    pub fn section(&self, name: &str) -> Option<&SectionReport> {
        self.sections.iter().find(|s| s.name == name)
    }
}
