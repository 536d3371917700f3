use dl_domain::turn::TurnState;

use crate::guidelines;
use crate::injection::{self, format_section, or_placeholder};
use crate::report::{PromptReport, SectionReport};

pub const SECTION_MOOD: &str = "MOOD";
pub const SECTION_EXPERT: &str = "EXPERT_ROLE";
pub const SECTION_PERSONA: &str = "PERSONA";
pub const SECTION_TOOL: &str = "TOOL_RESULT";
pub const SECTION_CONVERSATION: &str = "PRIOR_CONVERSATION";
pub const SECTION_MEMORY: &str = "SEMANTIC_MEMORY";
pub const SECTION_USER: &str = "USER";

/// Deterministic instruction-block builder.
///
/// Pure function of the turn state: retrieval text is expected to be
/// clamped already. Returns the assembled prompt and a report.
pub struct PromptBuilder {
    assistant_name: String,
}

impl PromptBuilder {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    pub fn build(&self, state: &TurnState) -> (String, PromptReport) {
        let tool_line = injection::format_tool_line(
            state.tool,
            state.tool_result.as_ref(),
            state.tool_error.as_deref(),
        );

        let sections: [(&str, &str, bool); 7] = [
            (SECTION_MOOD, guidelines::mood_guideline(state.mood), false),
            (
                SECTION_EXPERT,
                guidelines::expert_guideline(state.target_expert),
                false,
            ),
            (
                SECTION_PERSONA,
                or_placeholder(&state.persona_context, injection::NO_PERSONA_PLACEHOLDER),
                state.persona_context.trim().is_empty(),
            ),
            (SECTION_TOOL, tool_line.as_str(), state.tool.is_none()),
            (
                SECTION_CONVERSATION,
                or_placeholder(
                    &state.conversation_context,
                    injection::NO_CONVERSATION_PLACEHOLDER,
                ),
                state.conversation_context.trim().is_empty(),
            ),
            (
                SECTION_MEMORY,
                or_placeholder(&state.context, injection::NO_MEMORY_PLACEHOLDER),
                state.context.trim().is_empty(),
            ),
            (SECTION_USER, state.text(), false),
        ];

        let mut prompt = format!(
            "You are {name}, a personal voice assistant. Answer the user's latest message \
             using the guidance below. Reply in plain conversational text.\n\n",
            name = self.assistant_name
        );
        let mut report = PromptReport::default();

        for (name, body, placeholder) in sections {
            prompt.push_str(&format_section(name, body));
            prompt.push('\n');
            report.sections.push(SectionReport {
                name: name.to_string(),
                chars: body.chars().count(),
                placeholder,
            });
        }
        prompt.push_str(&format!("{}:", self.assistant_name));

        report.persona_chars = state.persona_context.chars().count();
        report.memory_chars = state.context.chars().count();
        report.conversation_chars = state.conversation_context.chars().count();
        report.total_chars = prompt.chars().count();

        tracing::debug!(
            trace_id = %state.trace_id(),
            prompt_chars = report.total_chars,
            "instruction block built"
        );

        (prompt, report)
    }
}
