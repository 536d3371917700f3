//! The per-turn record threaded through the brain pipeline.
//!
//! A [`TurnState`] is created once per utterance and moved through each
//! stage by value: every stage consumes the state it was given and returns
//! the next one. Fields that the pipeline treats as write-once are only
//! reachable through the `with_*` transitions below.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::tool::ToolResult;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Mood
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Conversational mood inferred for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    SupportiveCalm,
    FocusedDirect,
    AppreciatedSoft,
    CasualGreeting,
    #[default]
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::SupportiveCalm,
        Mood::FocusedDirect,
        Mood::AppreciatedSoft,
        Mood::CasualGreeting,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::SupportiveCalm => "supportive_calm",
            Mood::FocusedDirect => "focused_direct",
            Mood::AppreciatedSoft => "appreciated_soft",
            Mood::CasualGreeting => "casual_greeting",
            Mood::Neutral => "neutral",
        }
    }

    /// Parse a mood tag (case-insensitive, surrounding whitespace ignored).
    pub fn parse(raw: &str) -> Option<Self> {
        let tag = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == tag)
    }

    /// Soft moods may still be replaced by a persona exemplar's mood tag.
    /// `supportive_calm` and `focused_direct` are sticky once detected.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Mood::Neutral | Mood::CasualGreeting | Mood::AppreciatedSoft
        )
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Expert
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Persona/role the answer should be written from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Expert {
    #[default]
    General,
    Medical,
    Coding,
    HomeAutomation,
}

impl Expert {
    pub const ALL: [Expert; 4] = [
        Expert::General,
        Expert::Medical,
        Expert::Coding,
        Expert::HomeAutomation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Expert::General => "general",
            Expert::Medical => "medical",
            Expert::Coding => "coding",
            Expert::HomeAutomation => "home_automation",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let tag = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|e| e.as_str() == tag)
    }
}

impl fmt::Display for Expert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tool selection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Real-time tools the brain knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    Weather,
    Sports,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::Weather => "weather",
            ToolName::Sports => "sports",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much forecast to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    #[default]
    Short,
    Medium,
    Full,
}

impl DetailLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Short => "short",
            DetailLevel::Medium => "medium",
            DetailLevel::Full => "full",
        }
    }

    /// Number of forecast periods rendered at this level.
    pub fn period_count(&self) -> usize {
        match self {
            DetailLevel::Short => 1,
            DetailLevel::Medium => 3,
            DetailLevel::Full => 7,
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool-specific parameters extracted from the utterance.
///
/// Weather uses `location_name` + `detail_level`; sports uses `team_query`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_level: Option<DetailLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_query: Option<String>,
}

impl ToolArgs {
    pub fn weather(location_name: Option<String>, detail_level: DetailLevel) -> Self {
        Self {
            location_name,
            detail_level: Some(detail_level),
            team_query: None,
        }
    }

    pub fn sports(team_query: impl Into<String>) -> Self {
        Self {
            location_name: None,
            detail_level: None,
            team_query: Some(team_query.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.location_name.is_none() && self.detail_level.is_none() && self.team_query.is_none()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Retrieval bookkeeping
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// What the context assembler pulled in for the turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrieval {
    /// Long-term semantic memory text (already clamped).
    pub context: String,
    pub num_docs: usize,
    /// Prior-conversation text (already clamped).
    pub conversation_context: String,
    /// Rendered persona exemplar bullets.
    pub persona_context: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TurnState
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize)]
pub struct TurnState {
    text: String,
    user_id: String,
    trace_id: String,

    pub mood: Mood,
    pub target_expert: Expert,

    pub tool: Option<ToolName>,
    #[serde(skip_serializing_if = "ToolArgs::is_empty")]
    pub tool_args: ToolArgs,
    pub tool_result: Option<ToolResult>,
    pub tool_error: Option<String>,

    pub context: String,
    pub used_context: bool,
    pub num_docs: usize,
    pub conversation_context: String,
    pub used_conversation_context: bool,
    pub persona_context: String,

    pub answer: Option<String>,
}

impl TurnState {
    /// Start a new turn. Rejects empty / whitespace-only input.
    pub fn new(text: impl Into<String>, user_id: impl Into<String>) -> Result<Self> {
        let text = text.into().trim().to_owned();
        if text.is_empty() {
            return Err(Error::EmptyUtterance);
        }
        Ok(Self {
            text,
            user_id: user_id.into(),
            trace_id: uuid::Uuid::new_v4().to_string(),
            mood: Mood::Neutral,
            target_expert: Expert::General,
            tool: None,
            tool_args: ToolArgs::default(),
            tool_result: None,
            tool_error: None,
            context: String::new(),
            used_context: false,
            num_docs: 0,
            conversation_context: String::new(),
            used_conversation_context: false,
            persona_context: String::new(),
            answer: None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lower-cased copy of the utterance, the form every keyword detector reads.
    /// Typographic apostrophes become `'` so "can’t" matches "can't".
    pub fn lower(&self) -> String {
        self.text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    // ── stage transitions ────────────────────────────────────────────

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }

    pub fn with_expert(mut self, expert: Expert) -> Self {
        self.target_expert = expert;
        self
    }

    /// Select the tool for this turn. A second selection is ignored.
    pub fn with_tool(mut self, tool: ToolName, args: ToolArgs) -> Self {
        if self.tool.is_some() {
            tracing::warn!(
                existing = ?self.tool,
                requested = %tool,
                "tool already selected for this turn; ignoring"
            );
            return self;
        }
        self.tool = Some(tool);
        self.tool_args = args;
        self
    }

    /// Record the dispatcher's result; `tool_error` mirrors `ok == false`.
    pub fn with_tool_result(mut self, result: ToolResult) -> Self {
        self.tool_error = if result.ok {
            None
        } else {
            Some(
                result
                    .error
                    .clone()
                    .unwrap_or_else(|| "tool returned ok=false".into()),
            )
        };
        self.tool_result = Some(result);
        self
    }

    pub fn with_retrieval(mut self, retrieval: Retrieval) -> Self {
        self.used_context = !retrieval.context.is_empty();
        self.context = retrieval.context;
        self.num_docs = retrieval.num_docs;
        self.used_conversation_context = !retrieval.conversation_context.is_empty();
        self.conversation_context = retrieval.conversation_context;
        self.persona_context = retrieval.persona_context;
        self
    }

    /// Set the terminal answer. Only the first call takes effect.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        if self.answer.is_none() {
            self.answer = Some(answer.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_utterance_is_rejected() {
        assert!(matches!(TurnState::new("   ", "u"), Err(Error::EmptyUtterance)));
    }

    #[test]
    fn new_turn_has_defaults() {
        let state = TurnState::new("  hello there ", "ryan").unwrap();
        assert_eq!(state.text(), "hello there");
        assert_eq!(state.mood, Mood::Neutral);
        assert_eq!(state.target_expert, Expert::General);
        assert!(state.tool.is_none());
        assert!(state.tool_args.is_empty());
        assert!(state.answer.is_none());
        assert!(!state.trace_id().is_empty());
    }

    #[test]
    fn lower_normalizes_curly_apostrophes() {
        let state = TurnState::new("I Can\u{2019}t Cope", "u").unwrap();
        assert_eq!(state.lower(), "i can't cope");
    }

    #[test]
    fn tool_is_selected_at_most_once() {
        let state = TurnState::new("weather", "u")
            .unwrap()
            .with_tool(ToolName::Weather, ToolArgs::weather(None, DetailLevel::Short))
            .with_tool(ToolName::Sports, ToolArgs::sports("lions"));
        assert_eq!(state.tool, Some(ToolName::Weather));
        assert!(state.tool_args.team_query.is_none());
    }

    #[test]
    fn answer_is_write_once() {
        let state = TurnState::new("hi", "u")
            .unwrap()
            .with_answer("first")
            .with_answer("second");
        assert_eq!(state.answer.as_deref(), Some("first"));
    }

    #[test]
    fn failed_tool_result_sets_tool_error() {
        let state = TurnState::new("weather", "u")
            .unwrap()
            .with_tool_result(ToolResult::failed("boom"));
        assert_eq!(state.tool_error.as_deref(), Some("boom"));
    }

    #[test]
    fn mood_and_expert_tags_parse() {
        assert_eq!(Mood::parse(" Focused_Direct "), Some(Mood::FocusedDirect));
        assert_eq!(Mood::parse("grumpy"), None);
        assert_eq!(Expert::parse("home_automation"), Some(Expert::HomeAutomation));
        assert!(Mood::CasualGreeting.is_soft());
        assert!(!Mood::SupportiveCalm.is_soft());
    }
}
