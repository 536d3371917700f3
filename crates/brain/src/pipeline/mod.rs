//! The four-stage turn pipeline.
//!
//! mood → tool intent → tool execution → context assembly + generation.
//! Data only flows forward; no stage re-enters an earlier one.

pub mod assembler;
pub mod stages;
pub mod summary;

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use dl_contextpack::{PromptBuilder, PromptReport};
use dl_domain::config::PipelineConfig;
use dl_domain::error::Result;
use dl_domain::trace::{TraceEvent, TurnObserver};
use dl_domain::turn::TurnState;
use dl_memory::MemoryStores;
use dl_providers::Generator;
use dl_tools::ToolDispatcher;

pub use assembler::ContextAssembler;
pub use summary::TurnSummary;

/// Answer used when the generation collaborator fails.
pub const FALLBACK_ANSWER: &str = "I ran into an internal dependency error. Please try again.";

/// Everything a finished turn produced.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub state: TurnState,
    pub prompt: String,
    pub report: PromptReport,
}

impl TurnOutcome {
    pub fn answer(&self) -> &str {
        self.state.answer.as_deref().unwrap_or_default()
    }
}

/// The turn pipeline and its collaborators. Holds no per-turn state, so one
/// `Brain` serves concurrent turns.
pub struct Brain {
    cfg: PipelineConfig,
    dispatcher: Arc<ToolDispatcher>,
    stores: MemoryStores,
    generator: Arc<dyn Generator>,
    observer: Arc<dyn TurnObserver>,
    builder: PromptBuilder,
}

impl Brain {
    pub fn new(
        cfg: PipelineConfig,
        dispatcher: Arc<ToolDispatcher>,
        stores: MemoryStores,
        generator: Arc<dyn Generator>,
        observer: Arc<dyn TurnObserver>,
    ) -> Self {
        let builder = PromptBuilder::new(cfg.assistant_name.clone());
        Self {
            cfg,
            dispatcher,
            stores,
            generator,
            observer,
            builder,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    pub fn stores(&self) -> &MemoryStores {
        &self.stores
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    pub fn generator_id(&self) -> &str {
        self.generator.provider_id()
    }

    /// Run one turn. The only error is an empty utterance; every failure
    /// after that degrades the turn instead of aborting it.
    pub async fn run_turn(&self, text: &str, user_id: Option<&str>) -> Result<TurnOutcome> {
        let user_id = user_id
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.cfg.default_user_id.as_str());
        let state = TurnState::new(text, user_id)?;
        let observer = self.observer.as_ref();
        let trace_id = state.trace_id().to_owned();

        observer.record(&TraceEvent::TurnStarted {
            trace_id: trace_id.clone(),
            user_id: state.user_id().to_owned(),
            text_chars: state.text().chars().count(),
        });

        // ── 1. mood ──
        let state = stages::detect_mood(state);
        observer.record(&TraceEvent::MoodDetected {
            trace_id: trace_id.clone(),
            mood: state.mood.to_string(),
        });

        // ── 2. tool intent ──
        let state = stages::detect_tool_intent(state);
        if let Some(tool) = state.tool {
            observer.record(&TraceEvent::ToolSelected {
                trace_id: trace_id.clone(),
                tool: tool.to_string(),
                args: serde_json::to_value(&state.tool_args).unwrap_or_default(),
            });
        }

        // ── 3. tool execution ──
        let state = stages::execute_tool(state, &self.dispatcher, observer).await;

        // ── 4. context + generation ──
        let state = ContextAssembler::new(&self.stores, &self.cfg, observer)
            .assemble(state)
            .await;
        let (prompt, report) = self.builder.build(&state);
        observer.record(&TraceEvent::PromptBuilt {
            trace_id: trace_id.clone(),
            prompt_chars: report.total_chars,
            persona_chars: report.persona_chars,
            memory_chars: report.memory_chars,
            conversation_chars: report.conversation_chars,
        });

        let answer = self.generate(&trace_id, &prompt).await;
        let state = state.with_answer(answer);

        tracing::info!(
            trace_id = %trace_id,
            mood = %state.mood,
            expert = %state.target_expert,
            tool = ?state.tool,
            num_docs = state.num_docs,
            "turn complete"
        );

        Ok(TurnOutcome {
            state,
            prompt,
            report,
        })
    }

    async fn generate(&self, trace_id: &str, prompt: &str) -> String {
        let provider = self.generator.provider_id().to_owned();
        let started = Instant::now();
        match self.generator.generate(prompt).await {
            Ok(answer) => {
                self.observer.record(&TraceEvent::GenerationCompleted {
                    trace_id: trace_id.to_owned(),
                    provider,
                    duration_ms: started.elapsed().as_millis() as u64,
                    answer_chars: answer.chars().count(),
                });
                answer
            }
            Err(e) => {
                tracing::error!(trace_id = %trace_id, error = %e, "generation failed");
                self.observer.record(&TraceEvent::GenerationFailed {
                    trace_id: trace_id.to_owned(),
                    provider,
                    error: e.to_string(),
                });
                FALLBACK_ANSWER.to_owned()
            }
        }
    }
}
