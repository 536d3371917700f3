//! Context assembly: router hint, persona exemplars, long-term memory and
//! conversation memory, reconciled with the turn's mood and expert.
//!
//! Every lookup goes through [`BestEffort`], so a failing store yields an
//! empty result and the remaining lookups still run.

use dl_contextpack::{clamp_text, injection};
use dl_domain::config::PipelineConfig;
use dl_domain::trace::{TraceEvent, TurnObserver};
use dl_domain::turn::{Expert, Mood, Retrieval, TurnState};
use dl_memory::{BestEffort, Document, MemoryStores};

use crate::detect;

pub const LOOKUP_ROUTER: &str = "router_hints";
pub const LOOKUP_PERSONA: &str = "persona";
pub const LOOKUP_MEMORY: &str = "memory";
pub const LOOKUP_CONVERSATION: &str = "conversation";

const MEMORY_SEPARATOR: &str = "\n\n";
const CONVERSATION_SEPARATOR: &str = "\n---\n";

pub struct ContextAssembler<'a> {
    stores: &'a MemoryStores,
    cfg: &'a PipelineConfig,
    observer: &'a dyn TurnObserver,
}

impl<'a> ContextAssembler<'a> {
    pub fn new(
        stores: &'a MemoryStores,
        cfg: &'a PipelineConfig,
        observer: &'a dyn TurnObserver,
    ) -> Self {
        Self {
            stores,
            cfg,
            observer,
        }
    }

    /// Run every lookup in order and fold the results into the state.
    pub async fn assemble(&self, state: TurnState) -> TurnState {
        let state = self.apply_router_hint(state).await;
        let (state, persona_context) = self.apply_persona(state).await;
        let (context, num_docs) = self.long_term_memory(&state).await;
        let conversation_context = self.conversation_memory(&state).await;

        state.with_retrieval(Retrieval {
            context,
            num_docs,
            conversation_context,
            persona_context,
        })
    }

    // ── Router hint ──────────────────────────────────────────────────

    async fn apply_router_hint(&self, state: TurnState) -> TurnState {
        let best_effort = BestEffort::new(state.trace_id(), self.observer);
        let docs = best_effort
            .search_optional(
                LOOKUP_ROUTER,
                self.stores.router_hints.as_deref(),
                &user_scoped_query(&state),
                self.cfg.router_k,
            )
            .await;

        let Some(proposed) = docs
            .iter()
            .find_map(|d| d.meta_str("target_expert").and_then(Expert::parse))
        else {
            return state;
        };

        match accept_expert_hint(proposed, &state.lower()) {
            Ok(expert) if expert != state.target_expert => {
                self.observer.record(&TraceEvent::ExpertOverride {
                    trace_id: state.trace_id().to_owned(),
                    from: state.target_expert.to_string(),
                    to: expert.to_string(),
                });
                state.with_expert(expert)
            }
            Ok(_) => state,
            Err(reason) => {
                self.observer.record(&TraceEvent::ExpertHintRejected {
                    trace_id: state.trace_id().to_owned(),
                    proposed: proposed.to_string(),
                    reason: reason.to_owned(),
                });
                state
            }
        }
    }

    // ── Persona exemplars ────────────────────────────────────────────

    async fn apply_persona(&self, state: TurnState) -> (TurnState, String) {
        let best_effort = BestEffort::new(state.trace_id(), self.observer);
        let docs = best_effort
            .search_optional(
                LOOKUP_PERSONA,
                self.stores.persona.as_deref(),
                &user_scoped_query(&state),
                self.cfg.persona_k,
            )
            .await;
        if docs.is_empty() {
            return (state, String::new());
        }

        let state = match docs
            .iter()
            .find_map(|d| d.meta_str("mood").and_then(Mood::parse))
        {
            Some(tagged) => match persona_mood(state.mood, tagged) {
                Some(mood) => {
                    self.observer.record(&TraceEvent::MoodOverride {
                        trace_id: state.trace_id().to_owned(),
                        from: state.mood.to_string(),
                        to: mood.to_string(),
                    });
                    state.with_mood(mood)
                }
                None => state,
            },
            None => state,
        };

        let rendered = render_exemplars(&docs);
        let (persona, _) = clamp_text(&rendered, self.cfg.persona_max_chars);
        (state, persona)
    }

    // ── Long-term memory ─────────────────────────────────────────────

    async fn long_term_memory(&self, state: &TurnState) -> (String, usize) {
        let best_effort = BestEffort::new(state.trace_id(), self.observer);
        let docs = best_effort
            .search(
                LOOKUP_MEMORY,
                self.stores.knowledge.as_ref(),
                state.text(),
                self.cfg.memory_k,
            )
            .await;
        let joined = join_contents(&docs, MEMORY_SEPARATOR);
        let (context, _) = clamp_text(&joined, self.cfg.memory_max_chars);
        (context, docs.len())
    }

    // ── Conversation memory ──────────────────────────────────────────

    async fn conversation_memory(&self, state: &TurnState) -> String {
        if !detect::wants_conversation_memory(&state.lower()) {
            return String::new();
        }
        let best_effort = BestEffort::new(state.trace_id(), self.observer);
        let docs = best_effort
            .search_optional(
                LOOKUP_CONVERSATION,
                self.stores.conversation.as_deref(),
                &user_scoped_query(state),
                self.cfg.conversation_k,
            )
            .await;
        let joined = join_contents(&docs, CONVERSATION_SEPARATOR);
        clamp_text(&joined, self.cfg.conversation_max_chars).0
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Reconciliation rules
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A router hint for `coding` needs the coding detector to agree; any other
/// expert is taken as proposed.
pub fn accept_expert_hint(proposed: Expert, lower: &str) -> Result<Expert, &'static str> {
    if proposed == Expert::Coding && !detect::is_coding_query(lower) {
        return Err("coding hint without coding signal in utterance");
    }
    Ok(proposed)
}

/// The mood a persona exemplar's tag moves the turn to, if any. Only soft
/// moods may be replaced.
pub fn persona_mood(current: Mood, tagged: Mood) -> Option<Mood> {
    (current.is_soft() && tagged != current).then_some(tagged)
}

fn user_scoped_query(state: &TurnState) -> String {
    format!("user_id={}\n{}", state.user_id(), state.text())
}

fn render_exemplars(docs: &[Document]) -> String {
    docs.iter()
        .filter(|d| !d.content.trim().is_empty())
        .map(|d| injection::format_exemplar_line(&d.content, &d.metadata))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_contents(docs: &[Document], separator: &str) -> String {
    docs.iter()
        .map(|d| d.content.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
