mod support;

use std::sync::Arc;

use dl_brain::FALLBACK_ANSWER;
use dl_contextpack::guidelines::{expert_guideline, mood_guideline};
use dl_contextpack::injection;
use dl_domain::error::Error;
use dl_domain::trace::TraceEvent;
use dl_domain::turn::{DetailLevel, Expert, Mood, ToolName};
use dl_memory::{Document, MemoryStores};

use support::*;

#[tokio::test]
async fn overwhelmed_user_gets_supportive_prompt() {
    let h = harness(empty_stores());
    let outcome = h
        .brain
        .run_turn("I'm feeling really overwhelmed, can you help?", Some("ryan"))
        .await
        .unwrap();

    assert_eq!(outcome.state.mood, Mood::SupportiveCalm);
    assert_eq!(outcome.state.tool, None);
    assert!(outcome
        .prompt
        .contains(mood_guideline(Mood::SupportiveCalm)));
    assert_eq!(outcome.answer(), CANNED_ANSWER);
    assert_eq!(h.generator.last_prompt(), outcome.prompt);
}

#[tokio::test]
async fn weather_turn_runs_tool_with_extracted_args() {
    let h = harness(empty_stores());
    let outcome = h
        .brain
        .run_turn("What's the weather in Chicago right now?", None)
        .await
        .unwrap();

    assert_eq!(outcome.state.tool, Some(ToolName::Weather));
    let calls = h.weather.calls.lock().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].location_name.as_deref(), Some("Chicago"));
    assert_eq!(calls[0].detail_level, Some(DetailLevel::Short));

    let result = outcome.state.tool_result.as_ref().unwrap();
    assert!(result.ok);
    assert!(outcome.state.tool_error.is_none());
    assert!(outcome.prompt.contains("Weather for Chicago"));
}

#[tokio::test]
async fn sports_turn_reports_unavailable_and_still_answers() {
    let h = harness(empty_stores());
    let outcome = h
        .brain
        .run_turn("When do the Lions play next?", None)
        .await
        .unwrap();

    assert_eq!(outcome.state.tool, Some(ToolName::Sports));
    let result = outcome.state.tool_result.as_ref().unwrap();
    assert!(!result.ok);
    assert!(outcome.state.tool_error.is_some());
    assert!(outcome.prompt.contains("Do not invent"));
    assert_eq!(outcome.answer(), CANNED_ANSWER);
}

#[tokio::test]
async fn coding_hint_ignored_for_non_technical_utterance() {
    let hints = FakeStore::with_docs(
        "router_hints",
        vec![Document::new("recipe ideas").with_meta("target_expert", "coding")],
    );
    let mut stores = empty_stores();
    stores.router_hints = Some(hints.clone());
    let h = harness(stores);

    let outcome = h
        .brain
        .run_turn("what should I make for dinner tonight", Some("ryan"))
        .await
        .unwrap();

    assert_eq!(outcome.state.target_expert, Expert::General);
    assert!(h
        .observer
        .events()
        .iter()
        .any(|e| matches!(e, TraceEvent::ExpertHintRejected { proposed, .. } if proposed == "coding")));
    assert_eq!(
        hints.queries(),
        vec!["user_id=ryan\nwhat should I make for dinner tonight".to_owned()]
    );
}

#[tokio::test]
async fn coding_hint_honored_with_coding_signal() {
    let mut stores = empty_stores();
    stores.router_hints = Some(FakeStore::with_docs(
        "router_hints",
        vec![Document::new("debugging").with_meta("target_expert", "coding")],
    ));
    let h = harness(stores);

    let outcome = h
        .brain
        .run_turn("why does my python script throw a traceback", None)
        .await
        .unwrap();

    assert_eq!(outcome.state.target_expert, Expert::Coding);
    assert!(outcome.prompt.contains(expert_guideline(Expert::Coding)));
}

#[tokio::test]
async fn medical_hint_is_always_honored() {
    let mut stores = empty_stores();
    stores.router_hints = Some(FakeStore::with_docs(
        "router_hints",
        vec![Document::new("symptoms").with_meta("target_expert", "medical")],
    ));
    let h = harness(stores);

    let outcome = h
        .brain
        .run_turn("my knee has been sore for a week", None)
        .await
        .unwrap();

    assert_eq!(outcome.state.target_expert, Expert::Medical);
    assert!(outcome.prompt.contains("must not diagnose"));
}

#[tokio::test]
async fn persona_mood_never_overrides_focused_direct() {
    let mut stores = empty_stores();
    stores.persona = Some(FakeStore::with_docs(
        "persona_memory",
        vec![Document::new("Keep it breezy.").with_meta("mood", "casual_greeting")],
    ));
    let h = harness(stores);

    let outcome = h
        .brain
        .run_turn("quick, how many ounces in a cup", None)
        .await
        .unwrap();

    assert_eq!(outcome.state.mood, Mood::FocusedDirect);
    assert!(outcome
        .prompt
        .contains("- Keep it breezy. [mood=casual_greeting]"));
    assert!(!h
        .observer
        .events()
        .iter()
        .any(|e| matches!(e, TraceEvent::MoodOverride { .. })));
}

#[tokio::test]
async fn persona_mood_upgrades_soft_mood() {
    let mut stores = empty_stores();
    stores.persona = Some(FakeStore::with_docs(
        "persona_memory",
        vec![Document::new("Answer in one line.").with_meta("mood", "focused_direct")],
    ));
    let h = harness(stores);

    let outcome = h
        .brain
        .run_turn("how many ounces in a cup", None)
        .await
        .unwrap();

    assert_eq!(outcome.state.mood, Mood::FocusedDirect);
    assert!(outcome.prompt.contains(mood_guideline(Mood::FocusedDirect)));
}

#[tokio::test]
async fn failing_stores_degrade_to_placeholders() {
    let mut stores = MemoryStores::knowledge_only(FakeStore::failing("delilah_knowledge"));
    stores.persona = Some(FakeStore::failing("persona_memory"));
    stores.router_hints = Some(FakeStore::failing("router_hints"));
    let h = harness(stores);

    let outcome = h.brain.run_turn("tell me about the moon", None).await.unwrap();

    assert!(!outcome.state.used_context);
    assert_eq!(outcome.state.num_docs, 0);
    assert!(outcome.prompt.contains(injection::NO_MEMORY_PLACEHOLDER));
    assert!(outcome.prompt.contains(injection::NO_PERSONA_PLACEHOLDER));
    assert_eq!(outcome.answer(), CANNED_ANSWER);

    let failed: Vec<String> = h
        .observer
        .events()
        .into_iter()
        .filter_map(|e| match e {
            TraceEvent::LookupFailed { lookup, .. } => Some(lookup),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec!["router_hints", "persona", "memory"]);
}

#[tokio::test]
async fn one_failing_lookup_leaves_the_others_in_the_prompt() {
    let mut stores = MemoryStores::knowledge_only(FakeStore::with_docs(
        "delilah_knowledge",
        vec![Document::new("The moon is about 384,400 km away.")],
    ));
    stores.persona = Some(FakeStore::with_docs(
        "persona_memory",
        vec![Document::new("Sound curious.").with_meta("tone", "playful")],
    ));
    stores.router_hints = Some(FakeStore::failing("router_hints"));
    let h = harness(stores);

    let outcome = h.brain.run_turn("tell me about the moon", None).await.unwrap();

    assert!(outcome.prompt.contains("- Sound curious. [tone=playful]"));
    assert!(outcome.prompt.contains("The moon is about 384,400 km away."));
    assert!(outcome.state.used_context);
    assert!(outcome.state.num_docs > 0);
    assert_eq!(outcome.state.target_expert, Expert::General);

    let failed: Vec<String> = h
        .observer
        .events()
        .into_iter()
        .filter_map(|e| match e {
            TraceEvent::LookupFailed { lookup, .. } => Some(lookup),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec!["router_hints"]);
}

#[tokio::test]
async fn memory_is_joined_and_clamped() {
    let long = "x".repeat(4000);
    let stores = MemoryStores::knowledge_only(FakeStore::with_docs(
        "delilah_knowledge",
        vec![Document::new("The NUC lives in the closet."), Document::new(long)],
    ));
    let h = harness(stores);

    let outcome = h.brain.run_turn("where is the nuc", None).await.unwrap();

    assert!(outcome.state.used_context);
    assert_eq!(outcome.state.num_docs, 2);
    assert!(outcome
        .state
        .context
        .starts_with("The NUC lives in the closet.\n\nxxx"));
    assert!(outcome.state.context.ends_with("...[truncated]..."));
    assert!(outcome.state.context.chars().count() <= 2500);
}

#[tokio::test]
async fn conversation_memory_only_when_referenced() {
    let conversation = FakeStore::with_docs(
        "conversation_memory",
        vec![
            Document::new("user: I'm going to Lisbon in May"),
            Document::new("assistant: Noted!"),
        ],
    );
    let mut stores = empty_stores();
    stores.conversation = Some(conversation.clone());
    let h = harness(stores);

    let outcome = h
        .brain
        .run_turn("tell me about the moon", Some("sam"))
        .await
        .unwrap();
    assert!(!outcome.state.used_conversation_context);
    assert!(conversation.queries().is_empty());
    assert!(outcome.prompt.contains(injection::NO_CONVERSATION_PLACEHOLDER));

    let outcome = h
        .brain
        .run_turn("what did I say about my trip?", Some("sam"))
        .await
        .unwrap();
    assert!(outcome.state.used_conversation_context);
    assert_eq!(
        outcome.state.conversation_context,
        "user: I'm going to Lisbon in May\n---\nassistant: Noted!"
    );
    assert_eq!(
        conversation.queries(),
        vec!["user_id=sam\nwhat did I say about my trip?".to_owned()]
    );
}

#[tokio::test]
async fn generation_failure_uses_fallback_answer() {
    let h = harness_with(empty_stores(), FakeGenerator::failing());

    let outcome = h.brain.run_turn("hello there", None).await.unwrap();

    assert_eq!(outcome.answer(), FALLBACK_ANSWER);
    assert!(h
        .observer
        .events()
        .iter()
        .any(|e| matches!(e, TraceEvent::GenerationFailed { provider, .. } if provider == "fake:model")));
}

#[tokio::test]
async fn empty_utterance_is_rejected_before_any_stage() {
    let h = harness(empty_stores());
    let err = h.brain.run_turn("   ", None).await.unwrap_err();
    assert!(matches!(err, Error::EmptyUtterance));
    assert!(h.observer.events().is_empty());
    assert!(h.generator.prompts.lock().is_empty());
}

#[tokio::test]
async fn missing_user_id_uses_default() {
    let knowledge = FakeStore::with_docs("delilah_knowledge", Vec::new());
    let mut stores = MemoryStores::knowledge_only(knowledge);
    let persona = FakeStore::with_docs("persona_memory", Vec::new());
    stores.persona = Some(persona.clone());
    let h = harness(stores);

    let outcome = h.brain.run_turn("hi", Some("  ")).await.unwrap();

    assert_eq!(outcome.state.user_id(), "default_user");
    assert_eq!(persona.queries(), vec!["user_id=default_user\nhi".to_owned()]);
}

#[tokio::test]
async fn trace_events_follow_stage_order() {
    let h = harness(empty_stores());
    h.brain
        .run_turn("what's the forecast this week", None)
        .await
        .unwrap();

    let kinds: Vec<&'static str> = h
        .observer
        .events()
        .iter()
        .map(|e| match e {
            TraceEvent::TurnStarted { .. } => "started",
            TraceEvent::MoodDetected { .. } => "mood",
            TraceEvent::ToolSelected { .. } => "tool_selected",
            TraceEvent::ToolExecuted { .. } => "tool_executed",
            TraceEvent::LookupCompleted { .. } => "lookup",
            TraceEvent::PromptBuilt { .. } => "prompt",
            TraceEvent::GenerationCompleted { .. } => "generated",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "started",
            "mood",
            "tool_selected",
            "tool_executed",
            "lookup",
            "prompt",
            "generated"
        ]
    );
    assert_eq!(
        h.weather.calls.lock()[0].detail_level,
        Some(DetailLevel::Full)
    );
}

#[tokio::test]
async fn concurrent_turns_share_one_brain() {
    let h = Arc::new(harness(empty_stores()));
    let a = {
        let h = h.clone();
        tokio::spawn(async move { h.brain.run_turn("hello", None).await.map(|o| o.state.mood) })
    };
    let b = {
        let h = h.clone();
        tokio::spawn(async move {
            h.brain
                .run_turn("thanks so much!", None)
                .await
                .map(|o| o.state.mood)
        })
    };
    assert_eq!(a.await.unwrap().unwrap(), Mood::CasualGreeting);
    assert_eq!(b.await.unwrap().unwrap(), Mood::AppreciatedSoft);
}
