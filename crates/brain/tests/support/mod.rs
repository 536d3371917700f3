#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use dl_brain::Brain;
use dl_domain::config::PipelineConfig;
use dl_domain::error::{Error, Result};
use dl_domain::tool::{ToolPayload, ToolResult, WeatherReport};
use dl_domain::trace::{TraceEvent, TurnObserver};
use dl_domain::turn::{DetailLevel, ToolArgs, ToolName};
use dl_memory::{Document, MemoryStores, SimilaritySearch};
use dl_providers::Generator;
use dl_tools::{SportsTool, Tool, ToolDispatcher};

// ── Observer ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Recorder(Mutex<Vec<TraceEvent>>);

impl Recorder {
    pub fn events(&self) -> Vec<TraceEvent> {
        self.0.lock().clone()
    }
}

impl TurnObserver for Recorder {
    fn record(&self, event: &TraceEvent) {
        self.0.lock().push(event.clone());
    }
}

// ── Similarity store ─────────────────────────────────────────────────

pub struct FakeStore {
    name: String,
    docs: Vec<Document>,
    fail: bool,
    pub queries: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn with_docs(name: &str, docs: Vec<Document>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            docs,
            fail: false,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            docs: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SimilaritySearch for FakeStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        self.queries.lock().push(query.to_owned());
        if self.fail {
            return Err(Error::Memory {
                store: self.name.clone(),
                message: "connection refused".into(),
            });
        }
        Ok(self.docs.iter().take(k).cloned().collect())
    }
}

// ── Generator ────────────────────────────────────────────────────────

pub struct FakeGenerator {
    fail: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().last().cloned().unwrap_or_default()
    }
}

pub const CANNED_ANSWER: &str = "Here is what I found.";

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_owned());
        if self.fail {
            return Err(Error::Timeout("ollama".into()));
        }
        Ok(CANNED_ANSWER.to_owned())
    }

    fn provider_id(&self) -> &str {
        "fake:model"
    }
}

// ── Weather tool ─────────────────────────────────────────────────────

/// Reports a fixed forecast and remembers the arguments it was called with.
#[derive(Default)]
pub struct FakeWeather {
    pub calls: Mutex<Vec<ToolArgs>>,
}

#[async_trait]
impl Tool for FakeWeather {
    fn name(&self) -> ToolName {
        ToolName::Weather
    }

    async fn run(&self, args: &ToolArgs, _query: &str) -> Result<ToolResult> {
        self.calls.lock().push(args.clone());
        let label = args
            .location_name
            .clone()
            .unwrap_or_else(|| "Rockford".into());
        Ok(ToolResult::success(ToolPayload::Weather(WeatherReport {
            summary: "Tonight: 41°F, Clear.".into(),
            detail_level: args.detail_level.unwrap_or(DetailLevel::Short),
            location_name: args.location_name.clone(),
            location_label: label,
        })))
    }
}

// ── Harness ──────────────────────────────────────────────────────────

pub struct Harness {
    pub brain: Brain,
    pub generator: Arc<FakeGenerator>,
    pub observer: Arc<Recorder>,
    pub weather: Arc<FakeWeather>,
}

pub fn harness(stores: MemoryStores) -> Harness {
    harness_with(stores, FakeGenerator::ok())
}

pub fn harness_with(stores: MemoryStores, generator: Arc<FakeGenerator>) -> Harness {
    let weather = Arc::new(FakeWeather::default());
    let dispatcher = ToolDispatcher::new()
        .register(weather.clone())
        .register(Arc::new(SportsTool));
    let observer = Arc::new(Recorder::default());
    let brain = Brain::new(
        PipelineConfig::default(),
        Arc::new(dispatcher),
        stores,
        generator.clone(),
        observer.clone(),
    );
    Harness {
        brain,
        generator,
        observer,
        weather,
    }
}

pub fn empty_stores() -> MemoryStores {
    MemoryStores::knowledge_only(FakeStore::with_docs("delilah_knowledge", Vec::new()))
}
