//! `dl-brain`: the Delilah turn pipeline and its outer surfaces.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod detect;
pub mod pipeline;
pub mod state;

pub use pipeline::{Brain, TurnOutcome, TurnSummary, FALLBACK_ANSWER};
