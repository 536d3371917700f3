pub mod builder;
pub mod guidelines;
pub mod injection;
pub mod report;
pub mod truncation;

pub use builder::PromptBuilder;
pub use report::{PromptReport, SectionReport};
pub use truncation::clamp_text;
