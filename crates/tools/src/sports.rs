//! Sports tool.
//!
//! The free team/event source this used to call returned stale or wrong
//! schedules, so the tool only normalizes the team query and reports that
//! live data is unavailable. It must never invent a schedule.

use dl_domain::error::Result;
use dl_domain::tool::{SportsReport, ToolPayload, ToolResult};
use dl_domain::turn::{ToolArgs, ToolName};

use crate::dispatcher::Tool;

pub const SPORTS_UNAVAILABLE_ERROR: &str = "sports data source unavailable";

#[derive(Debug, Clone, Copy, Default)]
pub struct SportsTool;

impl SportsTool {
    pub fn lookup(&self, team_query: &str) -> ToolResult {
        let team_query = normalize_team_query(team_query);
        let summary = if team_query.is_empty() {
            "I don't have a reliable live sports source right now, so I can't confirm schedules or scores.".to_owned()
        } else {
            format!(
                "I don't have a reliable live sports source right now, so I can't confirm the schedule or scores for {team_query}."
            )
        };
        ToolResult::failed_with(
            SPORTS_UNAVAILABLE_ERROR,
            ToolPayload::Sports(SportsReport {
                summary,
                team_query,
                team: None,
                next_event: None,
                last_event: None,
            }),
        )
    }
}

#[async_trait::async_trait]
impl Tool for SportsTool {
    fn name(&self) -> ToolName {
        ToolName::Sports
    }

    async fn run(&self, args: &ToolArgs, query: &str) -> Result<ToolResult> {
        let team = args.team_query.as_deref().unwrap_or(query);
        Ok(self.lookup(team))
    }
}

/// Lower-case, collapse whitespace, drop surrounding punctuation.
pub fn normalize_team_query(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_lookup_is_unavailable() {
        for q in ["detroit lions", "", "  Red   Wings!! ", "who won the world series"] {
            let result = SportsTool.lookup(q);
            assert!(!result.ok, "query {q:?} must not succeed");
            let ToolPayload::Sports(report) = &result.payload else {
                panic!("expected sports payload");
            };
            assert!(report.team.is_none());
            assert!(report.next_event.is_none());
            assert!(report.last_event.is_none());
            assert!(!report.summary.is_empty());
        }
    }

    #[test]
    fn team_query_is_normalized() {
        assert_eq!(normalize_team_query("  Red   Wings!! "), "red wings");
        assert_eq!(normalize_team_query("?"), "");
    }

    #[tokio::test]
    async fn run_prefers_extracted_team() {
        let result = SportsTool
            .run(&ToolArgs::sports("tigers"), "when do the tigers play next")
            .await
            .unwrap();
        let ToolPayload::Sports(report) = result.payload else {
            panic!("expected sports payload");
        };
        assert_eq!(report.team_query, "tigers");
    }
}
