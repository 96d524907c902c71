//! Optional external cleanup of located ToC lines.
//!
//! A repair service receives the raw candidate lines and returns a
//! replacement list. The pipeline treats any failure or empty answer as
//! "no repair" and keeps the original lines.

use crate::error::Result;
use crate::llm::{LlmClient, Prompts};
use std::future::Future;

/// A service that can normalize raw ToC lines.
pub trait TocRepair {
    /// Return cleaned lines, in the same order as the input.
    fn repair(&self, lines: &[String]) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Leaves lines as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepair;

impl TocRepair for NoRepair {
    fn repair(&self, lines: &[String]) -> impl Future<Output = Result<Vec<String>>> + Send {
        let lines = lines.to_vec();
        async move { Ok(lines) }
    }
}

/// Repairs ToC lines with one LLM request.
#[derive(Clone)]
pub struct LlmTocRepair {
    client: LlmClient,
}

impl LlmTocRepair {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

impl TocRepair for LlmTocRepair {
    fn repair(&self, lines: &[String]) -> impl Future<Output = Result<Vec<String>>> + Send {
        let request = Prompts::repair_toc_request(lines);
        async move {
            let response = self
                .client
                .complete(Some(Prompts::system_toc_editor()), &request)
                .await?;
            Ok(parse_repaired_lines(&response))
        }
    }
}

/// Split a model answer into non-empty lines, dropping code fences.
pub fn parse_repaired_lines(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .map(str::to_string)
        .collect()
}
