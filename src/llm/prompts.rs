//! Prompt text for the ToC repair pass.

/// Collection of prompts sent to the LLM.
pub struct Prompts;

impl Prompts {
    /// Instruction placed before the raw ToC lines.
    pub fn repair_toc() -> &'static str {
        "Fix and normalize this Table of Contents to one entry per line as 'NUMBER TITLE .... PAGE', keep order, no extra text."
    }

    /// System prompt for ToC cleanup.
    pub fn system_toc_editor() -> &'static str {
        "You are a careful editor of document tables of contents. You only reformat lines; you never invent entries or page numbers."
    }

    /// Build the full repair request for a list of raw lines.
    pub fn repair_toc_request<S: AsRef<str>>(lines: &[S]) -> String {
        let joined = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\n{}", Self::repair_toc(), joined)
    }
}
