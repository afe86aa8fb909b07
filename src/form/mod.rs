// src/form/mod.rs
pub mod mode;
pub mod test_cases;

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{EvaluationRequest, Language};
pub use mode::{InputMode, Section};
pub use test_cases::{RowId, TestCaseList, TestCaseRow};

static GITHUB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?github\.com/[\w.-]+/[\w.-]+(/.*)?$")
        .expect("github url pattern is valid")
});

/// Whether `url` points at a repository or file on GitHub.
pub fn is_github_url(url: &str) -> bool {
    GITHUB_URL.is_match(url.trim())
}

/// Every field value of the evaluation form.
///
/// Switching modes only changes which section is shown; no field is cleared.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    mode: InputMode,
    pub code_text: String,
    pub github_url: String,
    pub language: Language,
    pub problem_description: String,
    pub test_cases: TestCaseList,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn select_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            log::debug!("Input mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn is_section_visible(&self, section: Section) -> bool {
        self.mode.section() == section
    }

    /// The code the active mode supplies, untrimmed.
    pub fn resolved_code(&self) -> &str {
        if self.mode.reads_code_text() {
            &self.code_text
        } else {
            &self.github_url
        }
    }

    /// Builds the request for the current field values, or `None` when the
    /// active mode supplies only whitespace.
    pub fn build_request(&self) -> Option<EvaluationRequest> {
        let code = self.resolved_code();
        if code.trim().is_empty() {
            return None;
        }
        if self.mode == InputMode::Github && !is_github_url(code) {
            log::warn!("'{}' does not look like a GitHub URL; submitting it anyway", code.trim());
        }
        Some(EvaluationRequest {
            code: code.to_string(),
            language: self.language,
            problem_description: self.problem_description.clone(),
            test_cases: self.test_cases.collect(),
        })
    }
}
