// src/models.rs
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::ClientError;

/// Languages the evaluation service knows how to score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    Java,
    Cpp,
    C,
    Javascript,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::C,
        Language::Javascript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Javascript => "javascript",
        }
    }

    /// Human readable label used by the form's language selector.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Javascript => "JavaScript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == wanted)
            .ok_or_else(|| ClientError::UnknownLanguage(s.to_string()))
    }
}

/// A (function call, expected output) pair checked by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub function_call: String,
    pub expected: String,
}

impl TestCase {
    pub fn new(function_call: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            function_call: function_call.into(),
            expected: expected.into(),
        }
    }
}

/// Body of `POST /api/evaluate`, built fresh from the form on every submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub code: String,
    pub language: Language,
    pub problem_description: String,
    pub test_cases: Vec<TestCase>,
}

/// Score report produced by the evaluation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub overall_score: f64,
    pub correctness_score: f64,
    pub quality_score: f64,
    pub efficiency_score: f64,
    pub readability_score: f64,
    pub edge_cases_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub feedback: Feedback,
}

/// Detailed feedback grouped by category.
///
/// Categories keep the order in which the service sent them, which a
/// `HashMap` would lose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback(Vec<(String, Vec<String>)>);

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends items to `category`, creating it at the end if needed.
    pub fn push(&mut self, category: impl Into<String>, items: Vec<String>) {
        let category = category.into();
        match self.0.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => existing.extend(items),
            None => self.0.push((category, items)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for Feedback {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut feedback = Feedback::new();
        for (category, items) in iter {
            feedback.push(category, items);
        }
        feedback
    }
}

impl Serialize for Feedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, items) in &self.0 {
            map.serialize_entry(category, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Feedback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FeedbackVisitor;

        impl<'de> Visitor<'de> for FeedbackVisitor {
            type Value = Feedback;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from feedback category to a list of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Feedback, A::Error> {
                let mut feedback = Feedback::new();
                while let Some((category, items)) = access.next_entry::<String, Vec<String>>()? {
                    feedback.push(category, items);
                }
                Ok(feedback)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Feedback, E> {
                Ok(Feedback::new())
            }
        }

        deserializer.deserialize_any(FeedbackVisitor)
    }
}

/// Envelope returned by `POST /api/evaluate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<EvaluationResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envelope returned by `POST /api/upload`.
///
/// The upload endpoint omits `success` on its 400 responses, so a missing flag
/// reads as a failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_parsing() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!(" CPP ".parse::<Language>().unwrap(), Language::Cpp);
        assert!(matches!(
            "cobol".parse::<Language>(),
            Err(ClientError::UnknownLanguage(name)) if name == "cobol"
        ));
    }

    #[test]
    fn test_request_serializes_language_as_lowercase_string() {
        let request = EvaluationRequest {
            code: "print(1)".to_string(),
            language: Language::Javascript,
            problem_description: String::new(),
            test_cases: vec![TestCase::new("f(1)", "2")],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["language"], "javascript");
        assert_eq!(value["test_cases"][0]["function_call"], "f(1)");
        assert_eq!(value["test_cases"][0]["expected"], "2");
    }

    #[test]
    fn test_feedback_keeps_response_order() {
        let result: EvaluationResult = serde_json::from_value(json!({
            "overall_score": 72.5,
            "correctness_score": 80,
            "quality_score": 70,
            "efficiency_score": 65,
            "readability_score": 90,
            "edge_cases_score": 40,
            "strengths": ["Clear names"],
            "suggestions": [],
            "feedback": {
                "readability": ["Good spacing"],
                "correctness": ["Passed 3/4 tests"],
                "efficiency": []
            }
        }))
        .unwrap();

        let categories: Vec<&str> = result.feedback.iter().map(|(name, _)| name).collect();
        assert_eq!(categories, vec!["readability", "correctness", "efficiency"]);
        assert_eq!(result.feedback.get("correctness").unwrap(), ["Passed 3/4 tests"]);
        assert_eq!(result.overall_score, 72.5);
    }

    #[test]
    fn test_result_defaults_missing_lists() {
        let result: EvaluationResult = serde_json::from_value(json!({
            "overall_score": 10,
            "correctness_score": 10,
            "quality_score": 10,
            "efficiency_score": 10,
            "readability_score": 10,
            "edge_cases_score": 10,
            "feedback": null
        }))
        .unwrap();

        assert!(result.strengths.is_empty());
        assert!(result.suggestions.is_empty());
        assert!(result.feedback.is_empty());
    }

    #[test]
    fn test_upload_response_without_success_flag_is_a_failure() {
        let response: UploadResponse =
            serde_json::from_value(json!({ "error": "No file provided" })).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("No file provided"));
    }
}
