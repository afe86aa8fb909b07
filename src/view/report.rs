// src/view/report.rs
use std::fmt;

use super::{Element, Node, el, text};
use crate::models::EvaluationResult;

/// Color band of a score bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Success,
    Warning,
    Danger,
}

impl ScoreTier {
    /// `>= 80` success, `>= 60` warning, anything else danger.
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Success
        } else if score >= 60.0 {
            ScoreTier::Warning
        } else {
            ScoreTier::Danger
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreTier::Success => "bg-success",
            ScoreTier::Warning => "bg-warning",
            ScoreTier::Danger => "bg-danger",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreTier::Success => write!(f, "success"),
            ScoreTier::Warning => write!(f, "warning"),
            ScoreTier::Danger => write!(f, "danger"),
        }
    }
}

/// The six scores in display order, with their labels.
pub fn labelled_scores(result: &EvaluationResult) -> [(&'static str, f64); 6] {
    [
        ("Overall Score", result.overall_score),
        ("Correctness", result.correctness_score),
        ("Code Quality", result.quality_score),
        ("Efficiency", result.efficiency_score),
        ("Readability", result.readability_score),
        ("Edge Cases", result.edge_cases_score),
    ]
}

fn score_bar(score: f64) -> Element {
    el("div")
        .class("progress-bar")
        .class(ScoreTier::for_score(score).css_class())
        .attr("style", format!("width: {}%", score))
}

fn score_block(heading: &'static str, label: &str, score: f64, margin: &str) -> Element {
    el("div")
        .child(el(heading).text(format!("{}: {}/100", label, score)))
        .child(el("div").class("progress").class(margin).child(score_bar(score)))
}

fn accordion_item(key: &str, title: &str, expanded: bool, body: Vec<Node>) -> Element {
    let button = el("button")
        .class("accordion-button")
        .attr("type", "button")
        .attr("data-bs-toggle", "collapse")
        .attr("data-bs-target", format!("#{}Collapse", key))
        .text(title);
    let button = if expanded { button } else { button.class("collapsed") };

    let collapse = el("div")
        .id(format!("{}Collapse", key))
        .class("accordion-collapse collapse")
        .attr("data-bs-parent", "#feedbackAccordion");
    let collapse = if expanded { collapse.class("show") } else { collapse };

    el("div")
        .class("accordion-item")
        .child(
            el("h2")
                .class("accordion-header")
                .id(format!("{}Header", key))
                .child(button),
        )
        .child(collapse.child(el("div").class("accordion-body").children(body)))
}

fn item_list(items: &[String], item_class: Option<&str>, marker: &str) -> Element {
    el("ul").class("list-group list-group-flush").children(items.iter().map(|item| {
        let li = el("li").class("list-group-item");
        let li = match item_class {
            Some(class) => li.class(class),
            None => li,
        };
        li.text(format!("{}{}", marker, item))
    }))
}

/// Builds the full report for one result.
pub fn render_report(result: &EvaluationResult) -> Node {
    let [overall, correctness, quality, efficiency, readability, edge_cases] = labelled_scores(result);

    let overall = el("div")
        .class("mb-4")
        .child(el("h4").text(format!("{}: {}/100", overall.0, overall.1)))
        .child(el("div").class("progress mb-3").child(score_bar(overall.1)));

    let pair_row = |left: (&str, f64), right: (&str, f64)| {
        el("div")
            .class("row mb-4")
            .child(el("div").class("col-6").child(score_block("h6", left.0, left.1, "mb-2")))
            .child(el("div").class("col-6").child(score_block("h6", right.0, right.1, "mb-2")))
    };

    let edge_cases = el("div")
        .class("mb-4")
        .child(score_block("h6", edge_cases.0, edge_cases.1, "mb-2"));

    let detailed: Vec<Node> = result
        .feedback
        .iter()
        .flat_map(|(category, items)| {
            [
                el("h6").class("text-capitalize").text(category).into_node(),
                item_list(items, None, "").class("mb-3").into_node(),
            ]
        })
        .collect();

    let accordion = el("div")
        .class("accordion")
        .id("feedbackAccordion")
        .child(accordion_item(
            "strengths",
            "Strengths",
            true,
            vec![item_list(&result.strengths, Some("text-success"), "✓ ").into_node()],
        ))
        .child(accordion_item(
            "suggestions",
            "Suggestions for Improvement",
            false,
            vec![item_list(&result.suggestions, Some("text-warning"), "⚠ ").into_node()],
        ))
        .child(accordion_item("detailed", "Detailed Feedback", false, detailed));

    el("div")
        .class("evaluation-report")
        .child(overall)
        .child(pair_row(correctness, quality))
        .child(pair_row(efficiency, readability))
        .child(edge_cases)
        .child(accordion)
        .into_node()
}

/// Indeterminate progress indicator shown while a submission is in flight.
pub fn render_loading() -> Node {
    el("div")
        .class("spinner-border")
        .attr("role", "status")
        .child(el("span").class("visually-hidden").text("Evaluating..."))
        .into_node()
}

/// Inline failure message replacing the whole results region.
pub fn render_error(message: &str) -> Node {
    el("div")
        .class("alert alert-danger")
        .child(text(format!("Error: {}", message)))
        .into_node()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Feedback;

    fn result_with_scores(scores: [f64; 6]) -> EvaluationResult {
        EvaluationResult {
            overall_score: scores[0],
            correctness_score: scores[1],
            quality_score: scores[2],
            efficiency_score: scores[3],
            readability_score: scores[4],
            edge_cases_score: scores[5],
            strengths: vec!["Readable".to_string()],
            suggestions: vec!["Add docstrings".to_string(), "Handle n < 0".to_string()],
            feedback: Feedback::from_iter([
                ("quality", vec!["Functions are short".to_string()]),
                ("edge_cases", vec!["Negative input untested".to_string(), "Zero ok".to_string()]),
            ]),
        }
    }

    fn bars(node: &Node) -> Vec<&Element> {
        node.find_by_class("progress-bar")
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::for_score(100.0), ScoreTier::Success);
        assert_eq!(ScoreTier::for_score(80.0), ScoreTier::Success);
        assert_eq!(ScoreTier::for_score(79.9), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(60.0), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(59.9), ScoreTier::Danger);
        assert_eq!(ScoreTier::for_score(0.0), ScoreTier::Danger);
    }

    #[test]
    fn test_overall_bar_width_and_tier() {
        let node = render_report(&result_with_scores([95.0, 50.0, 60.0, 79.0, 80.0, 10.0]));
        let overall = bars(&node)[0];
        assert_eq!(overall.get_attr("style"), Some("width: 95%"));
        assert!(overall.has_class("bg-success"));
    }

    #[test]
    fn test_every_score_uses_the_same_tier_rule() {
        let scores = [95.0, 50.0, 60.0, 79.0, 80.0, 10.0];
        let node = render_report(&result_with_scores(scores));
        let bars = bars(&node);
        assert_eq!(bars.len(), 6);

        for (bar, score) in bars.iter().zip(scores) {
            let tier = ScoreTier::for_score(score);
            assert!(bar.has_class(tier.css_class()), "score {} should be {}", score, tier);
            assert_eq!(bar.get_attr("style"), Some(format!("width: {}%", score).as_str()));
        }
    }

    #[test]
    fn test_headings_and_fractional_scores() {
        let node = render_report(&result_with_scores([72.5, 100.0, 0.0, 33.0, 66.0, 90.0]));
        let text = node.text_content();
        assert!(text.contains("Overall Score: 72.5/100"));
        assert!(text.contains("Correctness: 100/100"));
        assert!(text.contains("Code Quality: 0/100"));
        assert!(text.contains("Edge Cases: 90/100"));
    }

    #[test]
    fn test_sections_and_feedback_order() {
        let node = render_report(&result_with_scores([90.0; 6]));

        let strengths = node.find_by_id("strengthsCollapse").unwrap();
        assert!(strengths.has_class("show"));
        let suggestions = node.find_by_id("suggestionsCollapse").unwrap();
        assert!(!suggestions.has_class("show"));

        let suggestion_items = node.find_by_class("text-warning");
        assert_eq!(suggestion_items.len(), 2);
        assert_eq!(Node::from(suggestion_items[0].clone()).text_content(), "⚠ Add docstrings");

        let categories: Vec<String> = node
            .find_by_class("text-capitalize")
            .into_iter()
            .map(|h| Node::from(h.clone()).text_content())
            .collect();
        assert_eq!(categories, vec!["quality", "edge_cases"]);
    }

    #[test]
    fn test_error_view_has_no_bars() {
        let node = render_error("boom");
        assert!(node.text_content().contains("Error: boom"));
        assert!(bars(&node).is_empty());
    }

    #[test]
    fn test_loading_view() {
        let node = render_loading();
        assert!(node.as_element().unwrap().has_class("spinner-border"));
        assert_eq!(node.text_content(), "Evaluating...");
    }
}
