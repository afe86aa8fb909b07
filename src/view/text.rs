// src/view/text.rs
use std::fmt::Write;

use super::report::{ScoreTier, labelled_scores};
use crate::models::EvaluationResult;

const BAR_WIDTH: usize = 20;

fn bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Plain-text report for terminals.
pub fn render_text(result: &EvaluationResult) -> String {
    let mut out = String::new();

    for (label, score) in labelled_scores(result) {
        let _ = writeln!(
            out,
            "{:<14} {} {:>5}/100 ({})",
            label,
            bar(score),
            score,
            ScoreTier::for_score(score)
        );
    }

    out.push_str("\nStrengths\n");
    for strength in &result.strengths {
        let _ = writeln!(out, "  ✓ {}", strength);
    }

    out.push_str("\nSuggestions for Improvement\n");
    for suggestion in &result.suggestions {
        let _ = writeln!(out, "  ⚠ {}", suggestion);
    }

    if !result.feedback.is_empty() {
        out.push_str("\nDetailed Feedback\n");
        for (category, items) in result.feedback.iter() {
            let _ = writeln!(out, "  {}", category);
            for item in items {
                let _ = writeln!(out, "    - {}", item);
            }
        }
    }

    out
}
