//! Submission records and result rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ScoringError;
use crate::model::{ResponseSet, ScoreResult};
use crate::scoring::Scorer;

/// One scored questionnaire, as handed to a [`crate::traits::ResponseStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: Uuid,
    /// When the questionnaire was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Instrument the answers were scored against.
    pub instrument_id: String,
    /// Every submitted field, scored or pass-through.
    pub responses: ResponseSet,
    /// Learning-style scores derived from `responses`.
    pub result: ScoreResult,
}

impl Submission {
    /// Score `responses` and wrap them in a new submission.
    pub fn score(scorer: &Scorer, responses: ResponseSet) -> Result<Self, ScoringError> {
        let result = scorer.score(&responses)?;
        Ok(Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            instrument_id: scorer.instrument().id.clone(),
            responses,
            result,
        })
    }
}

impl ScoreResult {
    /// Plain-text summary, one category per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (category, score) in self.scores.iter() {
            out.push_str(&format!("{:<24}{score:>4}%\n", category.label()));
        }
        out.push_str(&format!("\nMain learning style: {}\n", self.dominant));
        out
    }

    /// Markdown results table.
    pub fn to_markdown(&self) -> String {
        let mut md = String::from("## Learning style results\n\n");
        md.push_str("| Category | Score |\n|---|---|\n");
        for (category, score) in self.scores.iter() {
            let marker = if category == self.dominant { " **(main)**" } else { "" };
            md.push_str(&format!("| {}{marker} | {score}% |\n", category.label()));
        }
        md.push_str(&format!("\nMain learning style: **{}**\n", self.dominant));
        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryScores};

    fn sample_result() -> ScoreResult {
        ScoreResult {
            scores: CategoryScores {
                meaning: 40,
                reproduction: 75,
                application: 50,
                undirected: 10,
            },
            dominant: Category::Reproduction,
        }
    }

    #[test]
    fn submission_scores_and_keeps_pass_through_fields() {
        let responses = ResponseSet::new()
            .with("ils_act1", 5i64)
            .with("study_tips", "flashcards");
        let submission = Submission::score(&Scorer::ils(), responses).unwrap();

        assert_eq!(submission.instrument_id, "ils");
        assert_eq!(submission.result.scores.meaning, 100);
        assert!(submission.responses.contains_key("study_tips"));
    }

    #[test]
    fn submission_json_roundtrip() {
        let submission =
            Submission::score(&Scorer::ils(), ResponseSet::new().with("ils_act3", "4")).unwrap();
        let json = serde_json::to_string(&submission).unwrap();
        assert!(json.contains("\"dominant\":\"reproduction\""));
        let back: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, submission);
    }

    #[test]
    fn text_and_markdown_rendering() {
        let result = sample_result();
        let text = result.to_text();
        assert!(text.contains("Reproduction-Oriented"));
        assert!(text.contains("75%"));
        assert!(text.contains("Main learning style: Reproduction-Oriented"));

        let md = result.to_markdown();
        assert!(md.contains("| Reproduction-Oriented **(main)** | 75% |"));
        assert!(md.contains("| Undirected | 10% |"));
    }
}
