//! Learning-style scoring.
//!
//! Each category score is the mean of its fields' normalised answers, rounded
//! half away from zero. Only fields whose key is entirely missing from the
//! response set are left out of a category's mean; a key that is present but
//! unanswered still counts as a zero term.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::model::{Category, CategoryScores, Instrument, RawAnswer, ResponseSet, ScoreResult};

/// How answers outside the instrument's Likert range are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Apply the linear transform as-is and log a warning.
    #[default]
    Permissive,
    /// Reject the answer as invalid input.
    Strict,
}

/// Scores response sets against a fixed instrument.
///
/// The scorer holds no mutable state and can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    instrument: Instrument,
    policy: RangePolicy,
}

impl Scorer {
    pub fn new(instrument: Instrument) -> Self {
        Self {
            instrument,
            policy: RangePolicy::default(),
        }
    }

    /// Scorer for the built-in ILS grouping.
    pub fn ils() -> Self {
        Self::new(Instrument::ils())
    }

    pub fn with_policy(mut self, policy: RangePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Convert one answer to a percentage.
    ///
    /// Unanswered maps to 0. On the default scale 1→0, 2→25, 3→50, 4→75 and
    /// 5→100.
    pub fn normalize(&self, field: &str, answer: &RawAnswer) -> Result<f64, ScoringError> {
        let Some(value) = answer.likert_value(field)? else {
            return Ok(0.0);
        };

        let range = self.instrument.range;
        if !range.contains(value) {
            match self.policy {
                RangePolicy::Strict => {
                    return Err(ScoringError::invalid(
                        field,
                        format!("{value} is outside {}..={}", range.min, range.max),
                    ));
                }
                RangePolicy::Permissive => {
                    tracing::warn!(
                        field,
                        value,
                        min = range.min,
                        max = range.max,
                        "answer outside Likert range, scoring as-is"
                    );
                }
            }
        }

        Ok(range.to_percentage(value))
    }

    /// Unrounded mean over the fields whose keys appear in `responses`.
    ///
    /// Returns 0 when none of the keys appear.
    pub fn category_mean(
        &self,
        fields: &[String],
        responses: &ResponseSet,
    ) -> Result<f64, ScoringError> {
        let mut total = 0.0;
        let mut counted = 0usize;

        for field in fields {
            if let Some(answer) = responses.get(field) {
                total += self.normalize(field, answer)?;
                counted += 1;
            }
        }

        if counted == 0 {
            return Ok(0.0);
        }
        Ok(total / counted as f64)
    }

    /// Rounded percentage for one group of fields.
    ///
    /// Fails when out-of-range answers push the rounded mean past what an
    /// `i32` percentage can hold.
    pub fn category_score(
        &self,
        fields: &[String],
        responses: &ResponseSet,
    ) -> Result<i32, ScoringError> {
        let mean = self.category_mean(fields, responses)?;
        round_percentage(mean).ok_or_else(|| {
            ScoringError::invalid(
                &fields.join(", "),
                format!("mean percentage {mean} does not fit an integer score"),
            )
        })
    }

    /// Score all four categories and pick the dominant one.
    pub fn score(&self, responses: &ResponseSet) -> Result<ScoreResult, ScoringError> {
        let mut scores = CategoryScores::default();
        for category in Category::ALL {
            let fields = self.instrument.categories.get(category);
            scores.set(category, self.category_score(fields, responses)?);
        }

        let result = ScoreResult {
            scores,
            dominant: dominant_category(&scores),
        };
        tracing::debug!(
            instrument = %self.instrument.id,
            dominant = %result.dominant,
            "scored response set"
        );
        Ok(result)
    }
}

/// Category with the highest percentage; ties go to the earliest category.
pub fn dominant_category(scores: &CategoryScores) -> Category {
    let mut best = Category::Meaning;
    for (category, score) in scores.iter() {
        if score > scores.get(best) {
            best = category;
        }
    }
    best
}

/// Round half away from zero.
///
/// Returns `None` when the rounded value is not representable as `i32`.
pub fn round_percentage(value: f64) -> Option<i32> {
    let rounded = value.round();
    (rounded.is_finite() && rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64)
        .then(|| rounded as i32)
}
