//! Cohort statistics over many submissions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::report::Submission;

/// Aggregate statistics across a cohort of respondents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    /// Number of submissions aggregated.
    pub respondents: usize,
    /// Per-category score statistics.
    pub per_category: BTreeMap<Category, CategoryStats>,
    /// How many respondents have each category as their main style.
    pub dominant_counts: BTreeMap<Category, usize>,
}

/// Score statistics for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub mean: f64,
    pub min: i32,
    pub max: i32,
}

impl CohortStats {
    /// Share of respondents whose main style is `category`, in [0, 1].
    pub fn dominant_share(&self, category: Category) -> f64 {
        if self.respondents == 0 {
            return 0.0;
        }
        self.dominant_counts.get(&category).copied().unwrap_or(0) as f64
            / self.respondents as f64
    }
}

/// Compute cohort statistics. Every category is present in the output, with
/// zeroed statistics for an empty cohort.
pub fn compute_cohort_stats(submissions: &[Submission]) -> CohortStats {
    let mut per_category = BTreeMap::new();
    let mut dominant_counts = BTreeMap::new();

    for category in Category::ALL {
        let scores: Vec<i32> = submissions
            .iter()
            .map(|s| s.result.scores.get(category))
            .collect();

        let stats = if scores.is_empty() {
            CategoryStats::default()
        } else {
            CategoryStats {
                mean: scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64,
                min: scores.iter().copied().min().unwrap_or(0),
                max: scores.iter().copied().max().unwrap_or(0),
            }
        };
        per_category.insert(category, stats);

        let count = submissions
            .iter()
            .filter(|s| s.result.dominant == category)
            .count();
        dominant_counts.insert(category, count);
    }

    CohortStats {
        respondents: submissions.len(),
        per_category,
        dominant_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResponseSet;
    use crate::scoring::Scorer;

    fn submission(pairs: &[(&str, i64)]) -> Submission {
        let responses = pairs
            .iter()
            .fold(ResponseSet::new(), |set, (field, value)| set.with(*field, *value));
        Submission::score(&Scorer::ils(), responses).unwrap()
    }

    #[test]
    fn empty_cohort() {
        let stats = compute_cohort_stats(&[]);
        assert_eq!(stats.respondents, 0);
        assert_eq!(stats.per_category.len(), 4);
        assert_eq!(stats.per_category[&Category::Meaning], CategoryStats::default());
        assert_eq!(stats.dominant_share(Category::Meaning), 0.0);
    }

    #[test]
    fn mean_min_max_and_dominant_counts() {
        let cohort = vec![
            submission(&[("ils_act1", 5), ("ils_act3", 1)]),
            submission(&[("ils_act1", 3), ("ils_act3", 5)]),
            submission(&[("ils_act1", 1), ("ils_act3", 5)]),
        ];
        let stats = compute_cohort_stats(&cohort);

        let meaning = stats.per_category[&Category::Meaning];
        assert_eq!(meaning.min, 0);
        assert_eq!(meaning.max, 100);
        assert!((meaning.mean - 50.0).abs() < f64::EPSILON);

        assert_eq!(stats.dominant_counts[&Category::Meaning], 1);
        assert_eq!(stats.dominant_counts[&Category::Reproduction], 2);
        assert_eq!(stats.dominant_counts[&Category::Undirected], 0);
        assert!((stats.dominant_share(Category::Reproduction) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn stats_serialize_with_category_keys() {
        let stats = compute_cohort_stats(&[submission(&[("ils_act5", 4)])]);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"application\""));
        let back: CohortStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
