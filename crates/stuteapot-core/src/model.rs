//! Core data model types for stuteapot.
//!
//! These are the fundamental types the scorer, the stores and the CLI share:
//! raw answers, response sets, learning-style categories, instruments and
//! score results.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Prefix the questionnaire form uses for Index of Learning Styles items.
pub const ILS_FIELD_PREFIX: &str = "ils_";

const ILS_MEANING: &[&str] = &["act1", "act2", "act6", "act7", "mot1", "mot6"];
const ILS_REPRODUCTION: &[&str] = &["act3", "act4", "act8", "act9", "mot2", "mot7"];
// mot7 is shared with the reproduction group.
const ILS_APPLICATION: &[&str] = &["act5", "mot3", "mot7", "mot9"];
const ILS_UNDIRECTED: &[&str] = &["act10", "mot4", "mot5", "mot10", "mot8"];

// ---------------------------------------------------------------------------
// Answers and response sets
// ---------------------------------------------------------------------------

/// A single raw answer as submitted by a respondent.
///
/// Deserializes from JSON `null`, an integer, or a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    /// No answer given.
    #[default]
    Absent,
    /// An integer answer.
    Number(i64),
    /// A textual answer: a numeric string for Likert items, free text otherwise.
    Text(String),
}

impl RawAnswer {
    /// Interpret this answer as a Likert value.
    ///
    /// Absent answers and blank strings are unanswered (`None`). Anything else
    /// must parse as an integer.
    pub fn likert_value(&self, field: &str) -> Result<Option<i64>, ScoringError> {
        match self {
            RawAnswer::Absent => Ok(None),
            RawAnswer::Number(n) => Ok(Some(*n)),
            RawAnswer::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| ScoringError::invalid(field, format!("'{s}' is not an integer")))
            }
        }
    }

    /// Whether this answer carries no value.
    pub fn is_unanswered(&self) -> bool {
        match self {
            RawAnswer::Absent => true,
            RawAnswer::Number(_) => false,
            RawAnswer::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<i64> for RawAnswer {
    fn from(value: i64) -> Self {
        RawAnswer::Number(value)
    }
}

impl From<&str> for RawAnswer {
    fn from(value: &str) -> Self {
        RawAnswer::Text(value.to_string())
    }
}

impl From<Option<i64>> for RawAnswer {
    fn from(value: Option<i64>) -> Self {
        value.map_or(RawAnswer::Absent, RawAnswer::Number)
    }
}

/// All answers from one submitted questionnaire, keyed by field identifier.
///
/// A key that is present with an absent value is different from a key that is
/// missing: the scorer counts the former as a zero term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: BTreeMap<String, RawAnswer>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect submitted form fields into a response set.
    ///
    /// Form field names use hyphens (`ils-act1`); stored keys use underscores
    /// (`ils_act1`).
    pub fn from_form<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        fields
            .into_iter()
            .map(|(k, v)| (form_key(k.as_ref()), RawAnswer::Text(v.into())))
            .collect()
    }

    /// Insert or replace an answer.
    pub fn insert(&mut self, field: impl Into<String>, answer: impl Into<RawAnswer>) {
        self.answers.insert(field.into(), answer.into());
    }

    /// Builder-style variant of [`ResponseSet::insert`].
    pub fn with(mut self, field: impl Into<String>, answer: impl Into<RawAnswer>) -> Self {
        self.insert(field, answer);
        self
    }

    pub fn get(&self, field: &str) -> Option<&RawAnswer> {
        self.answers.get(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.answers.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawAnswer)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, RawAnswer)> for ResponseSet {
    fn from_iter<T: IntoIterator<Item = (String, RawAnswer)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

fn form_key(name: &str) -> String {
    name.trim().replace('-', "_")
}

// ---------------------------------------------------------------------------
// Categories and results
// ---------------------------------------------------------------------------

/// The four learning-style categories, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meaning,
    Reproduction,
    Application,
    Undirected,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Meaning,
        Category::Reproduction,
        Category::Application,
        Category::Undirected,
    ];

    /// Internal lowercase key.
    pub fn key(self) -> &'static str {
        match self {
            Category::Meaning => "meaning",
            Category::Reproduction => "reproduction",
            Category::Application => "application",
            Category::Undirected => "undirected",
        }
    }

    /// Display label shown to respondents.
    pub fn label(self) -> &'static str {
        match self {
            Category::Meaning => "Meaning-Oriented",
            Category::Reproduction => "Reproduction-Oriented",
            Category::Application => "Application-Oriented",
            Category::Undirected => "Undirected",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == lower || c.label().to_lowercase() == lower)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Rounded percentage per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub meaning: i32,
    pub reproduction: i32,
    pub application: i32,
    pub undirected: i32,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> i32 {
        match category {
            Category::Meaning => self.meaning,
            Category::Reproduction => self.reproduction,
            Category::Application => self.application,
            Category::Undirected => self.undirected,
        }
    }

    pub fn set(&mut self, category: Category, percentage: i32) {
        match category {
            Category::Meaning => self.meaning = percentage,
            Category::Reproduction => self.reproduction = percentage,
            Category::Application => self.application = percentage,
            Category::Undirected => self.undirected = percentage,
        }
    }

    /// Scores in category declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, i32)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// The outcome of scoring one response set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Percentage per category.
    pub scores: CategoryScores,
    /// Category with the highest percentage.
    pub dominant: Category,
}

// ---------------------------------------------------------------------------
// Instruments
// ---------------------------------------------------------------------------

/// Inclusive bounds of a Likert scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertRange {
    pub min: i64,
    pub max: i64,
}

impl Default for LikertRange {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

impl LikertRange {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// A usable range has `min < max`.
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Map a value linearly so that `min` is 0 and `max` is 100.
    ///
    /// Values outside the range are not clamped. The arithmetic runs in `f64`
    /// so any `i64` answer or bound maps without overflow.
    pub fn to_percentage(&self, value: i64) -> f64 {
        let span = self.max as f64 - self.min as f64;
        if span <= 0.0 {
            return 0.0;
        }
        (value as f64 - self.min as f64) / span * 100.0
    }
}

/// Ordered field identifiers for each category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    #[serde(default)]
    pub meaning: Vec<String>,
    #[serde(default)]
    pub reproduction: Vec<String>,
    #[serde(default)]
    pub application: Vec<String>,
    #[serde(default)]
    pub undirected: Vec<String>,
}

impl CategoryFields {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Meaning => &self.meaning,
            Category::Reproduction => &self.reproduction,
            Category::Application => &self.application,
            Category::Undirected => &self.undirected,
        }
    }
}

/// A questionnaire's scoring definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Bounds of the answer scale.
    #[serde(default)]
    pub range: LikertRange,
    /// Which fields feed which category.
    pub categories: CategoryFields,
}

impl Instrument {
    /// The built-in Index of Learning Styles grouping with the `ils_` prefix.
    pub fn ils() -> Self {
        Self::ils_with_prefix(ILS_FIELD_PREFIX)
    }

    /// The built-in grouping with a caller-chosen key prefix.
    pub fn ils_with_prefix(prefix: &str) -> Self {
        let fields = |items: &[&str]| -> Vec<String> {
            items.iter().map(|item| format!("{prefix}{item}")).collect()
        };

        Self {
            id: "ils".into(),
            name: "Index of Learning Styles".into(),
            description: "Learning activities and motives inventory".into(),
            range: LikertRange::default(),
            categories: CategoryFields {
                meaning: fields(ILS_MEANING),
                reproduction: fields(ILS_REPRODUCTION),
                application: fields(ILS_APPLICATION),
                undirected: fields(ILS_UNDIRECTED),
            },
        }
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::ils()
    }
}
