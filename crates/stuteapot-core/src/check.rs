//! Completeness checks for a submitted questionnaire.
//!
//! The scorer only looks at the ILS items; a questionnaire is accepted for
//! storage only when every required item is answered and the free-form fields
//! respect their limits. Field keys use the underscore form produced by
//! [`ResponseSet::from_form`].

use std::fmt;

use serde::Serialize;

use crate::model::{RawAnswer, ResponseSet};

/// Number of items in each of the FFM, ILS activity and ILS motive blocks.
pub const ITEMS_PER_BLOCK: usize = 10;

/// Teaching methods rated on both "like" and "learn".
pub const PEDAGOGY_METHODS: &[&str] = &[
    "lecture",
    "interactive_lecture",
    "directed_discussion",
    "classroom_assessment",
    "group_work",
    "student_peer_feedback",
    "cookbook_labs",
    "just_in_time",
    "case_method",
    "inquiry_based",
    "problem_based",
    "project_based",
    "role_plays",
    "fieldwork",
];

/// Teaching styles rated on both "like" and "learn".
pub const TEACHING_STYLES: &[&str] = &[
    "expert",
    "formal_authority",
    "personal_model",
    "facilitator",
    "delegator",
];

const REQUIRED_PROFILE_FIELDS: &[&str] = &[
    "gender",
    "economic_situation",
    "class_year",
    "study_field",
    "self_confidence",
    "stress",
    "well_being",
    "knowledge_durability",
    "cheating",
];

const ANONYMOUS_ID_LENGTH: (usize, usize) = (3, 20);
const AGE_RANGE: (f64, f64) = (1.0, 120.0);
const GRADES_RANGE: (f64, f64) = (0.0, 20.0);
const MAX_REMARKS_LENGTH: usize = 600;

/// One problem found in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionIssue {
    /// The field concerned.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl SubmissionIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SubmissionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that must carry an answer, in questionnaire order.
pub fn required_fields() -> Vec<String> {
    let mut fields: Vec<String> = REQUIRED_PROFILE_FIELDS
        .iter()
        .map(|f| f.to_string())
        .collect();

    for block in ["ffm", "ils_act", "ils_mot"] {
        fields.extend((1..=ITEMS_PER_BLOCK).map(|i| format!("{block}{i}")));
    }
    for method in PEDAGOGY_METHODS {
        fields.push(format!("pedagogy_{method}_like"));
        fields.push(format!("pedagogy_{method}_learn"));
    }
    for style in TEACHING_STYLES {
        fields.push(format!("teaching_style_{style}_like"));
        fields.push(format!("teaching_style_{style}_learn"));
    }
    fields
}

/// Check a submission for unanswered items and out-of-bounds free-form
/// fields. An empty result means the submission is complete.
pub fn validate_submission(responses: &ResponseSet) -> Vec<SubmissionIssue> {
    let mut issues = Vec::new();

    for field in required_fields() {
        let answered = responses.get(&field).is_some_and(|a| !a.is_unanswered());
        if !answered {
            issues.push(SubmissionIssue::new(&field, "answer is required"));
        }
    }

    // Optional, but bounded when given
    if let Some(id) = responses.get("anonymous_id").and_then(text_of) {
        let len = id.trim().chars().count();
        let (min, max) = ANONYMOUS_ID_LENGTH;
        if len > 0 && !(min..=max).contains(&len) {
            issues.push(SubmissionIssue::new(
                "anonymous_id",
                format!("must be {min} to {max} characters, got {len}"),
            ));
        }
    }

    check_number_range(responses, "age", AGE_RANGE, &mut issues);
    check_number_range(responses, "grades", GRADES_RANGE, &mut issues);

    for field in ["remarks_admin", "study_tips"] {
        if let Some(text) = responses.get(field).and_then(text_of) {
            let len = text.chars().count();
            if len > MAX_REMARKS_LENGTH {
                issues.push(SubmissionIssue::new(
                    field,
                    format!("at most {MAX_REMARKS_LENGTH} characters allowed, got {len}"),
                ));
            }
        }
    }

    issues
}

fn text_of(answer: &RawAnswer) -> Option<String> {
    match answer {
        RawAnswer::Absent => None,
        RawAnswer::Number(n) => Some(n.to_string()),
        RawAnswer::Text(s) => Some(s.clone()),
    }
}

fn check_number_range(
    responses: &ResponseSet,
    field: &str,
    (min, max): (f64, f64),
    issues: &mut Vec<SubmissionIssue>,
) {
    let value = match responses.get(field) {
        Some(RawAnswer::Number(n)) => Some(*n as f64),
        Some(RawAnswer::Text(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Some(RawAnswer::Absent) | None => None,
    };

    match value {
        Some(v) if (min..=max).contains(&v) => {}
        Some(v) => issues.push(SubmissionIssue::new(
            field,
            format!("must be between {min} and {max}, got {v}"),
        )),
        None => issues.push(SubmissionIssue::new(field, "a number is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ResponseSet {
        let mut set: ResponseSet = required_fields()
            .into_iter()
            .map(|f| (f, RawAnswer::Text("3".into())))
            .collect();
        set.insert("anonymous_id", "owl42");
        set.insert("age", 21i64);
        set.insert("grades", "14.5");
        set.insert("remarks_admin", "");
        set
    }

    fn fields_of(issues: &[SubmissionIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn required_field_count() {
        // 9 profile items, 30 inventory items, 2 ratings for 14 methods and 5 styles
        assert_eq!(required_fields().len(), 9 + 30 + 2 * (14 + 5));
        assert!(required_fields().contains(&"ils_mot10".to_string()));
        assert!(required_fields().contains(&"pedagogy_just_in_time_learn".to_string()));
        assert!(required_fields().contains(&"teaching_style_formal_authority_like".to_string()));
    }

    #[test]
    fn complete_submission_has_no_issues() {
        assert!(validate_submission(&complete()).is_empty());
    }

    #[test]
    fn unanswered_and_missing_items_are_reported() {
        let mut set = complete();
        set.insert("ffm4", RawAnswer::Absent);
        set.insert("ils_act7", "  ");
        let set: ResponseSet = set
            .iter()
            .filter(|(k, _)| *k != "pedagogy_fieldwork_learn")
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        let issues = validate_submission(&set);
        assert_eq!(
            fields_of(&issues),
            vec!["ffm4", "ils_act7", "pedagogy_fieldwork_learn"]
        );
        assert!(issues.iter().all(|i| i.message == "answer is required"));
    }

    #[test]
    fn anonymous_id_length_is_bounded_when_given() {
        let short = complete().with("anonymous_id", "ab");
        assert_eq!(fields_of(&validate_submission(&short)), vec!["anonymous_id"]);

        let long = complete().with("anonymous_id", "x".repeat(21).as_str());
        assert_eq!(fields_of(&validate_submission(&long)), vec!["anonymous_id"]);

        let blank = complete().with("anonymous_id", "");
        assert!(validate_submission(&blank).is_empty());
    }

    #[test]
    fn age_and_grades_must_be_in_range() {
        let issues = validate_submission(&complete().with("age", 0i64).with("grades", "20.5"));
        assert_eq!(fields_of(&issues), vec!["age", "grades"]);
        assert!(issues[0].message.contains("between 1 and 120"));

        let issues = validate_submission(&complete().with("age", "twenty"));
        assert_eq!(issues, vec![SubmissionIssue::new("age", "a number is required")]);

        let edges = complete().with("age", 120i64).with("grades", 0i64);
        assert!(validate_submission(&edges).is_empty());
    }

    #[test]
    fn free_text_is_capped_at_600_characters() {
        let at_limit = complete().with("study_tips", "é".repeat(600).as_str());
        assert!(validate_submission(&at_limit).is_empty());

        let over = complete().with("remarks_admin", "a".repeat(601).as_str());
        let issues = validate_submission(&over);
        assert_eq!(fields_of(&issues), vec!["remarks_admin"]);
        assert_eq!(
            issues[0].to_string(),
            "remarks_admin: at most 600 characters allowed, got 601"
        );
    }
}
