// Built-in assessment content, compiled into the binary so the CLI
// works with no external files. Alternate content loads from JSON
// paths and goes through the same validation.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::definitions::{
    validate_criteria, validate_questions, CriteriaSet, QuestionSet,
};
use crate::error::MaturityError;

const CRITERIA_JSON: &str = include_str!("../data/criteria.json");
const ADAPTIVE_QUESTIONS_JSON: &str = include_str!("../data/adaptive_questions.json");

/// The built-in fixed-form definition tree (6 dimensions, 72 criteria)
pub fn builtin_criteria() -> &'static CriteriaSet {
    static CRITERIA: OnceLock<CriteriaSet> = OnceLock::new();
    CRITERIA
        .get_or_init(|| serde_json::from_str(CRITERIA_JSON).expect("bundled criteria.json must parse"))
}

/// The built-in adaptive question set
pub fn builtin_questions() -> &'static QuestionSet {
    static QUESTIONS: OnceLock<QuestionSet> = OnceLock::new();
    QUESTIONS.get_or_init(|| {
        serde_json::from_str(ADAPTIVE_QUESTIONS_JSON).expect("bundled adaptive_questions.json must parse")
    })
}

/// Load and validate an alternate definition tree from a JSON file
pub fn load_criteria(path: &Path) -> Result<CriteriaSet, MaturityError> {
    let json = fs::read_to_string(path)?;
    let set = CriteriaSet::from_json(&json)?;
    validate_criteria(&set)?;
    Ok(set)
}

/// Load and validate an alternate question set from a JSON file
pub fn load_questions(path: &Path) -> Result<QuestionSet, MaturityError> {
    let json = fs::read_to_string(path)?;
    let set = QuestionSet::from_json(&json)?;
    validate_questions(&set)?;
    Ok(set)
}
