// Definition trees for both questionnaire modes, plus the structural
// validation content authors run before shipping a catalog.
//
// Structure rules:
//   6 dimensions, 4 paliers per dimension, 3 criteria per palier
//   => 12 criteria per dimension, 72 system-wide
//   adaptive: <= 72 questions total, globally unique ids, every branch
//   pointer resolves to an existing question
//
// Scoring itself never runs validation; malformed answers degrade to 0
// instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::MaturityError;

pub const DIMENSION_COUNT: usize = 6;
pub const PALIERS_PER_DIMENSION: usize = 4;
pub const CRITERIA_PER_PALIER: usize = 3;
pub const MAX_TOTAL_QUESTIONS: usize = 72;
pub const MAX_CRITERION_SCORE: f64 = 3.0;

// ── Fixed-form (static) definitions ──

/// One scored criterion of the fixed-form questionnaire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

/// Ordinal sub-level grouping three criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palier {
    pub level: u8,
    pub name: String,
    pub criteria: Vec<Criterion>,
}

/// Fixed-form definition of one maturity dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub paliers: Vec<Palier>,
}

/// Complete fixed-form definition tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaSet {
    pub dimensions: Vec<DimensionDef>,
}

impl CriteriaSet {
    pub fn from_json(json: &str) -> Result<Self, MaturityError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn dimension(&self, id: &str) -> Option<&DimensionDef> {
        self.dimensions.iter().find(|d| d.id == id)
    }
}

// ── Adaptive definitions ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Binary,
    Choice,
    Multiselect,
}

/// One selectable option of a choice/multiselect question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub score: f64,
    pub label: String,
}

/// Follow-up pointer of an adaptive question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NextQuestion {
    /// Unconditional linear pointer
    Linear(String),
    /// Binary branch table
    Branch { yes: String, no: String },
}

/// Yes/no scoring table of a binary question
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BinaryScoring {
    pub yes: f64,
    pub no: f64,
}

/// One question of the adaptive questionnaire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveQuestion {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    /// What this question reveals about the dimension
    #[serde(default)]
    pub impact: String,
    /// Absent on the last question of a branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_question: Option<NextQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<BinaryScoring>,
}

/// Named question sequence within a dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub questions: Vec<AdaptiveQuestion>,
}

/// Adaptive definition of one maturity dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveDimension {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub branches: Vec<Branch>,
}

impl AdaptiveDimension {
    /// Entry question when this dimension starts: first branch, first question
    pub fn first_question_id(&self) -> Option<&str> {
        self.branches
            .first()
            .and_then(|b| b.questions.first())
            .map(|q| q.id.as_str())
    }
}

/// Complete adaptive question set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub dimensions: Vec<AdaptiveDimension>,
}

impl QuestionSet {
    pub fn from_json(json: &str) -> Result<Self, MaturityError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn dimension(&self, id: &str) -> Option<&AdaptiveDimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    pub fn total_questions(&self) -> usize {
        self.dimensions
            .iter()
            .flat_map(|d| &d.branches)
            .map(|b| b.questions.len())
            .sum()
    }
}

// ── Validation ──

/// Check a fixed-form tree against the structure rules.
pub fn validate_criteria(set: &CriteriaSet) -> Result<(), MaturityError> {
    if set.dimensions.len() != DIMENSION_COUNT {
        return Err(MaturityError::Definition(format!(
            "expected {} dimensions, found {}",
            DIMENSION_COUNT,
            set.dimensions.len()
        )));
    }

    let mut dimension_ids = HashSet::new();
    let mut criterion_ids = HashSet::new();
    for dim in &set.dimensions {
        if !dimension_ids.insert(dim.id.as_str()) {
            return Err(MaturityError::Definition(format!(
                "duplicate dimension id: {}",
                dim.id
            )));
        }
        if dim.paliers.len() != PALIERS_PER_DIMENSION {
            return Err(MaturityError::Definition(format!(
                "dimension {} has {} paliers, expected {}",
                dim.id,
                dim.paliers.len(),
                PALIERS_PER_DIMENSION
            )));
        }
        let mut levels: Vec<u8> = dim.paliers.iter().map(|p| p.level).collect();
        levels.sort_unstable();
        if levels != [1, 2, 3, 4] {
            return Err(MaturityError::Definition(format!(
                "dimension {} palier levels must be 1-4 exactly once, found {:?}",
                dim.id, levels
            )));
        }
        for palier in &dim.paliers {
            if palier.criteria.len() != CRITERIA_PER_PALIER {
                return Err(MaturityError::Definition(format!(
                    "dimension {} palier {} has {} criteria, expected {}",
                    dim.id,
                    palier.level,
                    palier.criteria.len(),
                    CRITERIA_PER_PALIER
                )));
            }
            for criterion in &palier.criteria {
                if !criterion_ids.insert(criterion.id.as_str()) {
                    return Err(MaturityError::Definition(format!(
                        "duplicate criterion id: {}",
                        criterion.id
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Check an adaptive tree against the structure rules.
pub fn validate_questions(set: &QuestionSet) -> Result<(), MaturityError> {
    if set.dimensions.len() != DIMENSION_COUNT {
        return Err(MaturityError::Definition(format!(
            "expected {} dimensions, found {}",
            DIMENSION_COUNT,
            set.dimensions.len()
        )));
    }

    let mut dimension_ids = HashSet::new();
    let mut question_ids = HashSet::new();
    for dim in &set.dimensions {
        if !dimension_ids.insert(dim.id.as_str()) {
            return Err(MaturityError::Definition(format!(
                "duplicate dimension id: {}",
                dim.id
            )));
        }
        for branch in &dim.branches {
            for question in &branch.questions {
                if !question_ids.insert(question.id.as_str()) {
                    return Err(MaturityError::Definition(format!(
                        "duplicate question id: {}",
                        question.id
                    )));
                }
                match question.kind {
                    QuestionKind::Binary => {
                        if question.scoring.is_none() && question.options.is_none() {
                            return Err(MaturityError::Definition(format!(
                                "binary question {} has no scoring table",
                                question.id
                            )));
                        }
                    }
                    QuestionKind::Choice | QuestionKind::Multiselect => {
                        if question.options.as_ref().map_or(true, |o| o.is_empty()) {
                            return Err(MaturityError::Definition(format!(
                                "question {} has no options",
                                question.id
                            )));
                        }
                    }
                }
            }
        }
    }

    if question_ids.len() > MAX_TOTAL_QUESTIONS {
        return Err(MaturityError::Definition(format!(
            "{} questions exceed the {} question limit",
            question_ids.len(),
            MAX_TOTAL_QUESTIONS
        )));
    }

    // every pointer must land on a defined question
    for dim in &set.dimensions {
        for question in dim.branches.iter().flat_map(|b| &b.questions) {
            let targets: Vec<&str> = match &question.next_question {
                None => vec![],
                Some(NextQuestion::Linear(id)) => vec![id.as_str()],
                Some(NextQuestion::Branch { yes, no }) => vec![yes.as_str(), no.as_str()],
            };
            for target in targets {
                if !question_ids.contains(target) {
                    return Err(MaturityError::Definition(format!(
                        "question {} points to unknown question {}",
                        question.id, target
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Check a single fixed-form answer score: an integer in 0-3.
pub fn validate_score(score: f64) -> Result<(), MaturityError> {
    if !score.is_finite() || score < 0.0 || score > MAX_CRITERION_SCORE || score.fract() != 0.0 {
        return Err(MaturityError::Definition(format!(
            "score {} outside the 0-{} integer range",
            score, MAX_CRITERION_SCORE
        )));
    }
    Ok(())
}

/// Check a fixed-form answer map: every id defined, every score in range.
pub fn validate_answers(
    set: &CriteriaSet,
    answers: &HashMap<String, f64>,
) -> Result<(), MaturityError> {
    let known: HashSet<&str> = set
        .dimensions
        .iter()
        .flat_map(|d| &d.paliers)
        .flat_map(|p| &p.criteria)
        .map(|c| c.id.as_str())
        .collect();
    for (id, score) in answers {
        if !known.contains(id.as_str()) {
            return Err(MaturityError::Definition(format!(
                "answer references unknown criterion {}",
                id
            )));
        }
        validate_score(*score).map_err(|_| {
            MaturityError::Definition(format!(
                "criterion {} scored {}, expected an integer in 0-{}",
                id, score, MAX_CRITERION_SCORE
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_criteria_set() -> CriteriaSet {
        let dimensions = (0..6)
            .map(|d| DimensionDef {
                id: format!("dim{}", d),
                name: format!("Dimension {}", d),
                description: String::new(),
                paliers: (1..=4)
                    .map(|level| Palier {
                        level,
                        name: format!("Palier {}", level),
                        criteria: (0..3)
                            .map(|c| Criterion {
                                id: format!("d{}_p{}_c{}", d, level, c),
                                label: format!("Criterion {}", c),
                                description: String::new(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        CriteriaSet { dimensions }
    }

    fn make_question(id: &str, next: Option<NextQuestion>) -> AdaptiveQuestion {
        AdaptiveQuestion {
            id: id.to_string(),
            text: format!("Question {}?", id),
            kind: QuestionKind::Binary,
            options: None,
            impact: String::new(),
            next_question: next,
            scoring: Some(BinaryScoring { yes: 3.0, no: 0.0 }),
        }
    }

    fn make_question_set() -> QuestionSet {
        let dimensions = (0..6)
            .map(|d| {
                let q1 = format!("d{}_q1", d);
                let q2 = format!("d{}_q2", d);
                AdaptiveDimension {
                    id: format!("dim{}", d),
                    name: format!("Dimension {}", d),
                    icon: None,
                    branches: vec![Branch {
                        id: format!("d{}_main", d),
                        name: "Main".to_string(),
                        questions: vec![
                            make_question(&q1, Some(NextQuestion::Linear(q2.clone()))),
                            make_question(&q2, None),
                        ],
                    }],
                }
            })
            .collect();
        QuestionSet { dimensions }
    }

    #[test]
    fn valid_criteria_tree_passes() {
        assert!(validate_criteria(&make_criteria_set()).is_ok());
    }

    #[test]
    fn wrong_dimension_count_rejected() {
        let mut set = make_criteria_set();
        set.dimensions.pop();
        let err = validate_criteria(&set).unwrap_err();
        assert!(err.to_string().contains("expected 6 dimensions"));
    }

    #[test]
    fn duplicate_criterion_id_rejected() {
        let mut set = make_criteria_set();
        set.dimensions[1].paliers[0].criteria[0].id = "d0_p1_c0".to_string();
        let err = validate_criteria(&set).unwrap_err();
        assert!(err.to_string().contains("duplicate criterion id"));
    }

    #[test]
    fn missing_palier_level_rejected() {
        let mut set = make_criteria_set();
        set.dimensions[0].paliers[3].level = 2;
        assert!(validate_criteria(&set).is_err());
    }

    #[test]
    fn valid_question_set_passes() {
        assert!(validate_questions(&make_question_set()).is_ok());
    }

    #[test]
    fn dangling_pointer_rejected() {
        let mut set = make_question_set();
        set.dimensions[0].branches[0].questions[1].next_question =
            Some(NextQuestion::Linear("nowhere".to_string()));
        let err = validate_questions(&set).unwrap_err();
        assert!(err.to_string().contains("unknown question nowhere"));
    }

    #[test]
    fn choice_without_options_rejected() {
        let mut set = make_question_set();
        set.dimensions[0].branches[0].questions[0].kind = QuestionKind::Choice;
        set.dimensions[0].branches[0].questions[0].options = None;
        assert!(validate_questions(&set).is_err());
    }

    #[test]
    fn score_range_is_inclusive_integers() {
        assert!(validate_score(0.0).is_ok());
        assert!(validate_score(3.0).is_ok());
        assert!(validate_score(1.5).is_err());
        assert!(validate_score(-1.0).is_err());
        assert!(validate_score(4.0).is_err());
        assert!(validate_score(f64::NAN).is_err());
    }

    #[test]
    fn answers_checked_against_tree() {
        let set = make_criteria_set();
        let mut answers = HashMap::new();
        answers.insert("d0_p1_c0".to_string(), 2.0);
        assert!(validate_answers(&set, &answers).is_ok());

        answers.insert("ghost".to_string(), 1.0);
        assert!(validate_answers(&set, &answers).is_err());

        answers.remove("ghost");
        answers.insert("d0_p1_c1".to_string(), 7.0);
        assert!(validate_answers(&set, &answers).is_err());
    }

    #[test]
    fn first_question_is_first_branch_head() {
        let set = make_question_set();
        assert_eq!(set.dimensions[0].first_question_id(), Some("d0_q1"));
    }

    #[test]
    fn next_question_json_shapes() {
        let linear: AdaptiveQuestion =
            serde_json::from_str(r#"{"id":"q1","text":"T?","type":"binary","next_question":"q2"}"#)
                .unwrap();
        assert_eq!(
            linear.next_question,
            Some(NextQuestion::Linear("q2".to_string()))
        );

        let branch: AdaptiveQuestion = serde_json::from_str(
            r#"{"id":"q1","text":"T?","type":"binary","next_question":{"yes":"q2","no":"q3"}}"#,
        )
        .unwrap();
        assert_eq!(
            branch.next_question,
            Some(NextQuestion::Branch {
                yes: "q2".to_string(),
                no: "q3".to_string()
            })
        );
    }
}
