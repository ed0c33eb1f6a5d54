// Adaptive questionnaire engine: a question graph compiled from the
// definition tree, branch-aware next-question resolution, and
// dimension-scoped score aggregation.
//
// Score formula per dimension:
//   total = sum of matched answer scores (multiselect arrays are summed)
//   count = number of matched answered questions
//   percentage = count > 0 ? round(total / (count * 3) * 100) : 0
//
// Every matched question is normalized against a per-question maximum of
// 3, whatever its option count. Question membership comes from the graph
// index, never from id-prefix matching.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::definitions::{AdaptiveQuestion, NextQuestion, QuestionSet};
use crate::tiers;
use crate::types::{
    AnswerValue, DimensionPercentage, GapInfo, Profile, RawAnswer, TargetPolicy, Tier,
};

/// Maximum score one question contributes to its dimension
pub const MAX_QUESTION_SCORE: f64 = 3.0;

/// Dimension identity kept by the graph for scoring, reporting and
/// session traversal
#[derive(Debug, Clone)]
pub struct DimensionInfo {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    /// First branch's first question, where a session enters the dimension
    pub entry_question: Option<String>,
}

/// Complete adaptive assessment result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveAssessment {
    pub dimensions: Vec<DimensionPercentage>,
    pub global_score: i32,
    pub profile: Profile,
    pub target_policy: TargetPolicy,
    pub target_tier: Tier,
    pub gaps: Vec<GapInfo>,
}

/// Compiled question index: question lookup plus question-to-dimension
/// membership. Immutable once built; safe to share across traversals.
#[derive(Debug, Clone)]
pub struct QuestionGraph {
    questions: HashMap<String, AdaptiveQuestion>,
    dimension_of: HashMap<String, String>,
    dimensions: Vec<DimensionInfo>,
}

impl QuestionGraph {
    /// Build both indices from a definition tree. Visits every dimension,
    /// branch and question exactly once; duplicate ids keep the last
    /// occurrence.
    pub fn build(set: &QuestionSet) -> QuestionGraph {
        let mut questions = HashMap::new();
        let mut dimension_of = HashMap::new();
        let mut dimensions = Vec::with_capacity(set.dimensions.len());
        for dim in &set.dimensions {
            dimensions.push(DimensionInfo {
                id: dim.id.clone(),
                name: dim.name.clone(),
                icon: dim.icon.clone(),
                entry_question: dim.first_question_id().map(str::to_string),
            });
            for branch in &dim.branches {
                for question in &branch.questions {
                    questions.insert(question.id.clone(), question.clone());
                    dimension_of.insert(question.id.clone(), dim.id.clone());
                }
            }
        }
        QuestionGraph {
            questions,
            dimension_of,
            dimensions,
        }
    }

    /// Look up a question; absence is a valid result the caller checks
    pub fn question(&self, id: &str) -> Option<&AdaptiveQuestion> {
        self.questions.get(id)
    }

    /// Dimension a question belongs to
    pub fn dimension_of(&self, question_id: &str) -> Option<&str> {
        self.dimension_of.get(question_id).map(String::as_str)
    }

    /// Dimensions in definition order
    pub fn dimensions(&self) -> &[DimensionInfo] {
        &self.dimensions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Percentage for one dimension over an answer snapshot
    pub fn score_dimension(
        &self,
        dimension_id: &str,
        answers: &HashMap<String, AnswerValue>,
    ) -> i32 {
        let mut total = 0.0;
        let mut count = 0usize;
        for (question_id, value) in answers {
            if self.dimension_of(question_id) != Some(dimension_id) {
                continue;
            }
            total += value.total();
            count += 1;
        }
        if count > 0 {
            (total / (count as f64 * MAX_QUESTION_SCORE) * 100.0).round() as i32
        } else {
            0
        }
    }
}

/// Resolve the question that follows `question` for a given reply.
/// `None` means the branch is exhausted and the dimension is complete.
pub fn next_question<'a>(question: &'a AdaptiveQuestion, answer: &RawAnswer) -> Option<&'a str> {
    match &question.next_question {
        None => None,
        Some(NextQuestion::Linear(id)) => Some(id),
        Some(NextQuestion::Branch { yes, no }) => {
            if answer_is_yes(answer) {
                Some(yes)
            } else {
                Some(no)
            }
        }
    }
}

/// The yes-arm is taken only for a true binary reply or the literal
/// "yes" option value; everything else takes the no-arm
fn answer_is_yes(answer: &RawAnswer) -> bool {
    match answer {
        RawAnswer::Binary(flag) => *flag,
        RawAnswer::Choice(value) => value == "yes",
        RawAnswer::Selections(_) => false,
    }
}

/// Convert a raw reply to its recorded score using the question's option
/// list or binary scoring table. Unknown option values score 0.
pub fn score_for_answer(question: &AdaptiveQuestion, answer: &RawAnswer) -> AnswerValue {
    match answer {
        RawAnswer::Selections(values) => AnswerValue::MultiSelect(
            values.iter().map(|v| option_score(question, v)).collect(),
        ),
        RawAnswer::Choice(value) => AnswerValue::Scalar(option_score(question, value)),
        RawAnswer::Binary(flag) => {
            let score = match &question.scoring {
                Some(table) => {
                    if *flag {
                        table.yes
                    } else {
                        table.no
                    }
                }
                None => 0.0,
            };
            AnswerValue::Scalar(score)
        }
    }
}

fn option_score(question: &AdaptiveQuestion, value: &str) -> f64 {
    question
        .options
        .as_ref()
        .and_then(|options| options.iter().find(|o| o.value == value))
        .map(|o| o.score)
        .unwrap_or(0.0)
}

/// Gap record for every dimension percentage against one target tier
pub fn gaps_from_percentages(dimensions: &[DimensionPercentage], target: Tier) -> Vec<GapInfo> {
    dimensions
        .iter()
        .map(|d| {
            tiers::gap_info(
                &d.id,
                &d.name,
                tiers::tier_from_percentage(f64::from(d.percentage)),
                target,
            )
        })
        .collect()
}

/// Run the adaptive pipeline end to end over an answer snapshot
pub fn assess(
    graph: &QuestionGraph,
    answers: &HashMap<String, AnswerValue>,
    policy: TargetPolicy,
) -> AdaptiveAssessment {
    let dimensions: Vec<DimensionPercentage> = graph
        .dimensions()
        .iter()
        .map(|d| DimensionPercentage {
            id: d.id.clone(),
            name: d.name.clone(),
            icon: d.icon.clone(),
            percentage: graph.score_dimension(&d.id, answers),
        })
        .collect();
    let global_score = if dimensions.is_empty() {
        0
    } else {
        let sum: i32 = dimensions.iter().map(|d| d.percentage).sum();
        (f64::from(sum) / dimensions.len() as f64).round() as i32
    };
    let profile = tiers::profile_from_score(f64::from(global_score));
    let target_tier = policy.target_tier(profile);
    let gaps = gaps_from_percentages(&dimensions, target_tier);
    AdaptiveAssessment {
        dimensions,
        global_score,
        profile,
        target_policy: policy,
        target_tier,
        gaps,
    }
}
