// Conversational driver for the adaptive questionnaire.
//
// One session walks the question graph dimension by dimension: resolve
// the follow-up of each answered question, and when a branch runs out,
// mark the dimension complete and jump to the entry question of the next
// incomplete one. The walk terminates exactly once, when every dimension
// is complete. Dimensions without questions are completed on sight.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use crate::adaptive::{next_question, score_for_answer, QuestionGraph};
use crate::definitions::AdaptiveQuestion;
use crate::error::MaturityError;
use crate::types::{AnswerValue, RawAnswer};

/// Outcome of answering the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    /// Move on to this question (possibly in the next dimension)
    Question(String),
    /// Every dimension is complete; the answer snapshot is final
    Complete,
}

/// Interactive walk through the adaptive questionnaire. The graph stays
/// shared and read-only; the session owns the growing answer snapshot.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    graph: &'a QuestionGraph,
    current_question: Option<String>,
    current_dimension: Option<String>,
    answers: HashMap<String, AnswerValue>,
    visited: Vec<String>,
    completed: HashSet<String>,
    started_at: DateTime<Utc>,
}

impl<'a> Session<'a> {
    /// Start at the first question of the first dimension
    pub fn start(graph: &'a QuestionGraph) -> Session<'a> {
        let mut session = Session {
            graph,
            current_question: None,
            current_dimension: None,
            answers: HashMap::new(),
            visited: Vec::new(),
            completed: HashSet::new(),
            started_at: Utc::now(),
        };
        session.advance_to_next_dimension();
        session
    }

    pub fn current_question(&self) -> Option<&AdaptiveQuestion> {
        self.current_question
            .as_deref()
            .and_then(|id| self.graph.question(id))
    }

    pub fn current_question_id(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    pub fn current_dimension(&self) -> Option<&str> {
        self.current_dimension.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.current_question.is_none()
    }

    pub fn answers(&self) -> &HashMap<String, AnswerValue> {
        &self.answers
    }

    /// Final answer snapshot, consuming the session
    pub fn into_answers(self) -> HashMap<String, AnswerValue> {
        self.answers
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Share of catalog questions answered so far, 0.0-1.0
    pub fn progress(&self) -> f64 {
        let total = self.graph.question_count();
        if total == 0 {
            return 0.0;
        }
        self.visited.len() as f64 / total as f64
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }

    /// Record a reply to the current question and advance the walk.
    /// Answering a completed session is a no-op reporting completion.
    pub fn answer(&mut self, reply: &RawAnswer) -> Result<SessionStep, MaturityError> {
        let graph = self.graph;
        let question_id = match self.current_question.clone() {
            Some(id) => id,
            None => return Ok(SessionStep::Complete),
        };
        let question = graph.question(&question_id).ok_or_else(|| {
            MaturityError::InvalidState(format!(
                "current question {} is not in the graph",
                question_id
            ))
        })?;

        self.answers
            .insert(question_id.clone(), score_for_answer(question, reply));
        self.visited.push(question_id);

        if let Some(next_id) = next_question(question, reply) {
            // the pointer may cross into another dimension's branch
            let next_dimension = graph
                .dimension_of(next_id)
                .map(str::to_string)
                .or_else(|| self.current_dimension.clone());
            self.current_question = Some(next_id.to_string());
            self.current_dimension = next_dimension;
            return Ok(SessionStep::Question(next_id.to_string()));
        }

        if let Some(dim) = self.current_dimension.take() {
            self.completed.insert(dim);
        }
        Ok(self.advance_to_next_dimension())
    }

    /// Enter the first incomplete dimension that has questions, or finish
    fn advance_to_next_dimension(&mut self) -> SessionStep {
        for dim in self.graph.dimensions() {
            if self.completed.contains(&dim.id) {
                continue;
            }
            match &dim.entry_question {
                Some(entry) => {
                    self.current_question = Some(entry.clone());
                    self.current_dimension = Some(dim.id.clone());
                    return SessionStep::Question(entry.clone());
                }
                None => {
                    self.completed.insert(dim.id.clone());
                }
            }
        }
        self.current_question = None;
        self.current_dimension = None;
        SessionStep::Complete
    }
}
