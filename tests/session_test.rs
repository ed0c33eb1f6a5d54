//! Integration test for the conversational driver over the built-in
//! question set: branch-following walks, dimension hand-off and the
//! scored assessment produced from a finished session.

use digimaturity::definitions::QuestionKind;
use digimaturity::{adaptive, catalog, report, session};
use digimaturity::{Profile, RawAnswer, TargetPolicy, Tier, TierStatus};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Walk the whole catalog with one scripted reply per question kind.
fn walk<F>(graph: &adaptive::QuestionGraph, mut reply_for: F) -> session::Session<'_>
where
    F: FnMut(&digimaturity::definitions::AdaptiveQuestion) -> RawAnswer,
{
    let mut sess = session::Session::start(graph);
    while let Some(question) = sess.current_question().cloned() {
        let reply = reply_for(&question);
        sess.answer(&reply).unwrap();
    }
    sess
}

fn best_reply(question: &digimaturity::definitions::AdaptiveQuestion) -> RawAnswer {
    match question.kind {
        QuestionKind::Binary => RawAnswer::Binary(true),
        QuestionKind::Choice => {
            let first = &question.options.as_ref().unwrap()[0];
            RawAnswer::Choice(first.value.clone())
        }
        QuestionKind::Multiselect => {
            let values = question
                .options
                .as_ref()
                .unwrap()
                .iter()
                .map(|o| o.value.clone())
                .collect();
            RawAnswer::Selections(values)
        }
    }
}

fn worst_reply(question: &digimaturity::definitions::AdaptiveQuestion) -> RawAnswer {
    match question.kind {
        QuestionKind::Binary => RawAnswer::Binary(false),
        QuestionKind::Choice => {
            let last = question.options.as_ref().unwrap().last().unwrap();
            RawAnswer::Choice(last.value.clone())
        }
        QuestionKind::Multiselect => RawAnswer::Selections(vec![]),
    }
}

#[test]
fn session_starts_at_the_first_strategy_question() {
    let graph = adaptive::QuestionGraph::build(catalog::builtin_questions());
    let sess = session::Session::start(&graph);
    assert_eq!(sess.current_question_id(), Some("strat_q1"));
    assert_eq!(sess.current_dimension(), Some("strategie"));
    assert!(!sess.is_complete());
}

#[test]
fn best_answers_walk_the_yes_branches_to_leader() {
    let graph = adaptive::QuestionGraph::build(catalog::builtin_questions());
    let sess = walk(&graph, best_reply);

    assert!(sess.is_complete());
    // yes on strat_q1 takes the review question, not the fallback
    let visited = sess.visited();
    assert!(visited.contains(&"strat_q2".to_string()));
    assert!(!visited.contains(&"strat_q3".to_string()));
    assert_eq!(visited.len(), 35);

    let answers = sess.into_answers();
    let assessment = adaptive::assess(&graph, &answers, TargetPolicy::ProfileDerived);
    assert_eq!(
        assessment
            .dimensions
            .iter()
            .map(|d| d.percentage)
            .collect::<Vec<_>>(),
        vec![93, 89, 83, 78, 83, 83]
    );
    assert_eq!(assessment.global_score, 85);
    assert_eq!(assessment.profile, Profile::Leader);
    assert_eq!(assessment.target_tier, Tier::Steering);
    assert!(assessment.gaps.iter().all(|g| g.gap == 0));
}

#[test]
fn worst_answers_walk_the_no_branches_to_beginner() {
    let graph = adaptive::QuestionGraph::build(catalog::builtin_questions());
    let sess = walk(&graph, worst_reply);

    assert!(sess.is_complete());
    let visited = sess.visited();
    // every yes-gated follow-up is skipped
    for skipped in ["strat_q2", "cult_q3", "rel_q4", "proc_q5", "tech_q5", "sec_q5"] {
        assert!(!visited.contains(&skipped.to_string()), "{} should be skipped", skipped);
    }
    assert_eq!(visited.len(), 30);

    let answers = sess.into_answers();
    let assessment = adaptive::assess(&graph, &answers, TargetPolicy::ProfileDerived);
    assert_eq!(assessment.global_score, 0);
    assert_eq!(assessment.profile, Profile::Beginner);
    assert_eq!(assessment.target_tier, Tier::Initiation);
    assert!(assessment.gaps.iter().all(|g| g.gap == 0));

    // against the fixed ceiling the same walk shows maximal gaps
    let fixed = adaptive::assess(&graph, &answers, TargetPolicy::FixedMax);
    assert!(fixed.gaps.iter().all(|g| g.gap == 3));
}

#[test]
fn fixture_replay_reproduces_the_expected_report() {
    let graph = adaptive::QuestionGraph::build(catalog::builtin_questions());
    let json = std::fs::read_to_string(fixture_dir().join("sample_replies.json")).unwrap();
    let replies: HashMap<String, RawAnswer> = serde_json::from_str(&json).unwrap();

    let mut sess = session::Session::start(&graph);
    while let Some(id) = sess.current_question_id().map(str::to_string) {
        sess.answer(replies.get(&id).unwrap()).unwrap();
    }
    assert!(sess.is_complete());
    assert_eq!(sess.visited().len(), 32);

    let answers = sess.into_answers();
    let assessment = adaptive::assess(&graph, &answers, TargetPolicy::ProfileDerived);
    assert_eq!(
        assessment
            .dimensions
            .iter()
            .map(|d| (d.id.as_str(), d.percentage))
            .collect::<Vec<_>>(),
        vec![
            ("strategie", 73),
            ("culture", 33),
            ("relation_client", 47),
            ("processus", 56),
            ("technologies", 33),
            ("securite", 13),
        ]
    );
    assert_eq!(assessment.global_score, 43);
    assert_eq!(assessment.profile, Profile::Emerging);

    let rpt = report::from_adaptive(&assessment, None).unwrap();
    assert_eq!(rpt.profile_label, "Emerging");
    assert_eq!(
        rpt.key_strengths,
        vec!["Strategy", "Processes", "Customer Relationship"]
    );
    assert_eq!(rpt.critical_gaps, vec!["Security"]);

    let security = rpt.dimensions.iter().find(|d| d.id == "securite").unwrap();
    assert_eq!(security.achieved_tier, Tier::Initiation);
    assert_eq!(security.gap, 1);
    assert_eq!(security.status, TierStatus::Below);

    let strategy = rpt.dimensions.iter().find(|d| d.id == "strategie").unwrap();
    assert_eq!(strategy.status, TierStatus::Above);

    // gap 1: two quick wins and two strategics, no escalation
    assert_eq!(rpt.quick_wins.len(), 2);
    assert!(rpt.quick_wins.iter().all(|w| w.starts_with("Security – ")));
    assert_eq!(rpt.strategic_initiatives.len(), 2);
}

#[test]
fn progress_counts_visited_against_the_whole_catalog() {
    let graph = adaptive::QuestionGraph::build(catalog::builtin_questions());
    let sess = walk(&graph, worst_reply);
    let expected = 30.0 / graph.question_count() as f64;
    assert!((sess.progress() - expected).abs() < f64::EPSILON);
}
