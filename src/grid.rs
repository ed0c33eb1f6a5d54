// Fixed-form ("grid") scoring pipeline.
//
// Score formula per dimension:
//   pN        = sum of the palier's criterion scores (missing/NaN count 0)
//   raw_score = p1 + p2 + p3 + p4           (0-36 when well-formed)
//   percentage = round(raw_score / 36 * 100)
//   achieved_tier = classify(percentage)
//
// Palier sums are deliberately not clamped to the nominal 0-9: malformed
// upstream data flows through and only the final classification clamps.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::definitions::{CriteriaSet, DimensionDef};
use crate::tiers;
use crate::types::{DimensionScore, GapInfo, PalierScores, Profile, TargetPolicy, Tier};

/// Complete fixed-form assessment result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticAssessment {
    pub dimensions: Vec<DimensionScore>,
    pub global_score: i32,
    pub profile: Profile,
    /// Localized profile label shown on fixed-form reports
    pub profile_label: String,
    pub target_policy: TargetPolicy,
    pub target_tier: Tier,
    pub gaps: Vec<GapInfo>,
}

/// Missing answers count as 0; NaN is excluded from sums
fn sanitize(raw: Option<&f64>) -> f64 {
    match raw {
        Some(v) if !v.is_nan() => *v,
        _ => 0.0,
    }
}

/// Sum each palier's criterion scores for one dimension
pub fn palier_totals(def: &DimensionDef, answers: &HashMap<String, f64>) -> PalierScores {
    let mut scores = PalierScores::default();
    for palier in &def.paliers {
        let total: f64 = palier
            .criteria
            .iter()
            .map(|c| sanitize(answers.get(&c.id)))
            .sum();
        match palier.level {
            1 => scores.p1 = total,
            2 => scores.p2 = total,
            3 => scores.p3 = total,
            4 => scores.p4 = total,
            _ => {}
        }
    }
    scores
}

/// Dimension score from its palier sums
pub fn compute_dimension(id: &str, name: &str, palier_scores: PalierScores) -> DimensionScore {
    let raw_score = palier_scores.total();
    let percentage = (raw_score / tiers::MAX_RAW_SCORE * 100.0).round() as i32;
    DimensionScore {
        id: id.to_string(),
        name: name.to_string(),
        palier_scores,
        raw_score,
        percentage,
        achieved_tier: tiers::tier_from_percentage(percentage as f64),
    }
}

/// Score every dimension of a definition tree against an answer map
pub fn score_dimensions(set: &CriteriaSet, answers: &HashMap<String, f64>) -> Vec<DimensionScore> {
    set.dimensions
        .iter()
        .map(|d| compute_dimension(&d.id, &d.name, palier_totals(d, answers)))
        .collect()
}

/// Global percentage: rounded mean over dimension percentages, 0 when empty
pub fn global_score(dimensions: &[DimensionScore]) -> i32 {
    if dimensions.is_empty() {
        return 0;
    }
    let sum: i32 = dimensions.iter().map(|d| d.percentage).sum();
    (f64::from(sum) / dimensions.len() as f64).round() as i32
}

/// Gap record for every dimension against one target tier
pub fn compute_gaps(dimensions: &[DimensionScore], target: Tier) -> Vec<GapInfo> {
    dimensions
        .iter()
        .map(|d| tiers::gap_info(&d.id, &d.name, d.achieved_tier, target))
        .collect()
}

/// Highest-scoring dimension (ties keep the earlier one)
pub fn strongest(dimensions: &[DimensionScore]) -> Option<&DimensionScore> {
    dimensions
        .iter()
        .fold(None, |best: Option<&DimensionScore>, d| match best {
            Some(b) if b.percentage >= d.percentage => Some(b),
            _ => Some(d),
        })
}

/// Lowest-scoring dimension (ties keep the earlier one)
pub fn weakest(dimensions: &[DimensionScore]) -> Option<&DimensionScore> {
    dimensions
        .iter()
        .fold(None, |worst: Option<&DimensionScore>, d| match worst {
            Some(w) if w.percentage <= d.percentage => Some(w),
            _ => Some(d),
        })
}

/// Run the fixed-form pipeline end to end
pub fn assess(
    set: &CriteriaSet,
    answers: &HashMap<String, f64>,
    policy: TargetPolicy,
) -> StaticAssessment {
    let dimensions = score_dimensions(set, answers);
    let global = global_score(&dimensions);
    let profile = tiers::profile_from_score(f64::from(global));
    let target_tier = policy.target_tier(profile);
    let gaps = compute_gaps(&dimensions, target_tier);
    StaticAssessment {
        dimensions,
        global_score: global,
        profile,
        profile_label: profile.localized_name().to_string(),
        target_policy: policy,
        target_tier,
        gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{Criterion, Palier};
    use crate::types::Priority;

    fn make_dimension(id: &str) -> DimensionDef {
        DimensionDef {
            id: id.to_string(),
            name: format!("Dimension {}", id),
            description: String::new(),
            paliers: (1..=4)
                .map(|level| Palier {
                    level,
                    name: format!("Palier {}", level),
                    criteria: (0..3)
                        .map(|c| Criterion {
                            id: format!("{}_p{}_c{}", id, level, c),
                            label: format!("Criterion {}", c),
                            description: String::new(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn answer_all(def: &DimensionDef, score: f64) -> HashMap<String, f64> {
        def.paliers
            .iter()
            .flat_map(|p| &p.criteria)
            .map(|c| (c.id.clone(), score))
            .collect()
    }

    #[test]
    fn full_marks_reach_top_tier() {
        let def = make_dimension("strategie");
        let answers = answer_all(&def, 3.0);
        let score = compute_dimension(&def.id, &def.name, palier_totals(&def, &answers));
        assert!((score.raw_score - 36.0).abs() < f64::EPSILON);
        assert_eq!(score.percentage, 100);
        assert_eq!(score.achieved_tier, Tier::Steering);
        assert!((score.palier_scores.p1 - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_marks_stay_bottom_tier() {
        let def = make_dimension("culture");
        let answers = answer_all(&def, 0.0);
        let score = compute_dimension(&def.id, &def.name, palier_totals(&def, &answers));
        assert!(score.raw_score.abs() < f64::EPSILON);
        assert_eq!(score.percentage, 0);
        assert_eq!(score.achieved_tier, Tier::Initiation);
    }

    #[test]
    fn missing_answers_count_zero() {
        let def = make_dimension("processus");
        let mut answers = HashMap::new();
        answers.insert("processus_p1_c0".to_string(), 3.0);
        answers.insert("processus_p1_c1".to_string(), f64::NAN);
        let scores = palier_totals(&def, &answers);
        assert!((scores.p1 - 3.0).abs() < f64::EPSILON);
        assert!(scores.p2.abs() < f64::EPSILON);
    }

    #[test]
    fn palier_sums_are_not_clamped() {
        let def = make_dimension("technologies");
        let answers = answer_all(&def, 5.0);
        let score = compute_dimension(&def.id, &def.name, palier_totals(&def, &answers));
        assert!((score.palier_scores.p1 - 15.0).abs() < f64::EPSILON);
        assert!((score.raw_score - 60.0).abs() < f64::EPSILON);
        assert_eq!(score.percentage, 167);
        // classification clamps even though the sums do not
        assert_eq!(score.achieved_tier, Tier::Steering);
    }

    #[test]
    fn global_score_of_nothing_is_zero() {
        assert_eq!(global_score(&[]), 0);
    }

    #[test]
    fn global_score_rounds_the_mean() {
        let dims: Vec<DimensionScore> = [90, 40, 40, 40, 40, 40]
            .iter()
            .enumerate()
            .map(|(i, pct)| DimensionScore {
                id: format!("d{}", i),
                name: format!("D{}", i),
                palier_scores: PalierScores::default(),
                raw_score: 0.0,
                percentage: *pct,
                achieved_tier: tiers::tier_from_percentage(f64::from(*pct)),
            })
            .collect();
        assert_eq!(global_score(&dims), 48);
    }

    #[test]
    fn gaps_measure_against_one_target() {
        let def = make_dimension("securite");
        let answers = answer_all(&def, 0.0);
        let dims = vec![compute_dimension(&def.id, &def.name, palier_totals(&def, &answers))];
        let gaps = compute_gaps(&dims, Tier::Steering);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].gap, 3);
        assert_eq!(gaps[0].priority, Priority::High);
    }

    #[test]
    fn strongest_and_weakest_keep_first_on_ties() {
        let mk = |id: &str, pct: i32| DimensionScore {
            id: id.to_string(),
            name: id.to_string(),
            palier_scores: PalierScores::default(),
            raw_score: 0.0,
            percentage: pct,
            achieved_tier: tiers::tier_from_percentage(f64::from(pct)),
        };
        let dims = vec![mk("a", 40), mk("b", 80), mk("c", 80), mk("d", 40)];
        assert_eq!(strongest(&dims).map(|d| d.id.as_str()), Some("b"));
        assert_eq!(weakest(&dims).map(|d| d.id.as_str()), Some("a"));
        assert!(strongest(&[]).is_none());
    }

    #[test]
    fn assess_wires_the_pipeline() {
        let set = CriteriaSet {
            dimensions: vec![make_dimension("strategie"), make_dimension("culture")],
        };
        let mut answers = HashMap::new();
        for dim in &set.dimensions {
            answers.extend(answer_all(dim, 3.0));
        }
        let result = assess(&set, &answers, TargetPolicy::FixedMax);
        assert_eq!(result.global_score, 100);
        assert_eq!(result.profile, Profile::Leader);
        assert_eq!(result.profile_label, "Leader");
        assert_eq!(result.target_tier, Tier::Steering);
        assert!(result.gaps.iter().all(|g| g.gap == 0));
    }
}
