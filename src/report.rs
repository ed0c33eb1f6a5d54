// Report assembly: join scores, gaps and narrative content into one
// value the rendering collaborators (CLI, export) read as-is.
//
// Every dimension must find its gap record; a missing entry is a data
// consistency bug and fails loudly instead of defaulting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::adaptive::AdaptiveAssessment;
use crate::error::MaturityError;
use crate::grid::StaticAssessment;
use crate::narrative;
use crate::tiers;
use crate::types::{
    DimensionPercentage, GapInfo, Priority, Profile, TargetPolicy, Tier, TierStatus,
};

const FALLBACK_QUICK_WIN: &str =
    "Consolidate fundamentals on 1–2 key dimensions before launching more ambitious initiatives.";
const FALLBACK_STRATEGIC: &str =
    "Define an integrated digital roadmap that prioritises the dimensions with the largest maturity gaps.";

/// Per-dimension entry on the final report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDimension {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub percentage: i32,
    pub achieved_tier: Tier,
    pub target_tier: Tier,
    pub gap: u8,
    pub priority: Priority,
    pub status: TierStatus,
}

/// Full assessment report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Utc>,
    pub global_score: i32,
    pub profile: Profile,
    /// Mode-appropriate profile label (localized for fixed-form runs)
    pub profile_label: String,
    pub profile_description: String,
    pub recommendation: String,
    pub benchmark_range: String,
    pub target_policy: TargetPolicy,
    pub target_tier: Tier,
    pub dimensions: Vec<EnrichedDimension>,
    pub key_strengths: Vec<String>,
    pub critical_gaps: Vec<String>,
    pub quick_wins: Vec<String>,
    pub strategic_initiatives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_complete: Option<String>,
}

/// Join dimension percentages with their gap records. Every dimension
/// must have exactly one gap entry.
pub fn enrich_dimensions(
    dimensions: &[DimensionPercentage],
    gaps: &[GapInfo],
) -> Result<Vec<EnrichedDimension>, MaturityError> {
    let gap_map: HashMap<&str, &GapInfo> = gaps.iter().map(|g| (g.id.as_str(), g)).collect();
    dimensions
        .iter()
        .map(|dim| {
            let info = gap_map.get(dim.id.as_str()).ok_or_else(|| {
                MaturityError::InvalidState(format!("missing gap info for dimension {}", dim.id))
            })?;
            Ok(EnrichedDimension {
                id: dim.id.clone(),
                name: dim.name.clone(),
                icon: dim.icon.clone(),
                percentage: dim.percentage,
                achieved_tier: info.achieved_tier,
                target_tier: info.target_tier,
                gap: info.gap,
                priority: info.priority,
                status: tiers::tier_status(info.achieved_tier, info.target_tier),
            })
        })
        .collect()
}

/// Report over an adaptive assessment
pub fn from_adaptive(
    assessment: &AdaptiveAssessment,
    time_to_complete: Option<String>,
) -> Result<AssessmentReport, MaturityError> {
    let dimensions = enrich_dimensions(&assessment.dimensions, &assessment.gaps)?;
    Ok(build(
        dimensions,
        assessment.global_score,
        assessment.profile,
        assessment.profile.name(),
        assessment.target_policy,
        assessment.target_tier,
        time_to_complete,
    ))
}

/// Report over a fixed-form assessment
pub fn from_static(assessment: &StaticAssessment) -> Result<AssessmentReport, MaturityError> {
    let percentages: Vec<DimensionPercentage> = assessment
        .dimensions
        .iter()
        .map(|d| DimensionPercentage {
            id: d.id.clone(),
            name: d.name.clone(),
            icon: None,
            percentage: d.percentage,
        })
        .collect();
    let dimensions = enrich_dimensions(&percentages, &assessment.gaps)?;
    Ok(build(
        dimensions,
        assessment.global_score,
        assessment.profile,
        assessment.profile.localized_name(),
        assessment.target_policy,
        assessment.target_tier,
        None,
    ))
}

fn build(
    dimensions: Vec<EnrichedDimension>,
    global_score: i32,
    profile: Profile,
    profile_label: &str,
    target_policy: TargetPolicy,
    target_tier: Tier,
    time_to_complete: Option<String>,
) -> AssessmentReport {
    let mut strengths: Vec<&EnrichedDimension> =
        dimensions.iter().filter(|d| d.gap == 0).collect();
    strengths.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    let key_strengths: Vec<String> = strengths.iter().take(3).map(|d| d.name.clone()).collect();

    // widest gap first, lowest score breaking ties
    let mut gap_dimensions: Vec<&EnrichedDimension> =
        dimensions.iter().filter(|d| d.gap > 0).collect();
    gap_dimensions.sort_by(|a, b| b.gap.cmp(&a.gap).then(a.percentage.cmp(&b.percentage)));
    let critical_gaps: Vec<String> = gap_dimensions
        .iter()
        .take(3)
        .map(|d| d.name.clone())
        .collect();

    let mut quick_wins = Vec::new();
    let mut strategic_initiatives = Vec::new();
    for dim in &gap_dimensions {
        let plan = narrative::suggest_actions(&dim.id, dim.gap);
        quick_wins.extend(
            plan.quick_wins
                .into_iter()
                .map(|action| format!("{} – {}", dim.name, action)),
        );
        strategic_initiatives.extend(
            plan.strategic
                .into_iter()
                .map(|action| format!("{} – {}", dim.name, action)),
        );
    }
    let quick_wins = if quick_wins.is_empty() {
        vec![FALLBACK_QUICK_WIN.to_string()]
    } else {
        dedup_preserving_order(quick_wins)
    };
    let strategic_initiatives = if strategic_initiatives.is_empty() {
        vec![FALLBACK_STRATEGIC.to_string()]
    } else {
        dedup_preserving_order(strategic_initiatives)
    };

    AssessmentReport {
        generated_at: Utc::now(),
        global_score,
        profile,
        profile_label: profile_label.to_string(),
        profile_description: narrative::describe_profile(profile).to_string(),
        recommendation: narrative::profile_recommendation(profile).to_string(),
        benchmark_range: narrative::profile_benchmark(profile).range.to_string(),
        target_policy,
        target_tier,
        dimensions,
        key_strengths,
        critical_gaps,
        quick_wins,
        strategic_initiatives,
        time_to_complete,
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|i| seen.insert(i.clone())).collect()
}

/// "M:SS" display of the time a session took
pub fn format_time_to_complete(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Render a report as markdown
pub fn render_markdown(report: &AssessmentReport) -> String {
    let mut body = String::new();
    body.push_str("# Digital Maturity Report\n\n");
    body.push_str(&format!(
        "Generated: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(time) = &report.time_to_complete {
        body.push_str(&format!("Completed in: {}\n", time));
    }
    body.push('\n');

    body.push_str("## Overall\n\n");
    body.push_str(&format!("- Global score: {}%\n", report.global_score));
    body.push_str(&format!(
        "- Profile: {} ({})\n",
        report.profile_label, report.benchmark_range
    ));
    body.push_str(&format!(
        "- Target tier: {} ({})\n",
        report.target_tier.level(),
        report.target_tier.label()
    ));
    body.push_str(&format!("- Recommendation: {}\n\n", report.recommendation));
    body.push_str(&format!("{}\n\n", report.profile_description));

    body.push_str("## Dimensions\n\n");
    for dim in &report.dimensions {
        body.push_str(&format!(
            "### {} ({}%)\n\n",
            dim.name, dim.percentage
        ));
        body.push_str(&format!(
            "Tier {} ({}), target {} ({}): {}\n\n",
            dim.achieved_tier.level(),
            dim.achieved_tier.label(),
            dim.target_tier.level(),
            dim.target_tier.label(),
            dim.status.label()
        ));
        body.push_str(&format!(
            "{}\n\n",
            narrative::describe_dimension_tier(&dim.id, dim.achieved_tier)
        ));
    }

    body.push_str("## Key strengths\n\n");
    if report.key_strengths.is_empty() {
        body.push_str("- None identified yet\n");
    } else {
        for strength in &report.key_strengths {
            body.push_str(&format!("- {}\n", strength));
        }
    }
    body.push('\n');

    body.push_str("## Critical gaps\n\n");
    if report.critical_gaps.is_empty() {
        body.push_str("- None\n");
    } else {
        for gap in &report.critical_gaps {
            body.push_str(&format!("- {}\n", gap));
        }
    }
    body.push('\n');

    body.push_str("## Quick wins\n\n");
    for win in &report.quick_wins {
        body.push_str(&format!("- {}\n", win));
    }
    body.push('\n');

    body.push_str("## Strategic initiatives\n\n");
    for initiative in &report.strategic_initiatives {
        body.push_str(&format!("- {}\n", initiative));
    }

    body
}
