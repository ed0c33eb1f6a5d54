// Narrative and recommendation lookups. All tables are static content
// keyed by dimension id; unknown ids fall back to the strategy entry
// instead of failing.

use serde::{Deserialize, Serialize};

use crate::types::{Profile, Tier};

/// Narrative content for one dimension: a title plus one paragraph per tier
pub struct DimensionNarrative {
    pub id: &'static str,
    pub title: &'static str,
    /// One paragraph per tier, lowest first
    pub tiers: [&'static str; 4],
}

/// Fixed action content for one dimension
pub struct DimensionActions {
    pub id: &'static str,
    pub quick_wins: [&'static str; 2],
    pub strategic: [&'static str; 2],
}

/// Benchmark band shown next to a profile
pub struct ProfileBenchmark {
    pub profile: Profile,
    pub range: &'static str,
    pub description: &'static str,
}

/// Suggested action plan for one dimension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub quick_wins: Vec<String>,
    pub strategic: Vec<String>,
}

/// Strategic escalation appended when a gap spans two or more tiers
const EXECUTIVE_ESCALATION: &str =
    "Make this dimension an explicit executive committee priority with a dedicated sponsor.";

/// Master narrative table, strategy first (it doubles as the fallback)
pub static NARRATIVES: &[DimensionNarrative] = &[
    DimensionNarrative {
        id: "strategie",
        title: "Strategy",
        tiers: [
            "At the Initiation tier, digital transformation is seen as an opportunity but there is no formalised vision. A few pilot projects may exist but they are not yet connected to a global strategic trajectory.",
            "At the Experimentation tier, an initial digital strategy begins to take shape: priority axes are identified, investments are planned, but governance and follow-up are still limited.",
            "At the Structuring tier, the digital strategy is clearly defined, shared and aligned with the business strategy. Priorities are arbitrated, roadmaps are managed and digital performance indicators are monitored regularly.",
            "At the Steering & Innovation tier, the digital strategy is anticipatory and relies on monitoring, data and innovation to create new growth levers. Digital becomes a structural differentiation factor in the market.",
        ],
    },
    DimensionNarrative {
        id: "culture",
        title: "Culture & People",
        tiers: [
            "At the Initiation tier, the digital culture is still emerging. Staff awareness is occasional and upskilling needs are not yet structured.",
            "At the Experimentation tier, an initial training plan and key digital roles appear. Awareness is increasing but collaborative practices remain uneven.",
            "At the Structuring tier, capability pathways are organised, cross-functional collaboration is strengthened and cultural transformation is monitored with indicators.",
            "At the Steering & Innovation tier, the organisation attracts digital talent, encourages autonomy and initiative, and has leadership strongly engaged in digital transformation.",
        ],
    },
    DimensionNarrative {
        id: "relation_client",
        title: "Customer Relationship",
        tiers: [
            "At the Initiation tier, the digital presence towards customers remains basic (showcase website, email) and the experience is poorly structured across channels.",
            "At the Experimentation tier, the first e-commerce or online service capabilities emerge, with an initial CRM and simple segmentation.",
            "At the Structuring tier, the experience becomes omnichannel, personalised and powered by more advanced customer analytics.",
            "At the Steering & Innovation tier, the organisation anticipates customer needs, leverages data and AI, and orchestrates an ecosystem of partners to enrich the experience.",
        ],
    },
    DimensionNarrative {
        id: "processus",
        title: "Processes",
        tiers: [
            "At the Initiation tier, processes are only partially documented and automation is occasional. Improvements are mainly informal.",
            "At the Experimentation tier, key processes are mapped, a workflow platform begins to structure flows and performance KPIs are introduced.",
            "At the Structuring tier, advanced automation, RPA and continuous improvement help secure and optimise operations.",
            "At the Steering & Innovation tier, processes become intelligent, adaptive and centred on a frictionless experience, supported by a culture of continuous innovation.",
        ],
    },
    DimensionNarrative {
        id: "technologies",
        title: "Technology",
        tiers: [
            "At the Initiation tier, the IT infrastructure is basic and technology management remains largely opportunistic and reactive.",
            "At the Experimentation tier, the technology architecture is formalised, initial cloud migrations are underway and interoperability is improving.",
            "At the Structuring tier, the architecture is API- and microservices-oriented, data is centralised and DevOps practices support deployments.",
            "At the Steering & Innovation tier, the organisation has a cloud-native architecture, an advanced data platform and integrates AI at the core of its solutions.",
        ],
    },
    DimensionNarrative {
        id: "securite",
        title: "Security",
        tiers: [
            "At the Initiation tier, security is mainly addressed through awareness and basic technical protection (antivirus, simple backups).",
            "At the Experimentation tier, security policies are formalised, access management is structured and regulatory compliance is taken into account.",
            "At the Structuring tier, encryption, security monitoring and continuity plans are in place and regularly tested.",
            "At the Steering & Innovation tier, security is designed in by default, relies on zero-trust architectures and an advanced capability to detect and respond to threats.",
        ],
    },
];

static ACTIONS: &[DimensionActions] = &[
    DimensionActions {
        id: "strategie",
        quick_wins: [
            "Formalise a one-page digital strategy brief with 3 key priorities.",
            "Clarify ongoing digital projects and link them to explicit business objectives.",
        ],
        strategic: [
            "Build a 12–24 month digital roadmap with investment estimates and associated KPIs.",
            "Set up a digital transformation steering committee with quarterly reviews.",
        ],
    },
    DimensionActions {
        id: "culture",
        quick_wins: [
            "Launch a digital awareness campaign (workshops, webinars, internal talks).",
            "Identify priority teams for an initial digital upskilling programme.",
        ],
        strategic: [
            "Structure a digital skills development plan by role or job family.",
            "Define and deploy digital champion roles in key business units.",
        ],
    },
    DimensionActions {
        id: "relation_client",
        quick_wins: [
            "Map key customer journeys and identify 2–3 major digital pain points.",
            "Set up a simple mechanism for continuous customer feedback collection.",
        ],
        strategic: [
            "Strengthen omnichannel experience (consistency across physical and digital channels).",
            "Implement a personalisation approach based on customer data.",
        ],
    },
    DimensionActions {
        id: "processus",
        quick_wins: [
            "Identify the 2–3 most critical processes and document their key steps.",
            "Implement an initial targeted automation on a low-risk repetitive task.",
        ],
        strategic: [
            "Deploy an automation/workflow platform on a priority perimeter.",
            "Structure a continuous improvement approach (process reviews and KPIs).",
        ],
    },
    DimensionActions {
        id: "technologies",
        quick_wins: [
            "Perform an inventory of the IT architecture and core applications.",
            "Prioritise 1–2 short-term rationalisation or modernisation initiatives.",
        ],
        strategic: [
            "Build an IT master plan including cloud migration and data management.",
            "Gradually introduce DevOps practices on a pilot application perimeter.",
        ],
    },
    DimensionActions {
        id: "securite",
        quick_wins: [
            "Remind staff of security best practices (passwords, phishing, etc.).",
            "Check the existence and effectiveness of backups on critical systems.",
        ],
        strategic: [
            "Formalise and roll out a security and access management policy.",
            "Implement a structured security monitoring and audit capability.",
        ],
    },
];

static GENERIC_ACTIONS: DimensionActions = DimensionActions {
    id: "",
    quick_wins: [
        "Clarify the current maturity level and main pain points observed.",
        "Organise a scoping workshop to define 2–3 quick and realistic actions.",
    ],
    strategic: [
        "Build a structured roadmap for the dimension concerned.",
        "Define indicators to track progress over the next 6–12 months.",
    ],
};

pub static BENCHMARKS: &[ProfileBenchmark] = &[
    ProfileBenchmark {
        profile: Profile::Beginner,
        range: "0-25%",
        description: "Organisation in the initial phase of its digital transformation",
    },
    ProfileBenchmark {
        profile: Profile::Emerging,
        range: "26-50%",
        description: "Organisation that has begun its digital transformation",
    },
    ProfileBenchmark {
        profile: Profile::Challenger,
        range: "51-75%",
        description: "Organisation in advanced transition towards digital",
    },
    ProfileBenchmark {
        profile: Profile::Leader,
        range: "76-100%",
        description: "Organisation mature and leading on digital",
    },
];

/// Profile description shared by both questionnaire modes
pub fn describe_profile(profile: Profile) -> &'static str {
    match profile {
        Profile::Beginner => {
            "Your organisation is just discovering digital. Initiatives are occasional and not yet structured, so the impact on the business model remains limited. The main challenge is to establish a shared digital vision and the first operational foundations."
        }
        Profile::Emerging => {
            "Your organisation is experimenting with digital through visible tools and projects. Practices are still fragmented between departments. The challenge is to structure, prioritise and better coordinate initiatives to gain coherence and impact."
        }
        Profile::Challenger => {
            "Your organisation is already well structured and integrated into key operations. Your organisation has solid processes and tools, but can still progress on industrialisation, data and innovation to catch up with leaders in your sector."
        }
        Profile::Leader => {
            "Digital is at the heart of the business model, driven by a culture of innovation and data. Your organisation is seen as a reference in its market and must maintain this advantage through anticipation, continuous experimentation and operational excellence."
        }
    }
}

/// One-line recommendation for a profile
pub fn profile_recommendation(profile: Profile) -> &'static str {
    match profile {
        Profile::Beginner => "Establish a clear strategy and engage leadership",
        Profile::Emerging => "Accelerate adoption and strengthen skills",
        Profile::Challenger => "Optimise integration and innovate",
        Profile::Leader => "Maintain the advantage and explore new frontiers",
    }
}

/// Benchmark band for a profile
pub fn profile_benchmark(profile: Profile) -> &'static ProfileBenchmark {
    BENCHMARKS
        .iter()
        .find(|b| b.profile == profile)
        .unwrap_or(&BENCHMARKS[0])
}

/// Narrative entry for a dimension id; unknown ids fall back to strategy
pub fn dimension_narrative(dimension_id: &str) -> &'static DimensionNarrative {
    NARRATIVES
        .iter()
        .find(|n| n.id == dimension_id)
        .unwrap_or(&NARRATIVES[0])
}

/// Paragraph describing a dimension at a given tier
pub fn describe_dimension_tier(dimension_id: &str, tier: Tier) -> &'static str {
    dimension_narrative(dimension_id).tiers[(tier.level() - 1) as usize]
}

/// Action plan for a dimension with an open gap. Closed gaps get an empty
/// plan; gaps of two or more tiers escalate to an executive sponsor.
pub fn suggest_actions(dimension_id: &str, gap: u8) -> ActionPlan {
    if gap == 0 {
        return ActionPlan::default();
    }
    let set = ACTIONS
        .iter()
        .find(|a| a.id == dimension_id)
        .unwrap_or(&GENERIC_ACTIONS);
    let mut plan = ActionPlan {
        quick_wins: set.quick_wins.iter().map(|s| s.to_string()).collect(),
        strategic: set.strategic.iter().map(|s| s.to_string()).collect(),
    };
    if gap >= 2 {
        plan.strategic.push(EXECUTIVE_ESCALATION.to_string());
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dimension_has_a_narrative() {
        let ids = [
            "strategie",
            "culture",
            "relation_client",
            "processus",
            "technologies",
            "securite",
        ];
        for id in ids {
            let narrative = dimension_narrative(id);
            assert_eq!(narrative.id, id);
            assert!(narrative.tiers.iter().all(|t| !t.is_empty()));
        }
    }

    #[test]
    fn unknown_dimension_falls_back_to_strategy() {
        let narrative = dimension_narrative("blockchain");
        assert_eq!(narrative.id, "strategie");
        assert_eq!(
            describe_dimension_tier("blockchain", Tier::Initiation),
            describe_dimension_tier("strategie", Tier::Initiation)
        );
    }

    #[test]
    fn tier_paragraphs_differ_by_tier() {
        assert_ne!(
            describe_dimension_tier("securite", Tier::Initiation),
            describe_dimension_tier("securite", Tier::Steering)
        );
        assert!(describe_dimension_tier("securite", Tier::Steering).contains("zero-trust"));
    }

    #[test]
    fn closed_gap_means_no_actions() {
        let plan = suggest_actions("strategie", 0);
        assert!(plan.quick_wins.is_empty());
        assert!(plan.strategic.is_empty());
    }

    #[test]
    fn open_gap_yields_two_plus_two() {
        let plan = suggest_actions("culture", 1);
        assert_eq!(plan.quick_wins.len(), 2);
        assert_eq!(plan.strategic.len(), 2);
    }

    #[test]
    fn wide_gap_escalates() {
        let plan = suggest_actions("processus", 2);
        assert_eq!(plan.strategic.len(), 3);
        assert_eq!(plan.strategic[2], EXECUTIVE_ESCALATION);

        let widest = suggest_actions("processus", 3);
        assert_eq!(widest.strategic.len(), 3);
    }

    #[test]
    fn unknown_dimension_gets_generic_actions() {
        let plan = suggest_actions("blockchain", 1);
        assert_eq!(plan.quick_wins.len(), 2);
        assert!(plan.quick_wins[0].contains("maturity level"));
    }

    #[test]
    fn profiles_have_descriptions_and_benchmarks() {
        for level in 1..=4 {
            let profile = Profile::from_level(level);
            assert!(!describe_profile(profile).is_empty());
            assert!(!profile_recommendation(profile).is_empty());
            assert_eq!(profile_benchmark(profile).profile, profile);
        }
        assert_eq!(profile_benchmark(Profile::Leader).range, "76-100%");
    }
}
