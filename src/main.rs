use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use digimaturity::{
    adaptive, catalog, definitions, grid,
    report::{self, AssessmentReport},
    session, AnswerValue, RawAnswer, TargetPolicy,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "digimaturity")]
#[command(about = "Score digital maturity assessments, classify tiers and analyse gaps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a completed fixed-form assessment (72 criteria, 0-3 each)
    Score {
        /// JSON file mapping criterion ids to scores
        answers: PathBuf,
        /// Alternate criteria definition file
        #[arg(short, long)]
        definitions: Option<PathBuf>,
        /// Gap target policy: fixed or profile
        #[arg(short, long, default_value = "fixed")]
        policy: String,
        /// Output format: text, json or markdown
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Reject unknown criterion ids and out-of-range scores
        #[arg(long)]
        strict: bool,
    },

    /// Score recorded adaptive answers
    Adaptive {
        /// JSON file mapping question ids to scored answers
        answers: PathBuf,
        /// Alternate question set file
        #[arg(short, long)]
        questions: Option<PathBuf>,
        /// Gap target policy: fixed or profile
        #[arg(short, long, default_value = "profile")]
        policy: String,
        /// Output format: text, json or markdown
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Replay raw replies through the adaptive session driver
    Simulate {
        /// JSON file mapping question ids to raw replies
        replies: PathBuf,
        /// Alternate question set file
        #[arg(short, long)]
        questions: Option<PathBuf>,
        /// Gap target policy: fixed or profile
        #[arg(short, long, default_value = "profile")]
        policy: String,
        /// Output format: text, json or markdown
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the built-in questionnaire content
    Questions {
        /// Which catalog: static or adaptive
        #[arg(short, long, default_value = "static")]
        mode: String,
    },

    /// Validate a definition file without scoring anything
    Validate {
        /// JSON definition file
        file: PathBuf,
        /// What the file contains: criteria or questions
        #[arg(short, long, default_value = "criteria")]
        kind: String,
    },
}

enum OutputFormat {
    Text,
    Json,
    Markdown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score {
            answers,
            definitions,
            policy,
            format,
            strict,
        } => cmd_score(answers, definitions, &policy, &format, strict),
        Command::Adaptive {
            answers,
            questions,
            policy,
            format,
        } => cmd_adaptive(answers, questions, &policy, &format),
        Command::Simulate {
            replies,
            questions,
            policy,
            format,
        } => cmd_simulate(replies, questions, &policy, &format),
        Command::Questions { mode } => cmd_questions(&mode),
        Command::Validate { file, kind } => cmd_validate(file, &kind),
    }
}

fn parse_policy(raw: &str) -> Result<TargetPolicy> {
    match raw {
        "fixed" => Ok(TargetPolicy::FixedMax),
        "profile" => Ok(TargetPolicy::ProfileDerived),
        other => bail!("unknown policy '{}', expected fixed or profile", other),
    }
}

fn parse_format(raw: &str) -> Result<OutputFormat> {
    match raw {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "markdown" => Ok(OutputFormat::Markdown),
        other => bail!("unknown format '{}', expected text, json or markdown", other),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("{} in {}", what, path.display()))
}

fn cmd_score(
    answers_path: PathBuf,
    definitions_path: Option<PathBuf>,
    policy: &str,
    format: &str,
    strict: bool,
) -> Result<()> {
    let policy = parse_policy(policy)?;
    let format = parse_format(format)?;

    let set = match definitions_path {
        Some(path) => {
            eprintln!("Loading criteria from {}...", path.display());
            catalog::load_criteria(&path)?
        }
        None => catalog::builtin_criteria().clone(),
    };

    let answers: HashMap<String, f64> =
        read_json(&answers_path, "expected a map of criterion ids to scores")?;
    if strict {
        definitions::validate_answers(&set, &answers)?;
    }

    eprintln!(
        "Scoring {} answers across {} dimensions...",
        answers.len(),
        set.dimensions.len()
    );

    let assessment = grid::assess(&set, &answers, policy);
    let rpt = report::from_static(&assessment)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rpt)?),
        OutputFormat::Markdown => print!("{}", report::render_markdown(&rpt)),
        OutputFormat::Text => {
            println!("=== Digital Maturity Results ===");
            println!("Global score: {}%", assessment.global_score);
            println!(
                "Profile: {} ({})",
                assessment.profile_label, rpt.benchmark_range
            );
            println!(
                "Target: tier {} ({})",
                assessment.target_tier.level(),
                assessment.target_tier.label()
            );
            println!();

            for dim in &assessment.dimensions {
                let p = &dim.palier_scores;
                println!(
                    "{:<24} {:>3}%  tier {}  [p1 {:>2} | p2 {:>2} | p3 {:>2} | p4 {:>2}]",
                    dim.name,
                    dim.percentage,
                    dim.achieved_tier.level(),
                    p.p1,
                    p.p2,
                    p.p3,
                    p.p4
                );
            }
            println!();

            if let (Some(strong), Some(weak)) = (
                grid::strongest(&assessment.dimensions),
                grid::weakest(&assessment.dimensions),
            ) {
                println!("Strongest: {} ({}%)", strong.name, strong.percentage);
                println!("Weakest: {} ({}%)", weak.name, weak.percentage);
                println!();
            }

            print_report_sections(&rpt);
        }
    }

    Ok(())
}

fn cmd_adaptive(
    answers_path: PathBuf,
    questions_path: Option<PathBuf>,
    policy: &str,
    format: &str,
) -> Result<()> {
    let policy = parse_policy(policy)?;
    let format = parse_format(format)?;

    let set = match questions_path {
        Some(path) => {
            eprintln!("Loading questions from {}...", path.display());
            catalog::load_questions(&path)?
        }
        None => catalog::builtin_questions().clone(),
    };
    let graph = adaptive::QuestionGraph::build(&set);

    let answers: HashMap<String, AnswerValue> =
        read_json(&answers_path, "expected a map of question ids to answer values")?;

    eprintln!(
        "Scoring {} answers against a {}-question graph...",
        answers.len(),
        graph.question_count()
    );

    let assessment = adaptive::assess(&graph, &answers, policy);
    let rpt = report::from_adaptive(&assessment, None)?;
    print_adaptive(&assessment, &rpt, format)
}

fn cmd_simulate(
    replies_path: PathBuf,
    questions_path: Option<PathBuf>,
    policy: &str,
    format: &str,
) -> Result<()> {
    let policy = parse_policy(policy)?;
    let format = parse_format(format)?;

    let set = match questions_path {
        Some(path) => {
            eprintln!("Loading questions from {}...", path.display());
            catalog::load_questions(&path)?
        }
        None => catalog::builtin_questions().clone(),
    };
    let graph = adaptive::QuestionGraph::build(&set);

    let replies: HashMap<String, RawAnswer> =
        read_json(&replies_path, "expected a map of question ids to raw replies")?;

    eprintln!(
        "Replaying replies through a {}-question graph...",
        graph.question_count()
    );

    let mut sess = session::Session::start(&graph);
    while let Some(id) = sess.current_question_id().map(str::to_string) {
        let reply = replies
            .get(&id)
            .ok_or_else(|| anyhow::anyhow!("no reply provided for question {}", id))?;
        sess.answer(reply)?;
    }

    eprintln!(
        "Visited {} of {} questions ({:.0}%)",
        sess.visited().len(),
        graph.question_count(),
        sess.progress() * 100.0
    );

    let elapsed = report::format_time_to_complete(sess.elapsed());
    let answers = sess.into_answers();
    let assessment = adaptive::assess(&graph, &answers, policy);
    let rpt = report::from_adaptive(&assessment, Some(elapsed))?;
    print_adaptive(&assessment, &rpt, format)
}

fn print_adaptive(
    assessment: &adaptive::AdaptiveAssessment,
    rpt: &AssessmentReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rpt)?),
        OutputFormat::Markdown => print!("{}", report::render_markdown(rpt)),
        OutputFormat::Text => {
            println!("=== Digital Maturity Results ===");
            println!("Global score: {}%", assessment.global_score);
            println!("Profile: {} ({})", rpt.profile_label, rpt.benchmark_range);
            println!(
                "Target: tier {} ({})",
                assessment.target_tier.level(),
                assessment.target_tier.label()
            );
            println!();

            for dim in &rpt.dimensions {
                println!(
                    "{} {:<24} {:>3}%  tier {}  {}",
                    dim.icon.as_deref().unwrap_or("📊"),
                    dim.name,
                    dim.percentage,
                    dim.achieved_tier.level(),
                    dim.status.label()
                );
            }
            println!();

            print_report_sections(rpt);
        }
    }

    Ok(())
}

fn print_report_sections(rpt: &AssessmentReport) {
    if !rpt.key_strengths.is_empty() {
        println!("Key strengths:");
        for name in &rpt.key_strengths {
            println!("  + {}", name);
        }
        println!();
    }

    let gap_dimensions: Vec<_> = rpt.dimensions.iter().filter(|d| d.gap > 0).collect();
    if !gap_dimensions.is_empty() {
        println!("Gaps:");
        for dim in &gap_dimensions {
            println!(
                "  [{}] {}: tier {} → {} (gap {})",
                dim.priority,
                dim.name,
                dim.achieved_tier.level(),
                dim.target_tier.level(),
                dim.gap
            );
        }
        println!();
    }

    println!("Quick wins:");
    for win in &rpt.quick_wins {
        println!("  - {}", win);
    }
    println!();

    println!("Strategic initiatives:");
    for initiative in &rpt.strategic_initiatives {
        println!("  - {}", initiative);
    }
    println!();
    println!("{}", rpt.recommendation);
}

fn cmd_questions(mode: &str) -> Result<()> {
    match mode {
        "static" => {
            let set = catalog::builtin_criteria();
            for dim in &set.dimensions {
                println!("{} ({})", dim.name, dim.id);
                for palier in &dim.paliers {
                    println!("  Level {}: {}", palier.level, palier.name);
                    for criterion in &palier.criteria {
                        println!("    [{}] {}", criterion.id, criterion.label);
                    }
                }
                println!();
            }
            let total: usize = set
                .dimensions
                .iter()
                .flat_map(|d| &d.paliers)
                .map(|p| p.criteria.len())
                .sum();
            println!("Total: {} criteria", total);
        }
        "adaptive" => {
            let set = catalog::builtin_questions();
            for dim in &set.dimensions {
                println!(
                    "{} {} ({})",
                    dim.icon.as_deref().unwrap_or("📊"),
                    dim.name,
                    dim.id
                );
                for branch in &dim.branches {
                    println!("  [{}] {}", branch.id, branch.name);
                    for question in &branch.questions {
                        println!("    {}: {}", question.id, question.text);
                    }
                }
                println!();
            }
            println!("Total: {} questions", set.total_questions());
        }
        other => bail!("unknown mode '{}', expected static or adaptive", other),
    }

    Ok(())
}

fn cmd_validate(file: PathBuf, kind: &str) -> Result<()> {
    match kind {
        "criteria" => match catalog::load_criteria(&file) {
            Ok(set) => {
                let criteria: usize = set
                    .dimensions
                    .iter()
                    .flat_map(|d| &d.paliers)
                    .map(|p| p.criteria.len())
                    .sum();
                println!("Validation: OK");
                println!("  {} dimensions, {} criteria", set.dimensions.len(), criteria);
            }
            Err(e) => {
                println!("Validation: FAILED");
                println!("  {}", e);
            }
        },
        "questions" => match catalog::load_questions(&file) {
            Ok(set) => {
                println!("Validation: OK");
                println!(
                    "  {} dimensions, {} questions",
                    set.dimensions.len(),
                    set.total_questions()
                );
            }
            Err(e) => {
                println!("Validation: FAILED");
                println!("  {}", e);
            }
        },
        other => bail!("unknown kind '{}', expected criteria or questions", other),
    }

    Ok(())
}
