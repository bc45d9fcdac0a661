use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use snake_config::EpisodeConfig;
use snake_core::{select_action, Episode};
use snake_types::{EpisodeStatus, TerminationReason};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "snake-cli")]
#[command(about = "Snake episode simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one episode to termination and print a summary.
    Run {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = Policy::Greedy)]
        policy: Policy,
        #[arg(long, default_value_t = 10_000)]
        max_steps: u64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Evaluate many independently seeded episodes in parallel.
    Batch {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 100)]
        episodes: u64,
        #[arg(long, default_value_t = 0)]
        seed_start: u64,
        #[arg(long, value_enum, default_value_t = Policy::Greedy)]
        policy: Policy,
        #[arg(long, default_value_t = 10_000)]
        max_steps: u64,
    },
    /// Export a per-step JSONL snapshot trace of one episode.
    Export {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = Policy::Greedy)]
        policy: Policy,
        #[arg(long, default_value_t = 1_000)]
        max_steps: u64,
        #[arg(long)]
        out: PathBuf,
    },
}

/// Stand-in decision engines. The real consumer is an external evolutionary
/// population; these exist to drive the core end to end.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Score headings from the food deltas and free-space counts.
    Greedy,
    /// Uniform over the action space from a dedicated seeded RNG.
    Random,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Debug, Serialize)]
struct EpisodeSummary {
    seed: u64,
    steps: u64,
    score: u32,
    fitness: f32,
    outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", content = "reason")]
enum Outcome {
    Terminated(TerminationReason),
    StepCapReached,
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    episodes: u64,
    seed_start: u64,
    best_seed: u64,
    best_fitness: f32,
    best_score: u32,
    mean_fitness: f32,
    mean_score: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seed,
            policy,
            max_steps,
            format,
            out,
        } => run_command(config, seed, policy, max_steps, format, out),
        Commands::Batch {
            config,
            episodes,
            seed_start,
            policy,
            max_steps,
        } => batch_command(config, episodes, seed_start, policy, max_steps),
        Commands::Export {
            config,
            seed,
            policy,
            max_steps,
            out,
        } => export_command(config, seed, policy, max_steps, out),
    }
}

fn run_command(
    config_path: Option<PathBuf>,
    seed: u64,
    policy: Policy,
    max_steps: u64,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let summary = evaluate_episode(&cfg, seed, policy, max_steps)?;
    info!(
        seed,
        steps = summary.steps,
        score = summary.score,
        fitness = summary.fitness,
        "episode finished"
    );

    match format {
        OutputFormat::Pretty => {
            let text = format!(
                "seed={} steps={} score={} fitness={:.3} outcome={:?}",
                summary.seed, summary.steps, summary.score, summary.fitness, summary.outcome,
            );
            write_output(text, out)?;
        }
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&summary)?;
            write_output(text, out)?;
        }
    }
    Ok(())
}

fn batch_command(
    config_path: Option<PathBuf>,
    episodes: u64,
    seed_start: u64,
    policy: Policy,
    max_steps: u64,
) -> Result<()> {
    let cfg = load_config(config_path)?;

    // Episodes share nothing: each gets its own config clone, RNG, and seed,
    // so the fan-out is safely embarrassingly parallel.
    let summaries: Vec<EpisodeSummary> = (0..episodes)
        .into_par_iter()
        .map(|offset| evaluate_episode(&cfg, seed_start + offset, policy, max_steps))
        .collect::<Result<_>>()?;

    let best = summaries
        .iter()
        .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
        .context("batch requires at least one episode")?;
    let count = summaries.len() as f32;
    let summary = BatchSummary {
        episodes,
        seed_start,
        best_seed: best.seed,
        best_fitness: best.fitness,
        best_score: best.score,
        mean_fitness: summaries.iter().map(|s| s.fitness).sum::<f32>() / count,
        mean_score: summaries.iter().map(|s| s.score as f32).sum::<f32>() / count,
    };
    info!(
        episodes,
        best_seed = summary.best_seed,
        best_fitness = summary.best_fitness,
        "batch finished"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn export_command(
    config_path: Option<PathBuf>,
    seed: u64,
    policy: Policy,
    max_steps: u64,
    out: PathBuf,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let mut episode = Episode::new(cfg.clone(), seed)?;
    let mut driver = PolicyDriver::new(policy, &cfg, seed);

    let mut lines = Vec::new();
    lines.push(serde_json::to_string(&episode.snapshot()).context("serialize initial snapshot")?);
    for _ in 0..max_steps {
        let action = driver.decide(&episode);
        episode.step(action)?;
        lines.push(serde_json::to_string(&episode.snapshot()).context("serialize snapshot")?);
        if !episode.status().is_running() {
            break;
        }
    }

    fs::write(&out, lines.join("\n"))
        .with_context(|| format!("failed writing trace to {}", out.display()))?;
    info!(steps = lines.len() - 1, out = %out.display(), "exported trace");
    Ok(())
}

fn evaluate_episode(
    cfg: &EpisodeConfig,
    seed: u64,
    policy: Policy,
    max_steps: u64,
) -> Result<EpisodeSummary> {
    let mut episode = Episode::new(cfg.clone(), seed)?;
    let mut driver = PolicyDriver::new(policy, cfg, seed);

    let mut steps = 0;
    while steps < max_steps && episode.status().is_running() {
        let action = driver.decide(&episode);
        let report = episode.step(action)?;
        steps = report.step;
    }

    let outcome = match episode.status() {
        EpisodeStatus::Terminated(reason) => Outcome::Terminated(reason),
        EpisodeStatus::Running => Outcome::StepCapReached,
    };
    Ok(EpisodeSummary {
        seed,
        steps,
        score: episode.score(),
        fitness: episode.fitness(),
        outcome,
    })
}

struct PolicyDriver {
    policy: Policy,
    action_count: usize,
    rng: ChaCha8Rng,
}

impl PolicyDriver {
    fn new(policy: Policy, cfg: &EpisodeConfig, seed: u64) -> Self {
        Self {
            policy,
            action_count: cfg.action_space.len(),
            // Offset keeps the policy stream distinct from the episode's own
            // food-placement stream while staying reproducible per seed.
            rng: ChaCha8Rng::seed_from_u64(seed ^ 0x5EED_0F00D),
        }
    }

    fn decide(&mut self, episode: &Episode) -> usize {
        match self.policy {
            Policy::Greedy => greedy_action(episode.observation().as_slice()),
            Policy::Random => self.rng.random_range(0..self.action_count),
        }
    }
}

/// Positional consumer of the observation layout: fields 2 and 3 are the
/// signed food deltas, fields 4 through 7 the free counts right, left, down,
/// up. Both encodings share that prefix, so the policy works with either.
fn greedy_action(observation: &[f32]) -> usize {
    let (food_dx, food_dy) = (observation[2], observation[3]);
    let free_by_action = [observation[4], observation[5], observation[7], observation[6]];

    let mut scores = [0.0f32; 4];
    if food_dx > 0.0 {
        scores[0] = food_dx;
    }
    if food_dx < 0.0 {
        scores[1] = -food_dx;
    }
    if food_dy < 0.0 {
        scores[2] = -food_dy;
    }
    if food_dy > 0.0 {
        scores[3] = food_dy;
    }
    for (score, free) in scores.iter_mut().zip(free_by_action) {
        if free <= 0.0 {
            *score = -100.0;
        } else {
            *score += 0.01 * free;
        }
    }
    select_action(&scores)
}

fn load_config(path: Option<PathBuf>) -> Result<EpisodeConfig> {
    match path {
        Some(path) => snake_config::load_episode_config_from_path(&path),
        None => Ok(EpisodeConfig::default()),
    }
}

fn write_output(text: String, out: Option<PathBuf>) -> Result<()> {
    if let Some(path) = out {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating output directory {}", parent.display())
            })?;
        }
        fs::write(&path, text).with_context(|| format!("failed writing {}", path.display()))?;
        println!("wrote output to {}", path.display());
    } else {
        println!("{text}");
    }
    Ok(())
}
