//! Train command - Train the learning agent over many games

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        config::{OpponentKind, build_learner, load_config},
        output::{format_number, format_share, print_kv, print_section, print_stats_table},
    },
    config::MazeDuelConfig,
    game::Game,
    pipeline::{JsonlObserver, ProgressObserver, TrainingConfig, TrainingPipeline, TrainingResult},
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingResult,
    opponent: &'static str,
    seed: Option<u64>,
    config: &'a MazeDuelConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the learning agent against a scripted opponent")]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 500)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file (missing fields take defaults)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Scripted strategy playing the human side
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.seed)?;

    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    print_section("Maze Duel Training");
    print_stats_table(&[
        ("Episodes", format_number(args.episodes).as_str()),
        ("Opponent", args.opponent.label()),
        ("Grid", format!("{0}x{0}", config.game.grid_size).as_str()),
        ("Rounds", config.game.rounds.to_string().as_str()),
    ]);

    let learner = build_learner(&config.policy, args.seed);
    let mut game = Game::new(config.game.clone(), Box::new(learner))?;
    let mut human = args.opponent.build(args.seed.map(|seed| seed.wrapping_add(1)));

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: args.episodes,
        seed: args.seed,
    });
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create observations file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline
        .run(&mut game, human.as_mut())
        .context("Training failed")?;

    print_section("Results");
    print_stats_table(&[
        ("Episodes", format_number(result.total_episodes).as_str()),
        ("Wins", format_share(result.wins, result.total_episodes).as_str()),
        ("Losses", format_share(result.losses, result.total_episodes).as_str()),
        ("Ties", format_share(result.ties, result.total_episodes).as_str()),
        (
            "Mean computer gems",
            format!("{:.2}", result.mean_computer_gems).as_str(),
        ),
        (
            "Mean human gems",
            format!("{:.2}", result.mean_human_gems).as_str(),
        ),
    ]);
    print_kv("Q-table size", &format_number(result.q_table_size));

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!("\nNormalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            training: &result,
            opponent: args.opponent.label(),
            seed: args.seed,
            config: &config,
        };

        let file = File::create(&summary_path)
            .with_context(|| format!("Failed to create {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
