//! Simulate command - Play one game and show how it went

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::{OpponentKind, build_learner, load_config},
        output::{print_kv, print_section, print_subsection, render_board},
    },
    game::{Game, GameResult},
    q_learning::QLearningStrategy,
};

#[derive(Parser, Debug)]
#[command(about = "Play one game between a scripted human and the learning agent")]
pub struct SimulateArgs {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file (missing fields take defaults)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Scripted strategy playing the human side
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Print the board after every round
    #[arg(long, default_value_t = false)]
    pub show_board: bool,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let learner = build_learner(&config.policy, args.seed);
    let mut game = Game::new(config.game.clone(), Box::new(learner))?;
    let mut human = args.opponent.build(args.seed.map(|seed| seed.wrapping_add(1)));

    print_section("Maze Duel Simulation");
    print_kv("Opponent", args.opponent.label());
    print_subsection("Initial board");
    print!("{}", render_board(&game));

    while let Some(record) = game.play_round(human.as_mut()) {
        println!(
            "Round {:>3}: human {:<18} computer {}",
            record.round,
            record.human.action.to_string(),
            record.computer.action
        );
        if args.show_board {
            print!("{}", render_board(&game));
        }
    }

    let summary = game.summary();
    print_subsection("Final board");
    print!("{}", render_board(&game));

    print_subsection("Result");
    print_kv(
        "Human",
        &format!("{} gems, score {}", summary.human_gems, summary.human_score),
    );
    print_kv(
        "Computer",
        &format!(
            "{} gems, score {}",
            summary.computer_gems, summary.computer_score
        ),
    );
    let verdict = match summary.result {
        GameResult::HumanWins => "Human wins",
        GameResult::ComputerWins => "Computer wins",
        GameResult::Tie => "Tie",
    };
    print_kv("Result", verdict);
    if let Some(learner) = game
        .computer_strategy()
        .as_any()
        .downcast_ref::<QLearningStrategy>()
    {
        print_kv("Q-table size", &learner.table_size().to_string());
    }

    Ok(())
}
