//! Game session: board, both agents, and the round/phase state machine

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use super::intent::{Intent, IntentOutcome, TokenKind};
use crate::{
    Result,
    agent::{Action, Agent},
    config::GameConfig,
    maze::{Board, BoardSnapshot, CellKind, Direction, Side, generate},
    ports::{Strategy, TurnRecord},
};

/// Whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    HumanTurn,
    ComputerTurn,
    Finished,
}

/// Outcome of a finished game, decided by gem counts alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    HumanWins,
    ComputerWins,
    Tie,
}

impl GameResult {
    pub fn from_gems(human_gems: u32, computer_gems: u32) -> Self {
        match human_gems.cmp(&computer_gems) {
            std::cmp::Ordering::Greater => GameResult::HumanWins,
            std::cmp::Ordering::Less => GameResult::ComputerWins,
            std::cmp::Ordering::Equal => GameResult::Tie,
        }
    }
}

/// Both halves of one completed round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRecord {
    pub round: u32,
    pub human: TurnRecord,
    pub computer: TurnRecord,
}

/// Final figures of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub result: GameResult,
    pub rounds: u32,
    pub human_gems: u32,
    pub computer_gems: u32,
    pub human_score: i32,
    pub computer_score: i32,
}

/// A single game between a human side and a computer strategy.
///
/// The session owns the board and both agents. Each round is the human phase
/// (an [`Intent`] or a scripted human turn) followed by exactly one
/// [`Strategy::take_turn`] call for the computer. After the configured number
/// of rounds the game is finished and only [`Intent::Reset`] is accepted.
pub struct Game {
    config: GameConfig,
    board: Board,
    human: Agent,
    computer: Agent,
    computer_strategy: Box<dyn Strategy>,
    round: u32,
    phase: Phase,
    rng: StdRng,
}

fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

impl Game {
    /// Start a game on a freshly generated board.
    ///
    /// Fails when `config` does not validate.
    pub fn new(config: GameConfig, computer_strategy: Box<dyn Strategy>) -> Result<Self> {
        config.validate()?;
        let mut rng = session_rng(config.seed);
        let board = generate(&config, &mut rng);
        Ok(Self::assemble(config, board, computer_strategy, rng))
    }

    /// Start a game on a prepared board.
    ///
    /// The board's size, trap rule and wall, gem and trap counts override
    /// `config`, so a later reset generates a board like this one. Agents
    /// start in their corners, which are marked visited.
    pub fn with_board(
        config: GameConfig,
        board: Board,
        computer_strategy: Box<dyn Strategy>,
    ) -> Result<Self> {
        let config = GameConfig {
            grid_size: board.size(),
            wall_count: board.positions_of(CellKind::Wall).len(),
            gem_count: board.positions_of(CellKind::Gem).len(),
            trap_count: board.positions_of(CellKind::Trap).len(),
            trap_rule: board.trap_rule(),
            ..config
        };
        config.validate()?;
        let rng = session_rng(config.seed);
        let mut board = board;
        for side in [Side::Human, Side::Computer] {
            board.mark_visited(side, side.start_position(config.grid_size));
        }
        Ok(Self::assemble(config, board, computer_strategy, rng))
    }

    fn assemble(
        config: GameConfig,
        board: Board,
        computer_strategy: Box<dyn Strategy>,
        rng: StdRng,
    ) -> Self {
        Self {
            human: Agent::at_start(Side::Human, &config),
            computer: Agent::at_start(Side::Computer, &config),
            config,
            board,
            computer_strategy,
            round: 1,
            phase: Phase::HumanTurn,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn human(&self) -> &Agent {
        &self.human
    }

    pub fn computer(&self) -> &Agent {
        &self.computer
    }

    pub fn agent(&self, side: Side) -> &Agent {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    /// Current round, 1-based. Stays at the last round once finished.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn computer_strategy(&self) -> &dyn Strategy {
        self.computer_strategy.as_ref()
    }

    pub fn computer_strategy_mut(&mut self) -> &mut dyn Strategy {
        self.computer_strategy.as_mut()
    }

    /// Give the computer strategy back, e.g. to carry it into the next game
    pub fn into_strategy(self) -> Box<dyn Strategy> {
        self.computer_strategy
    }

    /// Result by gem count, once the game is finished
    pub fn result(&self) -> Option<GameResult> {
        self.is_finished().then(|| {
            GameResult::from_gems(self.human.gems_collected(), self.computer.gems_collected())
        })
    }

    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            result: GameResult::from_gems(
                self.human.gems_collected(),
                self.computer.gems_collected(),
            ),
            rounds: self.round,
            human_gems: self.human.gems_collected(),
            computer_gems: self.computer.gems_collected(),
            human_score: self.human.score(),
            computer_score: self.computer.score(),
        }
    }

    /// Handle one input from the human side.
    ///
    /// Movement and token intents are only honoured during the human phase.
    /// A reset is honoured at any time. A move intent from a human who is
    /// walled in with no tokens left is taken as a pass, so the game cannot
    /// stall.
    pub fn submit(&mut self, intent: Intent) -> IntentOutcome {
        if intent == Intent::Reset {
            self.reset();
            return IntentOutcome::Reset;
        }
        if self.phase != Phase::HumanTurn {
            return IntentOutcome::Ignored;
        }

        let turn = match intent {
            // A human with no legal move and no tokens can only pass.
            Intent::Move(_) if self.human.legal_actions(&self.board) == [Action::Stay] => {
                self.human_act(Action::Stay)
            }
            Intent::Move(direction) => self.human_act(Action::Move(direction)),
            Intent::UseToken {
                kind: TokenKind::PlaceWall,
                target: Some(target),
            } => match Direction::between(self.human.position(), target) {
                Some(direction) => self.human_act(Action::PlaceWall(direction)),
                None => None,
            },
            Intent::UseToken {
                kind: TokenKind::PlaceWall,
                target: None,
            } => self.human_wall_anywhere(),
            Intent::UseToken {
                kind: TokenKind::RemoveTrap,
                ..
            } => self.human_act(Action::RemoveTrap),
            Intent::UseToken {
                kind: TokenKind::Teleport,
                target: Some(target),
            } => self.human_act(Action::Teleport(target)),
            Intent::UseToken {
                kind: TokenKind::Teleport,
                target: None,
            }
            | Intent::Reset => None,
        };

        match turn {
            Some(turn) => {
                self.phase = Phase::ComputerTurn;
                IntentOutcome::Accepted(turn)
            }
            None => IntentOutcome::NoEffect,
        }
    }

    fn human_act(&mut self, action: Action) -> Option<TurnRecord> {
        let report = self.human.apply(action, &mut self.board);
        report.applied.then_some(TurnRecord { action, report })
    }

    /// Wall on the first empty neighbour, directions tried in random order
    fn human_wall_anywhere(&mut self) -> Option<TurnRecord> {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        directions
            .into_iter()
            .find_map(|direction| self.human_act(Action::PlaceWall(direction)))
    }

    /// Run the computer phase: one `take_turn` call, then close the round.
    ///
    /// Returns `None` outside the computer phase.
    pub fn play_computer_turn(&mut self) -> Option<TurnRecord> {
        if self.phase != Phase::ComputerTurn {
            return None;
        }

        let turn = self
            .computer_strategy
            .take_turn(&mut self.computer, &mut self.board);

        if self.round >= self.config.rounds {
            self.phase = Phase::Finished;
            log::info!(
                "game over after {} rounds: {:?} (human {} gems, computer {} gems)",
                self.round,
                self.summary().result,
                self.human.gems_collected(),
                self.computer.gems_collected()
            );
        } else {
            self.round += 1;
            self.phase = Phase::HumanTurn;
        }
        Some(turn)
    }

    /// Play a full round with the human side driven by `human_strategy`.
    ///
    /// Returns `None` once the game is finished.
    pub fn play_round(&mut self, human_strategy: &mut dyn Strategy) -> Option<RoundRecord> {
        if self.phase != Phase::HumanTurn {
            return None;
        }
        let round = self.round;
        let human = human_strategy.take_turn(&mut self.human, &mut self.board);
        self.phase = Phase::ComputerTurn;
        let computer = self.play_computer_turn()?;
        Some(RoundRecord {
            round,
            human,
            computer,
        })
    }

    /// New random board and fresh agents. The computer strategy keeps what
    /// it has learned.
    pub fn reset(&mut self) {
        self.board = generate(&self.config, &mut self.rng);
        self.human = Agent::at_start(Side::Human, &self.config);
        self.computer = Agent::at_start(Side::Computer, &self.config);
        self.round = 1;
        self.phase = Phase::HumanTurn;
        log::info!("game reset");
    }
}
