use agent::strategy::Strategy;
use common::model::game::{RoundResult, ScoreState};
use tracing::{debug, info, warn};

use super::console::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: ScoreState,
    pub rounds_played: u32,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            phase: GamePhase::Running,
            score: ScoreState::new(),
            rounds_played: 0,
        }
    }

    pub fn with_phase(&self, phase: GamePhase) -> Self {
        GameState { phase, ..*self }
    }

    /// Folds a finished round into the score.
    pub fn record(&self, round: &RoundResult) -> Self {
        GameState {
            phase: self.phase,
            score: self.score.apply(round.outcome),
            rounds_played: self.rounds_played + 1,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Plays a single round. The computer only moves once the player has; a cancelled prompt yields `None`.
pub async fn play_round<C, S>(console: &mut C, computer: &mut S) -> Option<RoundResult>
where
    C: Console + ?Sized,
    S: Strategy + ?Sized,
{
    let player_move = console.read_move().await?;
    let computer_move = computer.make_move();
    let round = RoundResult::new(player_move, computer_move);
    debug!("Round played: {:?}", round);
    Some(round)
}

/// Plays rounds until the player cancels, reporting the score after each one.
pub async fn run_game<C, S>(console: &mut C, computer: &mut S)
where
    C: Console + ?Sized,
    S: Strategy + ?Sized,
{
    let mut state = GameState::new();
    while state.phase == GamePhase::Running {
        state = match play_round(console, computer).await {
            Some(round) => {
                let state = state.record(&round);
                if let Err(error) = console.render(&round, &state.score).await {
                    warn!("Failed to render round: {}", error);
                }
                state
            }
            None => state.with_phase(GamePhase::Stopped),
        };
    }
    info!(
        "Game stopped after {} rounds, score {}-{}",
        state.rounds_played, state.score.player_score, state.score.computer_score
    );
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io};

    use agent::strategy::FixedMove;
    use async_trait::async_trait;
    use common::model::game::{Move, Outcome};
    use tokio::sync::broadcast;
    use tracing::Level;

    use super::*;
    use crate::service::{console::LineConsole, table::round_table};

    struct ScriptedConsole {
        moves: VecDeque<Move>,
        reads: usize,
        rendered: Vec<(RoundResult, ScoreState)>,
        render_fails: bool,
    }

    impl ScriptedConsole {
        fn new(moves: impl IntoIterator<Item = Move>) -> Self {
            ScriptedConsole {
                moves: moves.into_iter().collect(),
                reads: 0,
                rendered: Vec::new(),
                render_fails: false,
            }
        }
    }

    #[async_trait]
    impl Console for ScriptedConsole {
        async fn read_move(&mut self) -> Option<Move> {
            self.reads += 1;
            self.moves.pop_front()
        }

        async fn render(&mut self, round: &RoundResult, score: &ScoreState) -> io::Result<()> {
            self.rendered.push((*round, *score));
            if self.render_fails {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"));
            }
            Ok(())
        }
    }

    struct ScriptedStrategy {
        moves: VecDeque<Move>,
        calls: usize,
    }

    impl ScriptedStrategy {
        fn new(moves: impl IntoIterator<Item = Move>) -> Self {
            ScriptedStrategy {
                moves: moves.into_iter().collect(),
                calls: 0,
            }
        }
    }

    impl Strategy for ScriptedStrategy {
        fn make_move(&mut self) -> Move {
            self.calls += 1;
            self.moves.pop_front().expect("Computer asked for an unscripted move")
        }
    }

    fn init_logging() {
        // Ignore error if already set
        let _ = tracing_subscriber::fmt()
            .with_line_number(true)
            .with_file(true)
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    #[tokio::test]
    async fn cancelled_round_never_asks_the_computer() {
        let mut console = ScriptedConsole::new([]);
        let mut computer = ScriptedStrategy::new([]);
        assert_eq!(play_round(&mut console, &mut computer).await, None);
        assert_eq!(console.reads, 1);
        assert_eq!(computer.calls, 0);
    }

    #[tokio::test]
    async fn completed_round_is_fully_populated() {
        let mut console = ScriptedConsole::new([Move::Paper]);
        let mut computer = FixedMove(Move::Rock);
        let round = play_round(&mut console, &mut computer).await;
        assert_eq!(
            round,
            Some(RoundResult {
                player_move: Move::Paper,
                computer_move: Move::Rock,
                outcome: Outcome::Win,
            })
        );
    }

    #[tokio::test]
    async fn win_then_loss_then_cancel() {
        init_logging();
        let mut console = ScriptedConsole::new([Move::Rock, Move::Paper]);
        let mut computer = ScriptedStrategy::new([Move::Scissors, Move::Scissors]);
        run_game(&mut console, &mut computer).await;

        assert_eq!(
            console.rendered,
            vec![
                (
                    RoundResult::new(Move::Rock, Move::Scissors),
                    ScoreState {
                        player_score: 1,
                        computer_score: 0
                    }
                ),
                (
                    RoundResult::new(Move::Paper, Move::Scissors),
                    ScoreState {
                        player_score: 1,
                        computer_score: 1
                    }
                ),
            ]
        );
        assert_eq!(console.rendered[0].0.outcome, Outcome::Win);
        assert_eq!(console.rendered[1].0.outcome, Outcome::Loss);
        assert_eq!(console.reads, 3);
        assert_eq!(computer.calls, 2);
    }

    #[tokio::test]
    async fn draw_leaves_score_unchanged() {
        init_logging();
        let mut console = ScriptedConsole::new([Move::Rock]);
        let mut computer = FixedMove(Move::Rock);
        run_game(&mut console, &mut computer).await;

        assert_eq!(console.rendered.len(), 1);
        let (round, score) = console.rendered[0];
        assert_eq!(round.outcome, Outcome::Draw);
        assert_eq!(score, ScoreState::new());
    }

    #[tokio::test]
    async fn failed_render_keeps_playing() {
        init_logging();
        let mut console = ScriptedConsole::new([Move::Rock, Move::Scissors, Move::Paper]);
        console.render_fails = true;
        let mut computer = FixedMove(Move::Scissors);
        run_game(&mut console, &mut computer).await;

        assert_eq!(console.reads, 4);
        let scores: Vec<ScoreState> = console.rendered.iter().map(|(_, score)| *score).collect();
        assert_eq!(
            scores,
            vec![
                ScoreState {
                    player_score: 1,
                    computer_score: 0
                },
                ScoreState {
                    player_score: 1,
                    computer_score: 0
                },
                ScoreState {
                    player_score: 1,
                    computer_score: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn immediate_cancel_renders_nothing() {
        let mut console = ScriptedConsole::new([]);
        let mut computer = ScriptedStrategy::new([]);
        run_game(&mut console, &mut computer).await;
        assert!(console.rendered.is_empty());
        assert_eq!(computer.calls, 0);
    }

    #[tokio::test]
    async fn plays_typed_moves_end_to_end() {
        init_logging();
        let (_shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let prompt = "Enter a move: rock/paper/scissors";
        let mut console = LineConsole::new(
            prompt.to_owned(),
            &b"ROCK\nwhat\npaper\n"[..],
            Vec::new(),
            shutdown_receiver,
        );
        let mut computer = ScriptedStrategy::new([Move::Scissors, Move::Scissors]);
        run_game(&mut console, &mut computer).await;

        let output = String::from_utf8(console.into_output()).unwrap();
        let first = round_table(
            &RoundResult::new(Move::Rock, Move::Scissors),
            &ScoreState {
                player_score: 1,
                computer_score: 0,
            },
        );
        let second = round_table(
            &RoundResult::new(Move::Paper, Move::Scissors),
            &ScoreState {
                player_score: 1,
                computer_score: 1,
            },
        );
        let expected = format!(
            "{prompt}\n{first}{prompt}\n{prompt}\n{second}{prompt}\n",
            prompt = prompt,
            first = first,
            second = second
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn state_records_rounds() {
        let state = GameState::new()
            .record(&RoundResult::new(Move::Scissors, Move::Paper))
            .record(&RoundResult::new(Move::Scissors, Move::Scissors));
        assert_eq!(state.rounds_played, 2);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(
            state.score,
            ScoreState {
                player_score: 1,
                computer_score: 0
            }
        );
        assert_eq!(state.with_phase(GamePhase::Stopped).score, state.score);
    }
}
