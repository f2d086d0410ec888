use std::{error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Outcome of a round from the player's side.
    pub fn resolve(player: Move, computer: Move) -> Self {
        match player.beats(&computer) {
            Some(true) => Outcome::Win,
            Some(false) => Outcome::Loss,
            None => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
            Outcome::Draw => "DRAW",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Index order matches `TryFrom<u8>`.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn beats(&self, other: &Move) -> Option<bool> {
        if self == other {
            None
        } else {
            Some(matches!(
                (self, other),
                (Move::Rock, Move::Scissors)
                    | (Move::Scissors, Move::Paper)
                    | (Move::Paper, Move::Rock)
            ))
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Rock => "ROCK",
            Move::Paper => "PAPER",
            Move::Scissors => "SCISSORS",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedChoice(pub u8);

impl fmt::Display for UnsupportedChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported choice: {}", self.0)
    }
}

impl error::Error for UnsupportedChoice {}

impl TryFrom<u8> for Move {
    type Error = UnsupportedChoice;

    fn try_from(choice: u8) -> Result<Self, Self::Error> {
        match choice {
            0 => Ok(Move::Rock),
            1 => Ok(Move::Paper),
            2 => Ok(Move::Scissors),
            other => Err(UnsupportedChoice(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoveError(pub String);

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized move {:?}", self.0)
    }
}

impl error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r" | "rock" => Ok(Move::Rock),
            "p" | "paper" => Ok(Move::Paper),
            "s" | "scissors" => Ok(Move::Scissors),
            _ => Err(ParseMoveError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub player_move: Move,
    pub computer_move: Move,
    pub outcome: Outcome,
}

impl RoundResult {
    pub fn new(player_move: Move, computer_move: Move) -> Self {
        RoundResult {
            player_move,
            computer_move,
            outcome: Outcome::resolve(player_move, computer_move),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub player_score: u32,
    pub computer_score: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the score after a round with the given outcome. Draws leave it unchanged.
    pub fn apply(&self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => ScoreState {
                player_score: self.player_score + 1,
                ..*self
            },
            Outcome::Loss => ScoreState {
                computer_score: self.computer_score + 1,
                ..*self
            },
            Outcome::Draw => *self,
        }
    }
}
