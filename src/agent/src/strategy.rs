use common::model::game::Move;
use rand::{rngs::ThreadRng, Rng};
use tracing::debug;

/// Picks the computer's move for a round.
pub trait Strategy {
    fn make_move(&mut self) -> Move;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn make_move(&mut self) -> Move {
        (**self).make_move()
    }
}

// Trivial strategy
pub struct FixedMove(pub Move);
impl Strategy for FixedMove {
    fn make_move(&mut self) -> Move {
        self.0
    }
}

// Random: every call is an independent uniform draw
pub struct RandomMove<R = ThreadRng> {
    rng: R,
}

impl RandomMove<ThreadRng> {
    pub fn new() -> Self {
        RandomMove { rng: rand::rng() }
    }
}

impl Default for RandomMove<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomMove<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomMove { rng }
    }
}

impl<R: Rng> Strategy for RandomMove<R> {
    fn make_move(&mut self) -> Move {
        let choice = self.rng.random_range(0..Move::ALL.len() as u8);
        let next_move = Move::try_from(choice).unwrap_or_else(|error| panic!("{}", error));
        debug!("Computer chose {}", next_move);
        next_move
    }
}
