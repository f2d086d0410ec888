use agent::strategy::RandomMove;
use tokio::sync::broadcast;
use tracing::{debug, Level};

use super::service::{console::LineConsole, game_loop::run_game};

pub const DEFAULT_PROMPT: &str = "Enter a move: rock/paper/scissors";

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub prompt: String,
    pub log_level: Level,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            prompt: DEFAULT_PROMPT.to_owned(),
            log_level: Level::WARN,
        }
    }
}

/// Runs a game on the terminal against a random opponent until the player cancels.
pub async fn serve(config: GameConfig, shutdown_receiver: broadcast::Receiver<()>) {
    debug!("Starting game with {:?}", config);
    let mut console = LineConsole::stdio(config.prompt, shutdown_receiver);
    let mut computer = RandomMove::new();
    run_game(&mut console, &mut computer).await;
}
