use std::io;

use async_trait::async_trait;
use common::model::game::{Move, RoundResult, ScoreState};
use tokio::{
    io::{
        AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
    },
    sync::broadcast,
};
use tracing::{debug, warn};

use super::table::round_table;

/// The game's only view of the player: where moves come from and where progress goes.
#[async_trait]
pub trait Console: Send {
    /// Blocks until the player enters a recognized move. `None` means the player cancelled.
    async fn read_move(&mut self) -> Option<Move>;

    async fn render(&mut self, round: &RoundResult, score: &ScoreState) -> io::Result<()>;
}

/// Line-oriented console: one prompt per attempt, one move per line.
pub struct LineConsole<R, W> {
    prompt: String,
    input: R,
    // Bytes of the line being read; kept across a cancelled read
    buffer: Vec<u8>,
    output: W,
    shutdown_receiver: broadcast::Receiver<()>,
}

impl LineConsole<BufReader<Stdin>, Stdout> {
    pub fn stdio(prompt: String, shutdown_receiver: broadcast::Receiver<()>) -> Self {
        LineConsole::new(
            prompt,
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            shutdown_receiver,
        )
    }
}

impl<R, W> LineConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(
        prompt: String,
        input: R,
        output: W,
        shutdown_receiver: broadcast::Receiver<()>,
    ) -> Self {
        LineConsole {
            prompt,
            input,
            buffer: Vec::new(),
            output,
            shutdown_receiver,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}

#[async_trait]
impl<R, W> Console for LineConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn read_move(&mut self) -> Option<Move> {
        loop {
            let prompt = format!("{}\n", self.prompt);
            if let Err(error) = self.write(&prompt).await {
                warn!("Failed to show prompt: {}", error);
                return None;
            }

            let input = &mut self.input;
            let buffer = &mut self.buffer;
            let shutdown_receiver = &mut self.shutdown_receiver;
            let read = tokio::select! {
                read = input.read_until(b'\n', buffer) => read,
                _ = shutdown_receiver.recv() => {
                    debug!("Shutdown received while waiting for a move");
                    return None;
                }
            };
            match read {
                Ok(0) => {
                    debug!("Input closed");
                    return None;
                }
                Ok(_) => {
                    // Undecodable bytes are just another unrecognized move
                    let parsed = String::from_utf8_lossy(&self.buffer).parse::<Move>();
                    self.buffer.clear();
                    match parsed {
                        Ok(player_move) => return Some(player_move),
                        Err(error) => debug!("{}, prompting again", error),
                    }
                }
                Err(error) => {
                    warn!("Failed to read move: {}", error);
                    return None;
                }
            }
        }
    }

    async fn render(&mut self, round: &RoundResult, score: &ScoreState) -> io::Result<()> {
        let table = round_table(round, score).to_string();
        self.write(&table).await
    }
}
