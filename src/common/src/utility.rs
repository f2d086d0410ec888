use tokio::sync::broadcast;
use tracing::{info, warn};

/// Resolves on the first Ctrl-C. Every subscriber of the returned receiver sees one `()` message.
pub async fn create_shutdown_channel() -> broadcast::Receiver<()> {
    let (shutdown_sender, shutdown_receiver): (broadcast::Sender<()>, broadcast::Receiver<()>) =
        broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", error);
            // Keep the sender alive so receivers never observe a closed channel
            std::future::pending::<()>().await;
        }
        info!("signal received, cancelling input");
        // No receivers left just means the game already ended
        let _ = shutdown_sender.send(());
    });
    shutdown_receiver
}
