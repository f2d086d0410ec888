use common::utility::create_shutdown_channel;
use game::entrypoint::{serve, GameConfig};

fn main() {
    // Config
    let config = GameConfig::default();
    // Logs go to stderr so they never interleave with the score table
    tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime");
    runtime.block_on(async {
        let shutdown_receiver = create_shutdown_channel().await;
        serve(config, shutdown_receiver).await;
    });
    // A pending stdin read can't be interrupted, so don't wait for it
    runtime.shutdown_background();
}
