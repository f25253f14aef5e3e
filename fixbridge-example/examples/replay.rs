//! Log replay example.
//!
//! Usage: `cargo run --example replay -- <dictionary.xml> <messages.log>`
//!
//! Every message in the log is converted exactly as live traffic would be and
//! delivered to an in-process host that counts what it receives.

mod common;

use common::init_logging;
use fixbridge_engine::{BridgeBuilder, replay_log, version_info};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let (Some(dictionary_path), Some(log_path)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: replay <dictionary.xml> <messages.log>");
    };

    for (key, value) in version_info() {
        info!("{}: {}", key, value);
    }

    let (bridge, mut host) = BridgeBuilder::create("initiator", None, &dictionary_path)?.build()?;
    let host_task = tokio::spawn(async move {
        let mut received = 0usize;
        while let Some(frame) = host.recv().await {
            if frame.is_ok() {
                received += 1;
            }
        }
        received
    });

    let summary = replay_log(&dictionary_path, &log_path, &bridge).await?;
    drop(bridge);
    let received = host_task.await?;

    info!(
        "replayed {} messages ({} rejected), host received {}",
        summary.delivered, summary.rejected, received
    );
    Ok(())
}
