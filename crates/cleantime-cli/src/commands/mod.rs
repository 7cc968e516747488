pub mod config;
pub mod content;
pub mod journal;
pub mod meditate;
pub mod sos;
pub mod status;

use std::time::Duration;

use cleantime_core::Event;
use tokio::sync::mpsc;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Print events as JSON lines until `limit` elapses or Ctrl-C.
pub async fn print_events(mut rx: mpsc::UnboundedReceiver<Event>, limit: Option<u64>) -> CommandResult {
    let deadline = async {
        match limit {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            Some(event) = rx.recv() => println!("{}", serde_json::to_string(&event)?),
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
