use chrono::Utc;
use cleantime_core::{mount, Config, HomeView, SystemClock};
use serde::Serialize;
use tokio::sync::mpsc;

use super::{print_events, runtime, CommandResult};

#[derive(Serialize)]
struct StatusOutput {
    start: chrono::DateTime<Utc>,
    rate_per_day: u64,
    #[serde(flatten)]
    clean_time: cleantime_core::CleanTime,
}

pub fn status() -> CommandResult {
    let config = Config::load()?;
    let now = Utc::now();
    let output = StatusOutput {
        start: config.recovery.start,
        rate_per_day: config.recovery.rate_per_day,
        clean_time: config.clean_time(now),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn watch(seconds: Option<u64>) -> CommandResult {
    let config = Config::load()?;
    runtime()?.block_on(async move {
        let (tx, rx) = mpsc::unbounded_channel();
        let home = mount(
            HomeView::new(config.recovery.start, config.recovery.rate_per_day),
            SystemClock,
            Some(tx),
        );
        let printed = print_events(rx, seconds).await;
        home.unmount();
        printed
    })
}
