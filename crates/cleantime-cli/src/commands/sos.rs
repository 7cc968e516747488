use cleantime_core::{mount, SosView, SystemClock};
use tokio::sync::mpsc;

use super::{print_events, runtime, CommandResult};

pub fn run(seconds: Option<u64>) -> CommandResult {
    runtime()?.block_on(async move {
        let (tx, rx) = mpsc::unbounded_channel();
        let sos = mount(SosView::new(), SystemClock, Some(tx));
        let first = sos.with(|v| {
            serde_json::json!({
                "type": "sos_started",
                "instruction": v.instruction(),
                "remaining_secs": v.remaining_secs(),
                "message": v.message(),
            })
        });
        println!("{first}");
        let printed = print_events(rx, seconds).await;
        sos.unmount();
        printed
    })
}
