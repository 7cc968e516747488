use chrono::Utc;
use clap::Subcommand;
use cleantime_core::Database;

use super::CommandResult;

#[derive(Subcommand)]
pub enum MeditateAction {
    /// Start or resume the stopwatch
    Start,
    /// Pause the stopwatch
    Pause,
    /// Start when stopped, pause when running
    Toggle,
    /// Back to 00:00
    Reset,
    /// Print stopwatch state as JSON
    Status,
}

pub fn run(action: MeditateAction) -> CommandResult {
    let db = Database::open()?;
    let mut session = db.load_meditation()?;
    let now = Utc::now();

    let event = match action {
        MeditateAction::Start => session.start(now),
        MeditateAction::Pause => session.pause(now),
        MeditateAction::Toggle => session.toggle(now),
        MeditateAction::Reset => session.reset(now),
        MeditateAction::Status => None,
    };
    if let Some(event) = event {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }

    let status = serde_json::json!({
        "state": session.state(),
        "elapsed_secs": session.elapsed_secs(now),
        "display": session.display(now),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);

    db.save_meditation(&session)?;
    Ok(())
}
