use clap::Subcommand;
use cleantime_core::content::{DAILY_QUOTE, MEDITATIONS, MEDITATION_TIPS, REINFORCEMENTS};

use super::CommandResult;

#[derive(Subcommand)]
pub enum ContentAction {
    /// Coping tools
    Reinforcements,
    /// Guided meditation sessions
    Meditations,
    /// Meditation tips
    Tips,
    /// Daily inspiration
    Quote,
}

pub fn run(action: ContentAction) -> CommandResult {
    let json = match action {
        ContentAction::Reinforcements => serde_json::to_string_pretty(REINFORCEMENTS)?,
        ContentAction::Meditations => serde_json::to_string_pretty(MEDITATIONS)?,
        ContentAction::Tips => serde_json::to_string_pretty(MEDITATION_TIPS)?,
        ContentAction::Quote => serde_json::to_string_pretty(&serde_json::json!({ "quote": DAILY_QUOTE }))?,
    };
    println!("{json}");
    Ok(())
}
