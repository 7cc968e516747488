use chrono::Local;
use clap::Subcommand;
use cleantime_core::content::JOURNAL_PROMPT;
use cleantime_core::journal::SYMPTOMS;
use cleantime_core::{Database, EntryDraft, Journal, Mood};

use super::CommandResult;

#[derive(Subcommand)]
pub enum JournalAction {
    /// List entries, newest first
    List,
    /// Show one entry
    Show {
        id: String,
    },
    /// Write a new entry
    Add {
        /// Entry text
        content: String,
        /// great, good, neutral, bad or awful
        #[arg(long, default_value = "neutral")]
        mood: Mood,
        /// Symptom to tag (repeatable)
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
    },
    /// Rewrite an existing entry (id and date are kept)
    Edit {
        id: String,
        content: String,
        #[arg(long, default_value = "neutral")]
        mood: Mood,
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
    },
    /// Delete an entry
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Today's writing prompt and the symptom vocabulary
    Prompt,
}

pub fn run(action: JournalAction) -> CommandResult {
    if let JournalAction::Prompt = action {
        let json = serde_json::json!({ "prompt": JOURNAL_PROMPT, "symptoms": SYMPTOMS });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    let db = Database::open()?;
    let mut journal = Journal::open(&db)?;

    match action {
        JournalAction::List => {
            println!("{}", serde_json::to_string_pretty(journal.entries())?);
        }
        JournalAction::Show { id } => match journal.get(&id) {
            Some(entry) => println!("{}", serde_json::to_string_pretty(entry)?),
            None => return Err(format!("no journal entry with id {id}").into()),
        },
        JournalAction::Add {
            content,
            mood,
            symptoms,
        } => {
            let entry = journal.add(
                EntryDraft::new(content, mood).with_symptoms(symptoms),
                &Local::now(),
            )?;
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
        JournalAction::Edit {
            id,
            content,
            mood,
            symptoms,
        } => {
            let entry = journal.edit(&id, EntryDraft::new(content, mood).with_symptoms(symptoms))?;
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
        JournalAction::Delete { id, yes } => {
            if !yes {
                return Err("refusing to delete without --yes".into());
            }
            let removed = journal.delete(&id)?;
            println!("{}", serde_json::to_string_pretty(&removed)?);
        }
        JournalAction::Prompt => unreachable!("handled above"),
    }
    Ok(())
}
