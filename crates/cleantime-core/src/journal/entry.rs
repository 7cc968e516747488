//! Journal record types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Withdrawal symptoms a user can tag an entry with.
pub const SYMPTOMS: &[&str] = &[
    "חרדה",
    "עצבנות",
    "נדודי שינה",
    "חלומות עזים",
    "ירידה בתיאבון",
    "הזעה",
    "כאבי ראש",
    "דכדוך",
    "חשק עז",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Neutral,
    Bad,
    Awful,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Great, Mood::Good, Mood::Neutral, Mood::Bad, Mood::Awful];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Neutral => "neutral",
            Mood::Bad => "bad",
            Mood::Awful => "awful",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownMood(s.to_string()))
    }
}

/// One persisted journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Millisecond timestamp of creation, as text. Never changes.
    pub id: String,
    /// Calendar date of creation. Never changes.
    #[serde(with = "day_month_year")]
    pub date: NaiveDate,
    pub content: String,
    pub mood: Mood,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// The user-editable part of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub content: String,
    pub mood: Mood,
    pub symptoms: Vec<String>,
}

impl EntryDraft {
    pub fn new(content: impl Into<String>, mood: Mood) -> Self {
        Self {
            content: content.into(),
            mood,
            symptoms: Vec::new(),
        }
    }

    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms = symptoms.into_iter().map(Into::into).collect();
        self
    }

    /// Check the draft and return it with symptoms trimmed and de-duplicated
    /// (first occurrence wins).
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        let mut symptoms: Vec<String> = Vec::with_capacity(self.symptoms.len());
        for symptom in self.symptoms {
            let symptom = symptom.trim().to_string();
            if !SYMPTOMS.contains(&symptom.as_str()) {
                return Err(ValidationError::UnknownSymptom(symptom));
            }
            if !symptoms.contains(&symptom) {
                symptoms.push(symptom);
            }
        }
        Ok(Self { symptoms, ..self })
    }
}

/// `DD/MM/YYYY` on the wire.
mod day_month_year {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_matches_persisted_layout() {
        let entry = JournalEntry {
            id: "1717243200000".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            content: "test".into(),
            mood: Mood::Good,
            symptoms: vec!["חרדה".into()],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1717243200000",
                "date": "01/06/2024",
                "content": "test",
                "mood": "good",
                "symptoms": ["חרדה"],
            })
        );
        let back: JournalEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn rejects_iso_dates() {
        let json = r#"{"id":"1","date":"2024-06-01","content":"x","mood":"bad","symptoms":[]}"#;
        assert!(serde_json::from_str::<JournalEntry>(json).is_err());
    }

    #[test]
    fn mood_parses_case_insensitively() {
        assert_eq!("Great".parse::<Mood>().unwrap(), Mood::Great);
        assert_eq!(" awful ".parse::<Mood>().unwrap(), Mood::Awful);
        assert_eq!(
            "meh".parse::<Mood>(),
            Err(ValidationError::UnknownMood("meh".into()))
        );
    }

    #[test]
    fn draft_validation() {
        assert_eq!(
            EntryDraft::new("   ", Mood::Neutral).validate(),
            Err(ValidationError::EmptyContent)
        );
        assert_eq!(
            EntryDraft::new("x", Mood::Neutral)
                .with_symptoms(["שיעול"])
                .validate(),
            Err(ValidationError::UnknownSymptom("שיעול".into()))
        );
        let draft = EntryDraft::new("x", Mood::Neutral)
            .with_symptoms(["חרדה", " הזעה", "חרדה"])
            .validate()
            .unwrap();
        assert_eq!(draft.symptoms, vec!["חרדה".to_string(), "הזעה".to_string()]);
    }
}
