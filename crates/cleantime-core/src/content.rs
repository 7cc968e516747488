//! Static motivational content: reinforcement cards, guided meditations,
//! meditation tips, calming messages and journal prompts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReinforcementCard {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeditationGuide {
    pub id: &'static str,
    pub title: &'static str,
    pub duration_min: u32,
    pub description: &'static str,
}

pub const REINFORCEMENTS: &[ReinforcementCard] = &[
    ReinforcementCard {
        id: "1",
        title: "התגברות על רצון עז",
        content: "נשימה עמוקה, עשה משהו אחר, זכור למה התחלת.",
    },
    ReinforcementCard {
        id: "2",
        title: "ניהול מתח",
        content: "מדיטציה, פעילות גופנית, מוזיקה מרגיעה.",
    },
    ReinforcementCard {
        id: "3",
        title: "מחשבות חיוביות",
        content: "אני חזק יותר מההתמכרות. כל יום נקי הוא ניצחון.",
    },
];

pub const MEDITATIONS: &[MeditationGuide] = &[
    MeditationGuide {
        id: "1",
        title: "מדיטציית הרפיה",
        duration_min: 5,
        description: "מדיטציה קצרה להרגעת הגוף והנפש",
    },
    MeditationGuide {
        id: "2",
        title: "התמודדות עם תשוקה",
        duration_min: 10,
        description: "מדיטציה לזמנים קשים של רצון עז",
    },
    MeditationGuide {
        id: "3",
        title: "קבלה עצמית",
        duration_min: 15,
        description: "מדיטציה להגברת האהבה העצמית והקבלה",
    },
];

pub const MEDITATION_TIPS: &[&str] = &[
    "מצא מקום שקט ונוח",
    "שב בתנוחה נוחה עם גב ישר",
    "התמקד בנשימות שלך, נשום לאט ועמוק",
    "אל תשפוט את המחשבות שלך, פשוט תן להן לחלוף",
];

/// Rotated on the SOS view.
pub const CALMING_MESSAGES: &[&str] = &[
    "הקושי הזה יחלוף. אתה חזק יותר ממה שאתה חושב.",
    "נשום עמוק, הכל יהיה בסדר.",
    "אתה בוחר בעצמך ובבריאות שלך.",
    "כל רגע של שליטה הוא ניצחון.",
    "אתה לא לבד בתהליך הזה.",
];

pub const DAILY_QUOTE: &str = "כל יום נקי הוא ניצחון שמוביל אל החופש.";

pub const JOURNAL_PROMPT: &str = "איך הרגשת היום כשהתעוררת?";

pub fn find_meditation(id: &str) -> Option<&'static MeditationGuide> {
    MEDITATIONS.iter().find(|m| m.id == id)
}
