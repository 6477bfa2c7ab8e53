//! JSON serde for the deck snapshot wire format.
//!
//! The wire format uses camelCase field names and ISO-8601 dates.
//! Fields that predate the round scheduler (`reviewRound`,
//! `reviewCount`) default to 0 so older snapshots load cleanly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::item::{Example, Item};

pub const CURRENT_VERSION: &str = "2";

// --- Wire format types ---

#[derive(Serialize, Deserialize, Debug)]
pub struct WireSnapshot {
    #[serde(default)]
    pub version: String,
    pub active: Vec<WireItem>,
    pub mastered: Vec<WireItem>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireItem {
    pub term: String,
    pub translation: String,
    #[serde(rename = "successCount", default)]
    pub success_count: u32,
    #[serde(rename = "reviewRound", default)]
    pub review_round: u32,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
    #[serde(rename = "nextReviewDate")]
    pub next_review_date: NaiveDate,
    #[serde(default)]
    pub example: Option<WireExample>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireExample {
    pub sentence: String,
    pub translation: String,
}

// --- Conversion: Wire ↔ Domain ---

impl WireSnapshot {
    pub fn into_deck(self) -> Deck {
        Deck {
            active: self.active.into_iter().map(WireItem::into_item).collect(),
            mastered: self.mastered.into_iter().map(WireItem::into_item).collect(),
        }
    }

    pub fn from_deck(deck: &Deck) -> Self {
        WireSnapshot {
            version: CURRENT_VERSION.to_string(),
            active: deck.active.iter().map(WireItem::from_item).collect(),
            mastered: deck.mastered.iter().map(WireItem::from_item).collect(),
        }
    }
}

impl WireItem {
    fn into_item(self) -> Item {
        Item {
            term: self.term,
            translation: self.translation,
            success_count: self.success_count,
            review_round: self.review_round,
            review_count: self.review_count,
            next_review_date: self.next_review_date,
            example: self.example.map(|e| Example {
                sentence: e.sentence,
                translation: e.translation,
            }),
        }
    }

    fn from_item(item: &Item) -> Self {
        WireItem {
            term: item.term.clone(),
            translation: item.translation.clone(),
            success_count: item.success_count,
            review_round: item.review_round,
            review_count: item.review_count,
            next_review_date: item.next_review_date,
            example: item.example.as_ref().map(|e| WireExample {
                sentence: e.sentence.clone(),
                translation: e.translation.clone(),
            }),
        }
    }
}

/// Deserialize a snapshot JSON string into a Deck.
pub fn import_json(json: &str) -> Result<Deck, serde_json::Error> {
    let wire: WireSnapshot = serde_json::from_str(json)?;
    Ok(wire.into_deck())
}

/// Serialize a Deck to snapshot JSON.
pub fn export_json(deck: &Deck) -> Result<String, serde_json::Error> {
    let wire = WireSnapshot::from_deck(deck);
    serde_json::to_string_pretty(&wire)
}
