use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;

use crate::constants::MASTERY_THRESHOLD;
use crate::item::Item;

/// An active item carrying a success count at or above the mastery
/// threshold. The scheduler can never produce this state, so finding it
/// means the snapshot or the process memory is corrupt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityError {
    pub term: String,
    pub success_count: u32,
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active item '{}' has success_count {} >= mastery threshold {}",
            self.term, self.success_count, MASTERY_THRESHOLD
        )
    }
}

impl std::error::Error for IntegrityError {}

/// The two item collections. An item lives in exactly one of them; the
/// move active → mastered is one-directional and terminal.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    pub active: Vec<Item>,
    pub mastered: Vec<Item>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of items across both collections.
    pub fn len(&self) -> usize {
        self.active.len() + self.mastered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.mastered.is_empty()
    }

    /// Whether a term exists in either collection (case-insensitive).
    pub fn contains(&self, term: &str) -> bool {
        let key = term.to_lowercase();
        self.active.iter().chain(self.mastered.iter()).any(|i| i.key() == key)
    }

    pub fn active_item(&self, term: &str) -> Option<&Item> {
        self.active.iter().find(|i| i.term == term)
    }

    pub fn active_item_mut(&mut self, term: &str) -> Option<&mut Item> {
        self.active.iter_mut().find(|i| i.term == term)
    }

    pub fn mastered_item_mut(&mut self, term: &str) -> Option<&mut Item> {
        self.mastered.iter_mut().find(|i| i.term == term)
    }

    /// Add `(term, translation)` pairs as new active items. Duplicates
    /// against either collection (case-insensitive) are silently
    /// skipped. Returns the number actually added.
    pub fn add_items<I, S, T>(&mut self, pairs: I, today: NaiveDate) -> usize
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut seen: HashSet<String> = self
            .active
            .iter()
            .chain(self.mastered.iter())
            .map(Item::key)
            .collect();

        let mut added = 0;
        for (term, translation) in pairs {
            let item = Item::new(term, translation, today);
            if seen.insert(item.key()) {
                self.active.push(item);
                added += 1;
            }
        }
        added
    }

    /// Move an active item to the mastered collection, freezing its
    /// round and date at their last values. No-op for unknown terms.
    pub fn promote(&mut self, term: &str) {
        if let Some(pos) = self.active.iter().position(|i| i.term == term) {
            let item = self.active.remove(pos);
            self.mastered.push(item);
        }
    }

    /// Derived process-wide round counter: the minimum `review_round`
    /// among active items, 0 when the active set is empty. Recomputed
    /// at load rather than persisted.
    pub fn min_active_round(&self) -> u32 {
        self.active.iter().map(|i| i.review_round).min().unwrap_or(0)
    }

    /// Fatal internal-consistency check: no active item may sit at or
    /// above the mastery threshold.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        match self.active.iter().find(|i| i.success_count >= MASTERY_THRESHOLD) {
            Some(item) => Err(IntegrityError {
                term: item.term.clone(),
                success_count: item.success_count,
            }),
            None => Ok(()),
        }
    }
}
