//! Session controller: one review or refresher pass over the deck.
//!
//! The controller owns the loop and the state transitions; the actual
//! Q&A exchange, example generation, and persistence are collaborator
//! seams supplied by the caller. Nothing here touches a terminal, a
//! network, or a file.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;

use crate::deck::{Deck, IntegrityError};
use crate::item::{Example, Item};
use crate::mastery::{apply_outcome, select_for_refresh};
use crate::round::{advance_round_if_empty, due_today};

/// Produces an example sentence for a term. `None` means every source
/// failed; the session then falls back to a synthetic sentence.
pub trait ExampleProvider {
    fn example(&mut self, term: &str, translation: &str) -> Option<Example>;
}

/// The interactive quiz: present one item, return pass/fail. Blocking;
/// an aborted attempt (reveal-answer shortcut) resolves to `false`.
pub trait RecallExchange {
    fn present_and_collect(&mut self, item: &Item, example: &Example) -> bool;
}

/// A pass failed either on an internal-consistency fault or while
/// persisting through the caller's snapshot writer.
#[derive(Debug)]
pub enum SessionError<E> {
    Integrity(IntegrityError),
    Persist(E),
}

impl<E: fmt::Display> fmt::Display for SessionError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Integrity(e) => write!(f, "deck integrity fault: {e}"),
            SessionError::Persist(e) => write!(f, "failed to persist deck: {e}"),
        }
    }
}

impl<E: fmt::Display + fmt::Debug> std::error::Error for SessionError<E> {}

impl<E> From<IntegrityError> for SessionError<E> {
    fn from(e: IntegrityError) -> Self {
        SessionError::Integrity(e)
    }
}

/// What happened during one review pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewReport {
    pub reviewed: usize,
    pub passed: usize,
    pub mastered: usize,
    /// Round counter after the pass.
    pub current_round: u32,
}

/// Run today's review pass over the due list.
///
/// For each due item in order: ensure a cached example, run the
/// exchange, apply the outcome, promote on mastery, and advance the
/// round once the current wave has fully drained. The deck is persisted
/// once at the end of the pass; an empty due list persists nothing.
pub fn run_review<P, X, F, E>(
    deck: &mut Deck,
    today: NaiveDate,
    current_round: u32,
    provider: &mut P,
    exchange: &mut X,
    persist: &mut F,
) -> Result<ReviewReport, SessionError<E>>
where
    P: ExampleProvider,
    X: RecallExchange,
    F: FnMut(&Deck) -> Result<(), E>,
{
    deck.check_integrity()?;

    let pending = due_today(&deck.active, today, current_round);
    let mut report = ReviewReport {
        current_round,
        ..Default::default()
    };
    if pending.is_empty() {
        return Ok(report);
    }

    let mut attempted: HashSet<String> = HashSet::new();
    for term in &pending {
        // Items only leave `active` through promotion, and each term
        // appears once in the due list, so a miss here means the deck
        // was mutated behind the controller's back.
        let Some(item) = deck.active_item_mut(term) else {
            continue;
        };
        let translation = item.translation.clone();

        let example = match item.example.clone() {
            Some(ex) => ex,
            None => {
                let generated = provider
                    .example(term, &translation)
                    .unwrap_or_else(|| Example::fallback(term, &translation));
                item.cache_example(generated).clone()
            }
        };

        let passed = exchange.present_and_collect(item, &example);
        let mastered_now = apply_outcome(item, passed, today);

        report.reviewed += 1;
        if passed {
            report.passed += 1;
        }
        if mastered_now {
            deck.promote(term);
            report.mastered += 1;
        }

        attempted.insert(term.clone());
        report.current_round =
            advance_round_if_empty(&mut deck.active, &attempted, report.current_round, today);
    }

    persist(deck).map_err(SessionError::Persist)?;
    Ok(report)
}

/// What happened during one refresher pass over mastered items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub refreshed: usize,
    pub passed: usize,
}

/// Run a refresher pass over up to `limit` mastered items, least
/// reviewed first. Each item's `review_count` is bumped once its
/// exchange completes, pass or fail, and the deck is persisted after
/// every single item so an interrupted pass loses at most one exchange.
pub fn run_refresh<P, X, F, E>(
    deck: &mut Deck,
    limit: usize,
    provider: &mut P,
    exchange: &mut X,
    persist: &mut F,
) -> Result<RefreshReport, SessionError<E>>
where
    P: ExampleProvider,
    X: RecallExchange,
    F: FnMut(&Deck) -> Result<(), E>,
{
    let selected = select_for_refresh(&deck.mastered, limit);
    let mut report = RefreshReport::default();

    for term in &selected {
        let Some(item) = deck.mastered_item_mut(term) else {
            continue;
        };
        let translation = item.translation.clone();

        let example = match item.example.clone() {
            Some(ex) => ex,
            None => {
                let generated = provider
                    .example(term, &translation)
                    .unwrap_or_else(|| Example::fallback(term, &translation));
                item.cache_example(generated).clone()
            }
        };

        let passed = exchange.present_and_collect(item, &example);
        item.review_count += 1;

        report.refreshed += 1;
        if passed {
            report.passed += 1;
        }

        persist(deck).map_err(SessionError::Persist)?;
    }

    Ok(report)
}
