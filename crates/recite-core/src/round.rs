//! Round scheduling: which items compete for today's slot.
//!
//! Items are grouped into fairness "rounds". Without the grouping,
//! long-interval items would rarely win today's slot against a steady
//! supply of short-interval ones; round grouping plus
//! least-reviewed-first ordering bounds how stale any item can get.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::constants::MAX_ROUND;
use crate::interval::next_review_date;
use crate::item::Item;

/// Pull every overdue active item forward to `today`. Idempotent; run
/// once per load so stale snapshots re-enter the schedule cleanly.
pub fn clamp_overdue(active: &mut [Item], today: NaiveDate) {
    for item in active.iter_mut() {
        if item.next_review_date < today {
            item.next_review_date = today;
        }
    }
}

/// Terms due on `today`, restricted to one round group.
///
/// The `current_round` group wins if it has due members; otherwise the
/// lowest round present among due items. Within the group, least
/// reviewed first, ties broken by term for determinism.
pub fn due_today(active: &[Item], today: NaiveDate, current_round: u32) -> Vec<String> {
    let due: Vec<&Item> = active.iter().filter(|i| i.is_due(today)).collect();
    if due.is_empty() {
        return Vec::new();
    }

    let round = if due.iter().any(|i| i.review_round == current_round) {
        current_round
    } else {
        due.iter().map(|i| i.review_round).min().unwrap_or(current_round)
    };

    let mut group: Vec<&Item> = due
        .into_iter()
        .filter(|i| i.review_round == round)
        .collect();
    group.sort_by(|a, b| {
        a.review_count
            .cmp(&b.review_count)
            .then_with(|| a.term.cmp(&b.term))
    });
    group.into_iter().map(|i| i.term.clone()).collect()
}

/// Advance the round counter once the current round has drained.
///
/// Called after each applied outcome during a session. `attempted`
/// holds the terms already resolved this session: a resolved item no
/// longer occupies its round, whatever its outcome was. When no
/// unresolved active item remains in `current_round` (and the cap
/// allows), the counter moves up by one and every item left behind,
/// including items that just failed, re-enters the new round with its
/// date recomputed from its current success count. This is what turns
/// a failure into a delay rather than an immediate retry.
pub fn advance_round_if_empty(
    active: &mut [Item],
    attempted: &HashSet<String>,
    current_round: u32,
    today: NaiveDate,
) -> u32 {
    let round_occupied = active
        .iter()
        .any(|i| i.review_round == current_round && !attempted.contains(&i.term));
    if round_occupied || current_round >= MAX_ROUND {
        return current_round;
    }

    let next_round = current_round + 1;
    for item in active.iter_mut() {
        if item.review_round < next_round {
            item.review_round = next_round;
            item.next_review_date = next_review_date(today, item.success_count);
        }
    }
    next_round
}
