//! Mastery transitions and refresher rotation over mastered items.

use chrono::NaiveDate;

use crate::constants::MASTERY_THRESHOLD;
use crate::interval::next_review_date;
use crate::item::Item;

/// Apply one recall outcome to an active item. Returns whether the item
/// crossed the mastery threshold (the caller then moves it to the
/// mastered collection, freezing round and date).
///
/// A failed recall only bumps `review_count`: progress and schedule are
/// kept as-is, there is no decay or penalty.
pub fn apply_outcome(item: &mut Item, passed: bool, today: NaiveDate) -> bool {
    item.review_count += 1;
    if !passed {
        return false;
    }

    item.success_count += 1;
    if item.success_count >= MASTERY_THRESHOLD {
        return true;
    }
    item.next_review_date = next_review_date(today, item.success_count);
    false
}

/// Select up to `limit` mastered terms for a refresher pass: globally
/// least-reviewed first, ties by term. The session bumps each selected
/// item's `review_count` after its exchange, so repeated passes walk
/// the whole collection round-robin.
pub fn select_for_refresh(mastered: &[Item], limit: usize) -> Vec<String> {
    let mut sorted: Vec<&Item> = mastered.iter().collect();
    sorted.sort_by(|a, b| {
        a.review_count
            .cmp(&b.review_count)
            .then_with(|| a.term.cmp(&b.term))
    });
    sorted.into_iter().take(limit).map(|i| i.term.clone()).collect()
}
