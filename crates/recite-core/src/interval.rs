//! Forgetting-curve interval lookup.
//!
//! Maps a post-increment success count to the day offset until the next
//! review. The table approximates the Ebbinghaus curve; past the table
//! end the last interval is reused rather than growing unbounded.

use chrono::{Days, NaiveDate};

use crate::constants::INTERVAL_TABLE;

/// Days until the next review for an item with `success_count`
/// successful recalls. Count 0 is the brand-new case: due immediately.
pub fn days_until_next_review(success_count: u32) -> u32 {
    if success_count == 0 {
        return 0;
    }
    let idx = (success_count as usize - 1).min(INTERVAL_TABLE.len() - 1);
    INTERVAL_TABLE[idx]
}

/// The next review date for `success_count`, anchored at `today`.
pub fn next_review_date(today: NaiveDate, success_count: u32) -> NaiveDate {
    today + Days::new(days_until_next_review(success_count) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_item_due_immediately() {
        assert_eq!(days_until_next_review(0), 0);
    }

    #[test]
    fn test_table_values() {
        let expected = [1, 2, 4, 7, 15, 30, 60, 90];
        for (i, want) in expected.iter().enumerate() {
            let count = i as u32 + 1;
            assert_eq!(
                days_until_next_review(count),
                *want,
                "interval for success_count={count}"
            );
        }
    }

    #[test]
    fn test_saturates_past_table() {
        assert_eq!(days_until_next_review(9), 90);
        assert_eq!(days_until_next_review(100), 90);
        assert_eq!(days_until_next_review(u32::MAX), 90);
    }

    #[test]
    fn test_next_review_date_offsets() {
        let today = day("2026-03-01");
        assert_eq!(next_review_date(today, 0), today);
        assert_eq!(next_review_date(today, 1), day("2026-03-02"));
        assert_eq!(next_review_date(today, 4), day("2026-03-08"));
    }

    proptest! {
        #[test]
        fn prop_non_decreasing(count in 1u32..200) {
            prop_assert!(
                days_until_next_review(count + 1) >= days_until_next_review(count)
            );
        }

        #[test]
        fn prop_bounded_by_last_entry(count in 0u32..10_000) {
            prop_assert!(days_until_next_review(count) <= 90);
        }
    }
}
