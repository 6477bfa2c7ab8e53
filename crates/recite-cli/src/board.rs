//! Plain-text boards printed after commands: deck status, the mastered
//! list, and the post-review summary.

use chrono::NaiveDate;

use recite_core::{Deck, Item, MASTERY_THRESHOLD, ReviewReport};

fn progress_stars(success_count: u32) -> String {
    let filled = success_count.min(MASTERY_THRESHOLD) as usize;
    let hollow = MASTERY_THRESHOLD as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(hollow))
}

fn days_label(item: &Item, today: NaiveDate) -> String {
    let delta = (item.next_review_date - today).num_days();
    if delta <= 0 {
        "today".to_string()
    } else {
        format!("in {delta}d")
    }
}

/// The learning board: every active item, soonest review first.
pub fn print_status(deck: &Deck, today: NaiveDate) {
    if deck.active.is_empty() {
        println!("no words in learning. import some with `recite import <file>`.");
    } else {
        let mut items: Vec<&Item> = deck.active.iter().collect();
        items.sort_by(|a, b| {
            a.next_review_date
                .cmp(&b.next_review_date)
                .then_with(|| a.key().cmp(&b.key()))
        });

        println!(
            "{:<16} {:<16} {:<12} {:<12} {}",
            "word", "meaning", "progress", "next review", "due"
        );
        for item in items {
            println!(
                "{:<16} {:<16} {:>2}/{} {:<6} {:<12} {}",
                item.term,
                item.translation,
                item.success_count,
                MASTERY_THRESHOLD,
                progress_stars(item.success_count),
                item.next_review_date,
                days_label(item, today),
            );
        }
    }
    println!();
    println!(
        "learning: {}  mastered: {}",
        deck.active.len(),
        deck.mastered.len()
    );
}

/// Every mastered item with the date mastery was reached.
pub fn print_mastered(deck: &Deck) {
    if deck.mastered.is_empty() {
        println!("no mastered words yet.");
        return;
    }
    let mut items: Vec<&Item> = deck.mastered.iter().collect();
    items.sort_by(|a, b| {
        a.next_review_date
            .cmp(&b.next_review_date)
            .then_with(|| a.key().cmp(&b.key()))
    });

    println!(
        "{:<16} {:<16} {:<12} {}",
        "word", "meaning", "mastered on", "exposures"
    );
    for item in items {
        println!(
            "{:<16} {:<16} {:<12} {}",
            item.term, item.translation, item.next_review_date, item.review_count
        );
    }
    println!();
    println!("mastered: {}", deck.mastered.len());
}

/// Printed after a review session.
pub fn print_review_summary(report: &ReviewReport, deck: &Deck) {
    println!();
    println!("reviewed:  {}", report.reviewed);
    println!("passed:    {}", report.passed);
    if report.mastered > 0 {
        println!("mastered:  {} newly mastered 🎉", report.mastered);
    }
    println!("round:     {}", report.current_round);
    println!(
        "deck:      {} learning, {} mastered",
        deck.active.len(),
        deck.mastered.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_stars() {
        assert_eq!(progress_stars(0), "☆☆☆☆");
        assert_eq!(progress_stars(2), "★★☆☆");
        assert_eq!(progress_stars(4), "★★★★");
        assert_eq!(progress_stars(9), "★★★★");
    }

    #[test]
    fn test_days_label() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut item = Item::new("apple", "苹果", today);
        assert_eq!(days_label(&item, today), "today");
        item.next_review_date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(days_label(&item, today), "in 3d");
        item.next_review_date = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        assert_eq!(days_label(&item, today), "today");
    }
}
