use chrono::NaiveDate;

/// A cached example sentence with its translation. Once attached to an
/// item it is never regenerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Example {
    pub sentence: String,
    pub translation: String,
}

impl Example {
    pub fn new(sentence: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            translation: translation.into(),
        }
    }

    /// Deterministic synthetic example used when every provider fails.
    /// Always contains the term, never empty.
    pub fn fallback(term: &str, translation: &str) -> Self {
        Self {
            sentence: format!("This is an example sentence with {term}."),
            translation: format!("这是一个包含{translation}的例句。"),
        }
    }
}

/// A vocabulary entry under active learning or already mastered.
///
/// `success_count` drives the interval schedule, `review_round` the
/// fairness wave, `review_count` only the least-reviewed-first ordering.
#[derive(Clone, Debug)]
pub struct Item {
    pub term: String,
    pub translation: String,
    pub success_count: u32,
    pub review_round: u32,
    pub review_count: u32,
    pub next_review_date: NaiveDate,
    pub example: Option<Example>,
}

impl Item {
    /// A brand-new item: round 0, no recalls yet, due immediately.
    pub fn new(term: impl Into<String>, translation: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
            success_count: 0,
            review_round: 0,
            review_count: 0,
            next_review_date: today,
            example: None,
        }
    }

    /// Case-insensitive key for uniqueness checks across collections.
    pub fn key(&self) -> String {
        self.term.to_lowercase()
    }

    /// Whether the item may be presented on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review_date <= today
    }

    /// Cache an example if none is attached yet. A cached example wins.
    pub fn cache_example(&mut self, example: Example) -> &Example {
        self.example.get_or_insert(example)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_item_due_immediately() {
        let today = day("2026-03-01");
        let item = Item::new("apple", "苹果", today);
        assert_eq!(item.success_count, 0);
        assert_eq!(item.review_round, 0);
        assert_eq!(item.review_count, 0);
        assert_eq!(item.next_review_date, today);
        assert!(item.is_due(today));
    }

    #[test]
    fn test_not_due_before_date() {
        let item = Item::new("apple", "苹果", day("2026-03-05"));
        assert!(!item.is_due(day("2026-03-04")));
        assert!(item.is_due(day("2026-03-05")));
        assert!(item.is_due(day("2026-03-06")));
    }

    #[test]
    fn test_key_case_insensitive() {
        let item = Item::new("Apple", "苹果", day("2026-03-01"));
        assert_eq!(item.key(), "apple");
    }

    #[test]
    fn test_cache_example_is_immutable() {
        let mut item = Item::new("apple", "苹果", day("2026-03-01"));
        item.cache_example(Example::new("An apple a day.", "一天一苹果。"));
        let kept = item.cache_example(Example::new("Another sentence.", "另一句。"));
        assert_eq!(kept.sentence, "An apple a day.");
    }

    #[test]
    fn test_fallback_contains_term() {
        let ex = Example::fallback("apple", "苹果");
        assert!(ex.sentence.contains("apple"));
        assert!(!ex.sentence.is_empty());
        assert!(!ex.translation.is_empty());
    }
}
