/// Successful recalls required before an item graduates to mastered.
/// Within the active set `success_count` is always strictly below this.
pub const MASTERY_THRESHOLD: u32 = 4;

/// Forgetting-curve day offsets, indexed by `success_count - 1`.
/// Beyond the table the last interval is reused (saturating).
pub const INTERVAL_TABLE: [u32; 8] = [1, 2, 4, 7, 15, 30, 60, 90];

/// Upper bound on the fairness round counter. Effectively unbounded for
/// human-paced use, but keeps the round invariant checkable.
pub const MAX_ROUND: u32 = 1000;

/// Default number of mastered items selected per refresher pass.
pub const REFRESH_BATCH: usize = 10;
