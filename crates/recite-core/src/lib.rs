//! Spaced-recall scheduling engine for vocabulary memorization.
//!
//! A small state machine layered over a forgetting-curve interval table
//! and a two-phase round fairness policy: it decides which item to
//! present next, when an item becomes due again, and when an item
//! graduates from learning to mastered.
//!
//! Zero I/O: presentation, example generation, speech, and persistence
//! are collaborator seams supplied by the caller.

pub mod constants;
pub mod deck;
pub mod interval;
pub mod item;
pub mod mastery;
pub mod round;
pub mod session;
pub mod snapshot;

pub use constants::{INTERVAL_TABLE, MASTERY_THRESHOLD, MAX_ROUND, REFRESH_BATCH};
pub use deck::{Deck, IntegrityError};
pub use interval::{days_until_next_review, next_review_date};
pub use item::{Example, Item};
pub use mastery::{apply_outcome, select_for_refresh};
pub use round::{advance_round_if_empty, clamp_overdue, due_today};
pub use session::{
    ExampleProvider, RecallExchange, RefreshReport, ReviewReport, SessionError, run_refresh,
    run_review,
};
pub use snapshot::{CURRENT_VERSION, export_json, import_json};
