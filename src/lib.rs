//! # numi-algo - personalization core for adaptive arithmetic practice
//!
//! This crate provides the two subsystems behind exercise
//! personalization:
//!
//! - **Mastery/Review Scheduling** - spaced-repetition mastery updates
//!   ([`compute_mastery_update`]) and urgency-classified review listings
//!   ([`get_upcoming_reviews`], [`format_review_date`])
//! - **Context Variety Selection** - locale-specific content selection
//!   ([`ContextSelector`]) that suppresses short-term repetition with a
//!   bounded recency window while keeping long-run frequencies balanced
//!
//! Both subsystems are in-memory computations. Persistence of progress
//! records and transport for remote content sources belong to the
//! embedding application; the only suspension point in this crate is
//! [`ContextSelector::load_context_pool`].
//!
//! ## Usage
//!
//! ```rust
//! use numi_algo::{ContextSelector, Locale};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), numi_algo::SelectionError> {
//! let mut selector = ContextSelector::new(Locale::En);
//! selector.load_context_pool().await?;
//!
//! let name = selector.select_name(None)?;
//! let snacks = selector.select_items("food", 3)?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod mastery;
pub mod schedule;
pub mod types;

pub use context::{
    BundledContextSource, Category, ContextPool, ContextSelector, ContextSource, Currency, Gender,
    Locale, NamePools, PlacePools, PlaceType, SelectorOptions, TrackingKey, UsageSnapshot,
    UsageTracker, DEFAULT_MAX_RECENT_SIZE,
};
pub use error::SelectionError;
pub use mastery::compute_mastery_update;
pub use schedule::{classify_urgency, format_review_date, get_upcoming_reviews};
pub use types::{
    AttemptOutcome, MasteryBand, MasteryUpdate, ScheduledReview, SkillProgress, SrsState, Urgency,
};
