pub mod card;
pub mod heuristic;
pub mod ranking;
pub mod resolution;
pub mod slug;

pub use card::{
	Benefit, BenefitType, Card, CardType, FeeItem, FeeType, FeesAndCharges, Lounge, LoungeItem,
};
pub use ranking::{RankedEntry, RankedResult, RankingSource};
pub use resolution::{ResolvedSearchResult, ResultRow};

/// Shortcut queries offered next to the search box.
pub const POPULAR_QUERIES: [&str; 6] = ["Amazon", "Flipkart", "Swiggy", "Travel", "Fuel", "Dining"];
