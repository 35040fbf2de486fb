pub mod candidate;
pub mod search_hit;

pub use candidate::{Candidate, ScoredItem};
pub use search_hit::RawSearchHit;
