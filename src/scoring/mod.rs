pub mod category;
pub mod random;
pub mod scorer;
pub mod suggestions;

pub use category::categorize;
pub use random::{RandomSource, SeededRandom};
pub use scorer::{ImpactScorer, ScorerWeights};
