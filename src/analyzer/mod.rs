// Analyzer module: scoring and labeling of normalized post text.

pub mod labeler;
pub mod lexicon;

use crate::model::SentimentScore;

// Re-export the default scorer for ease of use.
pub use labeler::{label, DEFAULT_THRESHOLD};
pub use lexicon::LexiconScorer;

/// Turns normalized text into a polarity/subjectivity pair.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> SentimentScore;
}
