use crate::analyzer::SentimentScorer;
use crate::model::{ConfigError, SentimentScore};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Polarity flip applied to a sentiment word that follows a negator.
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct WordSentiment {
    polarity: f64,
    subjectivity: f64,
}

/// One lexicon line as stored in a JSON lexicon file.
///
/// An entry carrying only `intensity` is an intensifier: it scales the next
/// sentiment word. Any other entry is a plain word; one scoring zero on both
/// axes is neutral and no longer counts towards the average.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    #[serde(default)]
    pub polarity: Option<f64>,
    #[serde(default)]
    pub subjectivity: Option<f64>,
    #[serde(default)]
    pub intensity: Option<f64>,
}

// (word, polarity, subjectivity)
const BUILTIN_WORDS: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("nice", 0.6, 1.0),
    ("love", 0.5, 0.6),
    ("loving", 0.6, 0.9),
    ("like", 0.2, 0.4),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("awesome", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("excellent", 1.0, 1.0),
    ("happy", 0.8, 1.0),
    ("cool", 0.35, 0.65),
    ("fun", 0.3, 0.2),
    ("beautiful", 0.85, 1.0),
    ("perfect", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("win", 0.8, 0.4),
    ("winning", 0.5, 0.5),
    ("glad", 0.5, 1.0),
    ("thanks", 0.2, 0.2),
    ("interesting", 0.5, 0.5),
    ("easy", 0.43, 0.83),
    ("fast", 0.2, 0.6),
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("hate", -0.8, 0.9),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("boring", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("poor", -0.4, 0.6),
    ("wrong", -0.5, 0.9),
    ("broken", -0.4, 0.4),
    ("slow", -0.3, 0.4),
    ("stupid", -0.8, 1.0),
    ("disappointing", -0.6, 0.7),
    ("fail", -0.5, 0.3),
    ("failed", -0.5, 0.3),
    ("lost", -0.3, 0.3),
    ("difficult", -0.5, 1.0),
    ("hard", -0.3, 0.54),
];

const BUILTIN_INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("so", 1.2),
    ("super", 1.4),
    ("totally", 1.3),
    ("pretty", 1.1),
    ("slightly", 0.6),
    ("somewhat", 0.7),
];

const NEGATORS: &[&str] = &["not", "no", "never", "cannot", "nothing", "nobody"];

/// Averages per-word polarity and subjectivity over the sentiment words of a
/// text, honouring intensifiers and negators that directly precede them.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, WordSentiment>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        let words = BUILTIN_WORDS
            .iter()
            .map(|&(word, polarity, subjectivity)| {
                (word.to_string(), WordSentiment { polarity, subjectivity })
            })
            .collect();
        let intensifiers = BUILTIN_INTENSIFIERS
            .iter()
            .map(|&(word, intensity)| (word.to_string(), intensity))
            .collect();
        Self { words, intensifiers }
    }

    /// Adds entries on top of the built-in lexicon; later entries win.
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        for entry in entries {
            let word = entry.word.to_lowercase();
            match (entry.polarity, entry.subjectivity, entry.intensity) {
                (None, None, Some(intensity)) => {
                    self.words.remove(&word);
                    self.intensifiers.insert(word, intensity);
                }
                (polarity, subjectivity, _) => {
                    self.intensifiers.remove(&word);
                    let polarity = polarity.unwrap_or(0.0);
                    let subjectivity = subjectivity.unwrap_or(0.0);
                    if polarity == 0.0 && subjectivity == 0.0 {
                        self.words.remove(&word);
                    } else {
                        self.words.insert(word, WordSentiment { polarity, subjectivity });
                    }
                }
            }
        }
        self
    }

    /// Loads a JSON array of [`LexiconEntry`] and merges it into the built-ins.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<LexiconEntry> =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded {} lexicon entries from {}", entries.len(), path.display());
        Ok(Self::new().with_entries(entries))
    }

    fn is_negator(word: &str) -> bool {
        NEGATORS.contains(&word) || word.ends_with("n't")
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();
        let mut modifier = 1.0;
        let mut negated = false;

        for token in text.split_whitespace() {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            if word.is_empty() {
                continue;
            }
            if Self::is_negator(word) {
                negated = true;
                continue;
            }
            if let Some(&intensity) = self.intensifiers.get(word) {
                modifier *= intensity;
                continue;
            }
            if let Some(sentiment) = self.words.get(word) {
                let mut polarity = sentiment.polarity * modifier;
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                polarities.push(polarity.clamp(-1.0, 1.0));
                subjectivities.push((sentiment.subjectivity * modifier).clamp(0.0, 1.0));
            }
            modifier = 1.0;
            negated = false;
        }

        if polarities.is_empty() {
            return SentimentScore::NEUTRAL;
        }
        let count = polarities.len() as f64;
        SentimentScore::new(
            polarities.iter().sum::<f64>() / count,
            subjectivities.iter().sum::<f64>() / count,
        )
    }
}
