use crate::analyzer::{label, SentimentScorer};
use crate::model::{Post, ReportRow, RetrievalError, SentimentScore};
use crate::normalizer::normalize;
use crate::source::PostSource;
use crate::utils::format_score;
use tracing::{debug, info, warn};

pub const DEFAULT_LIMIT: usize = 50;
pub const DEFAULT_LANGUAGE: &str = "en";

/// Pulls posts from a source, scores their normalized text and builds report
/// rows in retrieval order.
pub struct Pipeline<'a> {
    source: &'a dyn PostSource,
    scorer: &'a dyn SentimentScorer,
    language: String,
}

impl<'a> Pipeline<'a> {
    pub fn new(source: &'a dyn PostSource, scorer: &'a dyn SentimentScorer) -> Self {
        Self {
            source,
            scorer,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Produces at most `limit` rows, one per retrieved post.
    ///
    /// An empty search result is an empty report, not an error. Retrieval
    /// errors are returned as they come from the source.
    pub async fn run(&self, query: &str, limit: usize, threshold: f64) -> Result<Vec<ReportRow>, RetrievalError> {
        info!("Searching up to {} posts for {:?} (lang={})", limit, query, self.language);
        let mut posts = self.source.search(query, limit, &self.language).await?;

        if posts.len() > limit {
            warn!("Source returned {} posts for a limit of {}, dropping the rest", posts.len(), limit);
            posts.truncate(limit);
        }

        info!("Scoring {} posts...", posts.len());
        let rows = posts
            .into_iter()
            .map(|post| {
                let normalized = normalize(&post.body);
                let score = self.scorer.score(&normalized);
                debug!("{:?} -> {:?}", normalized, score);
                build_row(post, score, threshold)
            })
            .collect();
        Ok(rows)
    }
}

/// Assembles a row from the post's original text and its score.
pub fn build_row(post: Post, score: SentimentScore, threshold: f64) -> ReportRow {
    ReportRow {
        name: post.author_name,
        screen_name: post.author_handle,
        text: post.body,
        polarity: format_score(score.polarity),
        subjectivity: format_score(score.subjectivity),
        label: label(score.polarity, threshold),
    }
}
