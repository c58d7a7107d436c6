// Core structs: Post, SentimentScore, ReportRow, plus the error types
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub author_name: String,
    pub author_handle: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl SentimentScore {
    pub const NEUTRAL: SentimentScore = SentimentScore {
        polarity: 0.0,
        subjectivity: 0.0,
    };

    /// Builds a score, clamping polarity to [-1, 1] and subjectivity to [0, 1].
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
        }
    }
}

/// One line of the CSV report. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub screen_name: String,
    pub text: String,
    pub polarity: String,
    pub subjectivity: String,
    pub label: Label,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub count: usize,
    pub language: String,
    pub max_id: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub posts: Vec<Post>,
    /// Cursor for the next (older) page, `None` when the page was empty.
    pub next_max_id: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: set {0}")]
    MissingCredential(&'static str),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("credentials rejected by the post source (status {0})")]
    Unauthorized(u16),
    #[error("rate limited by the post source")]
    RateLimited,
    #[error("unexpected response (status {status}): {body}")]
    InvalidResponse { status: u16, body: String },
    #[error("malformed response: {0}")]
    ParseError(String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unable to open file : {} for writing.", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to write file : {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
