use crate::model::{Post, RetrievalError};

/// Anything that can answer a search with a finite, ordered list of posts.
#[async_trait::async_trait]
pub trait PostSource: Send + Sync {
    async fn search(&self, query: &str, count: usize, language: &str) -> Result<Vec<Post>, RetrievalError>;
}
