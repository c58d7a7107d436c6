use crate::config::{Credentials, SourceConfig};
use crate::model::{Post, RetrievalError, SearchRequest};
use crate::parser::{Parser, SearchResponseParser};
use crate::source::PostSource;

use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Twitter v1.1 standard search, authenticated with an app-only bearer token.
pub struct TwitterSource {
    client: Client,
    api_base: String,
    credentials: Credentials,
    page_size: usize,
    parser: SearchResponseParser,
    token: OnceCell<String>,
}

impl TwitterSource {
    pub fn new(credentials: Credentials, config: &SourceConfig) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| RetrievalError::HttpError(e.to_string()))?;

        Ok(Self::with_client(client, credentials, config))
    }

    pub fn with_client(client: Client, credentials: Credentials, config: &SourceConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            credentials,
            page_size: config.page_size,
            parser: SearchResponseParser::new(),
            token: OnceCell::new(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/1.1/search/tweets.json", self.api_base)
    }

    fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.api_base)
    }

    fn search_params(req: &SearchRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", req.query.clone()),
            ("count", req.count.to_string()),
            ("lang", req.language.clone()),
            ("result_type", "recent".to_string()),
            ("tweet_mode", "extended".to_string()),
        ];
        if let Some(max_id) = req.max_id {
            params.push(("max_id", max_id.to_string()));
        }
        params
    }

    /// Returns the bearer token, exchanging the consumer pair on first use.
    async fn bearer_token(&self) -> Result<&str, RetrievalError> {
        let token = self
            .token
            .get_or_try_init(|| async {
                match &self.credentials {
                    Credentials::Bearer(token) => Ok(token.clone()),
                    Credentials::Consumer { key, secret } => self.exchange_token(key, secret).await,
                }
            })
            .await?;
        Ok(token.as_str())
    }

    async fn exchange_token(&self, key: &str, secret: &str) -> Result<String, RetrievalError> {
        info!("Requesting app-only bearer token...");
        let response = self
            .client
            .post(self.token_url())
            .basic_auth(key, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| RetrievalError::HttpError(e.to_string()))?;

        let token: TokenResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| RetrievalError::ParseError(e.to_string()))?;
        Ok(token.access_token)
    }

    /// Fetches one raw page of search results.
    pub async fn fetch(&self, req: &SearchRequest) -> Result<String, RetrievalError> {
        let token = self.bearer_token().await?;
        debug!("GET {} q={:?} count={} max_id={:?}", self.search_url(), req.query, req.count, req.max_id);

        let response = self
            .client
            .get(self.search_url())
            .bearer_auth(token)
            .query(&Self::search_params(req))
            .send()
            .await
            .map_err(|e| RetrievalError::HttpError(e.to_string()))?;

        check_status(response)
            .await?
            .text()
            .await
            .map_err(|e| RetrievalError::HttpError(e.to_string()))
    }
}

/// Maps non-success statuses onto retrieval errors.
async fn check_status(response: Response) -> Result<Response, RetrievalError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = status.as_u16();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    warn!("❌ Post source responded [{}]: {}", status, body);
    match code {
        401 | 403 => Err(RetrievalError::Unauthorized(code)),
        429 => Err(RetrievalError::RateLimited),
        _ => Err(RetrievalError::InvalidResponse { status: code, body }),
    }
}

#[async_trait::async_trait]
impl PostSource for TwitterSource {
    async fn search(&self, query: &str, count: usize, language: &str) -> Result<Vec<Post>, RetrievalError> {
        let mut posts = Vec::new();
        let mut max_id: Option<u64> = None;

        while posts.len() < count {
            let request = SearchRequest {
                query: query.to_string(),
                count: (count - posts.len()).min(self.page_size),
                language: language.to_string(),
                max_id,
            };
            let body = self.fetch(&request).await?;
            let page = self.parser.parse(&body)?;
            info!("Fetched page with {} posts", page.posts.len());
            posts.extend(page.posts);

            // Statuses without text still move the cursor; only an empty page has none.
            match page.next_max_id {
                Some(next) if max_id.is_none_or(|prev| next < prev) => max_id = Some(next),
                _ => break,
            }
        }

        posts.truncate(count);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(credentials: Credentials) -> TwitterSource {
        let config = SourceConfig {
            api_base: "https://api.example.test/".into(),
            ..SourceConfig::default()
        };
        TwitterSource::new(credentials, &config).unwrap()
    }

    #[test]
    fn urls_drop_trailing_slash_of_api_base() {
        let src = source(Credentials::Bearer("t".into()));
        assert_eq!(src.search_url(), "https://api.example.test/1.1/search/tweets.json");
        assert_eq!(src.token_url(), "https://api.example.test/oauth2/token");
    }

    #[test]
    fn search_params_carry_language_and_cursor() {
        let mut req = SearchRequest {
            query: "rust lang".into(),
            count: 25,
            language: "en".into(),
            max_id: None,
        };
        let params = TwitterSource::search_params(&req);
        assert!(params.contains(&("q", "rust lang".to_string())));
        assert!(params.contains(&("count", "25".to_string())));
        assert!(params.contains(&("lang", "en".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "max_id"));

        req.max_id = Some(41);
        let params = TwitterSource::search_params(&req);
        assert!(params.contains(&("max_id", "41".to_string())));
    }

    #[tokio::test]
    async fn bearer_credentials_are_used_as_is() {
        let src = source(Credentials::Bearer("ready".into()));
        assert_eq!(src.bearer_token().await.unwrap(), "ready");
    }
}
