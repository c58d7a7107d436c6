// Search API response parsing
use crate::model::{Post, RetrievalError, SearchPage};
use serde::Deserialize;
use tracing::warn;

pub trait Parser {
    fn parse(&self, body: &str) -> Result<SearchPage, RetrievalError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    statuses: Vec<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    id: Option<u64>,
    full_text: Option<String>,
    text: Option<String>,
    user: Option<User>,
}

#[derive(Debug, Default, Deserialize)]
struct User {
    #[serde(default)]
    name: String,
    #[serde(default)]
    screen_name: String,
}

pub struct SearchResponseParser;

impl SearchResponseParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SearchResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for SearchResponseParser {
    fn parse(&self, body: &str) -> Result<SearchPage, RetrievalError> {
        let response: SearchResponse =
            serde_json::from_str(body).map_err(|e| RetrievalError::ParseError(e.to_string()))?;

        // Results come newest first, so the next page starts below the smallest id.
        let next_max_id = response
            .statuses
            .iter()
            .filter_map(|s| s.id)
            .min()
            .and_then(|id| id.checked_sub(1));

        let mut posts = Vec::with_capacity(response.statuses.len());
        for status in response.statuses {
            let Some(body) = status.full_text.or(status.text) else {
                warn!("Skipping status {:?} without text", status.id);
                continue;
            };
            let user = status.user.unwrap_or_default();
            posts.push(Post {
                author_name: user.name,
                author_handle: user.screen_name,
                body,
            });
        }

        Ok(SearchPage { posts, next_max_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "statuses": [
            {"id": 30, "full_text": "Full text wins #rust", "text": "Full te…",
             "user": {"name": "Ada Lovelace", "screen_name": "ada"}},
            {"id": 20, "text": "Only short text 😀",
             "user": {"name": "Grace", "screen_name": "grace_h"}},
            {"id": 10, "user": {"name": "No Body", "screen_name": "nobody"}}
        ],
        "search_metadata": {"count": 3}
    }"#;

    #[test]
    fn parses_posts_in_response_order() {
        let page = SearchResponseParser::new().parse(PAGE).unwrap();
        assert_eq!(
            page.posts,
            vec![
                Post {
                    author_name: "Ada Lovelace".into(),
                    author_handle: "ada".into(),
                    body: "Full text wins #rust".into(),
                },
                Post {
                    author_name: "Grace".into(),
                    author_handle: "grace_h".into(),
                    body: "Only short text 😀".into(),
                },
            ]
        );
    }

    #[test]
    fn cursor_points_below_smallest_id() {
        let page = SearchResponseParser::new().parse(PAGE).unwrap();
        assert_eq!(page.next_max_id, Some(9));
    }

    #[test]
    fn empty_page_has_no_cursor() {
        let page = SearchResponseParser::new().parse(r#"{"statuses": []}"#).unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.next_max_id, None);

        let page = SearchResponseParser::new().parse("{}").unwrap();
        assert!(page.posts.is_empty());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            SearchResponseParser::new().parse("<html>oops</html>"),
            Err(RetrievalError::ParseError(_))
        ));
    }
}
