use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use url::Url;

const WIKIPEDIA_SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

#[derive(Debug, Deserialize)]
pub struct WikiSummary {
    pub title: String,
    pub extract: String,
    pub content_urls: WikiContentUrls,
}

#[derive(Debug, Deserialize)]
pub struct WikiContentUrls {
    pub desktop: WikiPageUrl,
}

#[derive(Debug, Deserialize)]
pub struct WikiPageUrl {
    pub page: String,
}

impl WikiSummary {
    /// Passage text stored in the knowledge base: title plus the summary
    /// extract, prefixed so retrieval matches on the city name.
    pub fn passage_content(&self) -> String {
        format!("City: {}. {}", self.title, self.extract)
    }
}

#[derive(Debug)]
pub enum WikiError {
    InvalidCity(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::InvalidCity(msg) => write!(f, "Invalid city: {}", msg),
            WikiError::HttpError(err) => write!(f, "HTTP error: {}", err),
            WikiError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for WikiError {}

impl From<reqwest::Error> for WikiError {
    fn from(err: reqwest::Error) -> Self {
        WikiError::HttpError(err)
    }
}

/// Client for the Wikipedia REST summary endpoint, used to seed the
/// knowledge base with one passage per city.
pub struct WikiService {
    client: Client,
}

impl WikiService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn fetch_summary(&self, city: &str) -> Result<WikiSummary, WikiError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WikiError::InvalidCity("City is required".to_string()));
        }

        let url = summary_url(city)?;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::ResponseError(format!(
                "Wiki API Error: {}",
                status
            )));
        }

        let summary: WikiSummary = response
            .json()
            .await
            .map_err(|e| WikiError::ResponseError(format!("Failed to parse response: {}", e)))?;

        Ok(summary)
    }
}

impl Default for WikiService {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the summary URL with the city as a percent-encoded path segment.
fn summary_url(city: &str) -> Result<Url, WikiError> {
    let mut url = Url::parse(WIKIPEDIA_SUMMARY_URL)
        .map_err(|e| WikiError::ResponseError(format!("Bad base URL: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| WikiError::ResponseError("Base URL cannot carry segments".to_string()))?
        .push(city);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_url_encodes_spaces() {
        let url = summary_url("New York City").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/New%20York%20City"
        );
    }

    #[test]
    fn test_blank_city_is_rejected_before_any_request() {
        let wiki = WikiService::new();
        let result = tokio_test::block_on(wiki.fetch_summary("   "));
        assert!(matches!(result, Err(WikiError::InvalidCity(_))));
    }

    #[test]
    fn test_passage_content_prefixes_city() {
        let summary = WikiSummary {
            title: "Tokyo".to_string(),
            extract: "Tokyo is the capital of Japan.".to_string(),
            content_urls: WikiContentUrls {
                desktop: WikiPageUrl {
                    page: "https://en.wikipedia.org/wiki/Tokyo".to_string(),
                },
            },
        };

        assert_eq!(
            summary.passage_content(),
            "City: Tokyo. Tokyo is the capital of Japan."
        );
    }
}
