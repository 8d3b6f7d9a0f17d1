// src/services/trivia.rs

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use url::Url;
use validator::Validate;

use crate::error::AppError;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

fn default_amount() -> u32 {
    10
}

/// Query accepted by `GET /quiz`, forwarded to the Open Trivia DB.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TriviaQuery {
    /// The upstream API serves at most 50 questions per call.
    #[serde(default = "default_amount")]
    #[validate(range(min = 1, max = 50))]
    pub amount: u32,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
}

impl Default for TriviaQuery {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            category: None,
            difficulty: None,
            question_type: None,
        }
    }
}

/// Thin client for the public trivia question API.
#[derive(Debug, Clone)]
pub struct TriviaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TriviaClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::InternalServerError(format!("invalid trivia API url: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Upstream URL for `query`. Blank optional filters are left out.
    pub fn build_url(&self, query: &TriviaQuery) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("amount", &query.amount.to_string());

            let filters = [
                ("category", &query.category),
                ("difficulty", &query.difficulty),
                ("type", &query.question_type),
            ];
            for (key, value) in filters {
                if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                    pairs.append_pair(key, value);
                }
            }
        }
        url
    }

    /// Fetches a question set and returns the upstream body untouched.
    pub async fn fetch(&self, query: &TriviaQuery) -> Result<Value, AppError> {
        let url = self.build_url(query);
        tracing::debug!("Fetching trivia questions from {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::error!("Trivia API request failed: {:?}", e);
                AppError::BadGateway("Failed to fetch questions.".to_string())
            })?;

        response.json::<Value>().await.map_err(|e| {
            tracing::error!("Trivia API returned an unreadable body: {:?}", e);
            AppError::BadGateway("Failed to fetch questions.".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TriviaClient {
        TriviaClient::new("https://opentdb.com/api.php").unwrap()
    }

    #[test]
    fn test_build_url_defaults() {
        let url = client().build_url(&TriviaQuery::default());
        assert_eq!(url.as_str(), "https://opentdb.com/api.php?amount=10");
    }

    #[test]
    fn test_build_url_all_filters() {
        let query = TriviaQuery {
            amount: 5,
            category: Some("9".to_string()),
            difficulty: Some("hard".to_string()),
            question_type: Some("multiple".to_string()),
        };

        let url = client().build_url(&query);
        assert_eq!(
            url.as_str(),
            "https://opentdb.com/api.php?amount=5&category=9&difficulty=hard&type=multiple"
        );
    }

    #[test]
    fn test_build_url_skips_blank_filters() {
        let query = TriviaQuery {
            category: Some(String::new()),
            difficulty: Some("easy".to_string()),
            ..TriviaQuery::default()
        };

        let url = client().build_url(&query);
        assert_eq!(
            url.as_str(),
            "https://opentdb.com/api.php?amount=10&difficulty=easy"
        );
    }

    #[test]
    fn test_amount_bounds() {
        let too_many = TriviaQuery {
            amount: 51,
            ..TriviaQuery::default()
        };
        assert!(too_many.validate().is_err());

        let none = TriviaQuery {
            amount: 0,
            ..TriviaQuery::default()
        };
        assert!(none.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(TriviaClient::new("not a url").is_err());
    }
}
