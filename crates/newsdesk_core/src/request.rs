use serde::{Deserialize, Serialize};
use url::Url;

/// Endpoints and credentials for the news search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_key: String,
    pub search_endpoint: String,
    pub headlines_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_endpoint: "https://newsapi.org/v2/everything".to_string(),
            headlines_endpoint: "https://newsapi.org/v2/top-headlines".to_string(),
        }
    }
}

/// Free-text search and country headlines are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    Search { query: String },
    Headlines { country: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub mode: QueryMode,
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Builds the outbound GET URL. Values are percent-encoded by `url`.
    pub fn url(&self, api: &ApiConfig) -> Result<Url, url::ParseError> {
        let page_size = self.page_size.to_string();
        let page = self.page.to_string();
        match &self.mode {
            QueryMode::Search { query } => Url::parse_with_params(
                &api.search_endpoint,
                &[
                    ("q", query.as_str()),
                    ("pageSize", page_size.as_str()),
                    ("page", page.as_str()),
                    ("sortBy", "publishedAt"),
                    ("apiKey", api.api_key.as_str()),
                ],
            ),
            QueryMode::Headlines { country } => Url::parse_with_params(
                &api.headlines_endpoint,
                &[
                    ("country", country.as_str()),
                    ("pageSize", page_size.as_str()),
                    ("page", page.as_str()),
                    ("apiKey", api.api_key.as_str()),
                ],
            ),
        }
    }
}
