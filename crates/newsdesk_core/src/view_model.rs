use chrono::{DateTime, FixedOffset};

use crate::{Article, Pagination};

pub const UNKNOWN_DATE: &str = "Unknown date";
pub const UNKNOWN_SOURCE: &str = "Unknown source";
pub const WORLD_IMAGE: &str = "world.png";

/// Publication times are shown in UTC+7 (Asia/Jakarta, no DST).
const DISPLAY_OFFSET_SECS: i32 = 7 * 3600;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub query: Option<String>,
    pub country: Option<String>,
    pub total_results: u64,
    pub pagination: Pagination,
    pub is_loading: bool,
    pub heading: Heading,
    pub active_nav: Option<String>,
    pub cards: Vec<ArticleCard>,
    pub open_article: Option<ArticleCard>,
    pub dirty: bool,
}

/// Label and image shown above the result list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Heading {
    pub label: String,
    pub image: String,
}

impl Heading {
    pub fn for_query(query: Option<&str>, country: Option<&str>) -> Self {
        match country {
            Some(code) => Self {
                label: country_display_name(code),
                image: flag_url(code),
            },
            None => Self {
                label: query
                    .filter(|query| !query.is_empty())
                    .unwrap_or("World")
                    .to_string(),
                image: WORLD_IMAGE.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub url: String,
    /// `"{source} • {date}"`
    pub byline: String,
}

impl ArticleCard {
    pub fn new(index: usize, article: &Article) -> Self {
        let source = article.source_name.as_deref().unwrap_or(UNKNOWN_SOURCE);
        Self {
            index,
            title: article.title.clone(),
            description: article.description.clone(),
            image_url: article.url_to_image.clone(),
            url: article.url.clone(),
            byline: format!(
                "{source} • {}",
                format_published(article.published_at.as_deref())
            ),
        }
    }
}

pub fn country_display_name(code: &str) -> String {
    match code.to_ascii_lowercase().as_str() {
        "in" => "India".to_string(),
        "us" => "USA".to_string(),
        "fr" => "France".to_string(),
        "ru" => "Russia".to_string(),
        _ => code.to_ascii_uppercase(),
    }
}

/// The flag service names its assets by upper-case code; state keeps lower case.
pub fn flag_url(code: &str) -> String {
    format!(
        "https://flagsapi.com/{}/flat/32.png",
        code.to_ascii_uppercase()
    )
}

/// Formats an RFC 3339 timestamp as e.g. `Jan 5, 2024, 03:04 PM`.
pub fn format_published(raw: Option<&str>) -> String {
    raw.and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .zip(FixedOffset::east_opt(DISPLAY_OFFSET_SECS))
        .map(|(published, offset)| {
            published
                .with_timezone(&offset)
                .format("%b %-d, %Y, %I:%M %p")
                .to_string()
        })
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}
