use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Title the API substitutes for articles that were taken down.
pub const REMOVED_TITLE: &str = "[Removed]";

/// Article entry as it arrives on the wire. Every field may be missing, null
/// or of the wrong type; anything that is not a string reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: Option<RawSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSource {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.as_str().map(ToOwned::to_owned)))
}

fn lenient_source<'de, D>(deserializer: D) -> Result<Option<RawSource>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// An article that passed validation and is safe to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: String,
    pub published_at: Option<String>,
    pub source_name: Option<String>,
}

impl Article {
    /// Keeps only entries with a real title, a description, an image and a link.
    pub fn from_raw(raw: RawArticle) -> Option<Self> {
        let title = non_empty(raw.title).filter(|title| title != REMOVED_TITLE)?;
        let description = non_empty(raw.description)?;
        let url_to_image = non_empty(raw.url_to_image)?;
        let url = non_empty(raw.url)?;
        Some(Self {
            title,
            description,
            url,
            url_to_image,
            published_at: non_empty(raw.published_at),
            source_name: raw.source.and_then(|source| non_empty(source.name)),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// A response body that carries the `ok` marker and an article array.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsPayload {
    pub total_results: u64,
    pub entries: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("api reported status {status:?}: {message}")]
    StatusNotOk { status: Option<String>, message: String },
    #[error("response has no article array")]
    MissingArticles,
}

/// Checks the response shape `{ status: "ok", totalResults, articles: [...] }`.
pub fn parse_payload(value: Value) -> Result<NewsPayload, PayloadError> {
    let Value::Object(mut body) = value else {
        return Err(PayloadError::NotAnObject);
    };

    let status = body.get("status").and_then(Value::as_str);
    if status != Some("ok") {
        return Err(PayloadError::StatusNotOk {
            status: status.map(ToOwned::to_owned),
            message: body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        });
    }

    let total_results = body
        .get("totalResults")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    match body.remove("articles") {
        Some(Value::Array(entries)) => Ok(NewsPayload {
            total_results,
            entries,
        }),
        _ => Err(PayloadError::MissingArticles),
    }
}

/// Decodes and validates raw entries, dropping anything that is not displayable.
pub fn filter_articles(entries: Vec<Value>) -> Vec<Article> {
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawArticle>(entry).ok())
        .filter_map(Article::from_raw)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> Value {
        json!({
            "title": "Chips get faster",
            "description": "A new node ships.",
            "url": "https://news.example.com/chips",
            "urlToImage": "https://news.example.com/chips.png",
            "publishedAt": "2024-01-05T08:04:00Z",
            "source": { "id": null, "name": "Example Wire" }
        })
    }

    #[test]
    fn complete_entry_is_kept() {
        let articles = filter_articles(vec![complete()]);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source_name.as_deref(), Some("Example Wire"));
        assert_eq!(
            articles[0].url_to_image,
            "https://news.example.com/chips.png"
        );
    }

    #[test]
    fn entries_missing_required_fields_are_dropped() {
        for field in ["title", "description", "url", "urlToImage"] {
            let mut entry = complete();
            entry[field] = Value::Null;
            assert!(filter_articles(vec![entry]).is_empty(), "null {field}");

            let mut entry = complete();
            entry.as_object_mut().unwrap().remove(field);
            assert!(filter_articles(vec![entry]).is_empty(), "missing {field}");

            let mut entry = complete();
            entry[field] = json!("");
            assert!(filter_articles(vec![entry]).is_empty(), "empty {field}");
        }
    }

    #[test]
    fn removed_sentinel_and_non_objects_are_dropped() {
        let mut removed = complete();
        removed["title"] = json!(REMOVED_TITLE);
        let articles = filter_articles(vec![removed, Value::Null, json!(42), complete()]);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Chips get faster");
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut entry = complete();
        let body = entry.as_object_mut().unwrap();
        body.remove("source");
        body.remove("publishedAt");
        let articles = filter_articles(vec![entry]);
        assert_eq!(articles[0].source_name, None);
        assert_eq!(articles[0].published_at, None);
    }

    #[test]
    fn wrongly_typed_optional_fields_read_as_missing() {
        let mut string_source = complete();
        string_source["source"] = json!("Reuters");
        let mut numeric_name = complete();
        numeric_name["source"] = json!({ "id": null, "name": 7 });
        let mut numeric_date = complete();
        numeric_date["publishedAt"] = json!(1704441840);

        let articles = filter_articles(vec![string_source, numeric_name, numeric_date]);

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].source_name, None);
        assert_eq!(articles[1].source_name, None);
        assert_eq!(articles[2].published_at, None);
        assert_eq!(articles[2].source_name.as_deref(), Some("Example Wire"));
    }

    #[test]
    fn wrongly_typed_required_field_drops_entry() {
        let mut entry = complete();
        entry["title"] = json!(12);
        assert!(filter_articles(vec![entry]).is_empty());
    }

    #[test]
    fn payload_requires_ok_status_and_article_array() {
        let ok = parse_payload(json!({"status": "ok", "totalResults": 57, "articles": []}))
            .expect("valid payload");
        assert_eq!(ok.total_results, 57);
        assert!(ok.entries.is_empty());

        assert_eq!(
            parse_payload(json!({"status": "error", "code": "apiKeyInvalid", "message": "bad key"})),
            Err(PayloadError::StatusNotOk {
                status: Some("error".to_string()),
                message: "bad key".to_string(),
            })
        );
        assert_eq!(
            parse_payload(json!({"status": "ok", "articles": {"0": 1}})),
            Err(PayloadError::MissingArticles)
        );
        assert_eq!(parse_payload(json!([1, 2])), Err(PayloadError::NotAnObject));
    }

    #[test]
    fn missing_total_results_reads_as_zero() {
        let payload = parse_payload(json!({"status": "ok", "articles": [complete()]}))
            .expect("valid payload");
        assert_eq!(payload.total_results, 0);
        assert_eq!(payload.entries.len(), 1);
    }
}
