use url::form_urlencoded;

use crate::Article;

const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";
const LINKEDIN_SHARE: &str = "https://www.linkedin.com/sharing/share-offsite/";

/// Outbound share targets for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    /// The bare article link, for copying.
    pub copy: String,
}

pub fn share_links(article: &Article) -> ShareLinks {
    ShareLinks {
        twitter: with_query(
            TWITTER_INTENT,
            &[("text", article.title.as_str()), ("url", article.url.as_str())],
        ),
        facebook: with_query(FACEBOOK_SHARER, &[("u", article.url.as_str())]),
        linkedin: with_query(LINKEDIN_SHARE, &[("url", article.url.as_str())]),
        copy: article.url.clone(),
    }
}

fn with_query(base: &str, pairs: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{base}?{query}")
}
