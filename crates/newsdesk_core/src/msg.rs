use serde_json::Value;

use crate::PageRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Direct search: headlines when `country` is set, free text otherwise.
    SearchRequested {
        term: Option<String>,
        country: Option<String>,
        page: u32,
    },
    /// User submitted the search box.
    SearchSubmitted(String),
    /// User clicked a category in the nav bar.
    CategorySelected(String),
    /// User picked a country from the country selector.
    CountrySelected(String),
    NextPage,
    PrevPage,
    GoToPage(u32),
    /// Back to the default query, nav cleared.
    Reload,
    /// The fetch for `request` resolved. Errors arrive as their message text.
    FetchCompleted {
        request: PageRequest,
        result: Result<Value, String>,
    },
    /// The caller stopped waiting for `request` before it resolved.
    FetchAbandoned { request: PageRequest },
    /// User asked for the detail view of a displayed article.
    ArticleOpened(usize),
    ArticleClosed,
    /// Fallback for placeholder wiring.
    NoOp,
}
