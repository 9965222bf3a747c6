use crate::{Article, PageRequest, Pagination};

pub const FAILED_TO_LOAD_MESSAGE: &str =
    "Failed to load news. Please check your internet connection and try again.";
pub const EMPTY_SEARCH_MESSAGE: &str = "Please enter a search term.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadingChanged(bool),
    Fetch(PageRequest),
    ArticlesReady {
        articles: Vec<Article>,
        pagination: Pagination,
    },
    EmptyResult(EmptyResult),
    Error(String),
    ShowArticle(Article),
    HideArticle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The API returned no entries at all.
    NoArticles,
    /// Entries came back but none survived validation.
    AllFiltered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyResult {
    pub first_page: bool,
    pub reason: EmptyReason,
}

impl EmptyResult {
    pub fn is_first_page(&self) -> bool {
        self.first_page
    }

    pub fn message(&self) -> &'static str {
        match (self.reason, self.first_page) {
            (EmptyReason::NoArticles, true) => "No articles found for your search.",
            (EmptyReason::NoArticles, false) => "No more articles available.",
            (EmptyReason::AllFiltered, _) => "No valid articles found.",
        }
    }
}
