use serde::{Deserialize, Serialize};

use crate::pagination::{total_pages, Pagination};
use crate::request::{PageRequest, QueryMode};
use crate::view_model::{AppViewModel, ArticleCard};
use crate::Article;

pub const DEFAULT_QUERY: &str = "technology";

/// Fixed reader constants supplied at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    pub page_size: u32,
    pub max_pages: u32,
    pub default_query: String,
    /// Minimum length, in characters, of a search-box query.
    pub min_query_len: usize,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            max_pages: 5,
            default_query: DEFAULT_QUERY.to_string(),
            min_query_len: 2,
        }
    }
}

/// What is currently displayed. Only a completed, non-empty fetch changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    query: Option<String>,
    country: Option<String>,
    page: u32,
    total_results: u64,
}

impl QueryState {
    pub fn new(default_query: &str) -> Self {
        Self {
            query: Some(default_query.to_string()),
            country: None,
            page: 1,
            total_results: 0,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// The mode a page navigation should re-run.
    pub fn mode(&self) -> QueryMode {
        match (&self.country, &self.query) {
            (Some(country), _) => QueryMode::Headlines {
                country: country.clone(),
            },
            (None, query) => QueryMode::Search {
                query: query.clone().unwrap_or_default(),
            },
        }
    }

    fn apply(&mut self, request: &PageRequest, total_results: u64) {
        match &request.mode {
            QueryMode::Search { query } => {
                self.query = Some(query.clone());
                self.country = None;
            }
            QueryMode::Headlines { country } => {
                self.country = Some(country.clone());
                self.query = None;
            }
        }
        self.page = request.page;
        self.total_results = total_results;
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: ReaderSettings,
    query: QueryState,
    in_flight: Option<PageRequest>,
    articles: Vec<Article>,
    active_nav: Option<String>,
    open_article: Option<usize>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ReaderSettings) -> Self {
        let query = QueryState::new(&settings.default_query);
        Self {
            settings,
            query,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    pub fn query_state(&self) -> &QueryState {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn active_nav(&self) -> Option<&str> {
        self.active_nav.as_deref()
    }

    pub fn open_article(&self) -> Option<&Article> {
        self.open_article.and_then(|index| self.articles.get(index))
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.query.page,
            total_pages: total_pages(
                self.query.total_results,
                self.settings.page_size,
                self.settings.max_pages,
            ),
        }
    }

    pub fn view(&self) -> AppViewModel {
        let cards: Vec<ArticleCard> = self
            .articles
            .iter()
            .enumerate()
            .map(|(index, article)| ArticleCard::new(index, article))
            .collect();
        let open_article = self.open_article.and_then(|index| cards.get(index).cloned());
        AppViewModel {
            query: self.query.query.clone(),
            country: self.query.country.clone(),
            total_results: self.query.total_results,
            pagination: self.pagination(),
            is_loading: self.is_loading(),
            heading: crate::view_model::Heading::for_query(
                self.query.query(),
                self.query.country(),
            ),
            active_nav: self.active_nav.clone(),
            cards,
            open_article,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_request(&mut self, request: PageRequest) {
        self.in_flight = Some(request);
        self.dirty = true;
    }

    /// Clears the in-flight marker if `request` is the one outstanding.
    pub(crate) fn finish_request(&mut self, request: &PageRequest) -> bool {
        if self.in_flight.as_ref() != Some(request) {
            return false;
        }
        self.in_flight = None;
        self.dirty = true;
        true
    }

    /// Stores a displayable page. Returns whether a detail view was closed by it.
    pub(crate) fn apply_results(
        &mut self,
        request: &PageRequest,
        total_results: u64,
        articles: Vec<Article>,
    ) -> bool {
        self.query.apply(request, total_results);
        self.articles = articles;
        self.dirty = true;
        self.open_article.take().is_some()
    }

    pub(crate) fn set_active_nav(&mut self, nav: Option<String>) {
        if self.active_nav != nav {
            self.active_nav = nav;
            self.dirty = true;
        }
    }

    pub(crate) fn open(&mut self, index: usize) -> Option<Article> {
        let article = self.articles.get(index).cloned()?;
        self.open_article = Some(index);
        self.dirty = true;
        Some(article)
    }

    pub(crate) fn close(&mut self) -> bool {
        let was_open = self.open_article.take().is_some();
        if was_open {
            self.dirty = true;
        }
        was_open
    }
}
