//! Newsdesk core: pure view-state machine, payload validation and view-model helpers.
mod article;
mod effect;
mod msg;
mod pagination;
mod request;
mod sanitize;
mod share;
mod state;
mod update;
mod view_model;

pub use article::{
    filter_articles, parse_payload, Article, NewsPayload, PayloadError, RawArticle, RawSource,
    REMOVED_TITLE,
};
pub use effect::{
    Effect, EmptyReason, EmptyResult, EMPTY_SEARCH_MESSAGE, FAILED_TO_LOAD_MESSAGE,
};
pub use msg::Msg;
pub use pagination::{total_pages, Pagination};
pub use request::{ApiConfig, PageRequest, QueryMode};
pub use sanitize::{escape_html, sanitize_input};
pub use share::{share_links, ShareLinks};
pub use state::{AppState, QueryState, ReaderSettings, DEFAULT_QUERY};
pub use update::update;
pub use view_model::{
    country_display_name, flag_url, format_published, AppViewModel, ArticleCard, Heading,
    UNKNOWN_DATE, UNKNOWN_SOURCE, WORLD_IMAGE,
};
