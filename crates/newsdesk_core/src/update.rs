use serde_json::Value;

use crate::article::{filter_articles, parse_payload};
use crate::effect::{EMPTY_SEARCH_MESSAGE, FAILED_TO_LOAD_MESSAGE};
use crate::sanitize::sanitize_optional;
use crate::{AppState, Effect, EmptyReason, EmptyResult, Msg, PageRequest, QueryMode};

/// Pure update function: applies a message to state and returns any effects.
///
/// While a request is in flight every request-starting message is dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchRequested {
            term,
            country,
            page,
        } => request_search(&mut state, term.as_deref(), country.as_deref(), page),
        Msg::SearchSubmitted(text) => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            let term = text.trim();
            let min_len = state.settings().min_query_len;
            if term.is_empty() {
                vec![Effect::Error(EMPTY_SEARCH_MESSAGE.to_string())]
            } else if term.chars().count() < min_len {
                vec![Effect::Error(format!(
                    "Search term must be at least {min_len} characters long."
                ))]
            } else {
                state.set_active_nav(None);
                request_search(&mut state, Some(term), None, 1)
            }
        }
        Msg::CategorySelected(category) => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            let category = category.trim().to_string();
            state.set_active_nav(Some(category.clone()).filter(|c| !c.is_empty()));
            request_search(&mut state, Some(&category), None, 1)
        }
        Msg::CountrySelected(code) => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            state.set_active_nav(None);
            request_search(&mut state, None, Some(&code), 1)
        }
        Msg::NextPage => {
            let page = state.query_state().page().saturating_add(1);
            navigate(&mut state, page)
        }
        Msg::PrevPage => {
            let page = state.query_state().page().saturating_sub(1);
            navigate(&mut state, page)
        }
        Msg::GoToPage(page) => navigate(&mut state, page),
        Msg::Reload => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            state.set_active_nav(None);
            let default_query = state.settings().default_query.clone();
            request_search(&mut state, Some(&default_query), None, 1)
        }
        Msg::FetchCompleted { request, result } => {
            if !state.finish_request(&request) {
                return (state, Vec::new());
            }
            let mut effects = complete_fetch(&mut state, &request, result);
            effects.push(Effect::LoadingChanged(false));
            effects
        }
        Msg::FetchAbandoned { request } => {
            if state.finish_request(&request) {
                vec![Effect::LoadingChanged(false)]
            } else {
                Vec::new()
            }
        }
        Msg::ArticleOpened(index) => match state.open(index) {
            Some(article) => vec![Effect::ShowArticle(article)],
            None => Vec::new(),
        },
        Msg::ArticleClosed => {
            if state.close() {
                vec![Effect::HideArticle]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn request_search(
    state: &mut AppState,
    term: Option<&str>,
    country: Option<&str>,
    page: u32,
) -> Vec<Effect> {
    let mode = match sanitize_optional(country) {
        Some(country) => QueryMode::Headlines {
            country: country.to_lowercase(),
        },
        None => QueryMode::Search {
            query: sanitize_optional(term)
                .unwrap_or_else(|| state.settings().default_query.clone()),
        },
    };
    let max_pages = state.settings().max_pages;
    start_request(state, mode, page, max_pages)
}

/// Re-runs the displayed query at another page within the known page count.
fn navigate(state: &mut AppState, page: u32) -> Vec<Effect> {
    let last_page = state.pagination().total_pages;
    let mode = state.query_state().mode();
    start_request(state, mode, page, last_page)
}

fn start_request(state: &mut AppState, mode: QueryMode, page: u32, last_page: u32) -> Vec<Effect> {
    if state.is_loading() || page < 1 || page > last_page {
        return Vec::new();
    }
    let request = PageRequest {
        mode,
        page,
        page_size: state.settings().page_size,
    };
    state.begin_request(request.clone());
    vec![Effect::LoadingChanged(true), Effect::Fetch(request)]
}

fn complete_fetch(
    state: &mut AppState,
    request: &PageRequest,
    result: Result<Value, String>,
) -> Vec<Effect> {
    let failed = || vec![Effect::Error(FAILED_TO_LOAD_MESSAGE.to_string())];
    let Ok(value) = result else {
        return failed();
    };
    let Ok(payload) = parse_payload(value) else {
        return failed();
    };

    let first_page = request.page == 1;
    if payload.entries.is_empty() {
        return vec![Effect::EmptyResult(EmptyResult {
            first_page,
            reason: EmptyReason::NoArticles,
        })];
    }

    let received = payload.entries.len() as u64;
    let articles = filter_articles(payload.entries);
    if articles.is_empty() {
        return vec![Effect::EmptyResult(EmptyResult {
            first_page,
            reason: EmptyReason::AllFiltered,
        })];
    }

    let total_results = if payload.total_results > 0 {
        payload.total_results
    } else {
        received
    };
    let closed_detail = state.apply_results(request, total_results, articles.clone());
    let mut effects = Vec::with_capacity(2);
    if closed_detail {
        effects.push(Effect::HideArticle);
    }
    effects.push(Effect::ArticlesReady {
        articles,
        pagination: state.pagination(),
    });
    effects
}
