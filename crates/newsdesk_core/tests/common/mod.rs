#![allow(dead_code)]

use std::sync::Once;

use newsdesk_core::{update, AppState, Effect, Msg, PageRequest};
use serde_json::{json, Value};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(newsdesk_logging::initialize_for_tests);
}

pub fn article(n: usize) -> Value {
    json!({
        "title": format!("Story {n}"),
        "description": format!("Summary {n}"),
        "url": format!("https://news.example.com/{n}"),
        "urlToImage": format!("https://news.example.com/{n}.png"),
        "publishedAt": "2024-01-05T08:04:00Z",
        "source": { "id": null, "name": "Example Wire" }
    })
}

pub fn ok_payload(total_results: u64, articles: Vec<Value>) -> Value {
    json!({ "status": "ok", "totalResults": total_results, "articles": articles })
}

pub fn fetch_request(effects: &[Effect]) -> PageRequest {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Fetch(request) => Some(request.clone()),
            _ => None,
        })
        .expect("fetch effect")
}

/// Sends `msg`, then resolves the fetch it started with `result`.
pub fn run_fetch(
    state: AppState,
    msg: Msg,
    result: Result<Value, String>,
) -> (AppState, Vec<Effect>) {
    let (state, effects) = update(state, msg);
    let request = fetch_request(&effects);
    update(state, Msg::FetchCompleted { request, result })
}

pub fn search(term: &str, page: u32) -> Msg {
    Msg::SearchRequested {
        term: Some(term.to_string()),
        country: None,
        page,
    }
}
