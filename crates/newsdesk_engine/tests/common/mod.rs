#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use newsdesk_core::{AppViewModel, Article, EmptyResult, Pagination};
use newsdesk_engine::Renderer;
use serde_json::{json, Value};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(newsdesk_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Loading(bool),
    Articles {
        titles: Vec<String>,
        pagination: Pagination,
    },
    Empty(EmptyResult),
    Error(String),
    Opened(String),
    Closed,
}

#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
    views: Mutex<Vec<AppViewModel>>,
}

impl RecordingRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_view(&self) -> Option<AppViewModel> {
        self.views.lock().unwrap().last().cloned()
    }

    fn push(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Renderer for RecordingRenderer {
    fn on_loading_state_changed(&self, is_loading: bool) {
        self.push(RenderEvent::Loading(is_loading));
    }

    fn on_articles_ready(&self, articles: &[Article], pagination: Pagination) {
        self.push(RenderEvent::Articles {
            titles: articles.iter().map(|a| a.title.clone()).collect(),
            pagination,
        });
    }

    fn on_empty_result(&self, empty: EmptyResult) {
        self.push(RenderEvent::Empty(empty));
    }

    fn on_error(&self, message: &str) {
        self.push(RenderEvent::Error(message.to_string()));
    }

    fn on_article_opened(&self, article: &Article) {
        self.push(RenderEvent::Opened(article.title.clone()));
    }

    fn on_article_closed(&self) {
        self.push(RenderEvent::Closed);
    }

    fn on_view_changed(&self, view: &AppViewModel) {
        self.views.lock().unwrap().push(view.clone());
    }
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
