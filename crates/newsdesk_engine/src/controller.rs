use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use newsdesk_core::{
    update, ApiConfig, AppState, AppViewModel, Article, Effect, EmptyResult, Msg, PageRequest,
    Pagination, ReaderSettings,
};
use newsdesk_logging::{news_debug, news_error, news_info, news_warn};
use serde_json::Value;

use crate::fetch::{FetchSettings, JsonFetcher, ReqwestFetcher};
use crate::retry::{fetch_with_retry, RetryPolicy};
use crate::FetchError;

/// Receives everything the user should see. Implementations must not block.
pub trait Renderer: Send + Sync {
    fn on_loading_state_changed(&self, is_loading: bool);
    fn on_articles_ready(&self, articles: &[Article], pagination: Pagination);
    fn on_empty_result(&self, empty: EmptyResult);
    fn on_error(&self, message: &str);

    fn on_article_opened(&self, _article: &Article) {}
    fn on_article_closed(&self) {}
    /// Called after any message that changed state, with a fresh snapshot.
    fn on_view_changed(&self, _view: &AppViewModel) {}
}

/// Owns the one [`AppState`] and runs the effects `update` asks for.
///
/// Entry points take `&self`; the single-flight guard in the reducer is what
/// keeps overlapping calls from issuing a second request.
pub struct ViewStateController {
    state: Mutex<AppState>,
    api: ApiConfig,
    retry: RetryPolicy,
    fetcher: Arc<dyn JsonFetcher>,
    renderer: Arc<dyn Renderer>,
}

impl ViewStateController {
    pub fn new(
        settings: ReaderSettings,
        api: ApiConfig,
        retry: RetryPolicy,
        fetcher: Arc<dyn JsonFetcher>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            state: Mutex::new(AppState::with_settings(settings)),
            api,
            retry,
            fetcher,
            renderer,
        }
    }

    /// Controller backed by [`ReqwestFetcher`].
    pub fn with_reqwest(
        settings: ReaderSettings,
        api: ApiConfig,
        retry: RetryPolicy,
        fetch: FetchSettings,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self, FetchError> {
        let fetcher = Arc::new(ReqwestFetcher::new(fetch)?);
        Ok(Self::new(settings, api, retry, fetcher, renderer))
    }

    pub fn view(&self) -> AppViewModel {
        self.lock_state().view()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading()
    }

    /// Shows `page` of the headlines for `country`, or of the search for `term`.
    ///
    /// A no-op while another request is in flight.
    pub async fn search(&self, term: Option<&str>, country: Option<&str>, page: u32) {
        self.dispatch(Msg::SearchRequested {
            term: term.map(ToOwned::to_owned),
            country: country.map(ToOwned::to_owned),
            page,
        })
        .await;
    }

    /// Feeds one UI message through the reducer and runs every resulting effect,
    /// including the fetch and its completion.
    pub async fn dispatch(&self, msg: Msg) {
        let mut pending: VecDeque<Effect> = self.apply(msg).into();
        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::Fetch(request) => {
                    let guard = InFlightGuard::new(self, request.clone());
                    let result = self.fetch(&request).await;
                    guard.disarm();
                    pending.extend(self.apply(Msg::FetchCompleted { request, result }));
                }
                other => self.render(other),
            }
        }
    }

    async fn fetch(&self, request: &PageRequest) -> Result<Value, String> {
        let url = request.url(&self.api).map_err(|err| {
            news_error!("cannot build request url: {}", err);
            err.to_string()
        })?;
        news_info!("fetching page {} for {:?}", request.page, request.mode);
        fetch_with_retry(self.fetcher.as_ref(), url.as_str(), &self.retry)
            .await
            .map_err(|err| {
                news_error!("giving up on page {}: {}", request.page, err);
                err.to_string()
            })
    }

    fn apply(&self, msg: Msg) -> Vec<Effect> {
        let (effects, changed_view) = {
            let mut guard = self.lock_state();
            let state = std::mem::take(&mut *guard);
            let (mut state, effects) = update(state, msg);
            let changed_view = state.consume_dirty().then(|| state.view());
            *guard = state;
            (effects, changed_view)
        };

        if let Some(view) = changed_view {
            self.renderer.on_view_changed(&view);
        }
        effects
    }

    fn render(&self, effect: Effect) {
        match effect {
            Effect::LoadingChanged(is_loading) => {
                self.renderer.on_loading_state_changed(is_loading);
            }
            Effect::ArticlesReady {
                articles,
                pagination,
            } => {
                news_info!(
                    "showing {} articles, page {}/{}",
                    articles.len(),
                    pagination.page,
                    pagination.total_pages
                );
                self.renderer.on_articles_ready(&articles, pagination);
            }
            Effect::EmptyResult(empty) => {
                news_info!("empty result: {}", empty.message());
                self.renderer.on_empty_result(empty);
            }
            Effect::Error(message) => self.renderer.on_error(&message),
            Effect::ShowArticle(article) => self.renderer.on_article_opened(&article),
            Effect::HideArticle => self.renderer.on_article_closed(),
            Effect::Fetch(request) => {
                news_warn!("fetch effect outside dispatch dropped: {:?}", request.mode);
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the controller to idle if the future driving a fetch is dropped.
struct InFlightGuard<'a> {
    controller: &'a ViewStateController,
    request: Option<PageRequest>,
}

impl<'a> InFlightGuard<'a> {
    fn new(controller: &'a ViewStateController, request: PageRequest) -> Self {
        Self {
            controller,
            request: Some(request),
        }
    }

    fn disarm(mut self) {
        self.request = None;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let Some(request) = self.request.take() else {
            return;
        };
        news_debug!("request for page {} abandoned", request.page);
        for effect in self.controller.apply(Msg::FetchAbandoned { request }) {
            self.controller.render(effect);
        }
    }
}
