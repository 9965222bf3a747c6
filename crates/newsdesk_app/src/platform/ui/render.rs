use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use newsdesk_core::{
    share_links, AppViewModel, Article, ArticleCard, EmptyResult, Heading, Pagination,
};
use newsdesk_engine::Renderer;
use newsdesk_logging::news_warn;

use super::constants::RULE;

/// Writes everything the controller reports as plain text.
pub struct TerminalRenderer {
    out: Mutex<Box<dyn Write + Send>>,
    last_heading: Mutex<Option<Heading>>,
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            last_heading: Mutex::new(None),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn print(&self, text: &str) {
        self.write_flushed(format_args!("{text}\n"));
    }

    /// Writes `prompt` without a newline so input follows it on the same line.
    pub fn print_prompt(&self, prompt: &str) {
        self.write_flushed(format_args!("{prompt}"));
    }

    fn write_flushed(&self, text: std::fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.write_fmt(text).and_then(|()| out.flush()) {
            news_warn!("terminal write failed: {}", err);
        }
    }
}

impl Renderer for TerminalRenderer {
    fn on_loading_state_changed(&self, is_loading: bool) {
        if is_loading {
            self.print("Loading news...");
        }
    }

    fn on_articles_ready(&self, articles: &[Article], pagination: Pagination) {
        self.print(&format_articles(articles, pagination));
    }

    fn on_empty_result(&self, empty: EmptyResult) {
        self.print(empty.message());
    }

    fn on_error(&self, message: &str) {
        self.print(&format!("Error: {message}"));
    }

    fn on_article_opened(&self, article: &Article) {
        self.print(&format_detail(article));
    }

    fn on_article_closed(&self) {
        self.print("Article closed.");
    }

    fn on_view_changed(&self, view: &AppViewModel) {
        let mut last = self
            .last_heading
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if view.cards.is_empty() || last.as_ref() == Some(&view.heading) {
            return;
        }
        *last = Some(view.heading.clone());
        drop(last);
        self.print(&format_heading(&view.heading, view.total_results));
    }
}

pub fn format_heading(heading: &Heading, total_results: u64) -> String {
    format!(
        "== {} ({} results) [{}]",
        heading.label, total_results, heading.image
    )
}

pub fn format_articles(articles: &[Article], pagination: Pagination) -> String {
    let cards: Vec<ArticleCard> = articles
        .iter()
        .enumerate()
        .map(|(index, article)| ArticleCard::new(index, article))
        .collect();
    format_cards(&cards, pagination)
}

pub fn format_cards(cards: &[ArticleCard], pagination: Pagination) -> String {
    let mut lines = Vec::with_capacity(cards.len() * 4 + 2);
    for card in cards {
        lines.push(format!("[{}] {}", card.index + 1, card.title));
        lines.push(format!("    {}", card.byline));
        lines.push(format!("    {}", card.description));
        lines.push(format!("    {}", card.url));
    }
    if let Some(pager) = format_pager(pagination) {
        lines.push(RULE.to_string());
        lines.push(pager);
    }
    lines.join("\n")
}

/// `None` when everything fits on one page.
pub fn format_pager(pagination: Pagination) -> Option<String> {
    if !pagination.is_visible() {
        return None;
    }
    let pages: Vec<String> = (1..=pagination.total_pages)
        .map(|page| {
            if page == pagination.page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    let prev = if pagination.has_prev() { "prev" } else { "----" };
    let next = if pagination.has_next() { "next" } else { "----" };
    Some(format!("{prev}  {}  {next}", pages.join(" ")))
}

pub fn format_detail(article: &Article) -> String {
    let card = ArticleCard::new(0, article);
    let links = share_links(article);
    [
        RULE.to_string(),
        card.title,
        card.byline,
        String::new(),
        card.description,
        String::new(),
        format!("Read more: {}", card.url),
        format!("Image:     {}", card.image_url),
        format!("Twitter:   {}", links.twitter),
        format!("Facebook:  {}", links.facebook),
        format!("LinkedIn:  {}", links.linkedin),
        format!("Copy link: {}", links.copy),
        RULE.to_string(),
    ]
    .join("\n")
}

pub fn format_view(view: &AppViewModel) -> String {
    if view.cards.is_empty() {
        return "Nothing loaded yet.".to_string();
    }
    let mut text = format_heading(&view.heading, view.total_results);
    text.push('\n');
    text.push_str(&format_cards(&view.cards, view.pagination));
    if let Some(card) = &view.open_article {
        text.push_str(&format!("\nOpen: [{}] {}", card.index + 1, card.title));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn sample(n: usize) -> Article {
        Article {
            title: format!("Story {n}"),
            description: format!("Summary {n}"),
            url: format!("https://news.example.com/{n}"),
            url_to_image: format!("https://news.example.com/{n}.png"),
            published_at: Some("2024-01-05T08:04:00Z".to_string()),
            source_name: None,
        }
    }

    #[test]
    fn pager_marks_current_page() {
        let pager = format_pager(Pagination {
            page: 2,
            total_pages: 3,
        });
        assert_eq!(pager.as_deref(), Some("prev  1 [2] 3  next"));

        let first = format_pager(Pagination {
            page: 1,
            total_pages: 2,
        });
        assert_eq!(first.as_deref(), Some("----  [1] 2  next"));
    }

    #[test]
    fn single_page_has_no_pager() {
        assert_eq!(
            format_pager(Pagination {
                page: 1,
                total_pages: 1
            }),
            None
        );
    }

    #[test]
    fn cards_are_numbered_from_one() {
        let text = format_articles(
            &[sample(0), sample(1)],
            Pagination {
                page: 1,
                total_pages: 1,
            },
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[1] Story 0");
        assert_eq!(lines[1], "    Unknown source • Jan 5, 2024, 03:04 PM");
        assert_eq!(lines[4], "[2] Story 1");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn detail_lists_share_links() {
        let text = format_detail(&sample(7));
        assert!(text.contains("Read more: https://news.example.com/7"));
        assert!(text.contains(
            "Facebook:  https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fnews.example.com%2F7"
        ));
        assert!(text.contains("Copy link: https://news.example.com/7"));
    }

    #[test]
    fn renderer_writes_messages() {
        let buf = SharedBuf::default();
        let renderer = TerminalRenderer::new(Box::new(buf.clone()));

        renderer.on_loading_state_changed(true);
        renderer.on_loading_state_changed(false);
        renderer.on_error("Failed to load news.");

        assert_eq!(buf.text(), "Loading news...\nError: Failed to load news.\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn prompt_stays_on_input_line() {
        let buf = SharedBuf::default();
        let renderer = TerminalRenderer::new(Box::new(buf.clone()));

        renderer.print_prompt("newsdesk> ");
        renderer.print("ok");

        assert_eq!(buf.text(), "newsdesk> ok\n");
    }

    #[test]
    fn write_failures_are_not_fatal() {
        let renderer = TerminalRenderer::new(Box::new(BrokenPipe));
        renderer.print_prompt("newsdesk> ");
        renderer.print("still running");
        renderer.on_error("boom");
    }

    #[test]
    fn heading_printed_once_per_change() {
        let buf = SharedBuf::default();
        let renderer = TerminalRenderer::new(Box::new(buf.clone()));
        let article = sample(0);
        let view = AppViewModel {
            heading: Heading::for_query(Some("rust"), None),
            total_results: 1,
            cards: vec![ArticleCard::new(0, &article)],
            ..AppViewModel::default()
        };

        renderer.on_view_changed(&view);
        renderer.on_view_changed(&view);

        assert_eq!(buf.text(), "== rust (1 results) [world.png]\n");
    }
}
