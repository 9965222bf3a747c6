use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use newsdesk_core::Msg;
use newsdesk_engine::{EngineHandle, ViewStateController};
use newsdesk_logging::{news_info, news_warn};

use super::cli::Cli;
use super::commands::{parse_command, Command};
use super::config::AppConfig;
use super::logging;
use super::ui::constants::{HELP_TEXT, PROMPT};
use super::ui::render::{format_view, TerminalRenderer};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    let level = match cli.log_level.as_deref() {
        Some(name) => newsdesk_logging::parse_level(name)
            .with_context(|| format!("unknown log level `{name}`"))?,
        None => config.level(),
    };
    logging::initialize(cli.log, level);

    let config = config.with_api_key(cli.api_key)?;
    news_info!(
        "starting newsdesk: page size {}, max pages {}, {} retries",
        config.reader.page_size,
        config.reader.max_pages,
        config.retry.max_retries
    );

    let renderer = Arc::new(TerminalRenderer::stdout());
    let controller = ViewStateController::with_reqwest(
        config.reader.clone(),
        config.api.clone(),
        config.retry.policy(),
        config.http.settings(),
        renderer.clone(),
    )
    .context("cannot build HTTP client")?;
    let engine =
        EngineHandle::new(Arc::new(controller)).context("cannot start engine runtime")?;

    renderer.print("newsdesk: type `help` for commands.");
    engine.dispatch(Msg::Reload);

    let result = command_loop(&engine, &renderer, &config, io::stdin().lock());
    engine.shutdown();
    news_info!("newsdesk stopped");
    result
}

fn command_loop(
    engine: &EngineHandle,
    renderer: &TerminalRenderer,
    config: &AppConfig,
    input: impl BufRead,
) -> anyhow::Result<()> {
    let mut lines = input.lines();
    loop {
        renderer.print_prompt(PROMPT);
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("cannot read from stdin")?;

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Dispatch(msg))) => {
                if engine.view().is_loading && starts_request(&msg) {
                    renderer.print("Still loading, please wait.");
                }
                engine.dispatch(msg);
            }
            Ok(Some(Command::ListCategories)) => {
                renderer.print(&format!("Categories: {}", config.categories.join(", ")));
            }
            Ok(Some(Command::Show)) => renderer.print(&format_view(&engine.view())),
            Ok(Some(Command::Help)) => renderer.print(HELP_TEXT),
            Ok(Some(Command::Quit)) => return Ok(()),
            Err(err) => {
                news_warn!("bad command {:?}: {}", line, err);
                renderer.print(&err.to_string());
            }
        }
    }
}

fn starts_request(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::SearchSubmitted(_)
            | Msg::CategorySelected(_)
            | Msg::CountrySelected(_)
            | Msg::NextPage
            | Msg::PrevPage
            | Msg::GoToPage(_)
            | Msg::Reload
    )
}
