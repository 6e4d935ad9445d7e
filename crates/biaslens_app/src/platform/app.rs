use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use biaslens_api::{ApiClient, ApiCommand, ApiConfig, ApiEvent, ApiHandle};
use biaslens_core::rules::{
    default_fact_check_max_age, is_fact_check_eligible, is_summary_text_eligible,
    is_url_eligible, MIN_QUERY_CHARS, MIN_SUMMARY_TEXT_CHARS, MIN_URL_CHARS,
};
use biaslens_core::{update, AnalysisState, AppState, FactCheckRequest, Msg, Route, SearchPhase};
use lens_logging::{lens_info, lens_trace, lens_warn};

use super::effects::EffectRunner;
use super::render;
use crate::cli::{Cli, Command};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        api_base_url,
        timeout_secs,
        command,
        ..
    } = cli;
    let session = || connect(api_base_url.as_deref(), timeout_secs);

    match command {
        Command::Route { path } => {
            let route = Route::parse(&path).ok_or_else(|| anyhow!("unknown route: {path}"))?;
            print!("{}", render::route(&route));
            Ok(())
        }
        Command::Search { query, pages } => session()?.search(query, pages),
        Command::Browse => session()?.browse(io::stdin().lock()),
        Command::Analyze { url } => session()?.analyze(url),
        Command::Extract { url } => session()?.extract(url),
        Command::Summarize { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            session()?.summarize(text)
        }
        Command::Factcheck {
            headline,
            source_domain,
            summary,
            max_age_months,
        } => session()?.fact_check(FactCheckRequest {
            max_age_months: Some(
                max_age_months.unwrap_or_else(|| default_fact_check_max_age(&headline)),
            ),
            headline: headline.trim().to_string(),
            source_domain,
            summary,
        }),
    }
}

/// Validates the base address and starts the request worker.
fn connect(api_base_url: Option<&str>, timeout_secs: Option<u64>) -> anyhow::Result<Session> {
    let mut config = ApiConfig::from_optional(api_base_url)
        .context("set --api-base-url or BIASLENS_API_BASE_URL to a valid http(s) address")?;
    config.request_timeout = timeout_secs.map(Duration::from_secs);
    lens_info!("using API at {}", config.base_url());

    let client = ApiClient::new(config).context("failed to build HTTP client")?;
    let api = ApiHandle::new(Arc::new(client)).context("failed to start request worker")?;
    Ok(Session::new(EffectRunner::new(api)))
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Feeds one message through the reducer and starts its effects.
    /// Returns whether the visible state changed.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let rejected_before = self.state.search().rejected_cursor();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);

        let rejected = self.state.search().rejected_cursor();
        if let Some(cursor) = rejected.filter(|_| rejected != rejected_before) {
            lens_warn!(
                "server returned non-advancing cursor {} for {:?}; pagination stopped",
                cursor,
                self.state.search().query()
            );
        }
        self.state.consume_dirty()
    }

    /// Pumps worker results into the reducer until `done` holds.
    fn settle(&mut self, done: impl Fn(&AppState) -> bool) -> anyhow::Result<()> {
        while !done(&self.state) {
            match self.runner.next_msg(POLL_INTERVAL)? {
                Some(msg) => {
                    self.dispatch(msg);
                }
                None => lens_trace!("waiting for API"),
            }
        }
        Ok(())
    }

    fn settle_search(&mut self) -> anyhow::Result<()> {
        self.settle(|state| !state.search().is_loading())
    }

    fn search(&mut self, query: String, pages: u32) -> anyhow::Result<()> {
        self.dispatch(Msg::QueryChanged(query));
        if matches!(self.state.search().phase(), SearchPhase::Idle { .. }) {
            bail!("search query must be at least {MIN_QUERY_CHARS} characters");
        }
        self.settle_search()?;

        while self.state.search().pages().len() < pages as usize
            && self.state.search().has_next()
            && self.state.search().error().is_none()
        {
            self.dispatch(Msg::LoadMoreClicked);
            self.settle_search()?;
        }

        let view = self.state.view();
        print!("{}", render::search_results(&view.search));
        match self.state.search().error() {
            Some(error) => Err(anyhow!("search failed: {error}")),
            None => Ok(()),
        }
    }

    fn browse(&mut self, input: impl BufRead) -> anyhow::Result<()> {
        eprintln!("Type a search query, :more for the next page, :retry after an error, :quit to exit.");
        prompt();
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            let msg = match line.trim() {
                ":quit" | ":q" => break,
                "" => {
                    prompt();
                    continue;
                }
                ":more" if !self.state.search().has_next() => {
                    println!("No more results.");
                    prompt();
                    continue;
                }
                ":more" => Msg::LoadMoreClicked,
                ":retry" => Msg::RetryClicked,
                _ => Msg::QueryChanged(line),
            };

            let mut changed = self.dispatch(msg);
            if self.state.search().is_loading() {
                self.settle_search()?;
                changed = true;
            }
            if changed {
                let view = self.state.view();
                if view.search.query.trim().chars().count() < MIN_QUERY_CHARS {
                    println!("Type at least {MIN_QUERY_CHARS} characters to search.");
                } else {
                    print!("{}", render::search_results(&view.search));
                }
            }
            prompt();
        }
        Ok(())
    }

    fn analyze(&mut self, url: String) -> anyhow::Result<()> {
        self.dispatch(Msg::UrlSubmitted(url));
        if let Some(input) = self.state.view().analysis.rejected_input {
            bail!("URL {input:?} is too short; enter at least {MIN_URL_CHARS} characters");
        }
        self.settle(|state| !state.analysis().is_loading())?;

        print!("{}", render::analysis(self.state.analysis()));
        match self.state.analysis() {
            AnalysisState::Failed { error, .. } => Err(anyhow!("analysis failed: {error}")),
            _ => Ok(()),
        }
    }

    fn extract(&self, url: String) -> anyhow::Result<()> {
        if !is_url_eligible(&url) {
            bail!("URL {url:?} is too short; enter at least {MIN_URL_CHARS} characters");
        }
        match self.runner.call(ApiCommand::Extract {
            url: url.trim().to_string(),
        })? {
            ApiEvent::Extracted { result, .. } => {
                let result = result.context("extraction failed")?;
                print!("{}", render::extract(&result));
                Ok(())
            }
            other => bail!("unexpected worker event {other:?}"),
        }
    }

    fn summarize(&self, text: String) -> anyhow::Result<()> {
        if !is_summary_text_eligible(&text) {
            bail!("text must be at least {MIN_SUMMARY_TEXT_CHARS} characters to summarize");
        }
        match self.runner.call(ApiCommand::Summarize { text })? {
            ApiEvent::Summarized { result, .. } => {
                let summary = result.context("summarization failed")?;
                print!("{}", render::summary_section(&summary));
                Ok(())
            }
            other => bail!("unexpected worker event {other:?}"),
        }
    }

    fn fact_check(&self, request: FactCheckRequest) -> anyhow::Result<()> {
        if !is_fact_check_eligible(&request.headline) {
            bail!("a non-empty headline is required");
        }
        match self.runner.call(ApiCommand::FactCheck { request })? {
            ApiEvent::FactChecked { result, .. } => {
                let result = result.context("fact check failed")?;
                print!("{}", render::fact_checks(&result));
                Ok(())
            }
            other => bail!("unexpected worker event {other:?}"),
        }
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
