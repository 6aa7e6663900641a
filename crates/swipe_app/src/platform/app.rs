use std::io::{self, BufRead};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use feed_engine::{ensure_state_dir, JobSource, ReqwestJobSource, StaticJobSource};
use feed_logging::{feed_info, feed_trace, feed_warn, set_dispatch_seq};
use swipe_core::{update, AppState, LoadStatus, Msg, SessionContext};

use super::cli::Cli;
use super::commands::{self, Command};
use super::config::AppConfig;
use super::demo;
use super::effects::EffectRunner;
use super::{logging, persistence, render};

/// How long the loop waits for input before flushing a render.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    let config = AppConfig::resolve(&cli)?;
    ensure_state_dir(&config.state_dir)
        .with_context(|| format!("state directory {}", config.state_dir.display()))?;
    feed_info!(
        "Starting swipefeed api_url={} batch_size={} demo={}",
        config.api_url,
        config.batch_size,
        cli.demo
    );

    let source: Arc<dyn JobSource> = if cli.demo {
        Arc::new(StaticJobSource::new(demo::listings()))
    } else {
        Arc::new(ReqwestJobSource::new(config.fetch_settings()))
    };
    let session = SessionContext::restored(persistence::load_session(&config.state_dir));
    let state = AppState::with_config(config.pager_config()).with_session(session);

    let mut driver = Driver::new(state, EffectRunner::new(source, config.state_dir.clone()));
    let input = spawn_input_reader();

    driver.dispatch(Msg::FeedMounted);
    driver.render_if_dirty();

    let mut input_closed = false;
    loop {
        for msg in driver.runner.drain_events() {
            driver.dispatch(msg);
        }

        if input_closed {
            driver.render_if_dirty();
            if driver.is_settled() {
                break;
            }
            thread::sleep(POLL_INTERVAL);
            continue;
        }

        match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match commands::parse(&line) {
                Ok(Command::Dispatch(msgs)) => {
                    for msg in msgs {
                        driver.dispatch(msg);
                    }
                }
                Ok(Command::View) => driver.render(),
                Ok(Command::Help) => println!("{}", commands::HELP),
                Ok(Command::Quit) => break,
                Ok(Command::Nothing) => {}
                Err(err) => println!("error: {err:#}"),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {
                driver.dispatch(Msg::Tick);
                driver.render_if_dirty();
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                feed_info!("Input closed; waiting for pending work");
                input_closed = true;
            }
        }
    }

    driver.dispatch(Msg::FeedUnmounted);
    driver.runner.shutdown();
    feed_info!("swipefeed exiting");
    Ok(())
}

struct Driver {
    state: AppState,
    runner: EffectRunner,
    seq: u64,
}

impl Driver {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            seq: 0,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        self.seq += 1;
        set_dispatch_seq(self.seq);
        if !matches!(msg, Msg::Tick) {
            feed_trace!("[#{}] dispatch {}", self.seq, msg_label(&msg));
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn render(&self) {
        println!("{}\n", render::render(&self.state.view()));
    }

    /// No fetch in flight and no timer left to fire.
    fn is_settled(&self) -> bool {
        self.state.load_status() != LoadStatus::Fetching && self.state.pending_timer_count() == 0
    }
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    feed_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

fn msg_label(msg: &Msg) -> String {
    match msg {
        Msg::JobsLoaded(listings) => format!("JobsLoaded({} listings)", listings.len()),
        other => format!("{other:?}"),
    }
}
