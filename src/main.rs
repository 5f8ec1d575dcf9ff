use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use newsfeed::cli::{Cli, Commands};
use newsfeed::config::Config;
use newsfeed::domain::Notification;
use newsfeed::errors::NewsError;
use newsfeed::present::{DisplayOptions, FeedView};
use newsfeed::services::{
    ChannelNotifier, FeedSession, LoadOutcome, RefreshCoordinator, RefreshOutcome, SyncController,
};
use newsfeed::sources::HttpNewsSource;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config =
        Config::load(cli.backend_url.as_deref()).context("Failed to load configuration")?;

    // Wire the sync layer to the backend
    let source = HttpNewsSource::new(&config.backend_url, config.http_timeout)?;
    let (notifier, notifications) = ChannelNotifier::new();
    let controller = SyncController::new(Arc::new(source), Arc::new(notifier));
    let display = DisplayOptions::from_config(&config);

    match cli.command {
        Commands::List => cmd_list(controller, notifications, &display).await,
        Commands::Refresh => cmd_refresh(controller, notifications, &config, &display).await,
        Commands::Watch => cmd_watch(controller, notifications, &config, &display).await,
    }
}

async fn cmd_list(
    controller: SyncController,
    mut notifications: UnboundedReceiver<Notification>,
    display: &DisplayOptions,
) -> anyhow::Result<()> {
    println!("Fetching announcements...\n");

    let outcome = controller.load_snapshot(false).await;
    print_notifications(&mut notifications);

    if let LoadOutcome::Failed(e) = outcome {
        return Err(anyhow::Error::new(e).context("Could not load announcements"));
    }

    print!("{}", FeedView::from_state(&controller.state(), display).render());
    Ok(())
}

async fn cmd_refresh(
    controller: SyncController,
    mut notifications: UnboundedReceiver<Notification>,
    config: &Config,
    display: &DisplayOptions,
) -> anyhow::Result<()> {
    println!("Requesting refresh...");

    let coordinator = RefreshCoordinator::new(controller.clone(), config.refresh_delay);
    let reload = match coordinator.request_refresh().await {
        RefreshOutcome::Scheduled(reload) => reload,
        RefreshOutcome::Failed(e) => {
            print_notifications(&mut notifications);
            return Err(anyhow::Error::new(e).context("Refresh command was rejected"));
        }
    };

    println!(
        "Refresh accepted, reloading in {:.1}s...\n",
        coordinator.delay().as_secs_f64()
    );

    let outcome = reload.await.context("Reload task did not complete")?;
    print_notifications(&mut notifications);

    if let LoadOutcome::Failed(e) = outcome {
        return Err(anyhow::Error::new(e).context("Could not load announcements"));
    }

    print!("{}", FeedView::from_state(&controller.state(), display).render());
    Ok(())
}

async fn cmd_watch(
    controller: SyncController,
    mut notifications: UnboundedReceiver<Notification>,
    config: &Config,
    display: &DisplayOptions,
) -> anyhow::Result<()> {
    let mut session = FeedSession::start(controller, config.refresh_delay, config.poll_interval);
    let mut states = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut input_error = None;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    println!("Commands: r = refresh, l = reload, q = quit\n");
    print!("{}", FeedView::from_state(&states.borrow_and_update(), display).render());

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                print!("\n{}", FeedView::from_state(&state, display).render());
            }
            Some(notification) = notifications.recv() => {
                println!("{}", notification.format());
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match line.trim() {
                    "r" | "refresh" => {
                        if !session.request_refresh() {
                            println!("Refresh already in progress");
                        }
                    }
                    "l" | "reload" => session.reload(),
                    "q" | "quit" => break,
                    "" => {}
                    other => {
                        println!("Unknown command '{}' (r = refresh, l = reload, q = quit)", other)
                    }
                },
                Ok(None) => {
                    debug!("stdin closed, press Ctrl-C to exit");
                    stdin_open = false;
                }
                Err(e) => {
                    input_error = Some(NewsError::from(e));
                    break;
                }
            },
            _ = &mut ctrl_c => break,
        }
    }

    session.shutdown().await;
    println!("Stopped.");

    match input_error {
        Some(e) => Err(anyhow::Error::new(e).context("Failed to read commands")),
        None => Ok(()),
    }
}

fn print_notifications(notifications: &mut UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        println!("{}", notification.format());
    }
}
