//! zoomsite-nav - Main entry point
//!
//! Interactive driver for the view navigation engine. Loads the content
//! repository, wires the controller, breadcrumb, and hover preview onto
//! the shared event bus, then services gesture commands from stdin until
//! EOF or a shutdown signal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zoomsite_common::config::{self, TomlConfig};
use zoomsite_common::content::{Category, SiteStructure};
use zoomsite_common::events::EventBus;

use zoomsite_nav::breadcrumb::BreadcrumbDisplay;
use zoomsite_nav::controller::{Dispatcher, Interaction, NavigationController};
use zoomsite_nav::debounce::Debouncer;
use zoomsite_nav::preview::PreviewController;
use zoomsite_nav::transition::{PanelStage, TransitionSequencer};

/// Command-line arguments for zoomsite-nav
#[derive(Parser, Debug)]
#[command(name = "zoomsite-nav")]
#[command(about = "View navigation engine for the zoomable site")]
#[command(version)]
struct Args {
    /// Path to the content repository JSON file
    #[arg(short, long, env = config::CONTENT_ENV_VAR)]
    content: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, env = "ZOOMSITE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zoomsite_nav=debug,zoomsite_common=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = TomlConfig::load_or_default(args.config.as_deref());
    let content_path = config::resolve_content_path(
        args.content.as_deref().and_then(|p| p.to_str()),
        &config,
    );

    info!("Loading content repository from {}", content_path.display());
    let site = Arc::new(
        SiteStructure::load(&content_path)
            .with_context(|| format!("Failed to load content from {}", content_path.display()))?,
    );

    // Wire the engine onto a shared event bus
    let bus = EventBus::new(256);
    let stage = Arc::new(PanelStage::new());
    let sequencer = TransitionSequencer::new(Arc::clone(&stage), config.timing.transition_settle());
    let controller = Arc::new(NavigationController::new(
        Arc::clone(&site),
        bus.clone(),
        sequencer,
    ));

    let breadcrumb = Arc::new(BreadcrumbDisplay::new());
    let breadcrumb_task = tokio::spawn(BreadcrumbDisplay::run(
        Arc::clone(&breadcrumb),
        bus.subscribe(),
    ));
    let back_listener = controller.spawn_back_listener();

    let preview = PreviewController::new(
        Arc::clone(&site),
        config.timing.preview_debounce(),
        config.timing.transition_settle(),
    );
    let dispatcher = Dispatcher::new(
        Arc::clone(&controller),
        preview,
        Debouncer::new(config.timing.resize_debounce()),
    );

    info!("Navigation engine ready; reading gestures from stdin");
    command_loop(&dispatcher, &breadcrumb).await;

    back_listener.abort();
    breadcrumb_task.abort();
    info!("Shutdown complete");
    Ok(())
}

/// Service gesture commands until EOF or a shutdown signal
async fn command_loop(dispatcher: &Dispatcher, breadcrumb: &Arc<BreadcrumbDisplay>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        if line == "quit" {
                            break;
                        }
                        handle_command(dispatcher, breadcrumb, line);
                    }
                    Ok(None) => {
                        info!("stdin closed");
                        break;
                    }
                    Err(e) => {
                        warn!("stdin read error: {e}");
                        break;
                    }
                }
            }
            _ = shutdown_signal() => break,
        }
    }
}

/// Parse and dispatch one gesture command
///
/// Commands: open <category> <id>, back, esc, home,
/// hover <category> <id>, leave, resize, path.
fn handle_command(dispatcher: &Dispatcher, breadcrumb: &Arc<BreadcrumbDisplay>, line: &str) {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();

    let interaction = match command {
        "open" | "hover" => {
            let (Some(category), Some(section_id)) = (parts.next(), parts.next()) else {
                warn!("usage: {command} <category> <section-id>");
                return;
            };
            let category = match Category::parse(category) {
                Ok(category) => category,
                Err(e) => {
                    warn!("{e}");
                    return;
                }
            };
            let section_id = section_id.to_string();
            if command == "open" {
                Interaction::Activate { category, section_id }
            } else {
                Interaction::HoverEnter { category, section_id }
            }
        }
        "back" => Interaction::Back,
        "esc" => Interaction::Escape,
        "home" => Interaction::Home,
        "leave" => Interaction::HoverLeave,
        "resize" => Interaction::Resize,
        "path" => {
            if breadcrumb.is_visible() {
                println!("{}", breadcrumb.trail());
            } else {
                println!("(home)");
            }
            return;
        }
        other => {
            warn!("unknown command: {other}");
            return;
        }
    };

    if let Err(e) = dispatcher.dispatch(interaction) {
        warn!("gesture rejected: {e}");
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
