//! Process bootstrap: parse flags, load and validate the policy
//! document, wire every component together, spawn the HTTP surface,
//! one queue-poller per account and one cron loop per trigger, then
//! block forever. Mirrors the original `main.go` sequencing.

use adapters::memory::{InMemoryQueue, InMemoryResourceDescriber, LoggingNotifier, StaticDirectory};
use adapters::{DirectoryLookup, Notifier, Queue, ResourceDescriber};
use clap::Parser;
use dispatcher::{poll_once, PollerContext};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "complybot", about = "Cloud compliance evaluation and action pipeline")]
struct Cli {
    /// Path to the policy document. Falls back to COMPLYBOT_CONFIG.
    #[arg(short, long, env = "COMPLYBOT_CONFIG")]
    config: Option<String>,

    /// off|error|warn|info|debug|trace
    #[arg(long, env = "COMPLYBOT_LOGLEVEL", default_value = "info")]
    loglevel: String,

    /// "text" or "json"
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Directory the filesystem result store writes under.
    #[arg(long, default_value = "./complybot-data")]
    store_dir: String,

    /// Optional path for the sled-backed keyed store mirror.
    #[arg(long)]
    keyed_store_path: Option<String>,

    /// Address the auxiliary HTTP surface binds to.
    #[arg(long, default_value_t = SocketAddr::from(([0, 0, 0, 0], server::DEFAULT_PORT)))]
    bind_addr: SocketAddr,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.loglevel, &cli.log_format);

    let config = match policy::load_config(cli.config.as_deref()) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!(error = %e, "failed to load policy document");
            std::process::exit(1);
        }
    };

    let keyed_mirror: Option<Arc<dyn adapters::KeyedStore>> = match &cli.keyed_store_path {
        Some(path) => match adapters::sled_store::SledStore::open(path) {
            Ok(s) => Some(Arc::new(s)),
            Err(e) => {
                error!(error = %e, "failed to open keyed store mirror, continuing without it");
                None
            }
        },
        None => None,
    };

    let store = Arc::new(store::ResultStore::new(&cli.store_dir, keyed_mirror));
    let describer: Arc<dyn ResourceDescriber> = Arc::new(InMemoryResourceDescriber::new());
    let directory: Arc<dyn DirectoryLookup> = Arc::new(StaticDirectory::new(HashMap::new()));
    let notifier: Arc<dyn Notifier> = Arc::new(LoggingNotifier::new());
    let templates = Arc::new(actions::TemplateEngine::new(HashMap::new()));

    let http_state = Arc::new(server::AppState {
        store: store.clone(),
        describer: describer.clone(),
    });
    let bind_addr = cli.bind_addr;
    tokio::spawn(async move {
        let listener = match tokio::net::TcpListener::bind(bind_addr).await {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "failed to bind HTTP listener");
                return;
            }
        };
        info!(%bind_addr, "HTTP surface listening");
        if let Err(e) = axum::serve(listener, server::router(http_state)).await {
            error!(error = %e, "HTTP server exited");
        }
    });

    for account in &config.account {
        let config = config.clone();
        let account = account.clone();
        let describer = describer.clone();
        let store = store.clone();
        let directory = directory.clone();
        let notifier = notifier.clone();
        let templates = templates.clone();
        let queue: Arc<dyn Queue> = Arc::new(InMemoryQueue::new());

        tokio::spawn(async move {
            info!(account = %account.name, "starting queue poller");
            loop {
                let ctx = PollerContext {
                    config: &config,
                    account: &account,
                    queue: queue.as_ref(),
                    describer: describer.as_ref(),
                    store: store.as_ref(),
                    directory: directory.as_ref(),
                    notifier: notifier.as_ref(),
                    templates: templates.as_ref(),
                };
                let received = poll_once(&ctx).await;
                if received == 0 {
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        });
    }

    let deps = Arc::new(scheduler::Dependencies {
        describer,
        store,
        directory,
        notifier,
        templates,
    });
    let trigger_handles = scheduler::spawn_all(config, deps);

    info!(triggers = trigger_handles.len(), "compliance pipeline running");
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}

fn init_logging(loglevel: &str, format: &str) {
    let filter = EnvFilter::try_new(loglevel).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
