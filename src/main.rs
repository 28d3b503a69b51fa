use campus_portal::models::DashboardRole;
use campus_portal::{
    logging, LoadingAggregator, OverlayWatcher, PortalApiClient, PortalConfig, PortalScreens,
    RefreshTrigger,
};

use std::time::Duration;

use color_eyre::eyre::eyre;
use color_eyre::Result;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long a refresh may take to show up as busy before it is treated as done.
const BUSY_GRACE: Duration = Duration::from_millis(250);

/// Value following `flag` on the command line, if any.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_refresh_count(args: &[String]) -> Result<u32> {
    match flag_value(args, "--refresh") {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| eyre!("--refresh expects a number, got '{}'", raw)),
        None if args.iter().any(|arg| arg == "--refresh") => {
            Err(eyre!("--refresh expects a number"))
        }
        None => Ok(1),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Handle --version flag before any initialization
    if args.iter().any(|arg| arg == "--version") {
        println!("campus-portal {}", VERSION);
        std::process::exit(0);
    }

    color_eyre::install()?;

    let refreshes = parse_refresh_count(&args)?;
    let config = PortalConfig::from_env()?;
    logging::init(&config.log_filter);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config, refreshes))
}

/// Wait for a round of fetches to start and then for all of them to end.
async fn settle(aggregator: &LoadingAggregator) {
    let mut rx = aggregator.subscribe();
    let timed_out = tokio::time::timeout(BUSY_GRACE, rx.wait_for(|busy| *busy))
        .await
        .is_err();
    if timed_out {
        tracing::debug!("No screen reported busy within {:?}", BUSY_GRACE);
    }
    aggregator.wait_until_idle().await;
}

async fn run(config: PortalConfig, refreshes: u32) -> Result<()> {
    tracing::info!("Using portal API at {}", config.base_url);

    let client = PortalApiClient::from_config(&config);
    let aggregator = LoadingAggregator::new();
    let refresh = RefreshTrigger::new();
    let overlay = OverlayWatcher::spawn(&aggregator);

    let screens = PortalScreens::new(&client, &aggregator, DashboardRole::Student);
    let mounted = screens.mount(&refresh);

    settle(&aggregator).await;

    for cycle in 1..=refreshes {
        let generation = refresh.pull_to_refresh(&aggregator);
        tracing::info!("Pull-to-refresh {} (generation {})", cycle, generation);
        settle(&aggregator).await;
    }

    let news = mounted.news.state().data.map(|n| n.len()).unwrap_or(0);
    let events = mounted.events.state().data.map(|e| e.len()).unwrap_or(0);
    let programs = mounted.programs.state().data.map(|p| p.len()).unwrap_or(0);
    println!(
        "Loaded {} news items, {} events and {} programs",
        news, events, programs
    );

    // Open the first about topic the way its list screen would.
    let first_topic = mounted
        .about
        .state()
        .data
        .and_then(|topics| topics.first().map(|topic| topic.id.clone()));
    if let Some(topic) = first_topic.and_then(|id| mounted.select_about_topic(&id)) {
        tracing::debug!("Selected about topic {}", topic.id);
    }
    if let Some(topic) = screens.selections.about_topic.selected() {
        println!("About: {}", topic.title);
    }

    for (screen, message) in mounted.errors() {
        println!("  {}: {}", screen, message);
    }
    println!("Overlay transitions: {:?}", overlay.trace());

    mounted.unmount().await;
    overlay.stop();
    Ok(())
}
