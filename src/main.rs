use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, mpsc};
use tracing_subscriber::EnvFilter;

// Declare modules
mod app;
mod client;
mod config;
mod constants;
mod domain;
mod event;
mod handler;
mod network;
mod search;
mod theme;
mod tui;
mod ui;

#[cfg(test)]
mod test_utils;

use crate::{
    app::App,
    client::{ChainClient, GraphQlClient},
    constants::TICK_RATE,
    domain::Cluster,
    event::{Action, NetworkUpdateEvent},
    handler::handle_event,
    network::NetworkManager,
    search::SearchEngine,
    tui::Tui,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ASCII art logo
const LOGO: &str = r#"
██╗      █████╗ ███████╗██╗   ██╗███████╗ ██████╗ ██╗
██║     ██╔══██╗╚══███╔╝╚██╗ ██╔╝██╔════╝██╔═══██╗██║
██║     ███████║  ███╔╝  ╚████╔╝ ███████╗██║   ██║██║
██║     ██╔══██║ ███╔╝    ╚██╔╝  ╚════██║██║   ██║██║
███████╗██║  ██║███████╗   ██║   ███████║╚██████╔╝███████╗
╚══════╝╚═╝  ╚═╝╚══════╝   ╚═╝   ╚══════╝ ╚═════╝ ╚══════╝
"#;

/// lazysol - Terminal UI for Solana blockchain exploration
#[derive(Parser)]
#[command(version = VERSION, about, long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Cluster to connect to: mainnet-beta, devnet, testnet, or localnet
    #[arg(short = 'u', long)]
    cluster: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display version with ASCII art
    Version,
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to RUST_LOG-controlled stderr; the TUI owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Some(Commands::Version) = &cli.command {
        println!("{}", LOGO);
        println!("lazysol v{}", VERSION);
        println!("A terminal UI for exploring the Solana blockchain");
        return Ok(());
    }

    let cluster_override = match cli.cluster.as_deref() {
        Some(name) => Some(parse_cluster_flag(name)?),
        None => None,
    };

    // Setup application
    color_eyre::install()?;
    let mut terminal = tui::init()?;
    let mut app = App::new(cluster_override);

    let runtime = tokio::runtime::Handle::current();

    // Channel for network events -> main loop
    let (network_event_sender, mut network_event_receiver) =
        mpsc::channel::<NetworkUpdateEvent>(100);

    // Composition root: the clients are built here and injected; nothing
    // else constructs network state
    let initial_chain = ChainClient::new(&app.settings.selected_cluster)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let initial_engine: SearchEngine<GraphQlClient> =
        SearchEngine::new(initial_chain.graphql().clone());

    let network_manager = NetworkManager::new(
        Arc::new(Mutex::new(initial_chain)),
        Arc::new(Mutex::new(initial_engine)),
        Arc::clone(&app.show_live),
        Arc::clone(&app.blocks),
        Arc::clone(&app.transactions),
        runtime.clone(),
        network_event_sender,
    );

    // Start background polling and fetch initial data. The polling task
    // is cancelled explicitly on teardown.
    let poll_task = network_manager.start_background_loop();
    network_manager.fetch_initial_data();

    // Run the main application loop
    run_app(
        &mut terminal,
        &mut app,
        &network_manager,
        &mut network_event_receiver,
    )
    .await?;

    // Stop polling and restore terminal
    poll_task.abort();
    tui::restore()?;
    Ok(())
}

/// Parse the `--cluster` flag into a built-in cluster.
fn parse_cluster_flag(name: &str) -> Result<Cluster> {
    match name.to_lowercase().as_str() {
        "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
        "devnet" => Ok(Cluster::Devnet),
        "testnet" => Ok(Cluster::Testnet),
        "localnet" | "local" => Ok(Cluster::Localnet),
        other => Err(color_eyre::eyre::eyre!(
            "unknown cluster '{}': expected mainnet-beta, devnet, testnet, or localnet",
            other
        )),
    }
}

/// Main application loop.
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    network_manager: &NetworkManager,
    network_event_receiver: &mut mpsc::Receiver<NetworkUpdateEvent>,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        if app.exit {
            break;
        }

        // --- Drawing ---
        terminal.draw(|frame| ui::render(app, frame))?;

        // --- Event Handling ---
        // Poll for terminal events with a very small timeout, then check
        // network events and sleep if necessary.
        let mut terminal_event_ready = false;
        if crossterm::event::poll(Duration::from_millis(1))? {
            terminal_event_ready = true;
        }

        if terminal_event_ready {
            match crossterm::event::read() {
                Ok(event) => {
                    if let crossterm::event::Event::Resize(width, height) = event {
                        app.update_terminal_size(width, height);
                        continue;
                    }
                    if let Some(action) = handle_event(app, event)
                        && let Err(e) = app.update(action, network_manager)
                    {
                        app.update(
                            Action::ShowMessage(format!("Error: {}", e)),
                            network_manager,
                        )?;
                    }
                }
                Err(_) => {
                    app.exit = true;
                }
            }
        }

        // Check for network events non-blockingly
        match network_event_receiver.try_recv() {
            Ok(network_event) => {
                let action = match network_event {
                    NetworkUpdateEvent::StatusUpdate(res) => Action::UpdateClusterStatus(res),
                    NetworkUpdateEvent::BlocksFetched(res) => Action::UpdateBlocks(res),
                    NetworkUpdateEvent::TransactionsFetched(res) => Action::UpdateTransactions(res),
                    NetworkUpdateEvent::SearchResults { seq, outcome } => {
                        Action::UpdateSearchResults { seq, outcome }
                    }
                    NetworkUpdateEvent::ValidatorDetailsFetched { address, outcome } => {
                        Action::UpdateValidatorDetails { address, outcome }
                    }
                };
                if let Err(e) = app.update(action, network_manager) {
                    app.update(
                        Action::ShowMessage(format!("Error: {}", e)),
                        network_manager,
                    )?;
                }
            }
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => {
                app.exit = true;
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
        }

        // Small sleep to prevent high CPU usage if no events are pending
        if !terminal_event_ready {
            let remaining_timeout = TICK_RATE
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(5));
            tokio::time::sleep(remaining_timeout.min(Duration::from_millis(50))).await;
        }
    }
    Ok(())
}
