//! CLI for forumsync
//!
//! Subcommands:
//! - `relay`: run the WebSocket relay
//! - `client`: run the terminal forum against a relay

use clap::{Parser, Subcommand};
use forumsync::config::{Settings, load_config, parse_relay_url};
use forumsync::forum::{ForumSession, SubmitOutcome};
use forumsync::input::InputAction;
use forumsync::relay::{Relay, start_relay_server};
use forumsync::view;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "forumsync")]
struct Cli {
    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the WebSocket relay
    Relay,
    /// Open the forum in this terminal
    Client {
        /// Relay URL to connect to (overrides `client.relay_url`)
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    forumsync::utils::logging::init(&cli.log_level);

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return;
        }
    };

    match cli.command {
        Command::Relay => {
            if let Err(e) = run_relay(config).await {
                error!("Relay failed: {}", e);
            }
        }
        Command::Client { url } => {
            if let Err(e) = run_client(config, url).await {
                error!("Client failed: {}", e);
            }
        }
    }
}

async fn run_relay(config: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.relay.bind_addr();
    let relay = Relay::shared();

    tokio::select! {
        res = start_relay_server(&addr, relay, config.relay.max_connections) => {
            res?;
            error!("Relay exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_client(
    config: Settings,
    url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let relay_url = match url {
        Some(raw) => parse_relay_url(&raw)?,
        None => config.client.relay_url()?,
    };

    let mut session = ForumSession::from_settings(&config);
    let mut inbound = session.mount(relay_url.as_str()).await?;
    let mut relay_open = true;

    println!("{}", view::render_header());
    println!("{}", view::render_feed(session.store().messages()));
    println!("{}", view::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match InputAction::parse(&line) {
                    InputAction::Submit(text) => {
                        // the post appears once the relay echoes it back
                        if let SubmitOutcome::Dropped(message) = session.submit(&text) {
                            warn!("Post {} was not delivered to the relay", message.id);
                        }
                    }
                    InputAction::Like(id) => {
                        if session.like(&id) {
                            if let Some(message) = session.store().get(&id) {
                                println!("{}", view::render_message(message));
                            }
                        }
                    }
                    InputAction::Redraw => {
                        println!("{}", view::render_feed(session.store().messages()));
                    }
                    InputAction::Help => println!("{}", view::HELP),
                    InputAction::Quit => break,
                }
            }
            message = inbound.recv(), if relay_open => {
                match message {
                    Some(message) => {
                        if session.apply_inbound(message) {
                            if let Some(latest) = session.store().last() {
                                println!("{}", view::render_message(latest));
                            }
                        }
                    }
                    None => {
                        warn!("Relay connection lost; new posts will not be delivered");
                        relay_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.unmount();
    Ok(())
}
