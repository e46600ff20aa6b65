use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use server::broadcast::broadcast_state;
use server::game;
use server::network;
use server::registry::ConnectionRegistry;
use server::state::SharedState;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::time::{interval, MissedTickBehavior};

/// Main-method of the application.
/// Parses command-line arguments, then spawns the network task and the game
/// loop task against one shared state and connection registry.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// Server IP address to bind to
        #[clap(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Server port to listen on
        #[clap(short, long, default_value = "8080")]
        port: u16,
        /// Tick period in milliseconds
        #[clap(short, long, default_value_t = shared::TICK_MS)]
        tick_ms: u64,
        /// Maximum number of concurrent connections
        #[clap(short, long, default_value = "64")]
        max_clients: usize,
    }

    env_logger::init();
    let args = Args::parse();

    let state = SharedState::new();
    let registry = Arc::new(RwLock::new(ConnectionRegistry::new(args.max_clients)));

    let address = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server listening on {}", address);

    // Spawn network task
    let network_handle = {
        let state = state.clone();
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            network::run(listener, state, registry).await;
        })
    };

    // Spawn game loop task
    let game_handle = {
        let state = state.clone();
        let registry = Arc::clone(&registry);
        let tick_period = Duration::from_millis(args.tick_ms);
        tokio::spawn(async move {
            run_game_loop(state, registry, tick_period).await;
        })
    };

    // Handle shutdown gracefully
    tokio::select! {
        result = network_handle => {
            if let Err(e) = result {
                eprintln!("Network task panicked: {}", e);
            }
        }
        result = game_handle => {
            if let Err(e) = result {
                eprintln!("Game loop task panicked: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

/// Drives the fixed-period tick: physics first, then broadcast, strictly in
/// that order. A tick that overruns its period delays the next firing; ticks
/// are never skipped or run in parallel.
async fn run_game_loop(
    state: SharedState,
    registry: Arc<RwLock<ConnectionRegistry>>,
    tick_period: Duration,
) {
    let mut ticker = interval(tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut rng = StdRng::from_entropy();
    let mut tick: u64 = 0;

    loop {
        ticker.tick().await;

        state
            .apply(|game_state| game::step(game_state, &mut rng))
            .await;
        broadcast_state(&state, &registry).await;

        tick += 1;
        if tick % 60 == 0 {
            let clients = registry.read().await.len();
            debug!("Tick {}: {} connected clients", tick, clients);
        }
    }
}
