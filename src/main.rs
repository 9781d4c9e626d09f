//! Binary entrypoint for the castlemud CLI.
//!
//! Commands:
//! - `start [--bind <addr>]` - run the game server
//! - `init` - create a starter `config.toml`
//! - `status` - print the seeded world summary
//!
//! See the library crate docs for module-level details: `castlemud::`.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use castlemud::config::Config;
use castlemud::engine::GameEngine;
use castlemud::net::GameServer;
use castlemud::world::seed::build_world;

#[derive(Parser)]
#[command(name = "castlemud")]
#[command(about = "A small multiplayer dungeon server over WebSockets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Start {
        /// Listen address (overrides the config file)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Initialize a new configuration file
    Init,
    /// Show the seeded world summary
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the default config later; everything else loads it first.
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Start { bind } => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            info!("Starting castlemud v{}", env!("CARGO_PKG_VERSION"));

            let world = build_world();
            info!(
                "World seeded: {} rooms, {} creatures",
                world.room_count(),
                world.mob_count()
            );

            let engine = Arc::new(GameEngine::new(world));
            engine.spawn_respawn_ticker(Duration::from_millis(config.game.respawn_tick_ms));

            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            GameServer::new(engine, bind).run().await
        }
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("Created {}", cli.config);
            println!("Edit it, then run: castlemud start");
            Ok(())
        }
        Commands::Status => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            let world = build_world();
            println!("castlemud v{}", env!("CARGO_PKG_VERSION"));
            println!("Bind address: {}", config.server.bind);
            println!("Rooms: {}", world.room_count());
            println!("Creatures: {}", world.mob_count());
            println!("Respawn tick: {} ms", config.game.respawn_tick_ms);
            Ok(())
        }
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level.
    let level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);
    builder.init();
}
